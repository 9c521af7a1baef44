//! Dashboard aggregation logic.
//!
//! Pure functions over the other stores' snapshots: the KPI cards, the
//! trailing cash-flow chart and the upcoming-bills card. Nothing here
//! mutates state; "today" is always passed in so the math is
//! deterministic under test.

use chrono::{Datelike, NaiveDate};

use crate::domain::event_service::EventService;
use shared::{
    CalendarEvent, EventStatus, KpiSummary, MonthlyCashFlow, NextBill, Transaction,
    TransactionType, UpcomingBill,
};

/// Abbreviated Portuguese month labels, indexed by month - 1.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Dashboard service that computes all KPI aggregations
#[derive(Clone)]
pub struct DashboardService {
    // No internal state needed for now
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new() -> Self {
        Self {}
    }

    /// Signed sum over all transactions; order independent
    pub fn total_balance(&self, transactions: &[Transaction]) -> f64 {
        transactions.iter().map(|t| t.signed_amount()).sum()
    }

    /// Income total for today's calendar month
    pub fn monthly_income(&self, transactions: &[Transaction], today: NaiveDate) -> f64 {
        self.monthly_sum(transactions, today, TransactionType::Income)
    }

    /// Expense total for today's calendar month
    pub fn monthly_expenses(&self, transactions: &[Transaction], today: NaiveDate) -> f64 {
        self.monthly_sum(transactions, today, TransactionType::Expense)
    }

    /// The chronologically nearest expense dated today or later
    ///
    /// A tie on date goes to the transaction that appears first in the
    /// slice, so repeated calls over an unchanged store give the same
    /// answer.
    pub fn next_bill(&self, transactions: &[Transaction], today: NaiveDate) -> Option<NextBill> {
        transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense && t.date >= today)
            .min_by_key(|t| t.date)
            .map(|t| NextBill {
                description: t.description.clone(),
                amount: t.amount,
                date: t.date,
                days_until: (t.date - today).num_days(),
            })
    }

    /// Income/expense totals for the trailing `months` calendar months,
    /// oldest first, ending with today's month
    pub fn monthly_cash_flow(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
        months: u32,
    ) -> Vec<MonthlyCashFlow> {
        let mut series = Vec::new();
        let mut month = today.month();
        let mut year = today.year();

        let mut window = Vec::new();
        for _ in 0..months {
            window.push((month, year));
            if month == 1 {
                month = 12;
                year -= 1;
            } else {
                month -= 1;
            }
        }
        window.reverse();

        for (m, y) in window {
            let mut income = 0.0;
            let mut expenses = 0.0;
            for t in transactions {
                if t.date.month() == m && t.date.year() == y {
                    match t.transaction_type {
                        TransactionType::Income => income += t.amount,
                        TransactionType::Expense => expenses += t.amount,
                    }
                }
            }
            series.push(MonthlyCashFlow {
                label: MONTH_LABELS[(m - 1) as usize].to_string(),
                income,
                expenses,
            });
        }

        series
    }

    /// Unpaid calendar events sorted by due date, with countdown text
    /// and the user-set urgency, capped at `limit`
    pub fn upcoming_bills(
        &self,
        events: &[CalendarEvent],
        event_service: &EventService,
        today: NaiveDate,
        limit: usize,
    ) -> Vec<UpcomingBill> {
        let mut unpaid: Vec<&CalendarEvent> = events
            .iter()
            .filter(|e| e.status != EventStatus::Paid)
            .collect();
        unpaid.sort_by_key(|e| e.date);

        unpaid
            .into_iter()
            .take(limit)
            .map(|e| UpcomingBill {
                event_id: e.id,
                title: e.title.clone(),
                amount: e.amount,
                due_date: e.date,
                urgency: e.urgency,
                countdown: event_service.countdown_text(e.date, e.status, today),
            })
            .collect()
    }

    /// The four KPI cards in one call
    pub fn kpi_summary(&self, transactions: &[Transaction], today: NaiveDate) -> KpiSummary {
        KpiSummary {
            total_balance: self.total_balance(transactions),
            monthly_income: self.monthly_income(transactions, today),
            monthly_expenses: self.monthly_expenses(transactions, today),
            next_bill: self.next_bill(transactions, today),
        }
    }

    fn monthly_sum(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
        wanted: TransactionType,
    ) -> f64 {
        transactions
            .iter()
            .filter(|t| {
                t.transaction_type == wanted
                    && t.date.month() == today.month()
                    && t.date.year() == today.year()
            })
            .map(|t| t.amount)
            .sum()
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
