//! Shared data types for ContaMestre.
//!
//! Everything the screens exchange with the backend lives here: the
//! financial records themselves (transactions, goals, calendar events,
//! boletos), the community feed types, the dashboard summaries and the
//! theme/profile settings. Field names serialize in the same shape the
//! web client persists and ships to the assistant (camelCase where the
//! original payloads used it).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a transaction adds to or subtracts from the balance.
///
/// The stored amount is always positive; the sign of its contribution
/// to any total comes solely from this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub description: String,
    /// Always positive; see [`TransactionType`].
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Payment status of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Paid,
    Pending,
    Overdue,
}

impl EventStatus {
    pub fn label_pt(&self) -> &'static str {
        match self {
            EventStatus::Paid => "Pago",
            EventStatus::Pending => "Pendente",
            EventStatus::Overdue => "Atrasado",
        }
    }
}

/// Three-tier urgency, both user-set on events and derived for
/// checklist items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn label_pt(&self) -> &'static str {
        match self {
            Urgency::High => "Alta",
            Urgency::Medium => "Média",
            Urgency::Low => "Baixa",
        }
    }
}

/// Reminder lead time for a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reminder {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "2d")]
    TwoDays,
}

/// A scheduled payment (or receipt) on the calendar.
///
/// Deliberately independent of [`Transaction`]: a bill can appear in
/// both models without any referential link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: u64,
    pub title: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub status: EventStatus,
    /// User-set, never derived.
    pub urgency: Urgency,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub reminder: Reminder,
}

/// A bill on the payment checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boleto {
    pub id: u64,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid: bool,
}

/// Unpaid-boletos roll-up shown above the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoletoSummary {
    pub unpaid_count: usize,
    pub unpaid_total: f64,
}

/// A boleto with its derived checklist classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub boleto: Boleto,
    /// `None` when the boleto is paid.
    pub urgency: Option<Urgency>,
    /// "Pago" when paid, the urgency tier label otherwise.
    pub urgency_label: String,
}

/// A savings goal with a running contribution total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u64,
    pub name: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub target_date: NaiveDate,
}

impl Goal {
    /// Raw progress ratio; can exceed 1.0 when the goal is overshot.
    pub fn progress_ratio(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.current_amount / self.target_amount
        } else {
            0.0
        }
    }

    /// Progress percentage clamped to [0, 100] for display only.
    pub fn display_progress_percent(&self) -> f64 {
        (self.progress_ratio() * 100.0).clamp(0.0, 100.0)
    }
}

/// Discussion topics of the community feed (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunityTopic {
    #[serde(rename = "Finanças Pessoais")]
    FinancasPessoais,
    #[serde(rename = "Investimentos")]
    Investimentos,
    #[serde(rename = "PJ & MEI")]
    PjMei,
}

impl fmt::Display for CommunityTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommunityTopic::FinancasPessoais => "Finanças Pessoais",
            CommunityTopic::Investimentos => "Investimentos",
            CommunityTopic::PjMei => "PJ & MEI",
        };
        write!(f, "{}", label)
    }
}

/// One option of a community poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: u64,
    pub text: String,
    pub votes: u32,
}

/// A poll attached to a post. Votes are anonymous counters; repeat
/// voting is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
}

/// The single, mutually exclusive attachment of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PostAttachment {
    Image { url: String },
    Video { url: String },
    Gif { url: String },
    Poll { poll: Poll },
}

/// A comment under a community post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub time: String,
}

/// A community feed post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPost {
    pub id: u64,
    pub author: String,
    pub author_avatar: Option<String>,
    pub topic: CommunityTopic,
    /// Relative time label as shown in the feed ("Agora", "2h", ...).
    pub time: String,
    pub content: String,
    pub likes: u32,
    pub dislikes: u32,
    pub comments: Vec<Comment>,
    pub pinned_comment_id: Option<u64>,
    pub attachment: Option<PostAttachment>,
}

/// The signed-in user's public profile. Images are base64 data URIs
/// held in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub profession: String,
    pub website: String,
    pub avatar: Option<String>,
    pub cover_photo: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Usuário".to_string(),
            email: "usuario@contamestre.com".to_string(),
            bio: String::new(),
            profession: String::new(),
            website: String::new(),
            avatar: None,
            cover_photo: None,
        }
    }
}

pub const DEFAULT_PRIMARY_COLOR: &str = "#007A5E";
pub const DEFAULT_ACCENT_COLOR: &str = "#FFC857";

/// Visual theme; the only entity persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Logo image as a data URI; empty string means "use the built-in".
    pub logo: String,
    pub primary_color: String,
    pub accent_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            logo: String::new(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

/// One turn of the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
}

/// The expense selected as "next bill" on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextBill {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub days_until: i64,
}

/// Dashboard KPI roll-up; also the head of the assistant context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_balance: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub next_bill: Option<NextBill>,
}

/// One bar pair of the trailing cash-flow chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    /// Abbreviated month label ("Jan", "Fev", ...).
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

/// An unpaid calendar event surfaced on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingBill {
    pub event_id: u64,
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub urgency: Urgency,
    pub countdown: String,
}

/// Type of calendar cell, so the grid never guesses from sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month.
    PaddingBefore,
    /// Actual day within the month.
    MonthDay,
}

/// A single cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// 1-based day of month; 0 for padding cells.
    pub day: u32,
    pub day_type: CalendarDayType,
    pub events: Vec<CalendarEvent>,
}

/// A month of the payment calendar, ready for a 7-column grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: u32,
    /// Weekday of day 1 (0 = Sunday .. 6 = Saturday).
    pub first_day_of_week: u32,
    pub days: Vec<CalendarDay>,
}

/// Result of an IRPF simulation. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxAssessment {
    pub base: f64,
    pub bracket_rate: f64,
    pub deduction: f64,
    pub tax_due: f64,
    pub effective_rate: f64,
}

/// Raw figures entered for a DRE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreInput {
    pub gross_revenue: f64,
    pub deductions: f64,
    pub cmv: f64,
    pub operating_expenses: f64,
    pub financial_result: f64,
    pub tax_estimate: f64,
}

/// One line of the rendered DRE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreLine {
    pub label: String,
    pub value: f64,
}

/// A computed DRE statement: inputs plus every derived subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreStatement {
    pub input: DreInput,
    pub net_revenue: f64,
    pub gross_profit: f64,
    pub operating_result: f64,
    pub result_before_tax: f64,
    pub net_profit: f64,
}

/// Validation failures for transaction forms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("A descrição é obrigatória")]
    EmptyDescription,
    #[error("O valor da transação deve ser positivo")]
    AmountNotPositive,
}

/// Validation failures for goal forms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoalValidationError {
    #[error("O nome da meta é obrigatório")]
    EmptyName,
    #[error("O valor alvo deve ser positivo")]
    NonPositiveTarget,
    #[error("A contribuição deve ser positiva")]
    NonPositiveContribution,
}

/// Validation failures for calendar event forms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventValidationError {
    #[error("O título é obrigatório")]
    EmptyTitle,
}

/// Validation failures for boleto forms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoletoValidationError {
    #[error("A descrição é obrigatória")]
    EmptyName,
    #[error("O valor do boleto deve ser positivo")]
    AmountNotPositive,
}

/// Validation failures for community posts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PostValidationError {
    #[error("O conteúdo da publicação é obrigatório")]
    EmptyContent,
    #[error("A enquete precisa de uma pergunta")]
    EmptyPollQuestion,
    #[error("A enquete precisa de pelo menos duas opções")]
    NotEnoughPollOptions,
}

/// Format a value as Brazilian currency ("R$ 1.234,56").
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let formatted = format!("R$ {},{:02}", grouped, frac);
    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Accounting-style currency: negatives wrapped in parentheses, as the
/// DRE screen renders them. Display-only; exports use raw numbers.
pub fn format_brl_accounting(value: f64) -> String {
    if value < 0.0 {
        format!("({})", format_brl(value.abs()))
    } else {
        format_brl(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount_follows_type() {
        let income = Transaction {
            id: 1,
            description: "Salário".to_string(),
            amount: 5000.0,
            transaction_type: TransactionType::Income,
            category: "Salário".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        let expense = Transaction {
            amount: 1200.0,
            transaction_type: TransactionType::Expense,
            ..income.clone()
        };

        assert_eq!(income.signed_amount(), 5000.0);
        assert_eq!(expense.signed_amount(), -1200.0);
    }

    #[test]
    fn test_goal_progress_ratio_can_exceed_one() {
        let goal = Goal {
            id: 1,
            name: "Reserva".to_string(),
            current_amount: 18000.0,
            target_amount: 15000.0,
            target_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        };

        assert!(goal.progress_ratio() > 1.0);
        assert_eq!(goal.display_progress_percent(), 100.0);
    }

    #[test]
    fn test_goal_progress_with_zero_target() {
        let goal = Goal {
            id: 1,
            name: "Meta vazia".to_string(),
            current_amount: 100.0,
            target_amount: 0.0,
            target_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        };

        assert_eq!(goal.progress_ratio(), 0.0);
        assert_eq!(goal.display_progress_percent(), 0.0);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-500.0), "-R$ 500,00");
        assert_eq!(format_brl(99.9), "R$ 99,90");
    }

    #[test]
    fn test_format_brl_accounting_wraps_negatives() {
        assert_eq!(format_brl_accounting(-1500.0), "(R$ 1.500,00)");
        assert_eq!(format_brl_accounting(1500.0), "R$ 1.500,00");
    }

    #[test]
    fn test_theme_default_colors() {
        let theme = Theme::default();
        assert_eq!(theme.primary_color, "#007A5E");
        assert_eq!(theme.accent_color, "#FFC857");
        assert!(theme.logo.is_empty());
    }

    #[test]
    fn test_theme_serializes_camel_case() {
        let theme = Theme::default();
        let json = serde_json::to_value(&theme).unwrap();
        assert!(json.get("primaryColor").is_some());
        assert!(json.get("accentColor").is_some());
        assert!(json.get("logo").is_some());
    }

    #[test]
    fn test_transaction_type_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, "\"income\"");
        let json = serde_json::to_string(&TransactionType::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }

    #[test]
    fn test_attachment_tagged_serialization() {
        let attachment = PostAttachment::Poll {
            poll: Poll {
                question: "Melhor investimento?".to_string(),
                options: vec![
                    PollOption { id: 1, text: "Tesouro".to_string(), votes: 0 },
                    PollOption { id: 2, text: "FIIs".to_string(), votes: 0 },
                ],
            },
        };

        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json.get("kind").unwrap(), "poll");

        let image = PostAttachment::Image { url: "data:image/png;base64,xyz".to_string() };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json.get("kind").unwrap(), "image");
        assert_eq!(json.get("url").unwrap(), "data:image/png;base64,xyz");
    }

    #[test]
    fn test_community_topic_round_trip() {
        for topic in [
            CommunityTopic::FinancasPessoais,
            CommunityTopic::Investimentos,
            CommunityTopic::PjMei,
        ] {
            let json = serde_json::to_string(&topic).unwrap();
            let back: CommunityTopic = serde_json::from_str(&json).unwrap();
            assert_eq!(back, topic);
        }
        assert_eq!(
            serde_json::to_string(&CommunityTopic::PjMei).unwrap(),
            "\"PJ & MEI\""
        );
    }

    #[test]
    fn test_reminder_wire_values() {
        assert_eq!(serde_json::to_string(&Reminder::None).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&Reminder::OneHour).unwrap(), "\"1h\"");
        assert_eq!(serde_json::to_string(&Reminder::OneDay).unwrap(), "\"1d\"");
        assert_eq!(serde_json::to_string(&Reminder::TwoDays).unwrap(), "\"2d\"");
    }
}
