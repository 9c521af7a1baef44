//! Assistant context assembly.
//!
//! The assistant sees a JSON snapshot of the user's finances prepended
//! to each question. The window policy bounds how much of the store
//! and conversation gets serialized so the payload cannot grow without
//! limit as data accumulates.

use log::info;
use serde::Serialize;

use shared::{CalendarEvent, ChatMessage, Goal, KpiSummary, Transaction};

/// Snapshot of the user's finances sent with each question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub dashboard: KpiSummary,
    pub transactions: Vec<Transaction>,
    pub calendar_events: Vec<CalendarEvent>,
    pub goals: Vec<Goal>,
}

/// Caps on what gets serialized into the provider payload.
#[derive(Debug, Clone, Copy)]
pub struct ContextWindowPolicy {
    /// Most recent transactions kept in the snapshot.
    pub max_transactions: usize,
    /// Most recent conversation turns sent as history.
    pub max_history_turns: usize,
}

impl Default for ContextWindowPolicy {
    fn default() -> Self {
        Self {
            max_transactions: 200,
            max_history_turns: 20,
        }
    }
}

impl ContextWindowPolicy {
    /// Keep the most recent transactions, preserving their order
    pub fn window_transactions(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        if transactions.len() > self.max_transactions {
            let dropped = transactions.len() - self.max_transactions;
            info!(
                "🤖 AI: Context window dropped {} older transactions (cap {})",
                dropped, self.max_transactions
            );
            transactions
                .into_iter()
                .skip(dropped)
                .collect()
        } else {
            transactions
        }
    }

    /// Keep the most recent conversation turns, preserving their order
    pub fn window_history(&self, history: &[ChatMessage]) -> Vec<ChatMessage> {
        if history.len() > self.max_history_turns {
            let dropped = history.len() - self.max_history_turns;
            info!(
                "🤖 AI: Context window dropped {} older history turns (cap {})",
                dropped, self.max_history_turns
            );
            history[dropped..].to_vec()
        } else {
            history.to_vec()
        }
    }
}

/// Build the prompt the provider receives: the financial snapshot as
/// JSON followed by the user's question
pub fn build_prompt(user_data: &UserData, question: &str) -> String {
    // to_string on these derives cannot fail; fall back to an empty
    // object just in case f64 ever produces a non-finite value.
    let json = serde_json::to_string(user_data).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Dados financeiros do usuário (JSON):\n{}\n\nPergunta: {}",
        json, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{MessageRole, TransactionType};

    fn tx(id: u64) -> Transaction {
        Transaction {
            id,
            description: format!("Transação {}", id),
            amount: 10.0,
            transaction_type: TransactionType::Expense,
            category: "Outros".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    fn turn(text: &str) -> ChatMessage {
        ChatMessage {
            role: MessageRole::User,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_window_keeps_most_recent_transactions() {
        let policy = ContextWindowPolicy {
            max_transactions: 3,
            max_history_turns: 20,
        };
        let transactions: Vec<Transaction> = (1..=5).map(tx).collect();

        let windowed = policy.window_transactions(transactions);
        let ids: Vec<u64> = windowed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_window_under_cap_is_untouched() {
        let policy = ContextWindowPolicy::default();
        let transactions: Vec<Transaction> = (1..=5).map(tx).collect();

        assert_eq!(policy.window_transactions(transactions).len(), 5);
    }

    #[test]
    fn test_window_history_keeps_tail() {
        let policy = ContextWindowPolicy {
            max_transactions: 200,
            max_history_turns: 2,
        };
        let history = vec![turn("a"), turn("b"), turn("c")];

        let windowed = policy.window_history(&history);
        assert_eq!(windowed.len(), 2);
        assert_eq!(windowed[0].text, "b");
        assert_eq!(windowed[1].text, "c");
    }

    #[test]
    fn test_build_prompt_shape() {
        let user_data = UserData {
            dashboard: KpiSummary {
                total_balance: 100.0,
                monthly_income: 50.0,
                monthly_expenses: 30.0,
                next_bill: None,
            },
            transactions: vec![],
            calendar_events: vec![],
            goals: vec![],
        };

        let prompt = build_prompt(&user_data, "Como economizar?");
        assert!(prompt.starts_with("Dados financeiros do usuário (JSON):\n"));
        assert!(prompt.ends_with("\n\nPergunta: Como economizar?"));
        assert!(prompt.contains("\"totalBalance\":100.0"));
        assert!(prompt.contains("\"calendarEvents\":[]"));
    }
}
