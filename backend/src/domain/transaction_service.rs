//! Transaction domain logic.
//!
//! Owns the in-memory transaction store and all create/update/delete
//! rules. Amounts are stored positive; the transaction type alone
//! decides the sign of a transaction's contribution to any total.

use anyhow::Result;
use log::{info, warn};
use std::sync::{Arc, Mutex};

use crate::domain::commands::transactions::{
    CreateTransactionCommand, TransactionListQuery, UpdateTransactionCommand,
};
use shared::{Transaction, TransactionValidationError};

struct TransactionState {
    transactions: Vec<Transaction>,
    next_id: u64,
}

/// Transaction service that handles all transaction-related business logic
#[derive(Clone)]
pub struct TransactionService {
    state: Arc<Mutex<TransactionState>>,
}

impl TransactionService {
    /// Create a new TransactionService instance
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(TransactionState {
                transactions: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a transaction after validating the form fields
    pub fn create_transaction(&self, command: CreateTransactionCommand) -> Result<Transaction> {
        Self::validate(&command.description, command.amount)?;

        let mut state = self.lock_state();
        let transaction = Transaction {
            id: state.next_id,
            description: command.description.trim().to_string(),
            amount: command.amount,
            transaction_type: command.transaction_type,
            category: command.category,
            date: command.date,
        };
        state.next_id += 1;
        state.transactions.push(transaction.clone());

        info!(
            "💸 TRANSACTION: Created transaction id={} ({:?}, {:.2})",
            transaction.id, transaction.transaction_type, transaction.amount
        );
        Ok(transaction)
    }

    /// Replace the fields of an existing transaction
    pub fn update_transaction(&self, command: UpdateTransactionCommand) -> Result<Transaction> {
        Self::validate(&command.description, command.amount)?;

        let mut state = self.lock_state();
        let transaction = state
            .transactions
            .iter_mut()
            .find(|t| t.id == command.id)
            .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", command.id))?;

        transaction.description = command.description.trim().to_string();
        transaction.amount = command.amount;
        transaction.transaction_type = command.transaction_type;
        transaction.category = command.category;
        transaction.date = command.date;

        info!("💸 TRANSACTION: Updated transaction id={}", command.id);
        Ok(transaction.clone())
    }

    /// Delete a transaction by id
    pub fn delete_transaction(&self, id: u64) -> Result<()> {
        let mut state = self.lock_state();
        let before = state.transactions.len();
        state.transactions.retain(|t| t.id != id);

        if state.transactions.len() == before {
            warn!("💸 TRANSACTION: Delete requested for unknown id={}", id);
            return Err(anyhow::anyhow!("Transaction not found: {}", id));
        }

        info!("💸 TRANSACTION: Deleted transaction id={}", id);
        Ok(())
    }

    /// List transactions, optionally filtered by type and description search
    pub fn list_transactions(&self, query: TransactionListQuery) -> Vec<Transaction> {
        let state = self.lock_state();
        let search = query.search.as_deref().map(str::to_lowercase);

        state
            .transactions
            .iter()
            .filter(|t| match query.transaction_type {
                Some(wanted) => t.transaction_type == wanted,
                None => true,
            })
            .filter(|t| match &search {
                Some(needle) => t.description.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Snapshot of every transaction in insertion order
    pub fn all_transactions(&self) -> Vec<Transaction> {
        self.lock_state().transactions.clone()
    }

    fn validate(description: &str, amount: f64) -> Result<()> {
        if description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription.into());
        }
        if amount <= 0.0 {
            return Err(TransactionValidationError::AmountNotPositive.into());
        }
        Ok(())
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, TransactionState> {
        // Lock poisoning only happens after a panic in another holder;
        // the data is still consistent for our read/write patterns.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::TransactionType;

    fn create_command(description: &str, amount: f64, tx_type: TransactionType) -> CreateTransactionCommand {
        CreateTransactionCommand {
            description: description.to_string(),
            amount,
            transaction_type: tx_type,
            category: "Outros".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let service = TransactionService::new();

        let a = service
            .create_transaction(create_command("Salário", 5000.0, TransactionType::Income))
            .unwrap();
        let b = service
            .create_transaction(create_command("Aluguel", 1800.0, TransactionType::Expense))
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let service = TransactionService::new();

        let a = service
            .create_transaction(create_command("Salário", 5000.0, TransactionType::Income))
            .unwrap();
        service.delete_transaction(a.id).unwrap();

        let b = service
            .create_transaction(create_command("Freela", 1200.0, TransactionType::Income))
            .unwrap();
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_create_rejects_empty_description() {
        let service = TransactionService::new();

        let result = service.create_transaction(create_command("   ", 100.0, TransactionType::Expense));
        assert!(result.is_err());
        assert_eq!(service.all_transactions().len(), 0);
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let service = TransactionService::new();

        assert!(service
            .create_transaction(create_command("Mercado", 0.0, TransactionType::Expense))
            .is_err());
        assert!(service
            .create_transaction(create_command("Mercado", -50.0, TransactionType::Expense))
            .is_err());
    }

    #[test]
    fn test_list_filters_by_type() {
        let service = TransactionService::new();
        service
            .create_transaction(create_command("Salário", 5000.0, TransactionType::Income))
            .unwrap();
        service
            .create_transaction(create_command("Aluguel", 1800.0, TransactionType::Expense))
            .unwrap();

        let expenses = service.list_transactions(TransactionListQuery {
            transaction_type: Some(TransactionType::Expense),
            search: None,
        });

        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Aluguel");
    }

    #[test]
    fn test_list_search_is_case_insensitive() {
        let service = TransactionService::new();
        service
            .create_transaction(create_command("Conta de Luz", 220.0, TransactionType::Expense))
            .unwrap();
        service
            .create_transaction(create_command("Internet", 99.9, TransactionType::Expense))
            .unwrap();

        let found = service.list_transactions(TransactionListQuery {
            transaction_type: None,
            search: Some("luz".to_string()),
        });

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Conta de Luz");
    }

    #[test]
    fn test_update_replaces_fields() {
        let service = TransactionService::new();
        let created = service
            .create_transaction(create_command("Mercado", 300.0, TransactionType::Expense))
            .unwrap();

        let updated = service
            .update_transaction(UpdateTransactionCommand {
                id: created.id,
                description: "Mercado do mês".to_string(),
                amount: 450.0,
                transaction_type: TransactionType::Expense,
                category: "Alimentação".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            })
            .unwrap();

        assert_eq!(updated.amount, 450.0);
        assert_eq!(updated.category, "Alimentação");
        assert_eq!(service.all_transactions().len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_errors() {
        let service = TransactionService::new();
        assert!(service.delete_transaction(42).is_err());
    }
}
