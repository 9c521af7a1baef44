//! Boleto checklist domain logic.
//!
//! A flat list of bills with a paid flag. Listing puts unpaid bills
//! first, each group ordered by due date, so the checklist reads
//! top-down as "what to pay next".

use anyhow::Result;
use log::info;
use std::sync::{Arc, Mutex};

use crate::domain::commands::boletos::UpsertBoletoCommand;
use crate::domain::event_service::EventService;
use chrono::NaiveDate;
use shared::{Boleto, BoletoSummary, BoletoValidationError, ChecklistItem};

struct BoletoState {
    boletos: Vec<Boleto>,
    next_id: u64,
}

/// Boleto service that handles the payment checklist
#[derive(Clone)]
pub struct BoletoService {
    state: Arc<Mutex<BoletoState>>,
}

impl BoletoService {
    /// Create a new BoletoService instance
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BoletoState {
                boletos: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a boleto, or replace one when the command carries an id
    pub fn upsert_boleto(&self, command: UpsertBoletoCommand) -> Result<Boleto> {
        if command.name.trim().is_empty() {
            return Err(BoletoValidationError::EmptyName.into());
        }
        if command.amount <= 0.0 {
            return Err(BoletoValidationError::AmountNotPositive.into());
        }

        let mut state = self.lock_state();
        match command.id {
            Some(id) => {
                let boleto = state
                    .boletos
                    .iter_mut()
                    .find(|b| b.id == id)
                    .ok_or_else(|| anyhow::anyhow!("Boleto not found: {}", id))?;
                boleto.name = command.name.trim().to_string();
                boleto.amount = command.amount;
                boleto.due_date = command.due_date;
                boleto.paid = command.paid;
                info!("📋 CHECKLIST: Updated boleto id={}", id);
                Ok(boleto.clone())
            }
            None => {
                let boleto = Boleto {
                    id: state.next_id,
                    name: command.name.trim().to_string(),
                    amount: command.amount,
                    due_date: command.due_date,
                    paid: command.paid,
                };
                state.next_id += 1;
                state.boletos.push(boleto.clone());
                info!("📋 CHECKLIST: Created boleto id={} ({})", boleto.id, boleto.name);
                Ok(boleto)
            }
        }
    }

    /// Flip the paid flag of a boleto
    pub fn toggle_paid(&self, id: u64) -> Result<Boleto> {
        let mut state = self.lock_state();
        let boleto = state
            .boletos
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| anyhow::anyhow!("Boleto not found: {}", id))?;

        boleto.paid = !boleto.paid;
        info!("📋 CHECKLIST: Boleto id={} paid={}", id, boleto.paid);
        Ok(boleto.clone())
    }

    /// Delete a boleto by id
    pub fn delete_boleto(&self, id: u64) -> Result<()> {
        let mut state = self.lock_state();
        let before = state.boletos.len();
        state.boletos.retain(|b| b.id != id);

        if state.boletos.len() == before {
            return Err(anyhow::anyhow!("Boleto not found: {}", id));
        }
        info!("📋 CHECKLIST: Deleted boleto id={}", id);
        Ok(())
    }

    /// Checklist order: unpaid first, then by due date within each group
    pub fn list_boletos(&self) -> Vec<Boleto> {
        let mut boletos = self.lock_state().boletos.clone();
        boletos.sort_by(|a, b| a.paid.cmp(&b.paid).then(a.due_date.cmp(&b.due_date)));
        boletos
    }

    /// Checklist rows in list order, classified by the calendar's
    /// urgency rules; paid items carry the fixed "Pago" label
    pub fn checklist(&self, event_service: &EventService, today: NaiveDate) -> Vec<ChecklistItem> {
        self.list_boletos()
            .into_iter()
            .map(|boleto| ChecklistItem {
                urgency: event_service.checklist_urgency(boleto.due_date, boleto.paid, today),
                urgency_label: event_service.checklist_label(boleto.due_date, boleto.paid, today),
                boleto,
            })
            .collect()
    }

    /// Count and total of unpaid boletos
    pub fn unpaid_summary(&self) -> BoletoSummary {
        let state = self.lock_state();
        let unpaid: Vec<&Boleto> = state.boletos.iter().filter(|b| !b.paid).collect();
        BoletoSummary {
            unpaid_count: unpaid.len(),
            unpaid_total: unpaid.iter().map(|b| b.amount).sum(),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BoletoState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for BoletoService {
    fn default() -> Self {
        Self::new()
    }
}
