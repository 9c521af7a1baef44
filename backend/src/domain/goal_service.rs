//! Goal domain logic.
//!
//! Savings goals keep a running contribution total against a target
//! amount and date. Progress may exceed 100% internally; only the
//! display helper on the shared type clamps it.

use anyhow::Result;
use log::info;
use std::sync::{Arc, Mutex};

use crate::domain::commands::goals::{
    ContributeToGoalCommand, CreateGoalCommand, UpdateGoalCommand,
};
use shared::{Goal, GoalValidationError};

struct GoalState {
    goals: Vec<Goal>,
    next_id: u64,
}

/// Goal service that handles all goal-related business logic
#[derive(Clone)]
pub struct GoalService {
    state: Arc<Mutex<GoalState>>,
}

impl GoalService {
    /// Create a new GoalService instance
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(GoalState {
                goals: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a goal after validating name and target
    pub fn create_goal(&self, command: CreateGoalCommand) -> Result<Goal> {
        Self::validate(&command.name, command.target_amount)?;

        let mut state = self.lock_state();
        let goal = Goal {
            id: state.next_id,
            name: command.name.trim().to_string(),
            current_amount: command.current_amount.max(0.0),
            target_amount: command.target_amount,
            target_date: command.target_date,
        };
        state.next_id += 1;
        state.goals.push(goal.clone());

        info!("🎯 GOAL: Created goal id={} ({})", goal.id, goal.name);
        Ok(goal)
    }

    /// Replace a goal's fields, the running total included
    pub fn update_goal(&self, command: UpdateGoalCommand) -> Result<Goal> {
        Self::validate(&command.name, command.target_amount)?;

        let mut state = self.lock_state();
        let goal = state
            .goals
            .iter_mut()
            .find(|g| g.id == command.id)
            .ok_or_else(|| anyhow::anyhow!("Goal not found: {}", command.id))?;

        goal.name = command.name.trim().to_string();
        goal.current_amount = command.current_amount.max(0.0);
        goal.target_amount = command.target_amount;
        goal.target_date = command.target_date;

        info!("🎯 GOAL: Updated goal id={}", command.id);
        Ok(goal.clone())
    }

    /// Add a positive contribution to a goal's current amount
    pub fn contribute(&self, command: ContributeToGoalCommand) -> Result<Goal> {
        if command.amount <= 0.0 {
            return Err(GoalValidationError::NonPositiveContribution.into());
        }

        let mut state = self.lock_state();
        let goal = state
            .goals
            .iter_mut()
            .find(|g| g.id == command.id)
            .ok_or_else(|| anyhow::anyhow!("Goal not found: {}", command.id))?;

        goal.current_amount += command.amount;

        info!(
            "🎯 GOAL: Contribution of {:.2} to goal id={} (now {:.2}/{:.2})",
            command.amount, goal.id, goal.current_amount, goal.target_amount
        );
        Ok(goal.clone())
    }

    /// Delete a goal by id
    pub fn delete_goal(&self, id: u64) -> Result<()> {
        let mut state = self.lock_state();
        let before = state.goals.len();
        state.goals.retain(|g| g.id != id);

        if state.goals.len() == before {
            return Err(anyhow::anyhow!("Goal not found: {}", id));
        }

        info!("🎯 GOAL: Deleted goal id={}", id);
        Ok(())
    }

    /// Snapshot of every goal in insertion order
    pub fn list_goals(&self) -> Vec<Goal> {
        self.lock_state().goals.clone()
    }

    fn validate(name: &str, target_amount: f64) -> Result<()> {
        if name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName.into());
        }
        if target_amount <= 0.0 {
            return Err(GoalValidationError::NonPositiveTarget.into());
        }
        Ok(())
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, GoalState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for GoalService {
    fn default() -> Self {
        Self::new()
    }
}
