//! Calendar event domain logic.
//!
//! Owns the event store, the month-grid generation, the countdown
//! phrases and the derived checklist urgency. All date math is against
//! calendar days, never clock time, so two evaluations on the same day
//! always agree.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::commands::events::{CreateEventCommand, UpdateEventCommand};
use shared::{
    CalendarDay, CalendarDayType, CalendarEvent, CalendarMonth, EventStatus,
    EventValidationError, Urgency,
};

/// Month/year the calendar view is focused on. Kept in memory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: u32,
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            month: today.month(),
            year: today.year() as u32,
        }
    }
}

struct EventState {
    events: Vec<CalendarEvent>,
    next_id: u64,
}

/// Event service that handles all calendar-related business logic
#[derive(Clone)]
pub struct EventService {
    state: Arc<Mutex<EventState>>,
    /// Current focus date for calendar navigation (month/year only)
    current_focus_date: Arc<Mutex<CalendarFocusDate>>,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(EventState {
                events: Vec::new(),
                next_id: 1,
            })),
            current_focus_date: Arc::new(Mutex::new(CalendarFocusDate::default())),
        }
    }

    /// Create an event after validating the title
    pub fn create_event(&self, command: CreateEventCommand) -> Result<CalendarEvent> {
        if command.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle.into());
        }

        let mut state = self.lock_state();
        let event = CalendarEvent {
            id: state.next_id,
            title: command.title.trim().to_string(),
            date: command.date,
            amount: command.amount,
            status: command.status,
            urgency: command.urgency,
            time: command.time,
            notes: command.notes,
            reminder: command.reminder,
        };
        state.next_id += 1;
        state.events.push(event.clone());

        info!("🗓️ CALENDAR: Created event id={} ({})", event.id, event.title);
        Ok(event)
    }

    /// Replace the fields of an existing event
    pub fn update_event(&self, command: UpdateEventCommand) -> Result<CalendarEvent> {
        if command.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle.into());
        }

        let mut state = self.lock_state();
        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == command.id)
            .ok_or_else(|| anyhow::anyhow!("Event not found: {}", command.id))?;

        event.title = command.title.trim().to_string();
        event.date = command.date;
        event.amount = command.amount;
        event.status = command.status;
        event.urgency = command.urgency;
        event.time = command.time;
        event.notes = command.notes;
        event.reminder = command.reminder;

        info!("🗓️ CALENDAR: Updated event id={}", command.id);
        Ok(event.clone())
    }

    /// Delete an event by id
    pub fn delete_event(&self, id: u64) -> Result<()> {
        let mut state = self.lock_state();
        let before = state.events.len();
        state.events.retain(|e| e.id != id);

        if state.events.len() == before {
            return Err(anyhow::anyhow!("Event not found: {}", id));
        }

        info!("🗓️ CALENDAR: Deleted event id={}", id);
        Ok(())
    }

    /// Snapshot of every event in insertion order
    pub fn list_events(&self) -> Vec<CalendarEvent> {
        self.lock_state().events.clone()
    }

    /// Events scheduled on one calendar day
    pub fn events_on_day(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        self.lock_state()
            .events
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect()
    }

    /// Countdown phrase for an event, relative to midnight of `today`
    pub fn countdown_text(&self, date: NaiveDate, status: EventStatus, today: NaiveDate) -> String {
        if status == EventStatus::Paid {
            return "Evento pago".to_string();
        }

        let days = (date - today).num_days();
        match days {
            0 => "Vence hoje".to_string(),
            1 => "Vence em 1 dia".to_string(),
            d if d > 1 => format!("Vence em {} dias", d),
            -1 => "Vencido há 1 dia".to_string(),
            d => format!("Vencido há {} dias", -d),
        }
    }

    /// Derived urgency tier for checklist-style listings
    ///
    /// Paid items have no tier. Otherwise overdue or due within 3 days
    /// is high, within 7 days medium, anything later low. The user-set
    /// urgency on the event itself is untouched by this.
    pub fn checklist_urgency(&self, date: NaiveDate, paid: bool, today: NaiveDate) -> Option<Urgency> {
        if paid {
            return None;
        }

        let days = (date - today).num_days();
        if days <= 3 {
            Some(Urgency::High)
        } else if days <= 7 {
            Some(Urgency::Medium)
        } else {
            Some(Urgency::Low)
        }
    }

    /// Checklist label: the fixed "Pago" for paid items, the urgency
    /// tier otherwise
    pub fn checklist_label(&self, date: NaiveDate, paid: bool, today: NaiveDate) -> String {
        match self.checklist_urgency(date, paid, today) {
            None => "Pago".to_string(),
            Some(urgency) => urgency.label_pt().to_string(),
        }
    }

    /// Generate a calendar month view with that month's events
    pub fn generate_calendar_month(&self, month: u32, year: u32) -> CalendarMonth {
        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);

        let events = self.lock_state().events.clone();
        let events_by_day = self.group_events_by_day(month, year, &events);

        let mut calendar_days = Vec::new();

        // Empty cells for days before the first day of month
        for _ in 0..first_day {
            calendar_days.push(CalendarDay {
                day: 0,
                day_type: CalendarDayType::PaddingBefore,
                events: Vec::new(),
            });
        }

        for day in 1..=days_in_month {
            calendar_days.push(CalendarDay {
                day,
                day_type: CalendarDayType::MonthDay,
                events: events_by_day.get(&day).cloned().unwrap_or_default(),
            });
        }

        CalendarMonth {
            month,
            year,
            first_day_of_week: first_day,
            days: calendar_days,
        }
    }

    /// Month view for the current focus date
    pub fn current_month(&self) -> CalendarMonth {
        let focus = *self.lock_focus();
        self.generate_calendar_month(focus.month, focus.year)
    }

    /// Move the calendar focus one month back, rolling the year over
    pub fn navigate_previous_month(&self) -> CalendarFocusDate {
        let mut focus = self.lock_focus();
        if focus.month == 1 {
            focus.month = 12;
            focus.year -= 1;
        } else {
            focus.month -= 1;
        }
        info!("🗓️ CALENDAR: Focus moved to {}/{}", focus.month, focus.year);
        *focus
    }

    /// Move the calendar focus one month forward, rolling the year over
    pub fn navigate_next_month(&self) -> CalendarFocusDate {
        let mut focus = self.lock_focus();
        if focus.month == 12 {
            focus.month = 1;
            focus.year += 1;
        } else {
            focus.month += 1;
        }
        info!("🗓️ CALENDAR: Focus moved to {}/{}", focus.month, focus.year);
        *focus
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => if self.is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: u32) -> u32 {
        match NaiveDate::from_ymd_opt(year as i32, month, 1) {
            Some(date) => date.weekday().num_days_from_sunday(),
            None => 0,
        }
    }

    /// Portuguese month name for headers
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "Janeiro",
            2 => "Fevereiro",
            3 => "Março",
            4 => "Abril",
            5 => "Maio",
            6 => "Junho",
            7 => "Julho",
            8 => "Agosto",
            9 => "Setembro",
            10 => "Outubro",
            11 => "Novembro",
            12 => "Dezembro",
            _ => "Mês inválido",
        }
    }

    fn group_events_by_day(
        &self,
        month: u32,
        year: u32,
        events: &[CalendarEvent],
    ) -> HashMap<u32, Vec<CalendarEvent>> {
        let mut by_day: HashMap<u32, Vec<CalendarEvent>> = HashMap::new();
        for event in events {
            if event.date.month() == month && event.date.year() as u32 == year {
                by_day.entry(event.date.day()).or_default().push(event.clone());
            }
        }
        by_day
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, EventState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_focus(&self) -> std::sync::MutexGuard<'_, CalendarFocusDate> {
        match self.current_focus_date.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for EventService {
    fn default() -> Self {
        Self::new()
    }
}
