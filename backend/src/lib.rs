//! # ContaMestre backend
//!
//! Domain services and storage for the ContaMestre personal finance
//! dashboard. A frontend talks to one [`Backend`] instance; there is
//! no REST layer in between. The backend:
//! - Keeps all financial data in memory, theme excepted
//! - Exposes synchronous domain operations; only the assistant is async
//! - Owns id assignment and validation for every store

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

pub mod ai;
pub mod domain;
pub mod storage;

use ai::{AssistantService, ContextWindowPolicy, GeminiClient, UserData};
use chrono::{Local, NaiveDate};
use storage::ThemeRepository;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub transaction_service: domain::TransactionService,
    pub goal_service: domain::GoalService,
    pub event_service: domain::EventService,
    pub boleto_service: domain::BoletoService,
    pub dashboard_service: domain::DashboardService,
    pub tax_service: domain::TaxService,
    pub report_service: domain::ReportService,
    pub community_service: domain::CommunityService,
    pub profile_service: domain::ProfileService,
    pub theme_repository: ThemeRepository,
    /// Present only when GEMINI_API_KEY is set.
    pub assistant_service: Option<AssistantService>,
}

impl Backend {
    /// Create a new backend instance with all services
    ///
    /// The assistant is wired only when GEMINI_API_KEY is set; every
    /// other feature works without it.
    pub fn new() -> Result<Self> {
        let data_dir = Self::default_data_dir();
        std::fs::create_dir_all(&data_dir)?;

        let assistant_service = match GeminiClient::from_env() {
            Ok(client) => Some(AssistantService::with_policy(
                Arc::new(client),
                ContextWindowPolicy::default(),
            )),
            Err(err) => {
                log::warn!("🤖 AI: Assistant disabled: {}", err);
                None
            }
        };

        Ok(Backend {
            transaction_service: domain::TransactionService::new(),
            goal_service: domain::GoalService::new(),
            event_service: domain::EventService::new(),
            boleto_service: domain::BoletoService::new(),
            dashboard_service: domain::DashboardService::new(),
            tax_service: domain::TaxService::new(),
            report_service: domain::ReportService::new(),
            community_service: domain::CommunityService::new(),
            profile_service: domain::ProfileService::new(),
            theme_repository: ThemeRepository::new(data_dir),
            assistant_service,
        })
    }

    /// Assemble the assistant's financial snapshot from the stores
    pub fn assistant_user_data(&self) -> UserData {
        let today = Self::today();
        let transactions = self.transaction_service.all_transactions();
        UserData {
            dashboard: self.dashboard_service.kpi_summary(&transactions, today),
            transactions,
            calendar_events: self.event_service.list_events(),
            goals: self.goal_service.list_goals(),
        }
    }

    /// Today's date at the local midnight boundary
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("contamestre")
    }
}
