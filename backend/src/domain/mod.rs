//! Domain layer: services and the command/query types they accept.

pub mod boleto_service;
pub mod commands;
pub mod community_service;
pub mod dashboard_service;
pub mod event_service;
pub mod goal_service;
pub mod profile_service;
pub mod report_service;
pub mod tax_service;
pub mod transaction_service;

pub use boleto_service::BoletoService;
pub use community_service::CommunityService;
pub use dashboard_service::DashboardService;
pub use event_service::{CalendarFocusDate, EventService};
pub use goal_service::GoalService;
pub use profile_service::ProfileService;
pub use report_service::ReportService;
pub use tax_service::TaxService;
pub use transaction_service::TransactionService;
