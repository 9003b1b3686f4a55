//! Reports module for fintrack
//!
//! Each report corresponds to one view of the tracker: the dashboard
//! overview, spending breakdown, and the monthly calendar summary.
//! Budget standing comes straight from `BudgetService::status_all`.

pub mod calendar;
pub mod dashboard;
pub mod spending;

pub use calendar::{CalendarReport, DayActivity};
pub use dashboard::DashboardReport;
pub use spending::{SpendingReport, SpendingRow};
