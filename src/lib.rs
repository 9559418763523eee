pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod period;
pub mod state;
pub mod stats;
pub mod store;
pub mod streak;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use period::{is_within_period, target_day_set, AttendancePeriod};
pub use state::AppState;
pub use store::{AttendanceStore, CheckInError};
pub use streak::streak;
