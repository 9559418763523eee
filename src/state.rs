use crate::config::AppConfig;
use crate::store::AttendanceStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<Mutex<AttendanceStore>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: AttendanceStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
        }
    }
}
