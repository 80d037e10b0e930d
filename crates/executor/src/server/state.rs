use std::sync::Arc;

use common::config::Settings;

use crate::services::SignalDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<SignalDispatcher>,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, dispatcher: Arc<SignalDispatcher>) -> Self {
        Self {
            settings,
            dispatcher,
        }
    }
}
