use std::sync::Arc;

use crate::db::FeedbackStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: impl FeedbackStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub type SharedStore = Arc<dyn FeedbackStore>;
