//! Shared application state for all routes.

use crate::config::ApiOptions;
use crate::repository::StudentRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn StudentRepository>,
    pub options: ApiOptions,
}

impl AppState {
    pub fn new(repo: Arc<dyn StudentRepository>, options: ApiOptions) -> Self {
        AppState { repo, options }
    }
}
