use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::error::AppError;
use crate::generation::TextGenerator;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(aggregator: Aggregator, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            generator,
        }
    }

    /// The generation backend; missing credentials are a server error.
    pub fn generator(&self) -> Result<&dyn TextGenerator, AppError> {
        self.generator
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Gemini API key missing.".to_string()))
    }
}
