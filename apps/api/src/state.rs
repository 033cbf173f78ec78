use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::summary::baseline::BaselineStrategy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable daily-summary baseline. Default: FixedBaseline. Swap via BASELINE_STRATEGY env.
    pub baseline: Arc<dyn BaselineStrategy>,
}
