use std::sync::Arc;

use crate::config::Config;
use crate::resume::drafter::SectionDrafter;
use crate::salary::stats::GraphData;
use crate::salary::SalaryPredictor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; shared without locking.
    pub predictor: Arc<SalaryPredictor>,
    /// Dashboard statistics, computed once from the dataset.
    pub graph_data: Arc<GraphData>,
    /// Pluggable section drafter. Default: LlmSectionDrafter.
    pub drafter: Arc<dyn SectionDrafter>,
    pub config: Config,
}
