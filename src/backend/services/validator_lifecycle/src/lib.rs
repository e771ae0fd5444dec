pub mod chain;
pub mod config;
pub mod repositories;
pub mod services;
pub mod utils;

pub use chain_models as models;

pub use config::OrchestratorConfig;
pub use services::orchestrator::LifecycleOrchestrator;
pub use utils::errors::{LifecycleError, Result};
