#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use adapters::memory::MemoryStore;
pub use config::engine::EngineConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use repos::GameStore;
pub use services::game_flow::{
    GameExport, GameFlowService, NewGameRequest, ReconcileReport, SubmitOutcome, UndoOutcome,
    VariantSetup,
};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
