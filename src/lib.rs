pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, Settings};

pub use crate::adapters::{ConsoleNotifier, MockAnalysisService, RemoteAnalysisClient};
pub use crate::core::{presentation::ResultsView, progress::TokioPacer, workflow::WorkflowController};
pub use crate::utils::error::{AnalysisError, Result};
