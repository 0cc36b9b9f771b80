pub mod presentation;
pub mod progress;
pub mod staging;
pub mod workflow;

pub use crate::domain::model::{
    AnalysisResult, DelimitedEntry, FileRole, MetricsRecord, Notification, ProcessingProgress,
    StagedFile, StagedFiles, WorkflowState,
};
pub use crate::domain::ports::{AnalysisService, ConfigProvider, Notifier, StepPacer, Storage};
pub use crate::utils::error::Result;
