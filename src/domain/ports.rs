use crate::domain::model::{
    AnalysisResult, Notification, ProcessingProgress, StagedFile, WorkflowState,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn step_delay(&self) -> Duration;
    fn report_dir(&self) -> &str;
    fn use_mock_service(&self) -> bool;
}

/// The analysis backend. One attempt per call, no retries.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(
        &self,
        raw_data: &StagedFile,
        mcc_template: &StagedFile,
    ) -> Result<AnalysisResult>;

    async fn download(&self, filename: &str) -> Result<Vec<u8>>;
}

/// Receives user-facing notifications and workflow observations.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);

    fn progress(&self, _progress: &ProcessingProgress) {}

    fn transition(&self, _from: WorkflowState, _to: WorkflowState) {}
}

/// Cosmetic delay between processing steps.
pub trait StepPacer: Send + Sync {
    fn pause(&self, step_index: usize) -> impl std::future::Future<Output = ()> + Send;
}
