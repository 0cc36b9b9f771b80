use crate::core::progress::run_steps;
use crate::core::staging::FileStaging;
use crate::domain::model::{
    AnalysisResult, FileRole, Notification, ProcessingProgress, StagedFile, StagedFiles,
    WorkflowState,
};
use crate::domain::ports::{AnalysisService, Notifier, StepPacer, Storage};
use crate::utils::error::{AnalysisError, ErrorCategory, Result};
use chrono::NaiveDate;

/// Filename a downloaded report is saved under.
///
/// Uses the basename of the service's report path, or a dated default name.
pub fn report_filename(report_path: Option<&str>, today: NaiveDate) -> String {
    report_path
        .and_then(|path| path.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "AI_Supplier_Analysis_Report_{}.xlsx",
                today.format("%Y-%m-%d")
            )
        })
}

/// Drives upload -> processing -> results and owns every piece of session state.
pub struct WorkflowController<A: AnalysisService, N: Notifier, P: StepPacer> {
    service: A,
    notifier: N,
    pacer: P,
    staging: FileStaging,
    state: WorkflowState,
    progress: Option<ProcessingProgress>,
    result: Option<AnalysisResult>,
    last_error: Option<AnalysisError>,
}

impl<A: AnalysisService, N: Notifier, P: StepPacer> WorkflowController<A, N, P> {
    pub fn new(service: A, notifier: N, pacer: P) -> Self {
        Self {
            service,
            notifier,
            pacer,
            staging: FileStaging::new(),
            state: WorkflowState::Upload,
            progress: None,
            result: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn progress(&self) -> Option<&ProcessingProgress> {
        self.progress.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Why the most recent `start_analysis` left the workflow on upload.
    pub fn last_error(&self) -> Option<&AnalysisError> {
        self.last_error.as_ref()
    }

    pub fn take_last_error(&mut self) -> Option<AnalysisError> {
        self.last_error.take()
    }

    pub fn files(&self) -> &StagedFiles {
        self.staging.files()
    }

    pub fn staging(&self) -> &FileStaging {
        &self.staging
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_ready(&self) -> bool {
        self.staging.is_ready()
    }

    /// Manual file selection. Ignored outside the upload screen.
    pub fn set_file(&mut self, role: FileRole, file: StagedFile) -> bool {
        if !self.accepts_staging(role) {
            return false;
        }
        self.staging.set_file(role, file);
        true
    }

    /// Drag-and-drop selection; wrong extensions are ignored without notice.
    pub fn drop_file(&mut self, role: FileRole, file: StagedFile) -> bool {
        if !self.accepts_staging(role) {
            return false;
        }
        self.staging.set_file_from_drop(role, file)
    }

    pub fn drag_enter(&mut self, role: FileRole) {
        if self.state == WorkflowState::Upload {
            self.staging.drag_enter(role);
        }
    }

    pub fn drag_leave(&mut self, role: FileRole) {
        self.staging.drag_leave(role);
    }

    fn accepts_staging(&self, role: FileRole) -> bool {
        if self.state != WorkflowState::Upload {
            tracing::warn!("Ignoring {} selection while in {} state", role, self.state);
            return false;
        }
        true
    }

    /// Runs one analysis: processing animation and request side by side,
    /// then results on success or back to upload on failure.
    pub async fn start_analysis(&mut self) -> WorkflowState {
        if self.state != WorkflowState::Upload {
            tracing::warn!("Analysis already started; current state is {}", self.state);
            return self.state;
        }

        if !self.staging.is_ready() {
            let missing: Vec<&str> = self
                .staging
                .missing_roles()
                .into_iter()
                .map(FileRole::label)
                .collect();
            tracing::warn!("Cannot start analysis, missing: {}", missing.join(", "));
            self.notifier.notify(&Notification::failure(
                "Files Required",
                "Please upload both transaction data and MCC template files.",
            ));
            self.last_error = Some(AnalysisError::validation(format!(
                "missing {}",
                missing.join(", ")
            )));
            return self.state;
        }

        self.last_error = None;

        self.transition(WorkflowState::Processing);

        let Self {
            service,
            notifier,
            pacer,
            staging,
            progress,
            ..
        } = self;
        let progress = progress.insert(ProcessingProgress::new());
        let outcome = match staging.files().ready_pair() {
            Some((raw_data, mcc_template)) => {
                tracing::info!(
                    "🚀 Starting analysis of '{}' with template '{}'",
                    raw_data.name,
                    mcc_template.name
                );
                let (_, outcome) = tokio::join!(
                    run_steps(&*pacer, &*notifier, progress),
                    service.analyze(raw_data, mcc_template)
                );
                outcome
            }
            None => Err(AnalysisError::validation("staged files disappeared")),
        };

        self.finish_analysis(outcome)
    }

    fn finish_analysis(&mut self, outcome: Result<AnalysisResult>) -> WorkflowState {
        self.progress = None;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    "✅ Analysis complete: {} opportunity across {} vendors",
                    result.metrics.total_opportunity,
                    result.metrics.vendor_count
                );
                self.result = Some(result);
                self.transition(WorkflowState::Results);
                self.notifier.notify(&Notification::info(
                    "Analysis Complete",
                    "Your supplier analysis has been successfully generated.",
                ));
            }
            Err(e) => {
                let kind = match e.category() {
                    ErrorCategory::Validation => "validation",
                    ErrorCategory::Transport => "transport",
                    ErrorCategory::Application => "application",
                    ErrorCategory::Configuration => "configuration",
                    ErrorCategory::Io => "io",
                };
                tracing::error!("❌ Analysis failed ({} error): {}", kind, e);
                self.transition(WorkflowState::Upload);
                self.notifier
                    .notify(&Notification::failure("Analysis Failed", e.failure_message()));
                self.last_error = Some(e);
            }
        }

        self.state
    }

    /// Clears files and results and returns to upload.
    pub fn start_over(&mut self) -> WorkflowState {
        if self.state == WorkflowState::Processing {
            tracing::warn!("Cannot start over while an analysis is running");
            return self.state;
        }

        self.staging.clear();
        self.result = None;
        self.last_error = None;
        self.progress = None;
        if self.state != WorkflowState::Upload {
            self.transition(WorkflowState::Upload);
        }
        self.state
    }

    /// Fetches the report and hands it to `storage`. Returns where it was saved.
    ///
    /// The workflow stays on the results screen whether or not this succeeds.
    pub async fn download_report<S: Storage>(&self, storage: &S) -> Result<String> {
        self.download_report_on(storage, chrono::Local::now().date_naive())
            .await
    }

    pub async fn download_report_on<S: Storage>(
        &self,
        storage: &S,
        today: NaiveDate,
    ) -> Result<String> {
        let result = match (&self.state, &self.result) {
            (WorkflowState::Results, Some(result)) => result,
            _ => {
                return Err(AnalysisError::validation(
                    "No analysis results to download a report for",
                ))
            }
        };

        let filename = report_filename(result.report_path.as_deref(), today);
        self.notifier.notify(&Notification::info(
            "Download Started",
            "Your comprehensive analysis report is being downloaded.",
        ));

        let saved = match self.service.download(&filename).await {
            Ok(bytes) => {
                tracing::debug!("Downloaded {} ({} bytes)", filename, bytes.len());
                storage.write_file(&filename, &bytes).await
            }
            Err(e) => Err(e),
        };

        match saved {
            Ok(path) => {
                tracing::info!("📁 Report saved to: {}", path);
                self.notifier
                    .notify(&Notification::info("Download Complete", format!("Saved {}", path)));
                Ok(path)
            }
            Err(e) => {
                tracing::error!("❌ Report download failed: {}", e);
                self.notifier
                    .notify(&Notification::failure("Download Failed", e.failure_message()));
                Err(e)
            }
        }
    }

    fn transition(&mut self, to: WorkflowState) {
        let from = self.state;
        tracing::info!("Workflow {} -> {}", from, to);
        self.state = to;
        self.notifier.transition(from, to);
    }
}
