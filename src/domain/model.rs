use serde::{Deserialize, Serialize};
use std::fmt;

/// The two inputs an analysis needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileRole {
    RawData,
    MccTemplate,
}

impl FileRole {
    pub const ALL: [FileRole; 2] = [FileRole::RawData, FileRole::MccTemplate];

    /// Suffix a dropped file must carry to be accepted for this role.
    pub fn expected_extension(self) -> &'static str {
        match self {
            FileRole::RawData => ".xlsx",
            FileRole::MccTemplate => ".xlsb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileRole::RawData => "Transaction Data",
            FileRole::MccTemplate => "MCC Reference Template",
        }
    }

    /// Multipart field name on the analysis endpoint.
    pub fn form_field(self) -> &'static str {
        match self {
            FileRole::RawData => "file",
            FileRole::MccTemplate => "mcc_template",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file the user picked or dropped, held in memory until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFiles {
    pub raw_data: Option<StagedFile>,
    pub mcc_template: Option<StagedFile>,
}

impl StagedFiles {
    pub fn get(&self, role: FileRole) -> Option<&StagedFile> {
        match role {
            FileRole::RawData => self.raw_data.as_ref(),
            FileRole::MccTemplate => self.mcc_template.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, role: FileRole) -> &mut Option<StagedFile> {
        match role {
            FileRole::RawData => &mut self.raw_data,
            FileRole::MccTemplate => &mut self.mcc_template,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.raw_data.is_some() && self.mcc_template.is_some()
    }

    /// Both files, or `None` while either role is still empty.
    pub fn ready_pair(&self) -> Option<(&StagedFile, &StagedFile)> {
        match (&self.raw_data, &self.mcc_template) {
            (Some(raw), Some(mcc)) => Some((raw, mcc)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    Upload,
    Processing,
    Results,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Upload => "upload",
            WorkflowState::Processing => "processing",
            WorkflowState::Results => "results",
        };
        f.write_str(name)
    }
}

/// Display-formatted figures, passed through exactly as the service sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    pub total_opportunity: String,
    pub amazon_spend: String,
    pub redundant_prime_fees: String,
    pub vendor_count: String,
    pub user_count: String,
    pub store_trips: String,
    pub store_trips_cost: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub metrics: MetricsRecord,
    pub ai_insights: String,
    pub top_vendors: String,
    pub top_spenders: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

/// One `Name (Value)` element of a ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelimitedEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// One-line user notification with a title and a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Reply of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Fixed processing steps: name and subtitle.
pub const PROCESSING_STEPS: [(&str, &str); 5] = [
    ("Loading Files", "Reading transaction data and MCC templates"),
    ("Enriching Data", "Processing and categorizing transactions"),
    ("Running Analysis", "Generating insights and pivot tables"),
    ("AI Processing", "Creating executive summary with AI"),
    ("Generating Report", "Compiling final Excel report"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

/// Position in the processing animation; only exists while processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessingProgress {
    pub step_index: usize,
}

impl ProcessingProgress {
    pub const TOTAL_STEPS: usize = PROCESSING_STEPS.len();

    pub fn new() -> Self {
        Self { step_index: 0 }
    }

    /// Moves to the next step; stays on the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.step_index += 1;
        true
    }

    pub fn is_last(&self) -> bool {
        self.step_index + 1 >= Self::TOTAL_STEPS
    }

    pub fn step_name(&self) -> &'static str {
        PROCESSING_STEPS[self.step_index].0
    }

    pub fn step_description(&self) -> &'static str {
        PROCESSING_STEPS[self.step_index].1
    }

    pub fn step_names() -> impl Iterator<Item = &'static str> {
        PROCESSING_STEPS.iter().map(|(name, _)| *name)
    }

    pub fn status_of(&self, index: usize) -> StepStatus {
        match index.cmp(&self.step_index) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }

    /// "n of N", one-based.
    pub fn position(&self) -> String {
        format!("{} of {}", self.step_index + 1, Self::TOTAL_STEPS)
    }

    pub fn percent(&self) -> u8 {
        (((self.step_index + 1) * 100) / Self::TOTAL_STEPS) as u8
    }
}
