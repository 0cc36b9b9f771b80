use crate::domain::model::{AnalysisResult, FileRole, HealthStatus, MetricsRecord, StagedFile};
use crate::domain::ports::{AnalysisService, ConfigProvider};
use crate::utils::error::{AnalysisError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Upper bound for one analysis request, connection to last body byte.
pub const DEFAULT_ANALYZE_TIMEOUT: Duration = Duration::from_secs(300);

/// Wire shape of `POST /api/analyze`. Every field is optional on the wire;
/// conversion into `AnalysisResult` enforces all-or-nothing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    #[serde(default)]
    success: bool,
    metrics: Option<MetricsRecord>,
    ai_insights: Option<String>,
    top_vendors: Option<String>,
    top_spenders: Option<String>,
    report_path: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        AnalysisError::application(format!("Analysis response is missing '{}'", field))
    })
}

impl AnalyzeResponse {
    fn into_result(self, status: StatusCode) -> Result<AnalysisResult> {
        if !self.success {
            return Err(AnalysisError::ApplicationError {
                message: self
                    .error
                    .unwrap_or_else(|| "Analysis failed".to_string()),
                status: Some(status.as_u16()),
            });
        }

        Ok(AnalysisResult {
            metrics: require(self.metrics, "metrics")?,
            ai_insights: require(self.ai_insights, "aiInsights")?,
            top_vendors: require(self.top_vendors, "topVendors")?,
            top_spenders: require(self.top_spenders, "topSpenders")?,
            report_path: self.report_path,
        })
    }
}

/// Turns a non-2xx reply into an application error, keeping the server's
/// `{"error": ...}` text when there is one.
fn error_from_response(status: StatusCode, body: &[u8]) -> AnalysisError {
    let server_message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());

    AnalysisError::ApplicationError {
        message: server_message.unwrap_or_else(|| format!("Server responded with {}", status)),
        status: Some(status.as_u16()),
    }
}

fn file_part(file: &StagedFile) -> Part {
    Part::bytes(file.contents.clone()).file_name(file.name.clone())
}

/// Client for the remote analysis service.
#[derive(Debug, Clone)]
pub struct RemoteAnalysisClient {
    client: Client,
    base_url: Url,
    analyze_timeout: Duration,
}

impl RemoteAnalysisClient {
    pub fn new(base_url: &str, analyze_timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| AnalysisError::InvalidConfigValueError {
            field: "service.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AnalysisError::ConfigError {
                message: format!("'{}' cannot be used as a base URL", base_url),
            });
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            analyze_timeout,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["api", "health"]);
        tracing::debug!("Checking service health at: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(error_from_response(status, &body));
        }

        Ok(response.json::<HealthStatus>().await?)
    }

    fn map_analyze_error(&self, error: reqwest::Error) -> AnalysisError {
        if error.is_timeout() {
            AnalysisError::TimeoutError {
                timeout: self.analyze_timeout,
            }
        } else {
            AnalysisError::TransportError(error)
        }
    }
}

#[async_trait]
impl AnalysisService for RemoteAnalysisClient {
    async fn analyze(
        &self,
        raw_data: &StagedFile,
        mcc_template: &StagedFile,
    ) -> Result<AnalysisResult> {
        let url = self.endpoint(&["api", "analyze"]);
        tracing::debug!(
            "Uploading {} bytes + {} bytes to: {}",
            raw_data.size(),
            mcc_template.size(),
            url
        );

        let form = Form::new()
            .part(FileRole::RawData.form_field(), file_part(raw_data))
            .part(FileRole::MccTemplate.form_field(), file_part(mcc_template));

        let response = self
            .client
            .post(url)
            .multipart(form)
            .timeout(self.analyze_timeout)
            .send()
            .await
            .map_err(|e| self.map_analyze_error(e))?;

        let status = response.status();
        tracing::debug!("Analysis response status: {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_analyze_error(e))?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        let parsed: AnalyzeResponse = serde_json::from_slice(&body)?;
        parsed.into_result(status)
    }

    async fn download(&self, filename: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&["api", "download", filename]);
        tracing::debug!("Downloading report from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        Ok(body.to_vec())
    }
}
