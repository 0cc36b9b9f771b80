use crate::domain::model::{AnalysisResult, HealthStatus, MetricsRecord, StagedFile};
use crate::domain::ports::AnalysisService;
use crate::utils::error::Result;
use async_trait::async_trait;

const SAMPLE_INSIGHTS: &str = "Based on the comprehensive analysis of your organization's supplier spend data, here are the key strategic opportunities:

• **Massive Consolidation Opportunity**: With $2.8M in addressable spend across 247 vendors, there's significant potential for cost savings through vendor consolidation. The fragmented supplier base indicates inefficient procurement processes.

• **Amazon Business Migration**: Your organization already spends $1.2M on Amazon.com, demonstrating strong adoption. Migrating this spend to Amazon Business could unlock bulk pricing, better payment terms, and enhanced procurement controls.

• **Prime Membership Optimization**: $45,780 in redundant Prime fees represents immediate cost savings. Implementing centralized Amazon Business accounts would eliminate duplicate memberships while providing enhanced features.

• **Digital Transformation Impact**: 1,234 store trips costing $567K in soft costs (employee time, travel) could be eliminated through strategic e-commerce adoption. This represents both direct savings and productivity gains.

**Recommendation**: Prioritize onboarding your top 156 active users to Amazon Business, consolidate the top 20 vendors (representing 80% of spend), and implement procurement policies to reduce physical store visits. This could result in 15-25% cost savings plus significant operational efficiency gains.";

const SAMPLE_REPORT: &[u8] = b"Mock Analysis Report - In production, this would be an Excel file with all your data and insights.";

/// Canned analysis results for demos and offline runs. Never touches the network.
#[derive(Debug, Clone, Default)]
pub struct MockAnalysisService;

impl MockAnalysisService {
    pub fn new() -> Self {
        Self
    }

    /// Always healthy; there is no backend to check.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            message: "Built-in sample results, no analysis service contacted".to_string(),
        }
    }

    pub fn sample_result() -> AnalysisResult {
        AnalysisResult {
            metrics: MetricsRecord {
                total_opportunity: "$2,847,592.34".to_string(),
                amazon_spend: "$1,234,567.89".to_string(),
                redundant_prime_fees: "$45,780.00".to_string(),
                vendor_count: "247".to_string(),
                user_count: "156".to_string(),
                store_trips: "1,234".to_string(),
                store_trips_cost: "$567,890.12".to_string(),
            },
            ai_insights: SAMPLE_INSIGHTS.to_string(),
            top_vendors: "Home Depot ($456,789.12); Staples ($234,567.89); Best Buy ($189,432.10); Walmart ($167,890.45); Target ($145,678.23)".to_string(),
            top_spenders: "John Smith ($89,456.78); Sarah Johnson ($76,543.21); Mike Chen ($65,432.19); Lisa Rodriguez ($54,321.87); David Wilson ($43,210.65)".to_string(),
            report_path: None,
        }
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(
        &self,
        raw_data: &StagedFile,
        mcc_template: &StagedFile,
    ) -> Result<AnalysisResult> {
        tracing::info!(
            "🧪 Mock analysis of '{}' and '{}', returning sample results",
            raw_data.name,
            mcc_template.name
        );
        Ok(Self::sample_result())
    }

    async fn download(&self, filename: &str) -> Result<Vec<u8>> {
        tracing::debug!("🧪 Mock download of {}", filename);
        Ok(SAMPLE_REPORT.to_vec())
    }
}
