use crate::domain::model::{AnalysisResult, DelimitedEntry, ProcessingProgress, StepStatus};
use serde::Serialize;
use std::fmt;

/// Splits a `Name (Value); Name (Value)` list into entries, keeping order.
///
/// The name is the trimmed text before the first `(`, the value the text
/// inside the first parenthesis (to the end when `)` is missing). Entries
/// without `(` get an empty value; blank segments are skipped.
pub fn parse_delimited_list(source: &str) -> Vec<DelimitedEntry> {
    source
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_delimited_entry)
        .collect()
}

pub fn parse_delimited_entry(segment: &str) -> DelimitedEntry {
    match segment.split_once('(') {
        Some((name, rest)) => {
            let value = rest.split_once(')').map_or(rest, |(inside, _)| inside);
            DelimitedEntry {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            }
        }
        None => DelimitedEntry {
            name: segment.trim().to_string(),
            value: String::new(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedList {
    pub title: &'static str,
    pub entries: Vec<DelimitedEntry>,
}

/// Everything the results screen shows, derived from one `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub metric_cards: Vec<MetricCard>,
    /// Executive summary, one element per line; blank lines are kept.
    pub insight_lines: Vec<String>,
    pub top_vendors: RankedList,
    pub top_spenders: RankedList,
}

impl ResultsView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let metrics = &result.metrics;
        let metric_cards = vec![
            MetricCard {
                title: "Total Addressable Opportunity",
                value: metrics.total_opportunity.clone(),
                description: "Total spend that can be consolidated".to_string(),
            },
            MetricCard {
                title: "Amazon Spend Consolidation",
                value: metrics.amazon_spend.clone(),
                description: "Current Amazon.com spending".to_string(),
            },
            MetricCard {
                title: "Redundant Prime Fees",
                value: metrics.redundant_prime_fees.clone(),
                description: "Wasted on duplicate memberships".to_string(),
            },
            MetricCard {
                title: "Vendors to Consolidate",
                value: metrics.vendor_count.clone(),
                description: "Number of suppliers".to_string(),
            },
            MetricCard {
                title: "Active Users",
                value: metrics.user_count.clone(),
                description: "Users making purchases".to_string(),
            },
            MetricCard {
                title: "Store Trips Cost",
                value: metrics.store_trips_cost.clone(),
                description: format!("{} trips to physical stores", metrics.store_trips),
            },
        ];

        Self {
            metric_cards,
            insight_lines: result.ai_insights.lines().map(str::to_string).collect(),
            top_vendors: RankedList {
                title: "Top Vendors to Consolidate",
                entries: parse_delimited_list(&result.top_vendors),
            },
            top_spenders: RankedList {
                title: "Top Spenders to Onboard",
                entries: parse_delimited_list(&result.top_spenders),
            },
        }
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Results")?;
        writeln!(f, "================")?;
        for card in &self.metric_cards {
            writeln!(f, "{:<32} {:>18}  {}", card.title, card.value, card.description)?;
        }

        writeln!(f)?;
        writeln!(f, "AI-Generated Executive Summary")?;
        writeln!(f, "------------------------------")?;
        for line in &self.insight_lines {
            writeln!(f, "{}", line)?;
        }

        for list in [&self.top_vendors, &self.top_spenders] {
            writeln!(f)?;
            writeln!(f, "{}", list.title)?;
            for (rank, entry) in list.entries.iter().enumerate() {
                writeln!(f, "{:>2}. {:<32} {:>16}", rank + 1, entry.name, entry.value)?;
            }
        }
        Ok(())
    }
}

/// Terminal rendering of the processing screen: the step list plus a bar.
pub fn render_progress(progress: &ProcessingProgress) -> String {
    let mut lines = Vec::with_capacity(ProcessingProgress::TOTAL_STEPS + 1);

    for (index, name) in ProcessingProgress::step_names().enumerate() {
        let marker = match progress.status_of(index) {
            StepStatus::Completed => "✔",
            StepStatus::Active => "▶",
            StepStatus::Pending => " ",
        };
        lines.push(format!("[{}] {}", marker, name));
    }

    let filled = usize::from(progress.percent()) / 5;
    lines.push(format!(
        "{} [{}{}] {}",
        progress.step_name(),
        "#".repeat(filled),
        "-".repeat(20 - filled),
        progress.position()
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MetricsRecord;

    fn sample_result() -> AnalysisResult {
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
            ai_insights: "First point\n\n**Recommendation**: act".to_string(),
            top_vendors: "Home Depot ($456,789.12); Staples ($234,567.89)".to_string(),
            top_spenders: "John Smith ($89,456.78)".to_string(),
            report_path: None,
        }
    }

    #[test]
    fn test_parse_vendor_list() {
        let entries = parse_delimited_list("Home Depot ($456,789.12); Staples ($234,567.89)");
        assert_eq!(
            entries,
            vec![
                DelimitedEntry {
                    name: "Home Depot".to_string(),
                    value: "$456,789.12".to_string()
                },
                DelimitedEntry {
                    name: "Staples".to_string(),
                    value: "$234,567.89".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_entry_without_parenthesis_has_empty_value() {
        assert_eq!(
            parse_delimited_entry("Acme Corp"),
            DelimitedEntry {
                name: "Acme Corp".to_string(),
                value: String::new()
            }
        );
    }

    #[test]
    fn test_missing_closing_parenthesis_takes_the_rest() {
        let entry = parse_delimited_entry("Best Buy ($189,432.10");
        assert_eq!(entry.name, "Best Buy");
        assert_eq!(entry.value, "$189,432.10");
    }

    #[test]
    fn test_only_first_parenthesis_is_used() {
        let entry = parse_delimited_entry("Office Depot (West) ($12.00)");
        assert_eq!(entry.name, "Office Depot");
        assert_eq!(entry.value, "West");
    }

    #[test]
    fn test_order_is_preserved_and_blank_segments_skipped() {
        let entries = parse_delimited_list("C ($3); A ($1);; B ($2); ");
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!(parse_delimited_list("").is_empty());
    }

    #[test]
    fn test_results_view_uses_all_seven_metrics() {
        let view = ResultsView::from_result(&sample_result());

        assert_eq!(view.metric_cards.len(), 6);
        assert_eq!(view.metric_cards[0].value, "$2,847,592.34");
        assert_eq!(view.metric_cards[3].value, "247");
        assert_eq!(view.metric_cards[5].value, "$567,890.12");
        assert_eq!(view.metric_cards[5].description, "1,234 trips to physical stores");
        assert_eq!(view.top_vendors.entries.len(), 2);
        assert_eq!(view.top_spenders.entries[0].name, "John Smith");
    }

    #[test]
    fn test_insight_line_breaks_are_kept() {
        let view = ResultsView::from_result(&sample_result());
        assert_eq!(
            view.insight_lines,
            vec!["First point", "", "**Recommendation**: act"]
        );

        let rendered = view.to_string();
        assert!(rendered.contains("First point\n\n**Recommendation**: act\n"));
        assert!(rendered.contains("Top Vendors to Consolidate"));
    }

    #[test]
    fn test_render_progress_marks_steps() {
        let progress = ProcessingProgress { step_index: 1 };
        let rendered = render_progress(&progress);
        assert!(rendered.contains("[✔] Loading Files"));
        assert!(rendered.contains("[▶] Enriching Data"));
        assert!(rendered.contains("[ ] Generating Report"));
        assert!(rendered.ends_with("Enriching Data [########------------] 2 of 5"));
    }
}
