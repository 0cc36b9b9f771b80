use chrono::NaiveDate;
use std::io::Write;
use supplier_analysis::config::toml_config::TomlConfig;
use supplier_analysis::core::{ConfigProvider, FileRole, StagedFile, WorkflowState};
use supplier_analysis::{
    ConsoleNotifier, LocalStorage, MockAnalysisService, ResultsView, Settings, TokioPacer,
    WorkflowController,
};
use tempfile::{NamedTempFile, TempDir};

fn settings_from(toml: &str) -> Settings {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(toml.as_bytes()).unwrap();

    let mut settings = Settings::default();
    settings.apply_toml(&TomlConfig::from_file(file.path()).unwrap());
    settings
}

#[tokio::test]
async fn test_offline_run_from_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let report_dir = temp_dir.path().join("out");
    let settings = settings_from(&format!(
        "[service]\nmock = true\n[processing]\nstep_delay_ms = 1\n[output]\nreport_dir = \"{}\"\n",
        report_dir.display()
    ));
    assert!(settings.use_mock_service());

    let mut workflow = WorkflowController::new(
        MockAnalysisService::new(),
        ConsoleNotifier::new(false),
        TokioPacer::new(settings.step_delay()),
    );
    workflow.set_file(FileRole::RawData, StagedFile::new("spend.csv", b"a,b".to_vec()));
    workflow.set_file(FileRole::MccTemplate, StagedFile::new("mcc.xlsx", b"m".to_vec()));

    assert_eq!(workflow.start_analysis().await, WorkflowState::Results);

    let view = ResultsView::from_result(workflow.result().unwrap());
    assert_eq!(view.metric_cards.len(), 6);
    assert_eq!(view.top_vendors.entries[0].name, "Home Depot");
    assert!(view.to_string().contains("Top Spenders to Onboard"));

    let storage = LocalStorage::new(settings.report_dir().to_string());
    let saved = workflow
        .download_report_on(&storage, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap())
        .await?;

    assert!(saved.ends_with("AI_Supplier_Analysis_Report_2025-03-09.xlsx"));
    let contents = std::fs::read_to_string(&saved)?;
    assert!(contents.starts_with("Mock Analysis Report"));
    Ok(())
}

#[tokio::test]
async fn test_files_can_be_replaced_before_starting() {
    let mut workflow = WorkflowController::new(
        MockAnalysisService::new(),
        ConsoleNotifier::new(false),
        TokioPacer::new(std::time::Duration::ZERO),
    );

    workflow.set_file(FileRole::RawData, StagedFile::new("old.xlsx", Vec::new()));
    workflow.set_file(FileRole::RawData, StagedFile::new("new.xlsx", Vec::new()));
    assert!(!workflow.is_ready());

    workflow.drag_enter(FileRole::MccTemplate);
    assert!(!workflow.drop_file(
        FileRole::MccTemplate,
        StagedFile::new("mcc.xls", Vec::new())
    ));
    assert!(!workflow.staging().is_drag_active(FileRole::MccTemplate));
    assert!(workflow.drop_file(
        FileRole::MccTemplate,
        StagedFile::new("mcc.xlsb", Vec::new())
    ));

    assert!(workflow.is_ready());
    assert_eq!(workflow.files().raw_data.as_ref().unwrap().name, "new.xlsx");
}
