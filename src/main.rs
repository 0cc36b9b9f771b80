use clap::Parser;
use supplier_analysis::core::{
    AnalysisService, ConfigProvider, FileRole, StagedFile, Storage, WorkflowState,
};
use supplier_analysis::domain::model::HealthStatus;
use supplier_analysis::utils::error::{AnalysisError, ErrorCategory};
use supplier_analysis::utils::logger;
use supplier_analysis::utils::validation::validate_required_field;
use supplier_analysis::{
    CliConfig, ConsoleNotifier, LocalStorage, MockAnalysisService, RemoteAnalysisClient,
    ResultsView, Settings, TokioPacer, WorkflowController,
};

fn exit_code(e: &AnalysisError) -> i32 {
    match e.category() {
        ErrorCategory::Validation | ErrorCategory::Configuration | ErrorCategory::Io => 1,
        ErrorCategory::Transport => 2,
        ErrorCategory::Application => 3,
    }
}

fn fail(e: &AnalysisError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

fn report_health(health: &HealthStatus) {
    println!("{} - {}", health.status, health.message);
}

async fn stage_inputs<S: Storage>(
    cli: &CliConfig,
    inputs: &S,
) -> supplier_analysis::Result<Vec<(FileRole, StagedFile)>> {
    let raw_path = validate_required_field("--raw-data", &cli.raw_data)?;
    let mcc_path = validate_required_field("--mcc-template", &cli.mcc_template)?;

    Ok(vec![
        (FileRole::RawData, StagedFile::load(inputs, raw_path).await?),
        (FileRole::MccTemplate, StagedFile::load(inputs, mcc_path).await?),
    ])
}

async fn run<A: AnalysisService>(
    cli: &CliConfig,
    settings: &Settings,
    service: A,
) -> supplier_analysis::Result<()> {
    let inputs = LocalStorage::new(".".to_string());
    let staged = stage_inputs(cli, &inputs).await?;

    let notifier = ConsoleNotifier::new(cli.show_steps);
    let pacer = TokioPacer::new(settings.step_delay());
    tracing::debug!("Processing step delay: {:?}", pacer.delay());
    let mut workflow = WorkflowController::new(service, notifier, pacer);

    for (role, file) in staged {
        if cli.strict_extensions {
            if !workflow.drop_file(role, file) {
                tracing::warn!(
                    "⚠️ {} was not accepted, expected a {} file",
                    role,
                    role.expected_extension()
                );
            }
        } else {
            workflow.set_file(role, file);
        }
    }

    // 執行分析
    if workflow.start_analysis().await != WorkflowState::Results {
        return Err(workflow.take_last_error().unwrap_or_else(|| {
            AnalysisError::application("Analysis did not complete, see the messages above")
        }));
    }

    if let Some(result) = workflow.result() {
        println!("\n{}", ResultsView::from_result(result));
    }

    if cli.no_download {
        tracing::info!("Skipping report download");
        return Ok(());
    }

    // 下載報告
    let reports = LocalStorage::new(settings.report_dir().to_string());
    workflow.download_report(&reports).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting supplier-analysis CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    let outcome = if settings.use_mock_service() {
        let service = MockAnalysisService::new();
        if cli.health {
            report_health(&service.health());
            return Ok(());
        }

        tracing::info!("🧪 Using built-in sample results");
        run(&cli, &settings, service).await
    } else {
        let client = match RemoteAnalysisClient::from_config(&settings) {
            Ok(client) => client,
            Err(e) => fail(&e),
        };

        if cli.health {
            match client.health().await {
                Ok(health) => {
                    report_health(&health);
                    if health.is_healthy() {
                        return Ok(());
                    }
                    std::process::exit(2);
                }
                Err(e) => fail(&e),
            }
        }

        tracing::info!("📡 Analysis service: {}", client.base_url());
        run(&cli, &settings, client).await
    };

    if let Err(e) = outcome {
        fail(&e);
    }

    Ok(())
}
