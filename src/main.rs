use clap::Parser;
use readme_issues::app::build_queries;
use readme_issues::core::ConfigProvider;
use readme_issues::utils::error::{ErrorSeverity, IssueError};
use readme_issues::utils::{logger, validation::Validate};
use readme_issues::{CliConfig, FileConfig, RequestHandler};
use std::io::Read;

async fn load_handler(cli: &CliConfig) -> Result<RequestHandler, IssueError> {
    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            let file_config = FileConfig::from_file(path)?;
            file_config.validate()?;
            Box::new(file_config)
        }
        None => {
            cli.validate()?;
            Box::new(cli.clone())
        }
    };

    let queries = build_queries(config.as_ref()).await?;
    Ok(RequestHandler::new(queries))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let handler = match load_handler(&cli).await {
        Ok(handler) => handler,
        Err(e) => {
            tracing::error!(
                "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    // 請求內容由 stdin 傳入，回應寫到 stdout
    let mut payload = Vec::new();
    std::io::stdin().read_to_end(&mut payload)?;
    tracing::debug!("Read {} bytes of request payload", payload.len());

    let response = handler.handle(&payload).await;
    println!("{}", response.body);

    Ok(())
}
