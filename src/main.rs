use chrono::Local;
use savegen::config::{Config, OutputFormat};
use savegen::services::dashboard::{DashboardReport, ReportOptions};
use savegen::services::transaction_client::TransactionClient;
use savegen::AppResult;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "savegen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env()?;
    tracing::info!(
        "Starting savegen {} against {}",
        savegen::VERSION,
        config.api_base_url
    );

    let client = TransactionClient::new(&config.api_base_url, config.timeout)?;
    let transactions = client.fetch_transactions(config.user_id).await?;

    let options = ReportOptions {
        window: config.window,
        series_months: config.series_months,
        top_n: config.top_n,
    };
    let report = DashboardReport::build(&transactions, &options, Local::now().date_naive());

    match config.output {
        OutputFormat::Text => print!("{}", report.render_text(&config.currency, &config.locale)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
