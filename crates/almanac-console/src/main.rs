use std::process::ExitCode;

use almanac_console::ReportRunner;
use almanac_core::App;
use almanac_weather::HttpFetcher;
use anyhow::Result;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: {:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // Settings first: the log file location comes from them
    let app = App::load().map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
    almanac_core::init(Some(&app.config().log_file))?;
    app.initialize()?;

    tracing::info!("Almanac started");

    let vault = almanac_vault::install(app.open_vault()?)?;
    let http = HttpFetcher::new(app.config().request_timeout())?;

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut runner = ReportRunner::new(app.config(), app.settings(), vault, http, stdin, stdout);

    let failures = runner.run_all().await?;
    if failures > 0 {
        tracing::warn!("{} report section(s) failed", failures);
    }

    app.shutdown();
    Ok(())
}
