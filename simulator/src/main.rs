use anyhow::Context;
use api::server::AnalysisServer;
use clap::Parser;
use scenario::profile::ScenarioProfile;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod api;
mod scenario;

#[derive(Parser)]
#[command(author, version, about = "Stand-in MineGuard analysis backend")]
struct Args {
    /// Port for the analyze/history endpoints
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// Load a metrics scenario from YAML
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Seed for deterministic metric jitter
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let profile = if let Some(path) = args.scenario {
        ScenarioProfile::load(path)?
    } else {
        ScenarioProfile::default()
    };

    let server = AnalysisServer::start(args.port, profile, args.seed);
    server.publish_status(&format!(
        "Analysis endpoints on http://127.0.0.1:{} (Ctrl+C to stop)...",
        args.port
    ));

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for signal handling")?;
    runtime.block_on(async {
        signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
