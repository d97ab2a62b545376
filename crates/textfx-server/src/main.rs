use std::path::PathBuf;

use clap::Parser;
use textfx_core::Config;
use textfx_server::logging::init_logging;
use textfx_server::server::run_server_with_config;
use textfx_server::tasks::TaskLoader;

#[derive(Parser, Debug, Clone)]
#[command(name = "textfx-server")]
#[command(about = "textfx HTTP Server")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8082")]
    port: u16,

    /// Completion API base URL (overrides config)
    #[arg(long)]
    api_base: Option<String>,

    /// Model name (overrides config)
    #[arg(long)]
    model: Option<String>,

    /// Directory of YAML task files [default: ~/.textfx/tasks]
    #[arg(long, env = "TEXTFX_TASKS_DIR")]
    tasks_dir: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = Config::new();
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    let tasks_dir = cli
        .tasks_dir
        .unwrap_or_else(|| TaskLoader::new().tasks_dir().to_path_buf());

    log::info!("Starting textfx server on port {}", cli.port);
    log::info!("  Base URL: {}", config.api_base);
    log::info!("  Model: {}", config.model);
    log::debug!("  Candidates per request: {}", config.candidate_count);
    log::debug!("  Max retries: {}", config.max_retries);
    log::debug!("  Tasks dir: {}", tasks_dir.display());

    run_server_with_config(cli.port, &config, Some(&tasks_dir)).await
}
