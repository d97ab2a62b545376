use std::time::Instant;

use anyhow::bail;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "textfx-cli")]
#[command(about = "CLI tool for the textfx server")]
#[command(version)]
struct Cli {
    #[arg(long, env = "TEXTFX_SERVER_URL", default_value = "http://localhost:8082")]
    server_url: String,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tasks
    Tasks,
    /// Run a task
    Run {
        /// Task id, e.g. simile
        task: String,
        /// One value per task input
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Sampling temperature in [0, 1]; the task default when omitted
        #[arg(long, short)]
        temperature: Option<f32>,
    },
    /// Stop an in-flight run
    Stop {
        run_id: String,
    },
}

#[derive(Deserialize, Debug)]
struct TaskSummary {
    id: String,
    name: String,
    description: String,
    inputs: Vec<String>,
    default_temperature: f32,
}

#[derive(Serialize, Debug)]
struct RunRequest {
    task_id: String,
    inputs: Vec<String>,
    temperature: Option<f32>,
    run_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RunResponse {
    run_id: String,
    #[allow(dead_code)]
    task_id: String,
    status: String,
    #[allow(dead_code)]
    results: Vec<String>,
    display: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct StopResponse {
    success: bool,
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("{}", "[DEBUG] Debug mode enabled".dimmed());
        eprintln!(
            "{}",
            format!("[DEBUG] Server URL: {}", cli.server_url).dimmed()
        );
    }

    let server_url = cli.server_url.trim_end_matches('/');
    match cli.command {
        Commands::Tasks => list_tasks(server_url, cli.debug).await,
        Commands::Run {
            task,
            inputs,
            temperature,
        } => run_task(server_url, task, inputs, temperature, cli.debug).await,
        Commands::Stop { run_id } => stop_run(server_url, &run_id, cli.debug).await,
    }
}

async fn list_tasks(server_url: &str, debug: bool) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/tasks", server_url);
    if debug {
        eprintln!("{}", format!("[DEBUG] GET {}", url).dimmed());
    }

    let response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        bail!("Failed to list tasks: HTTP {}", response.status());
    }

    let tasks: Vec<TaskSummary> = response.json().await?;
    for task in tasks {
        println!(
            "{} {} {}",
            task.id.cyan().bold(),
            format!("({})", task.name).dimmed(),
            format!("[{}]", task.inputs.join(", ")).yellow()
        );
        if !task.description.is_empty() {
            println!("    {}", task.description);
        }
        if debug {
            eprintln!(
                "{}",
                format!("    [DEBUG] default temperature {}", task.default_temperature).dimmed()
            );
        }
    }
    Ok(())
}

async fn run_task(
    server_url: &str,
    task_id: String,
    inputs: Vec<String>,
    temperature: Option<f32>,
    debug: bool,
) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let run_id = uuid::Uuid::new_v4().to_string();
    let request = RunRequest {
        task_id: task_id.clone(),
        inputs,
        temperature,
        run_id: Some(run_id.clone()),
    };

    let url = format!("{}/api/v1/run", server_url);
    if debug {
        eprintln!("{}", format!("[DEBUG] POST {}", url).dimmed());
        eprintln!(
            "{}",
            format!("[DEBUG] Request body: {}", serde_json::to_string(&request)?).dimmed()
        );
    }

    println!(
        "{}",
        format!("🚀 Running {} (run id {})", task_id, run_id).cyan()
    );

    let start = Instant::now();
    let response = client.post(&url).json(&request).send().await?;
    let status = response.status();
    if debug {
        eprintln!(
            "{}",
            format!("[DEBUG] Response: {} in {:?}", status, start.elapsed()).dimmed()
        );
    }

    if !status.is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body["error"].as_str().unwrap_or("request failed");
        bail!("Run failed (HTTP {}): {}", status, message);
    }

    let run: RunResponse = response.json().await?;
    if debug {
        eprintln!("{}", format!("[DEBUG] Full response: {:?}", run).dimmed());
    }

    match run.status.as_str() {
        "results" => {
            for (index, line) in run.display.iter().enumerate() {
                println!("{} {}", format!("{:>2}.", index + 1).dimmed(), line.green());
            }
        }
        "no_results" => {
            for line in &run.display {
                println!("{}", line.yellow());
            }
        }
        _ => {
            for line in &run.display {
                println!("{}", line.red());
            }
        }
    }
    if debug {
        eprintln!("{}", format!("[DEBUG] Run {} done", run.run_id).dimmed());
    }
    Ok(())
}

async fn stop_run(server_url: &str, run_id: &str, debug: bool) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/stop/{}", server_url, run_id);
    if debug {
        eprintln!("{}", format!("[DEBUG] POST {}", url).dimmed());
    }

    let response = reqwest::Client::new().post(&url).send().await?;
    let stop: StopResponse = response.json().await?;
    if stop.success {
        println!("{}", format!("✅ {}", stop.message).green());
    } else {
        println!("{}", format!("⚠️  {}", stop.message).yellow());
    }
    Ok(())
}
