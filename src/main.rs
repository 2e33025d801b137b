use anyhow::{Context, Result};
use health_assistant::cli::{parse_args, Command};
use health_assistant::{AssistantConfig, HealthAssistant};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = parse_args();
    init_tracing(cli.verbose);

    let config = if cli.offline {
        AssistantConfig::offline()
    } else {
        AssistantConfig::from_env().context("Failed to read assistant configuration")?
    };
    let assistant = HealthAssistant::from_config(&config);
    info!(provider = assistant.provider_name(), "Assistant ready");

    let output = match &cli.command {
        Command::Analyze { description } => assistant
            .analyze_food(description)
            .await
            .map(|nutrition| serde_json::to_string_pretty(&nutrition)),
        Command::Recipes { ingredients, .. } => assistant
            .generate_recipes(ingredients, &cli.command.meal_selection())
            .await
            .map(|recipes| serde_json::to_string_pretty(&recipes)),
    };

    match output {
        Ok(json) => {
            println!("{}", json.context("Failed to serialize result")?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
