//! TCOF CLI Application
//!
//! Command-line interface for The Connected Outcomes Framework planning
//! toolkit.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use tcof_core::ToolkitBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let toolkit = ToolkitBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize toolkit")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(toolkit, renderer);

    info!("TCOF toolkit started");

    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Zone { command }) => cli.handle_zone_command(command).await,
        Some(Framework { command }) => cli.handle_framework_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Custom { command }) => cli.handle_custom_command(command).await,
        Some(Factor { command }) => cli.handle_factor_command(command).await,
        Some(Checklist { command }) => cli.handle_checklist_command(command).await,
        None => cli.list_plans().await,
    }
}
