//! # Design Estimator CLI
//!
//! Terminal front-end for the design estimation service.
//!
//! - `submit` prompts for the project (or reads `--request FILE`), posts it to
//!   the webhook and prints the report; `--save FILE` keeps the raw response.
//! - `render FILE` prints a previously saved response.
//!
//! `--layout full|summary` picks the report layout and `--json` prints the
//! projected report as JSON instead of text.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use estimate_core::client::EstimationClient;
use estimate_core::config::EstimatorConfig;
use estimate_core::errors::{EstimateError, EstimateResult};
use estimate_core::file_io;
use estimate_core::form::IntakeForm;
use estimate_core::layout::ReportLayout;
use estimate_core::logging;
use estimate_core::renderer::{RenderState, ResultRenderer};
use estimate_core::session::SessionSlot;

mod cli;
mod print;
mod prompt;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = EstimatorConfig::from_env();
    logging::init(&config.log_filter);

    let layout = ReportLayout::from_preset(cli.layout.unwrap_or(config.layout))
        .with_dark_mode(config.dark_mode);

    let outcome = match cli.command {
        Commands::Submit { request, save } => {
            submit(&config, request.as_deref(), save.as_deref(), layout, cli.json).await
        }
        Commands::Render { file } => render(&file, layout, cli.json),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn submit(
    config: &EstimatorConfig,
    request_file: Option<&Path>,
    save: Option<&Path>,
    layout: ReportLayout,
    json: bool,
) -> EstimateResult<ExitCode> {
    let mut form = match request_file {
        Some(path) => IntakeForm::from_request(file_io::load_request(path)?),
        None => {
            println!("Design Estimator - New Estimate");
            println!("===============================");
            println!("Press Enter to keep the value in brackets.");
            println!();
            let mut form = IntakeForm::new();
            prompt::fill_form(&mut form, &mut io::stdin().lock(), &mut io::stdout());
            println!();
            form
        }
    };

    let client = EstimationClient::new(config)?;
    let request = form.begin_submit()?;

    println!(
        "Generating estimation for {} ({} screens)...",
        request.project_name, request.screen_count
    );
    let outcome = client.submit(&request).await;
    let retry = outcome.as_ref().err().is_some_and(EstimateError::is_recoverable);

    let mut slot = SessionSlot::new();
    match form.finish_submit(outcome) {
        Some(handoff) => slot.store(handoff),
        None => {
            if let Some(message) = form.message() {
                eprintln!("{}", message.text());
            }
            if retry {
                eprintln!("Nothing was stored; run the command again to retry.");
            }
            return Ok(ExitCode::FAILURE);
        }
    }

    if let (Some(path), Some(handoff)) = (save, slot.peek()) {
        file_io::save_response(handoff, path)?;
        println!("Saved response to {}", path.display());
    }

    let mut renderer = ResultRenderer::new(layout);
    renderer.load_handoff(slot.take());
    Ok(show(&renderer, json))
}

fn render(file: &Path, layout: ReportLayout, json: bool) -> EstimateResult<ExitCode> {
    let raw = file_io::load_response(file)?;
    let mut renderer = ResultRenderer::new(layout);
    renderer.load(raw.as_deref());
    Ok(show(&renderer, json))
}

/// Print the renderer's terminal state
fn show(renderer: &ResultRenderer, json: bool) -> ExitCode {
    match renderer.state() {
        RenderState::Ready(rendered) if json => {
            match serde_json::to_string_pretty(&rendered.report) {
                Ok(text) => {
                    println!("{}", text);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        RenderState::Ready(rendered) => {
            print::print_report(&rendered.report);
            ExitCode::SUCCESS
        }
        state => {
            let message = state
                .error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Estimation did not finish loading".to_string());
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
