use clap::Parser;
use json_harvest::{HarvestConfig, Harvester, Session, SessionState, StageEvent};
use std::process::ExitCode;
use tokio::sync::mpsc;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Input error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Harvesting {} into {}",
        config.page_url,
        config.output_dir.display()
    );
    let harvester = Harvester::from_config(config);
    let mut session = Session::new();

    if let Err(e) = session.begin_download() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    let start_time = std::time::Instant::now();
    drive(&mut session, harvester.spawn_download()).await;
    if !report(&mut session) {
        return ExitCode::FAILURE;
    }

    if args.download_only {
        return ExitCode::SUCCESS;
    }

    let files = match session.begin_conversion() {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    drive(&mut session, harvester.spawn_conversion(files)).await;
    if !report(&mut session) {
        return ExitCode::FAILURE;
    }

    ::log::info!(
        "Harvest complete - {} JSON files, {} HTML files in {:.2} seconds",
        session.json_files().len(),
        session.html_files().len(),
        start_time.elapsed().as_secs_f64()
    );
    ExitCode::SUCCESS
}

/// Merge the configuration file (if any) with command-line values
fn build_config(args: &Args) -> Result<HarvestConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => HarvestConfig::from_file(path)?,
        None => HarvestConfig::default(),
    };

    if let Some(url) = &args.url {
        config.page_url = url.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
    config.include_patterns.extend(args.include.iter().cloned());
    config.exclude_patterns.extend(args.exclude.iter().cloned());
    if args.same_host {
        config.allow_external = false;
    }
    if args.no_escape {
        config.escape_html = false;
    }

    config.validate()?;
    Ok(config)
}

/// Feed worker events into the session, printing progress as it arrives
async fn drive(session: &mut Session, mut rx: mpsc::Receiver<StageEvent>) {
    while let Some(event) = rx.recv().await {
        if let StageEvent::Progress(update) = &event {
            println!(
                "[{:>5.1}%] {} {}/{} {}",
                update.percent(),
                update.stage,
                update.completed,
                update.total,
                update.path.display()
            );
        }
        session.apply(event);
    }
}

/// Print the stage outcome; false when the stage failed
fn report(session: &mut Session) -> bool {
    match session.state().clone() {
        SessionState::ReadyToConvert => {
            println!("{}", session.controls().status);
            true
        }
        SessionState::Failed { message, .. } => {
            eprintln!("{}", message);
            if let Err(e) = session.acknowledge() {
                ::log::warn!("{}", e);
            }
            false
        }
        state => {
            eprintln!("Stage worker stopped unexpectedly while {}", state);
            false
        }
    }
}
