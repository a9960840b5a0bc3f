use clap::Parser;

use gesture_collector::camera::NokhwaCamera;
use gesture_collector::cli::Args;
use gesture_collector::config::Config;
use gesture_collector::session::{Collector, CollectorConfig, Outcome};
use gesture_collector::signal;
use gesture_collector::terminal::{DeferredStderr, TerminalSurface};

fn main() {
    let args = Args::parse();

    let config = match Config::load(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level().unwrap_or(log::LevelFilter::Warn))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(DeferredStderr)))
        .init();

    if let Err(e) = signal::install_handler() {
        log::warn!("Could not install signal handler: {}", e);
    }

    print_banner();

    let collector = Collector::new(CollectorConfig {
        dataset_root: args.dataset_dir,
        canonical: config.canonical_resolution(),
        poll_timeout: config.poll_timeout(),
    })
    .with_stop_flag(signal::stop_flag());

    let settings = config.camera_settings();
    let report = match collector.run(|| NokhwaCamera::open(settings), TerminalSurface::open) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &report.outcome {
        Outcome::CameraUnavailable(e) => {
            println!("Error: {}", e);
            return;
        }
        Outcome::CameraLost(e) => println!("Error: {}", e),
        Outcome::Interrupted => println!("\nInterrupted, shutting down..."),
        Outcome::Quit => println!("\nQuitting..."),
    }

    if !report.saved.is_empty() {
        println!("Captured {} sample(s) this session.", report.saved.len());
    }
    if let Some(summary) = &report.summary {
        println!("\n{}", summary);
    }
}

fn print_banner() {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("Gesture Dataset Collection Tool");
    println!("{rule}");
    println!("\nControls:");
    println!("  0-5: Select gesture class (number of fingers)");
    println!("  SPACE: Capture and save current frame");
    println!("  'p': Preview mode (toggle preprocessing)");
    println!("  'q': Quit");
    println!("\nStarting camera...");
}
