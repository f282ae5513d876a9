mod app;
mod config;
mod error;
mod input;
mod slide;
mod state;
mod style;
mod view;

use app::SaveTheDate;
use clap::Parser;
use config::Config;
use eframe::egui;
use error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Full-screen wedding announcement slideshow
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Config file to load instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run in a window instead of full screen
    #[arg(long)]
    windowed: bool,

    /// Write the default config file (if missing) and exit
    #[arg(long)]
    write_default_config: bool,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_icon(path: &Path) -> Result<egui::IconData, Error> {
    let image = image::open(path)
        .map_err(|source| Error::Icon {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    let (width, height) = image.dimensions();
    Ok(egui::IconData {
        rgba: image.into_raw(),
        width,
        height,
    })
}

fn native_options(config: &Config) -> eframe::NativeOptions {
    let window = &config.window;
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(window.title.clone())
        .with_inner_size([window.width, window.height])
        .with_fullscreen(window.fullscreen);

    if let Some(icon) = &window.icon {
        match load_icon(&config.resolve(icon)) {
            Ok(icon) => viewport = viewport.with_icon(icon),
            Err(e) => tracing::warn!(error = %e, "using default window icon"),
        }
    }

    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.write_default_config {
        match Config::create_default() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "could not write default config");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "could not load config");
                std::process::exit(1);
            }
        },
        None => Config::load(),
    };
    if cli.windowed {
        config.window.fullscreen = false;
    }

    tracing::info!(
        slides = config.slides.len(),
        fullscreen = config.window.fullscreen,
        "starting"
    );

    let options = native_options(&config);
    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(SaveTheDate::from_creation_context(cc, config)))),
    )
}
