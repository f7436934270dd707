use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use quietdoc::utils::Config;
use quietdoc::window::{DisplayMode, WinitWindowImpl};

/// quietdoc - a minimalist frameless document viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start in reduced-chrome mode
    #[arg(short, long)]
    reduced: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Window width
    #[arg(long)]
    width: Option<u32>,

    /// Window height
    #[arg(long)]
    height: Option<u32>,

    /// Keep the window above all others
    #[arg(long)]
    always_on_top: bool,

    /// Configuration file to use instead of the user config
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;

    // Initialize logging
    let log_level = if args.debug { "debug" } else { config.general.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting quietdoc v{}", env!("CARGO_PKG_VERSION"));

    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    config.window.always_on_top |= args.always_on_top;
    config.enforce_minimum_size();
    config.validate()?;

    let mode = if args.reduced || config.window.start_reduced {
        DisplayMode::Reduced
    } else {
        DisplayMode::Normal
    };

    let rect = WinitWindowImpl::new(&config, mode).run()?;
    info!("Window closed at {:?}", rect);

    if config.window.remember_geometry && rect.width > 0 && rect.height > 0 {
        config.window.x = rect.x;
        config.window.y = rect.y;
        config.window.width = rect.width as u32;
        config.window.height = rect.height as u32;
        if let Err(e) = config.save(args.config.as_deref()) {
            warn!("Failed to save window geometry: {}", e);
        }
    }

    Ok(())
}
