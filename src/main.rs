use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use vidcoach::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "vidcoach", about = "Chat with a YouTube inspiration agent")]
struct Args {
    /// Agent base URL (overrides VIDCOACH_BASE_URL and the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Where to write the log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let config = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            log_file: args.log_file.as_deref(),
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    if let Some(e) = config_error {
        warn!("Ignoring config file: {}", e);
    }
    info!("Vidcoach starting up against {}", config.base_url);

    vidcoach::tui::run(config)
}
