use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use techchat::core::config::{CliOverrides, load_config, resolve};
use techchat::core::navigation::InputStyle;

#[derive(Parser)]
#[command(name = "techchat", about = "Menu-driven chatbot for web technology references")]
struct Args {
    /// Directory or http(s) base URL holding the per-technology documents
    #[arg(short, long)]
    catalog: Option<String>,

    /// Single document holding every technology (path or URL)
    #[arg(short, long)]
    bundle: Option<String>,

    /// How typed text is interpreted
    #[arg(short, long, value_enum)]
    mode: Option<InputStyle>,

    /// Config file (defaults to ~/.techchat/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the debug log
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("techchat: {e}");
            std::process::exit(2);
        }
    };
    let config = resolve(
        &file_config,
        &CliOverrides {
            catalog: args.catalog.as_deref(),
            bundle: args.bundle.as_deref(),
            style: args.mode,
            log_file: args.log_file.as_deref(),
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!(
        "techchat starting up (mode: {:?}, catalog: {})",
        config.style,
        config.location
    );

    techchat::tui::run(config)
}
