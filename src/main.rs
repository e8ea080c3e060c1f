mod api;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "askdoc", about = "Terminal client for a document QA service")]
struct Args {
    /// Backend base URL (e.g. http://localhost:8000/api)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Directory the upload file picker starts in
    #[arg(short, long)]
    docs_dir: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to askdoc.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("askdoc.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match crate::core::config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("askdoc: {e}");
            return Ok(());
        }
    };
    let resolved = crate::core::config::resolve(
        &config,
        args.base_url.as_deref(),
        args.docs_dir.as_deref(),
    );

    log::info!("askdoc starting up against {}", resolved.base_url);

    tui::run(resolved)
}
