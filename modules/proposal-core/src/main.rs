use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use proposal_common::Config;
use proposal_core::{log_filter, write_document, ProposalPipeline, ProposalRequest};

#[derive(Parser)]
#[command(name = "proposal", about = "商品提案書自動作成エージェント")]
struct Cli {
    /// 商品名
    name: String,

    /// 納品価格
    price: String,

    /// 容量 (例: 1,800ml)
    capacity: String,

    /// 画像URL（指定がない場合は自動検索）
    #[arg(long)]
    image: Option<String>,

    /// Google API Key (overrides GOOGLE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Directory the HTML file is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Open the written file with the system viewer
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Proposal failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter()?)
        .init();
    Ok(())
}

async fn run(cli: Cli) -> Result<PathBuf> {
    let mut config = Config::from_env()?;
    if let Some(key) = cli.api_key {
        config = config.with_api_key(key);
    }
    config.log_redacted();

    let pipeline = ProposalPipeline::from_config(&config)?;

    let mut request = ProposalRequest::new(cli.name, cli.price).with_capacity(cli.capacity);
    request.image_url = cli.image;

    info!(product = request.product_name.as_str(), "Creating proposal");
    let document = pipeline.run(&request).await?;

    let path = write_document(&document, &cli.output_dir)
        .with_context(|| format!("writing proposal to {}", cli.output_dir.display()))?;

    if cli.open {
        open_in_viewer(&path);
    }
    Ok(path)
}

/// Best effort; a missing opener only logs.
fn open_in_viewer(path: &Path) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    match std::process::Command::new(opener).arg(path).spawn() {
        Ok(_) => info!(path = %path.display(), "Opened proposal"),
        Err(e) => warn!(opener, error = %e, "Could not open proposal"),
    }
}
