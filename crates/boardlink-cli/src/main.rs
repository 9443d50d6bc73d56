//! Boardlink CLI - Main entry point
//!
//! Loads the board catalog, resolves connected-device identifiers against
//! it, and drives external flashing tools.

mod config;

use anyhow::{bail, Context, Result};
use boardlink_catalog::{BoardParams, Catalog};
use boardlink_flash::{format_usb_id, image_digest, run_pipeline, PipelineStage};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "boardlink")]
#[command(about = "Identify connected boards against a catalog and run flashing tools")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "boardlink.toml")]
    config: PathBuf,

    /// Catalog file, overriding the configured path
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a USB product id to a board identity and display name
    Identify {
        /// Product id, hex ("0x0043") or decimal
        #[arg(long)]
        pid: String,
        /// Vendor id to check against the matched board's vid entries
        #[arg(long)]
        vid: Option<String>,
    },
    /// List catalog entries whose path contains a token
    Lookup {
        #[arg(long)]
        token: String,
        /// Additionally require this exact leaf value
        #[arg(long)]
        value: Option<String>,
    },
    /// Print the full parameter record for a board identity
    Show {
        /// vendor:architecture:board-key identity
        identity: String,
    },
    /// Run the matched board's upload tool against a firmware image
    Flash {
        #[arg(long)]
        pid: String,
        #[arg(long)]
        image: PathBuf,
        /// Serial port to pass to the upload tool
        #[arg(long)]
        port: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load_config(&args.config)?;
    let catalog_path = args
        .catalog
        .unwrap_or_else(|| PathBuf::from(&config.catalog.path));
    let catalog = Catalog::from_file(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    match args.command {
        Command::Identify { pid, vid } => {
            let pid = normalize_product_id(&pid);
            match catalog.resolve_by_product_id(&pid)? {
                Some(board) => {
                    if let Some(vid) = vid {
                        let vid = normalize_product_id(&vid);
                        let params = catalog.board_params(&board.path)?;
                        if !vid_matches(&params, &vid) {
                            println!("unknown device (pid {pid}, vid {vid})");
                            return Ok(());
                        }
                    }
                    println!("{}  {}", board.identity, board.display_name);
                }
                None => println!("unknown device (pid {pid})"),
            }
        }
        Command::Lookup { token, value } => {
            let matches = match value {
                Some(ref expected) => {
                    let (matches, found) = catalog.find_by_token_and_value(&token, expected);
                    if !found {
                        info!(%token, %expected, "No matching entries");
                    }
                    matches
                }
                None => catalog.find_by_token(&token),
            };
            for m in &matches {
                println!("{} = {}", m.path, m.value);
            }
        }
        Command::Show { identity } => {
            match catalog.board_path(&identity)? {
                Some(path) => {
                    let params = catalog.board_params(&path)?;
                    println!("{}", serde_json::to_string_pretty(&params)?);
                }
                None => println!("unknown board {identity}"),
            }
        }
        Command::Flash { pid, image, port } => {
            let pid = normalize_product_id(&pid);
            let Some(board) = catalog.resolve_by_product_id(&pid)? else {
                bail!("no board in the catalog matches pid {pid}");
            };
            info!(identity = %board.identity, name = %board.display_name, "Matched board");

            let params = catalog.board_params(&board.path)?;
            let upload = params
                .upload
                .with_context(|| format!("board {} has no upload settings", board.identity))?;
            let Some(tool) = upload.tool.clone() else {
                bail!("board {} does not name an upload tool", board.identity);
            };
            let Some(port) = port.or(config.flash.default_port) else {
                bail!("no serial port given (use --port or flash.default_port)");
            };

            let digest = image_digest(&image)?;
            info!(image = %image.display(), %digest, "Uploading firmware image");

            let mut stage = PipelineStage::new(tool);
            if let Some(protocol) = upload.protocol.as_deref() {
                stage = stage.args(["-c", protocol]);
            }
            if let Some(mcu) = params.build.as_ref().and_then(|b| b.mcu.as_deref()) {
                stage = stage.args(["-p", mcu]);
            }
            if let Some(speed) = upload.speed.as_deref() {
                stage = stage.args(["-b", speed]);
            }
            stage = stage
                .args(["-P", port.as_str()])
                .arg("-D")
                .arg(format!("-Uflash:w:{}:i", image.display()));

            let output = run_pipeline(&[stage]).await?;
            if !output.is_empty() {
                print!("{}", String::from_utf8_lossy(&output));
            }
            info!("Upload complete");
        }
    }

    Ok(())
}

/// Whether a vendor id is compatible with a matched board record. Records
/// that list no vid entries cannot contradict the probe and are accepted.
fn vid_matches(params: &BoardParams, vid: &str) -> bool {
    params
        .vid
        .as_ref()
        .map(|set| set.contains(vid))
        .unwrap_or(true)
}

/// Normalize a user-supplied product id into the catalog's string form.
/// Hex and decimal numerics become zero-padded "0x%04x"; anything else is
/// passed through untouched.
fn normalize_product_id(raw: &str) -> String {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => raw.parse::<u16>().ok(),
    };
    match parsed {
        Some(id) => format_usb_id(id),
        None => raw.to_string(),
    }
}
