use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kiosk",
    about = "Stall registration and image generation kiosk backend",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the shareable link to the ledger file
    Link(ConfigPathArgs),
    /// Print the effective configuration as TOML
    Config(ConfigPathArgs),
}

#[derive(Args)]
pub struct ConfigPathArgs {
    /// TOML config file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigPathArgs,

    /// Address to listen on, overriding the config file
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Skip the image API and answer every request with this URL
    #[arg(long, value_name = "URL")]
    pub offline_images: Option<String>,

    /// Keep the ledger in memory instead of the cloud drive
    #[arg(long)]
    pub memory_storage: bool,
}
