use anyhow::Context;
use colored::Colorize;
use kiosk_server::{ImageBackend, KioskServer, ServerConfig, StorageBackend};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Link(args) => cmd_link(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(args: &ConfigPathArgs) -> anyhow::Result<ServerConfig> {
    match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn apply_overrides(config: &mut ServerConfig, args: &ServeArgs) {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = &args.offline_images {
        config.images = ImageBackend::Fixed { url: url.clone() };
    }
    if args.memory_storage {
        config.storage = StorageBackend::Memory;
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("starting async runtime")
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, &args);
    println!(
        "{} Kiosk server on {} (ledger: {}, limit: {} per stall)",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.service.ledger_name.cyan(),
        config.service.generation_limit
    );
    let server = KioskServer::new(config)?;
    runtime()?.block_on(server.serve())?;
    Ok(())
}

fn cmd_link(args: ConfigPathArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let name = config.service.ledger_name.clone();
    let server = KioskServer::new(config)?;
    let link = runtime()?.block_on(server.service().ledger_link())?;
    match link {
        Some(url) => println!("{} {}", name.cyan(), url.bold()),
        None => println!("{} {} has not been created yet", "✗".red().bold(), name.cyan()),
    }
    Ok(())
}

fn cmd_config(args: ConfigPathArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
