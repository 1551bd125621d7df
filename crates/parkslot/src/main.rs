//! `parkslot` - CLI and server for the parking slot tracker.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use parkslot::cli::{Cli, Command, ConfigCommand, ServeCommand, SlotsCommand};
use parkslot::{init_logging, server, Config, SlotService, SlotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(&mut config, serve_cmd).await,
        Command::Slots(slots_cmd) => handle_slots(&config, slots_cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_service(config: &Config) -> anyhow::Result<SlotService> {
    let path = config.database_path();
    let store = SlotStore::open(&path)
        .with_context(|| format!("opening slot store at {}", path.display()))?;
    Ok(SlotService::new(store, config.slots.max_slots))
}

async fn handle_serve(config: &mut Config, cmd: ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate().context("invalid server settings")?;

    let service = open_service(config)?;
    server::serve(config, service).await.context("server failed")?;
    Ok(())
}

fn handle_slots(config: &Config, cmd: SlotsCommand) -> anyhow::Result<()> {
    let service = open_service(config)?;

    match cmd {
        SlotsCommand::List { json } => {
            let slots = service.list_slots()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else if slots.is_empty() {
                println!("No slots. Run `parkslot slots init <N>` to create some.");
            } else {
                for slot in &slots {
                    match &slot.issued_code {
                        Some(code) => println!("{:<12} occupied  {code}", slot.slot_number),
                        None => println!("{:<12} vacant", slot.slot_number),
                    }
                }
            }
        }
        SlotsCommand::Toggle { slot } => {
            let slot = service.toggle_slot(&slot)?;
            if slot.is_occupied {
                println!("{} is now occupied", slot.slot_number);
                if let Some(code) = &slot.issued_code {
                    println!("Issued code: {code}");
                }
            } else {
                println!("{} is now vacant", slot.slot_number);
            }
        }
        SlotsCommand::Init { count } => {
            let summary = service.initialize_slots(count)?;
            println!("{}", summary.message);
        }
    }

    service.close()?;
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let service = open_service(config)?;
    let stats = service.stats()?;
    let database_path = service.database_path()?;

    if json {
        let status = serde_json::json!({
            "database_path": database_path,
            "max_slots": service.max_slots(),
            "slots": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("parkslot status");
        println!("---------------");
        println!("Database:      {}", database_path.display());
        println!("Max slots:     {}", service.max_slots());
        println!("Total slots:   {}", stats.total);
        println!("Occupied:      {}", stats.occupied);
        println!("Vacant:        {}", stats.vacant);
    }

    service.close()?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Server]");
                println!("  Host:           {}", config.server.host);
                println!("  Port:           {}", config.server.port);
                println!();
                println!("[Slots]");
                println!("  Max slots:      {}", config.slots.max_slots);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => anyhow::bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
