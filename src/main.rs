use std::process::exit;
use clap::Parser;
use log::{error, info};
use tagged_cache::cache::errors::CacheError;
use tagged_cache::cache::structs::cache_manager::CacheManager;
use tagged_cache::cache::traits::cache_frontend::CacheFrontend;
use tagged_cache::common::common::setup_logging;
use tagged_cache::config::structs::configuration::Configuration;
use tagged_cache::structs::{Cli, Command};

#[tracing::instrument(level = "debug")]
fn main()
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => config,
        Err(_) => exit(101)
    };

    if let Err(error) = setup_logging(&config) {
        eprintln!("{}", error);
        exit(1);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let manager = CacheManager::from_configuration(&config);
    if let Err(error) = run(&manager, &args.command) {
        error!("[CLI] {:?} failed: {}", args.command, error);
        exit(1);
    }
}

fn run(manager: &CacheManager, command: &Command) -> Result<(), CacheError>
{
    match command {
        Command::List => {
            for identifier in manager.cache_identifiers() {
                let config = manager.effective_configuration(&identifier);
                println!(
                    "{:<24} frontend={} backend={} persistent={}",
                    identifier,
                    config.frontend.unwrap_or_default(),
                    config.backend.unwrap_or_default(),
                    config.persistent.unwrap_or(false)
                );
            }
        }
        Command::Show { cache } => {
            if !manager.has_cache(cache) {
                return Err(CacheError::NoSuchCache(cache.clone()));
            }
            let config = manager.effective_configuration(cache);
            let rendered = toml::to_string(&config)
                .map_err(|e| CacheError::SerializationError(e.to_string()))?;
            println!("[caches.{}]\n{}", cache, rendered);
        }
        Command::Flush { force } => {
            manager.flush_caches(*force)?;
        }
        Command::FlushOne { cache } => {
            manager.get_cache(cache)?.flush()?;
            info!("[CLI] Flushed cache \"{}\"", cache);
        }
        Command::FlushByTag { tag, force } => {
            let flushed = manager.flush_caches_by_tag(tag, *force)?;
            println!("{} entries flushed", flushed);
        }
        Command::CollectGarbage => {
            manager.collect_garbage()?;
        }
        Command::Freeze { cache } => {
            manager.get_cache(cache)?.freeze()?;
            info!("[CLI] Froze cache \"{}\"", cache);
        }
        Command::Entries { cache } => {
            let cache = manager.get_cache(cache)?;
            let frozen = cache.is_frozen()?;
            for entry_identifier in cache.backend().entry_identifiers()? {
                println!("{}", entry_identifier);
            }
            if frozen {
                info!("[CLI] Cache \"{}\" is frozen", cache.identifier());
            }
        }
    }
    Ok(())
}
