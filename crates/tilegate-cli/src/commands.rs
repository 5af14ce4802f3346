use anyhow::Context;
use colored::Colorize;
use tilegate_server::{ServerConfig, StoreConfig, TileServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::CheckConfig(args) => cmd_check_config(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = effective_config(&args)?;
    println!(
        "{} tilegate on {} (prefix {}, store {})",
        "▶".green().bold(),
        config.bind_addr.to_string().bold(),
        config.route_prefix.yellow(),
        describe_store(&config.store).cyan(),
    );
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(TileServer::new(config).serve())?;
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs) -> anyhow::Result<()> {
    let config = ServerConfig::load(&args.config)?;
    config.store.build()?;
    println!("{} {} is valid", "✓".green().bold(), args.config.display());
    println!("  bind:          {}", config.bind_addr);
    println!("  prefix:        {}", config.route_prefix);
    println!("  store:         {}", describe_store(&config.store));
    println!("  store timeout: {} ms", config.store_timeout_ms);
    println!("  cache-control: {}", config.cache_control());
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
pub(crate) fn effective_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = &args.root {
        config.store = StoreConfig::Filesystem { root: root.clone() };
    }
    if let Some(prefix) = &args.prefix {
        config.route_prefix = prefix.clone();
    }
    config.validate()?;
    Ok(config)
}

fn describe_store(store: &StoreConfig) -> String {
    match store {
        StoreConfig::None => "none (all object requests answer 503)".into(),
        StoreConfig::Memory => "memory".into(),
        StoreConfig::Filesystem { root } => format!("fs:{}", root.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServeArgs {
        ServeArgs { config: None, bind: None, root: None, prefix: None }
    }

    #[test]
    fn defaults_without_overrides() {
        let config = effective_config(&args()).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let a = ServeArgs {
            bind: Some("0.0.0.0:9000".parse().unwrap()),
            root: Some("/srv/tiles".into()),
            prefix: Some("/tiles".into()),
            ..args()
        };
        let config = effective_config(&a).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.store, StoreConfig::Filesystem { root: "/srv/tiles".into() });
        assert_eq!(config.route_prefix, "/tiles");
    }

    #[test]
    fn bad_prefix_override_is_rejected() {
        let a = ServeArgs { prefix: Some("tiles/".into()), ..args() };
        assert!(effective_config(&a).is_err());
    }

    #[test]
    fn store_description() {
        assert_eq!(describe_store(&StoreConfig::Memory), "memory");
        assert!(describe_store(&StoreConfig::None).contains("503"));
    }
}
