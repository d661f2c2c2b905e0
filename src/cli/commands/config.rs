//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{TarponError, TarponResult};

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> TarponResult<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", manager.path().display());
            Ok(())
        }
        ConfigAction::Init { force } => init(manager, force).await,
    }
}

async fn init(manager: &ConfigManager, force: bool) -> TarponResult<()> {
    if manager.path().exists() && !force {
        return Err(TarponError::User(format!(
            "{} already exists (use --force to overwrite)",
            manager.path().display()
        )));
    }

    manager.save(&Config::default()).await?;
    println!("Wrote {}", manager.path().display());
    Ok(())
}
