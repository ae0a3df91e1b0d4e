use anyhow::Context;
use ndf_config::NdfConfig;

use crate::cli::Cli;

/// Load `.env`, then layer TOML, env vars, and CLI path flags.
pub fn load_config(cli: &Cli) -> anyhow::Result<NdfConfig> {
    load_dotenv()?;
    NdfConfig::load_with_overrides(&cli.path_overrides()).context("failed to load configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        tracing::debug!(path = %env_path.display(), "loaded dotenv file");
    }
    Ok(())
}
