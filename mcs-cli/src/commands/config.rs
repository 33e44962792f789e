//! Command to show the resolved configuration.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use mcs::Resolution;
use serde_json::Value;

/// Show the resolved configuration.
#[derive(Args)]
pub struct ConfigCommand {
    /// Print only this dotted key
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// Also print where the configuration came from
    #[arg(long)]
    pub show_source: bool,
}

impl ConfigCommand {
    pub fn execute(self, _global: &GlobalOptions, resolution: &Resolution) -> Result<(), CliError> {
        if self.show_source {
            println!("source: {}", resolution.source);
            match &resolution.config_file_used {
                Some(path) => println!("file: {}", path.display()),
                None => println!("file: (none)"),
            }
            if !resolution.env_overrides.is_empty() {
                println!("environment: {}", resolution.env_overrides.join(", "));
            }
        }

        match self.key {
            Some(key) => {
                let value = resolution
                    .config
                    .get(&key)
                    .ok_or(CliError::MissingKey(key))?;
                println!("{}", render_value(value)?);
            }
            None => println!("{}", serde_json::to_string_pretty(&resolution.config)?),
        }

        Ok(())
    }
}

/// Strings print bare so the output can be used directly in shell scripts.
fn render_value(value: &Value) -> Result<String, CliError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Object(_) | Value::Array(_) => Ok(serde_json::to_string_pretty(value)?),
        other => Ok(other.to_string()),
    }
}
