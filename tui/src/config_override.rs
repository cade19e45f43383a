//! Support for `-c key=value` overrides.
//!
//! [`CliConfigOverrides`] is embedded into a `clap`-derived CLI struct with
//! `#[clap(flatten)]`. Each occurrence of `-c key=value` (or
//! `--config key=value`) is collected as a raw string and parsed later, once
//! the caller is ready to report errors.

use clap::ArgAction;
use clap::Parser;
use folio_core::config::parse_cli_override;
use toml::Value;

#[derive(Parser, Debug, Default, Clone)]
pub struct CliConfigOverrides {
    /// Override a configuration value that would otherwise be loaded from
    /// `~/.folio/config.toml`. Use a dotted path (`tui.prompt`) to override
    /// nested values. The `value` portion is parsed as TOML. If it fails to
    /// parse, the raw string is used as a literal.
    ///
    /// Examples:
    ///   - `-c tui.stagger_ms=50`
    ///   - `-c tui.prompt='guest@folio:~$'`
    ///   - `-c tui.overlap=sequential`
    #[arg(
        short = 'c',
        long = "config",
        value_name = "key=value",
        action = ArgAction::Append,
        global = true,
    )]
    pub raw_overrides: Vec<String>,
}

impl CliConfigOverrides {
    /// Parse the raw strings into `(path, value)` tuples.
    pub fn parse_overrides(&self) -> Result<Vec<(String, Value)>, String> {
        self.raw_overrides
            .iter()
            .map(|raw| parse_cli_override(raw).map_err(|e| e.to_string()))
            .collect()
    }
}
