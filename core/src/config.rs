//! Configuration: `$FOLIO_HOME/config.toml` merged with `-c key=value`
//! overrides and typed CLI overrides.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use toml::Value as TomlValue;

use crate::error::FolioErr;
use crate::error::Result;
use crate::queue::OverlapPolicy;

pub const CONFIG_TOML_FILE: &str = "config.toml";

pub const DEFAULT_PROMPT: &str = "JanuZz@github:~$";

/// Delay between consecutive lines of staggered output.
pub const DEFAULT_STAGGER_MS: u64 = 100;

/// Application configuration loaded from disk and merged with overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding `config.toml` and the `log/` folder.
    pub folio_home: PathBuf,
    pub tui: Tui,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tui {
    pub prompt: String,
    pub stagger: Duration,
    pub overlap: OverlapPolicy,
    /// Seed the history with the intro banner at startup.
    pub show_banner: bool,
    /// Capture the mouse so the wheel scrolls the history.
    pub mouse_scroll: bool,
    /// Emit OSC 8 escapes so link labels are clickable.
    pub hyperlinks: bool,
}

impl Default for Tui {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            stagger: Duration::from_millis(DEFAULT_STAGGER_MS),
            overlap: OverlapPolicy::default(),
            show_banner: true,
            mouse_scroll: true,
            hyperlinks: true,
        }
    }
}

/// On-disk shape of `config.toml`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigToml {
    #[serde(default)]
    pub tui: TuiToml,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TuiToml {
    pub prompt: Option<String>,
    pub stagger_ms: Option<u64>,
    pub overlap: Option<OverlapPolicy>,
    pub show_banner: Option<bool>,
    pub mouse_scroll: Option<bool>,
    pub hyperlinks: Option<bool>,
}

/// Optional overrides for user configuration (e.g., from CLI flags).
#[derive(Default, Debug, Clone)]
pub struct ConfigOverrides {
    pub prompt: Option<String>,
    pub stagger_ms: Option<u64>,
    pub overlap: Option<OverlapPolicy>,
    pub show_banner: Option<bool>,
    pub hyperlinks: Option<bool>,
}

impl Config {
    /// Load `config.toml` from the folio home, apply `-c` overrides to the
    /// raw TOML tree, then apply typed `overrides` (highest precedence).
    pub fn load_with_cli_overrides(
        cli_overrides: Vec<(String, TomlValue)>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let folio_home = find_folio_home()?;
        let root = load_config_as_toml_with_cli_overrides(&folio_home, cli_overrides)?;
        let cfg: ConfigToml = root.try_into()?;
        Ok(Self::load_from_base_config_with_overrides(
            cfg, overrides, folio_home,
        ))
    }

    pub fn load_from_base_config_with_overrides(
        cfg: ConfigToml,
        overrides: ConfigOverrides,
        folio_home: PathBuf,
    ) -> Self {
        let defaults = Tui::default();
        let TuiToml {
            prompt,
            stagger_ms,
            overlap,
            show_banner,
            mouse_scroll,
            hyperlinks,
        } = cfg.tui;

        let tui = Tui {
            prompt: overrides.prompt.or(prompt).unwrap_or(defaults.prompt),
            stagger: overrides
                .stagger_ms
                .or(stagger_ms)
                .map_or(defaults.stagger, Duration::from_millis),
            overlap: overrides.overlap.or(overlap).unwrap_or(defaults.overlap),
            show_banner: overrides
                .show_banner
                .or(show_banner)
                .unwrap_or(defaults.show_banner),
            mouse_scroll: mouse_scroll.unwrap_or(defaults.mouse_scroll),
            hyperlinks: overrides
                .hyperlinks
                .or(hyperlinks)
                .unwrap_or(defaults.hyperlinks),
        };

        Self { folio_home, tui }
    }
}

/// Read `config.toml` as a raw TOML tree. A missing file yields an empty
/// table.
pub fn load_config_as_toml(folio_home: &Path) -> Result<TomlValue> {
    let path = folio_home.join(CONFIG_TOML_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            let table: toml::Table = toml::from_str(&contents)
                .map_err(|source| FolioErr::ConfigParse {
                    path: path.clone(),
                    source,
                })?;
            Ok(TomlValue::Table(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("{} not found, using defaults", path.display());
            Ok(TomlValue::Table(toml::Table::new()))
        }
        Err(source) => Err(FolioErr::ConfigRead { path, source }),
    }
}

pub fn load_config_as_toml_with_cli_overrides(
    folio_home: &Path,
    cli_overrides: Vec<(String, TomlValue)>,
) -> Result<TomlValue> {
    let mut root = load_config_as_toml(folio_home)?;
    for (path, value) in cli_overrides {
        apply_toml_override(&mut root, &path, value);
    }
    Ok(root)
}

/// Parse one raw `key=value` override. The value is parsed as a TOML value;
/// if that fails the raw string is used, so `-c tui.prompt=me@box:~$` works
/// without quotes.
pub fn parse_cli_override(raw: &str) -> Result<(String, TomlValue)> {
    let invalid = |reason: &str| FolioErr::InvalidOverride {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };
    // Only split on the first '=' so values are free to contain it.
    let (key, value) = raw.split_once('=').ok_or_else(|| invalid("missing '='"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid("empty key"));
    }
    let value = value.trim();
    let parsed = parse_toml_value(value).unwrap_or_else(|| TomlValue::String(value.to_string()));
    Ok((key.to_string(), parsed))
}

fn parse_toml_value(raw: &str) -> Option<TomlValue> {
    let wrapped = format!("_x_ = {raw}");
    let mut table: toml::Table = toml::from_str(&wrapped).ok()?;
    table.remove("_x_")
}

/// Apply a single dotted-path override onto `root`, creating intermediate
/// tables as needed.
pub fn apply_toml_override(root: &mut TomlValue, path: &str, value: TomlValue) {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        if !current.is_table() {
            *current = TomlValue::Table(toml::Table::new());
        }
        let TomlValue::Table(table) = current else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_string(), value);
            return;
        }
        current = table
            .entry(segment.to_string())
            .or_insert(TomlValue::Table(toml::Table::new()));
    }
}

/// Returns the folio home directory: `$FOLIO_HOME` if set (and non-empty),
/// otherwise `~/.folio`. Does not verify that the directory exists.
pub fn find_folio_home() -> Result<PathBuf> {
    if let Ok(val) = std::env::var("FOLIO_HOME") {
        if !val.is_empty() {
            return Ok(PathBuf::from(val));
        }
    }
    let mut p = dirs::home_dir().ok_or(FolioErr::HomeDirNotFound)?;
    p.push(".folio");
    Ok(p)
}

/// Returns the folder where logs are written. Does not verify that the
/// directory exists.
pub fn log_dir(cfg: &Config) -> PathBuf {
    cfg.folio_home.join("log")
}
