use clap::Parser;
use clap::ValueEnum;
use folio_core::queue::OverlapPolicy;

use crate::config_override::CliConfigOverrides;

#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// Commands to run at startup, in order, as if typed at the prompt.
    #[arg(value_name = "COMMAND")]
    pub commands: Vec<String>,

    /// Start with an empty screen instead of the intro banner.
    #[arg(long = "no-banner", default_value_t = false)]
    pub no_banner: bool,

    /// Text shown before the input row.
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Delay between staggered output lines, in milliseconds.
    #[arg(long = "stagger-ms", value_name = "MS")]
    pub stagger_ms: Option<u64>,

    /// What happens to pending output when another command is entered.
    #[arg(long)]
    pub overlap: Option<OverlapCliArg>,

    /// Print link labels without OSC 8 escapes.
    #[arg(long = "no-hyperlinks", default_value_t = false)]
    pub no_hyperlinks: bool,

    /// Raise the log level to `info` for the folio crates.
    #[clap(long = "debug", short = 'd', default_value_t = false)]
    pub debug: bool,

    #[clap(skip)]
    pub config_overrides: CliConfigOverrides,
}

/// Standard type to use with the `--overlap` CLI option.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OverlapCliArg {
    /// Output of every dispatch is released on its own schedule.
    Interleave,

    /// A new dispatch drops the pending output of earlier ones.
    Supersede,

    /// A new dispatch waits for earlier output to finish.
    Sequential,
}

impl From<OverlapCliArg> for OverlapPolicy {
    fn from(value: OverlapCliArg) -> Self {
        match value {
            OverlapCliArg::Interleave => OverlapPolicy::Interleave,
            OverlapCliArg::Supersede => OverlapPolicy::Supersede,
            OverlapCliArg::Sequential => OverlapPolicy::Sequential,
        }
    }
}
