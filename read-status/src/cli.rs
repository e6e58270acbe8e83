use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

use crate::value::ReadStatusValue;

/// Render a chat read-status indicator to stdout.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// Who has seen the message.
    #[arg(long, value_enum, default_value_t = StatusArg::All)]
    pub status: StatusArg,

    /// Recipients shown for `--status some`. Repeat the flag or separate names with commas.
    #[arg(long = "seen-by", value_delimiter = ',')]
    pub seen_by: Vec<String>,

    /// Maximum width of the indicator, in cells.
    #[arg(long, default_value_t = 40)]
    pub width: i32,

    /// TOML file with style and cache settings.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Apply the status with an animated batch update.
    #[arg(long, default_value_t = false)]
    pub animated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    None,
    Some,
    All,
}

impl Cli {
    pub fn read_status_value(&self) -> ReadStatusValue {
        match self.status {
            StatusArg::None => ReadStatusValue::None,
            StatusArg::Some => ReadStatusValue::some(self.seen_by.iter().map(|name| name.trim())),
            StatusArg::All => ReadStatusValue::All,
        }
    }
}
