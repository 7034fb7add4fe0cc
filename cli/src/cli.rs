//! CLI argument definitions for `mercator`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Query territory, locale and containment data.
#[derive(Parser, Debug)]
#[command(name = "mercator")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Show every code for a territory:\n",
    "    $ mercator territory DEU\n\n",
    "  Walk the containment hierarchy:\n",
    "    $ mercator parents DE --expand\n",
    "    $ mercator children 150 --expand\n\n",
    "  Complete a locale tag:\n",
    "    $ mercator locale zh-TW\n",
))]
pub struct Cli {
    /// Directory holding the `general/` and `locales/` data partitions.
    #[arg(long, value_name = "DIR", global = true)]
    pub data_root: Option<Utf8PathBuf>,

    /// Configuration file (TOML).
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Query to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show every code a territory is known by.
    Territory(TerritoryArgs),

    /// List the groups containing a territory.
    Parents(HierarchyArgs),

    /// List the members of a territory group.
    Children(HierarchyArgs),

    /// Parse and complete a locale tag.
    Locale(LocaleArgs),
}

/// Arguments for `territory`.
#[derive(Args, Debug, Clone)]
pub struct TerritoryArgs {
    /// Territory code in any supported code space.
    pub code: String,

    /// Code space to assert the code in (ISO_3166_A2, ISO_3166_A3, ISO_3166_N, FIPS_10, UN_M49).
    #[arg(long = "type", value_name = "TYPE")]
    pub code_type: Option<String>,

    /// Locale for the display name [default: configured locale].
    #[arg(long, value_name = "TAG")]
    pub locale: Option<String>,
}

/// Arguments for `parents` and `children`.
#[derive(Args, Debug, Clone)]
pub struct HierarchyArgs {
    /// Territory code in any supported code space.
    pub code: String,

    /// Walk the whole hierarchy instead of one level.
    #[arg(long)]
    pub expand: bool,
}

/// Arguments for `locale`.
#[derive(Args, Debug, Clone)]
pub struct LocaleArgs {
    /// Locale tag such as `ru`, `zh-TW` or `sr_Latn_RS`.
    pub tag: String,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
