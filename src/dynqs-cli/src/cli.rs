//! Command-line interface for dynqs
//!
//! Argument parsing with clap, plus the glue that folds command-line flags on
//! top of the loaded [`Config`].

use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Parser;
use dynqs_filter::{HookSpec, RangeKind};
use std::path::PathBuf;

/// dynqs - turn URL query strings into document-database condition filters
#[derive(Parser, Debug, Default)]
#[command(name = "dynqs")]
#[command(author, version, about)]
#[command(after_help = "EXAMPLES:\n  \
    # Operators in values\n  \
    dynqs 'age=>=18&name=^Jo&tags[]=a&tags[]=!b'\n\n  \
    # Read a JSON object from stdin\n  \
    echo '{\"age\": \"<5\"}' | dynqs --json\n\n  \
    # Date range hook writing to createdAt\n  \
    dynqs --after since=createdAt 'since=2021-01-01'")]
pub struct Cli {
    /// Query string to translate (stdin if not specified)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Treat input as a JSON object instead of a query string
    #[arg(long)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only accept these keys (repeatable)
    #[arg(short = 'w', long, value_name = "KEY", action = clap::ArgAction::Append)]
    pub whitelist: Vec<String>,

    /// Drop these keys (repeatable)
    #[arg(short = 'b', long, value_name = "KEY", action = clap::ArgAction::Append)]
    pub blacklist: Vec<String>,

    /// Rename a key (repeatable)
    #[arg(short = 'a', long, value_name = "FROM=TO", action = clap::ArgAction::Append)]
    pub alias: Vec<String>,

    /// `ge` date hook on KEY, writing to FIELD (defaults to KEY)
    #[arg(long, value_name = "KEY[=FIELD]", action = clap::ArgAction::Append)]
    pub after: Vec<String>,

    /// `lt` date hook on KEY, writing to FIELD (defaults to KEY)
    #[arg(long, value_name = "KEY[=FIELD]", action = clap::ArgAction::Append)]
    pub before: Vec<String>,

    /// `ge`/`lt` date hook on KEY for `start|end` values
    #[arg(long, value_name = "KEY[=FIELD]", action = clap::ArgAction::Append)]
    pub between: Vec<String>,

    /// Recognised operator tokens, comma separated
    #[arg(long, value_name = "TOKENS", value_delimiter = ',')]
    pub ops: Option<Vec<String>>,

    /// Do not coerce `true` / `false` into booleans
    #[arg(long)]
    pub no_boolean: bool,

    /// Do not coerce numeric strings into numbers
    #[arg(long)]
    pub no_number: bool,

    /// Use compact output (no pretty-printing)
    #[arg(long)]
    pub compact: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply command-line flags on top of a loaded configuration
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        let parser = &mut config.parser;

        parser.whitelist.extend(self.whitelist.iter().cloned());
        parser.blacklist.extend(self.blacklist.iter().cloned());

        for entry in &self.alias {
            let (from, to) = entry
                .split_once('=')
                .ok_or_else(|| anyhow!("Invalid alias '{}', expected FROM=TO", entry))?;
            parser.alias.insert(from.to_string(), to.to_string());
        }

        let hooks = [
            (RangeKind::After, &self.after),
            (RangeKind::Before, &self.before),
            (RangeKind::Between, &self.between),
        ];
        for (kind, entries) in hooks {
            for entry in entries {
                let (key, field) = match entry.split_once('=') {
                    Some((key, field)) => (key, Some(field.to_string())),
                    None => (entry.as_str(), None),
                };
                if key.is_empty() {
                    return Err(anyhow!(
                        "Invalid --{} '{}', expected KEY[=FIELD]",
                        kind.as_str(),
                        entry
                    ));
                }
                parser
                    .custom
                    .insert(key.to_string(), HookSpec::Range { kind, field });
            }
        }

        if let Some(ops) = &self.ops {
            parser.ops = ops.clone();
        }
        if self.no_boolean {
            parser.string.to_boolean = false;
        }
        if self.no_number {
            parser.string.to_number = false;
        }
        if self.compact {
            config.output.compact = true;
        }

        Ok(())
    }
}
