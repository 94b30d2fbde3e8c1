//! dynqs-cli library
//!
//! Provides Config and the translation entry point for programmatic use.

mod cli;
mod config;

pub use cli::Cli;
pub use config::{Config, OutputConfig};

use anyhow::{anyhow, Context, Result};
use dynqs_filter::{Filter, Query, QueryParser};

/// Input encoding accepted by [`translate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// `application/x-www-form-urlencoded` query string
    QueryString,
    /// JSON object of parameters
    Json,
}

/// Translate raw input into a filter using the given configuration
pub fn translate(input: &str, format: InputFormat, config: &Config) -> Result<Filter> {
    let query = match format {
        InputFormat::QueryString => Query::from_query_string(input.trim()),
        InputFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(input).context("Failed to parse JSON input")?;
            Query::from_json(value).ok_or_else(|| anyhow!("JSON input must be an object"))?
        }
    };
    log::debug!("parsed {} query parameter(s)", query.len());

    let options = config.parser.clone().build()?;
    Ok(QueryParser::new(options).parse(&query)?)
}

/// Render a filter as JSON text
pub fn render(filter: &Filter, output: &OutputConfig) -> Result<String> {
    let text = if output.compact {
        serde_json::to_string(filter)?
    } else {
        serde_json::to_string_pretty(filter)?
    };
    Ok(text)
}
