use anyhow::{Context, Result};
use clap::Parser;
use dynqs_cli::{render, translate, Cli, Config, InputFormat};
use std::io::{self, Read};
use std::process;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config)?;

    let input = match &cli.query {
        Some(query) => query.clone(),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let format = if cli.json {
        InputFormat::Json
    } else {
        InputFormat::QueryString
    };

    let filter = translate(&input, format, &config)?;
    println!("{}", render(&filter, &config.output)?);
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new().filter_level(log_level).init();
}
