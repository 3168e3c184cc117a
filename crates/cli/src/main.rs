#![allow(unused_crate_dependencies)]
//! Weft binary.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use weft_cli::{Cli, run};

fn main() -> ExitCode {
	let cli = Cli::parse();

	if let Err(err) = init_tracing(cli.verbose) {
		eprintln!("weft: {err:#}");
		return ExitCode::from(2);
	}

	let mut stdout = std::io::stdout().lock();
	match run(&cli, &mut stdout) {
		Ok(summary) if summary.violations > 0 => ExitCode::from(1),
		Ok(_) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("weft: {err:#}");
			ExitCode::from(2)
		}
	}
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();

	tracing::subscriber::set_global_default(subscriber).context("failed to install the tracing subscriber")
}
