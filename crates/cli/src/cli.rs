use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "weft")]
#[command(about = "Sorts utility classes in scripts and markup by framework order")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Files or directories to check
	#[arg(required = true, value_name = "PATH")]
	pub paths: Vec<PathBuf>,

	/// Write fixed sources back to disk
	#[arg(long)]
	pub fix: bool,

	/// Settings file (defaults to weft.toml in the working directory)
	#[arg(long, value_name = "FILE")]
	pub settings: Option<PathBuf>,

	/// Framework config file
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Worker command line, e.g. "node class-order.mjs"
	#[arg(long, value_name = "CMD")]
	pub worker: Option<String>,

	/// JSON order table answering instead of a worker
	#[arg(long, value_name = "FILE")]
	pub table: Option<PathBuf>,

	/// Working directory for relative paths
	#[arg(long, value_name = "DIR")]
	pub cwd: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}
