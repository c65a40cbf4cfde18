mod analyze;
mod demo;
mod highlight;
mod snippet;
pub(crate) mod validator;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use self::analyze::AnalyzeCommandArguments;
use self::demo::DemoCommandArguments;
use self::highlight::HighlightCommandArguments;
use crate::cnf::{LOGO, PKG_NAME, RELEASE};
use crate::telemetry::{self, LogFormat};

const INFO: &str = "
Locale-aware search snippet highlighting for multi-field, multi-locale documents.

Each field of a document is analyzed for its locale, the query is located in
the field, and bounded excerpts are cut around the matches with the matched
text wrapped in highlight markers.
";

#[derive(Parser, Debug)]
#[command(name = PKG_NAME, bin_name = PKG_NAME)]
#[command(about = INFO, before_help = LOGO)]
#[command(version = RELEASE.as_str())]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
	#[arg(help = "The logging level or filter directives for the command-line tool")]
	#[arg(env = "GLINT_LOG", long = "log", global = true)]
	#[arg(default_value = "info")]
	log: String,
	#[arg(help = "The format of the log lines written to stderr")]
	#[arg(env = "GLINT_LOG_FORMAT", long = "log-format", global = true)]
	#[arg(value_enum, default_value_t = LogFormat::Text)]
	log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Highlight the fields of a JSON document")]
	Highlight(HighlightCommandArguments),
	#[command(about = "Show the terms produced by the analyzer of a locale")]
	Analyze(AnalyzeCommandArguments),
	#[command(about = "Search and highlight a set of demo articles")]
	Demo(DemoCommandArguments),
}

pub async fn init() -> ExitCode {
	let args = Cli::parse();
	// Initialize logging
	if let Err(e) = telemetry::builder().with_log_level(&args.log).with_format(args.log_format).init()
	{
		eprintln!("{e}");
		return ExitCode::FAILURE;
	}
	// Run the command
	let output = match args.command {
		Commands::Highlight(args) => highlight::init(args).await,
		Commands::Analyze(args) => analyze::init(args).await,
		Commands::Demo(args) => demo::init(args).await,
	};
	match output {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{e:#}");
			ExitCode::FAILURE
		}
	}
}
