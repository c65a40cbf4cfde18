use anyhow::Result;
use clap::Args;
use glint_core::doc::Locale;
use glint_core::idx::ft::analyzer::{Analyzer, Analyzers};

#[derive(Args, Debug)]
pub struct AnalyzeCommandArguments {
	#[arg(help = "The locale selecting the analyzer, e.g. ja_JP")]
	#[arg(env = "GLINT_LOCALE", short = 'l', long = "locale")]
	locale: Locale,
	#[arg(help = "The text to analyze")]
	#[arg(required = true, num_args = 1..)]
	text: Vec<String>,
}

pub async fn init(
	AnalyzeCommandArguments {
		locale,
		text,
	}: AnalyzeCommandArguments,
) -> Result<()> {
	let text = text.join(" ");
	let terms = Analyzers::default().analyze(&text, &locale)?;
	debug!(%locale, terms = terms.len(), "analyzed text");
	println!("{}", serde_json::to_string_pretty(&terms)?);
	Ok(())
}
