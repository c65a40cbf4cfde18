use clap::Args;
use glint_core::idx::ft::assembler::SnippetParams;
use glint_core::idx::ft::locator::{Locator, MatchMode, QueryMode};

/// The options shared by every command which renders snippets. Options left
/// unset fall back to the `GLINT_*` environment defaults of the engine.
#[derive(Args, Debug, Default)]
pub struct SnippetArguments {
	#[arg(help = "The nominal number of characters in a snippet window")]
	#[arg(env = "GLINT_SNIPPET_MAX_LENGTH", long = "max-length")]
	max_length: Option<usize>,
	#[arg(help = "The largest gap, in characters, between two windows which are merged")]
	#[arg(env = "GLINT_SNIPPET_MERGE_GAP", long = "merge-gap")]
	merge_gap: Option<usize>,
	#[arg(help = "The marker inserted before highlighted text")]
	#[arg(env = "GLINT_HIGHLIGHT_TAG_OPEN", long = "open-tag")]
	#[arg(value_parser = super::validator::tag)]
	open_tag: Option<String>,
	#[arg(help = "The marker inserted after highlighted text")]
	#[arg(env = "GLINT_HIGHLIGHT_TAG_CLOSE", long = "close-tag")]
	#[arg(value_parser = super::validator::tag)]
	close_tag: Option<String>,
	#[arg(help = "The separator between the snippets of one field")]
	#[arg(env = "GLINT_SNIPPET_SEPARATOR", long = "separator")]
	separator: Option<String>,
	#[arg(help = "Whether the last query term also matches longer terms it is a prefix of")]
	#[arg(long = "prefix")]
	#[arg(default_value_t = false)]
	prefix: bool,
	#[arg(help = "Whether individual query terms are highlighted in addition to the phrase")]
	#[arg(long = "terms")]
	#[arg(default_value_t = false)]
	terms: bool,
}

impl SnippetArguments {
	pub fn match_mode(&self) -> MatchMode {
		if self.prefix {
			MatchMode::Prefix
		} else {
			MatchMode::Exact
		}
	}

	pub fn query_mode(&self) -> QueryMode {
		if self.terms {
			QueryMode::PhraseOrTerms
		} else {
			QueryMode::Phrase
		}
	}

	pub fn locator(&self) -> Locator {
		Locator::new(self.match_mode(), self.query_mode())
	}

	pub fn params(&self) -> SnippetParams {
		let mut params = SnippetParams::default()
			.with_match_mode(self.match_mode())
			.with_query_mode(self.query_mode());
		if let Some(v) = self.max_length {
			params = params.with_max_length(v);
		}
		if let Some(v) = self.merge_gap {
			params = params.with_merge_gap(v);
		}
		if let Some(v) = &self.separator {
			params = params.with_separator(v);
		}
		let open = self.open_tag.clone().unwrap_or_else(|| params.open_tag.clone());
		let close = self.close_tag.clone().unwrap_or_else(|| params.close_tag.clone());
		params.with_tags(open, close)
	}
}
