use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use glint_core::demo::ArticleDemoDataCreator;
use glint_core::doc::Locale;
use glint_core::idx::ft::assembler::Assembler;
use glint_core::idx::search::{MemoryIndex, highlight_hits};

use super::snippet::SnippetArguments;

/// `(locale, title, description, content)` of the demo articles
const ARTICLES: &[(&str, &str, &str, &str)] = &[
	("ja_JP", "新規作成", "記事の説明", "あいうえお 日本語"),
	("ja_JP", "日本語の記事", "新規の記事", "東京で新規作成された記事"),
	("en_US", "entity title", "entity description", "entity content"),
	("en_US", "Search snippets", "Highlighting matches", "Matches are highlighted in the snippet"),
];

#[derive(Args, Debug)]
pub struct DemoCommandArguments {
	#[arg(help = "The search query")]
	#[arg(short = 'q', long = "query")]
	query: String,
	#[arg(help = "The locale to search in, e.g. ja_JP")]
	#[arg(env = "GLINT_LOCALE", short = 'l', long = "locale")]
	#[arg(default_value = "ja_JP")]
	locale: Locale,
	#[command(flatten)]
	#[command(next_help_heading = "Snippets")]
	snippet: SnippetArguments,
}

pub async fn init(
	DemoCommandArguments {
		query,
		locale,
		snippet,
	}: DemoCommandArguments,
) -> Result<()> {
	let index = Arc::new(MemoryIndex::default().with_locator(snippet.locator()));
	let demo = ArticleDemoDataCreator::new();
	for (l, title, description, content) in ARTICLES {
		demo.create_article(index.as_ref(), title, description, content, &l.parse()?)?;
	}
	info!("Created {} demo articles", demo.created().len());
	// Highlighting is CPU bound, keep it off the async workers
	let params = snippet.params();
	let res = tokio::task::spawn_blocking({
		let index = index.clone();
		move || {
			let assembler = Assembler::new(index.analyzers(), params);
			let fields = ["title", "description", "content"];
			highlight_hits(index.as_ref(), &assembler, &query, &locale, &fields)
		}
	})
	.await?;
	let outcome = res.and_then(|hits| {
		info!("Found {} matching articles", hits.len());
		for hit in hits {
			println!("{}", serde_json::to_string(&hit)?);
		}
		Ok(())
	});
	// The demo articles are removed whatever the outcome
	demo.delete(index.as_ref())?;
	outcome
}
