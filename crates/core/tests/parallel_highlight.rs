//! Concurrent highlighting must give the same results as sequential highlighting

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use anyhow::Result;
use glint_core::demo::ArticleDemoDataCreator;
use glint_core::doc::Locale;
use glint_core::idx::ft::assembler::{Assembler, SnippetParams, SnippetResult};
use glint_core::idx::ft::locator::{Locator, MatchMode, QueryMode};
use glint_core::idx::search::{ArticleStore, MemoryIndex, highlight_hits};
use tokio::task::JoinSet;

const FIELDS: [&str; 3] = ["title", "description", "content"];

fn populate(index: &MemoryIndex, demo: &ArticleDemoDataCreator) -> Result<()> {
	let ja: Locale = "ja_JP".parse()?;
	let en: Locale = "en_US".parse()?;
	for i in 0..50 {
		let content = format!("記事 {i} あいうえお 日本語");
		demo.create_article(index, "新規作成", "日本語の説明", &content, &ja)?;
		demo.create_article(
			index,
			&format!("entity title {i}"),
			"an entity description",
			&format!("entity content number {i} with some more words around the entity"),
			&en,
		)?;
	}
	Ok(())
}

fn highlight(index: &MemoryIndex, query: &str, locale: &Locale) -> Result<Vec<SnippetResult>> {
	let params = SnippetParams::default()
		.with_max_length(20)
		.with_query_mode(QueryMode::PhraseOrTerms);
	let assembler = Assembler::new(index.analyzers(), params);
	highlight_hits(index, &assembler, query, locale, &FIELDS)
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_highlighting_is_deterministic() -> Result<()> {
	const NUM_WORKERS: usize = 32;

	let locator = Locator::new(MatchMode::Exact, QueryMode::PhraseOrTerms);
	let index = Arc::new(MemoryIndex::default().with_locator(locator));
	let demo = ArticleDemoDataCreator::new();
	populate(&index, &demo)?;
	assert_eq!(index.len(), 100);

	let queries =
		[("ja_JP", "日本語"), ("ja_JP", "新規"), ("en_US", "entity"), ("en_US", "entity title")];
	let mut expected = Vec::new();
	for (l, q) in queries {
		expected.push(highlight(&index, q, &l.parse()?)?);
	}
	assert_eq!(expected[0].len(), 50);
	assert_eq!(expected[2].len(), 50);

	let mut tasks = JoinSet::new();
	for worker_id in 0..NUM_WORKERS {
		let index = index.clone();
		let (l, q) = queries[worker_id % queries.len()];
		tasks.spawn(async move {
			let locale: Locale = l.parse().unwrap();
			(worker_id % queries.len(), highlight(&index, q, &locale).unwrap())
		});
	}
	let mut completed = 0;
	while let Some(res) = tasks.join_next().await {
		let (i, results) = res?;
		assert_eq!(results, expected[i]);
		completed += 1;
	}
	assert_eq!(completed, NUM_WORKERS);

	assert_eq!(demo.delete(index.as_ref())?, 100);
	assert!(index.is_empty());
	Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_readers_and_writers() -> Result<()> {
	let index = Arc::new(MemoryIndex::default());
	let demo = Arc::new(ArticleDemoDataCreator::new());
	let mut tasks = JoinSet::new();
	for i in 0..16 {
		let index = index.clone();
		let demo = demo.clone();
		tasks.spawn(async move {
			let en: Locale = "en_US".parse().unwrap();
			let content = format!("content {i}");
			demo.create_article(index.as_ref(), "entity title", "", &content, &en).unwrap();
			highlight(&index, "entity", &en).unwrap().len()
		});
	}
	while let Some(res) = tasks.join_next().await {
		assert!(res? >= 1);
	}
	assert_eq!(index.len(), 16);
	assert_eq!(demo.delete(index.as_ref())?, 16);
	Ok(())
}
