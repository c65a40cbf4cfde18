//! # Glint Core
//!
//! This crate is the snippet highlighting engine behind the `glint` binary.
//! Given a document made of named, locale-scoped text fields and a user
//! query, it locates the query inside each field, cuts bounded excerpts
//! around the matches and wraps the matched text in highlight markers.
//!
//! The engine is a pure in-memory computation: analyzers and search indexes
//! are collaborators which are plugged in through the [`idx::ft::analyzer::Analyzer`]
//! and [`idx::search::Searcher`] traits.
//!
//! ```
//! use glint_core::doc::{Document, Locale};
//! use glint_core::idx::ft::analyzer::Analyzers;
//! use glint_core::idx::ft::assembler::{Assembler, SnippetParams};
//!
//! let locale: Locale = "en_US".parse().unwrap();
//! let doc = Document::builder("1").field("title", locale.clone(), "entity title").build().unwrap();
//! let analyzers = Analyzers::default();
//! let assembler = Assembler::new(&analyzers, SnippetParams::default());
//! let res = assembler.assemble(&doc, "entity", &locale, &["title"]).unwrap();
//! assert_eq!(res.get("title", &locale), Some("<hl>entity</hl> title"));
//! ```

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

pub mod cnf;
pub mod demo;
pub mod doc;
pub mod err;
pub mod idx;
