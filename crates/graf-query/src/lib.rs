//! Query evaluation, selector expansion and deduplication for grafbridge.
//!
//! This crate holds the pure, I/O-free half of the dashboard/alert
//! lookup pipeline:
//!
//! - **Filter grammar**: a small boolean expression language over
//!   dashboard metadata (`tag:` equality atoms and free-text atoms,
//!   combined with `and`/`or` and parentheses), parsed once into a
//!   predicate tree and evaluated per record.
//! - **Selector expansion**: compound `label=value` selectors with OR and
//!   AND combinators expanded into the discrete upstream query URIs
//!   needed to realize them.
//! - **Deduplication**: stable first-wins dedup of results merged from
//!   overlapping OR-branches.
//!
//! # Example
//!
//! ```rust
//! use graf_query::{expand_uris, ParsedQuery, QueryTarget};
//!
//! let uris = expand_uris("/api/search", &["type=dash-db"], "tag", "billing|payments");
//! assert_eq!(uris.len(), 2);
//!
//! struct Dash {
//!     tags: Vec<String>,
//! }
//!
//! impl QueryTarget for Dash {
//!     fn has_tag(&self, tag: &str) -> bool {
//!         self.tags.iter().any(|t| t == tag)
//!     }
//!     fn matches_text(&self, _needle: &str) -> bool {
//!         false
//!     }
//! }
//!
//! let query = ParsedQuery::parse("tag:billing or tag:payments").unwrap();
//! let dash = Dash { tags: vec!["payments".into()] };
//! assert!(query.evaluate(&dash));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dedupe;
pub mod error;
pub mod query;
pub mod selector;

pub use dedupe::dedupe_by;
pub use error::{ParseError, Result};
pub use query::{is_single_word, ParsedQuery, QueryTarget};
pub use selector::{expand_uris, is_tag_selector, split_conjuncts, split_disjuncts};
