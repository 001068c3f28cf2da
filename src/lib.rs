//! Forest of flat records linked by string identifiers.
//!
//! Records carry an item id and a parent id. Links are resolved lazily into
//! a positional parent index, cyclic structures are detected on demand, and
//! the forest can be flattened into a depth-first sequence of values with
//! per-level connector descriptors for text tree views.
//!
//! ```
//! use linkforest::{Forest, RenderOptions};
//!
//! let mut forest = Forest::new();
//! forest.add("Electronics", "1", "1", "");
//! forest.add("Phones", "2", "1", "1");
//! forest.add("Laptops", "3", "2", "1");
//!
//! let text = forest
//!     .render_text(&RenderOptions::default())
//!     .expect("should never fail: the forest is acyclic");
//! assert_eq!(text, "Electronics\n├Phones\n└Laptops");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

extern crate alloc;

mod error;
pub mod forest;
pub mod glyph;

pub use self::error::{CycleError, InsertError};
pub use self::forest::render::{Connector, DisplayEntry, Guides, RenderOptions};
pub use self::forest::safety::Safety;
pub use self::forest::text::TreeText;
pub use self::forest::{Forest, Handle, Node, NodeMut, Record};
pub use self::glyph::{resolve_glyph, resolve_glyph_raw, Line};
