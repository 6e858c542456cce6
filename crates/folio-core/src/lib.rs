#![warn(missing_docs)]
//! Folio Core - Paginated Rich-Text Layout Kernel
//!
//! # Overview
//!
//! `folio-core` is the headless layout core of a paginated rich-text editor.
//! It keeps per-character styled text in an order-statistics tree, lays it
//! out into rows and US-Letter-style pages as it is edited, and answers the
//! geometric queries an editor UI needs (caret placement, click-to-cursor,
//! drag-to-selection). It draws nothing and measures no real fonts; hosts
//! plug their text stack in behind the [`FontMetrics`] seam and render the
//! placed characters themselves.
//!
//! # Core Features
//!
//! - **Ordered Character Store**: order-statistics red-black tree, O(log n)
//!   insertion/removal/access by document position
//! - **Incremental Layout**: edits re-walk only the affected suffix,
//!   assigning columns and wrapping rows against the page's text band
//! - **Row Metrics**: per-row dominant-font bookkeeping; mixed sizes on one
//!   row resolve to the largest, with conservative inter-row padding
//! - **Derived Pagination**: rows flow onto pages by accumulated height;
//!   page membership and baselines are recomputed, never stored stale
//! - **Hit Testing**: nearest-character and range queries over the monotone
//!   row/column structure, stopping at the first distance increase
//! - **O(1) Scrolling**: baselines are stored in document space and the
//!   scroll offset is applied on read
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Document Facade (cursor, caret, scroll)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Layout Engine (rows, pages, hit testing)   │  ← Geometry
//! ├─────────────────────────────────────────────┤
//! │  Row Metrics (dominant font per row)        │  ← Heights
//! ├─────────────────────────────────────────────┤
//! │  Ordered Store (order-statistics RB tree)   │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Typing into a document
//!
//! ```rust
//! use folio_core::{Document, PageConfig};
//!
//! let mut doc = Document::new((1280.0, 720.0), PageConfig::default());
//! doc.add_str("Hello, folio!\n");
//!
//! assert_eq!(doc.cursor(), 14);
//! assert_eq!(doc.page_count(), 1);
//!
//! // After a line break the caret rests at the band start of the next row.
//! let caret = doc.caret();
//! assert_eq!(caret.x, doc.center() + doc.config().margin_left);
//! ```
//!
//! ## Reading placed characters and hit testing
//!
//! ```rust
//! use folio_core::{Document, PageConfig};
//!
//! let mut doc = Document::new((1280.0, 720.0), PageConfig::default());
//! doc.add_str("ab");
//!
//! // Every character carries its resolved position.
//! doc.bank()
//!     .for_each(|placed| {
//!         println!("{:?} on row {} of page {}", placed.ch.value, placed.row, placed.page);
//!     })
//!     .unwrap();
//!
//! // Click where 'b' starts.
//! let x = doc.center() + doc.config().margin_left + 7.4;
//! let hit = doc.bank().find_nearest_char((x, 160.0)).unwrap();
//! assert_eq!(hit.index, 1);
//! ```
//!
//! # Module Description
//!
//! - [`store`] - order-statistics red-black tree keyed by implicit position
//! - [`styled`] - the per-character style and layout record
//! - [`metrics`] - per-row font bookkeeping and row heights
//! - [`bank`] - the layout engine: rows, pages, geometric queries
//! - [`document`] - the editing facade: cursor, caret, selection, scroll
//! - [`font`] - the measurement seam and the built-in deterministic provider
//! - [`config`] - page geometry and default style
//!
//! # Complexity
//!
//! - **Store access**: O(log n) by document position
//! - **Edit**: O(log n) structural change plus a relayout of the suffix
//!   after the edit point
//! - **Scroll**: O(1); no layout state depends on the scroll offset
//! - **Hit test**: row scan plus column scan, each cut short by monotonicity
//!
//! # Coordinate Conventions
//!
//! - All distances are pixels; point sizes convert at 96 DPI ([`PX_PER_PT`])
//! - A character's `column` is the x of its leading edge; rows are indexed
//!   top to bottom and identified by baseline
//! - Stored baselines exclude the scroll offset; every read applies it
//! - Pages are horizontally centered on the canvas and stacked vertically
//!   one pitch (page height + gap) apart

pub mod bank;
pub mod config;
pub mod document;
pub mod font;
pub mod metrics;
pub mod store;
pub mod styled;

pub use bank::{Hit, LayoutError, PlacedChar, TextBank};
pub use config::PageConfig;
pub use document::{Caret, Document, TAB_WIDTH};
pub use font::{CellMetrics, FontMetrics, PX_PER_PT};
pub use metrics::{CharMetric, RowInfo};
pub use store::{IndexOutOfRange, Iter, OrderedList};
pub use styled::{FontId, StyledChar};
