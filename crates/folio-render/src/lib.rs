#![warn(missing_docs)]
//! Folio Render - Backend-Agnostic Draw List Builder
//!
//! # Overview
//!
//! `folio-render` turns a [`folio_core::Document`] into a flat draw list a
//! graphics backend can replay: one rectangle per page, one glyph command
//! per placed character, and the caret. It owns the color-string resolution
//! cache, so the layout core never interprets color strings. No pixels are
//! produced here; hosts hand the [`Frame`] to whatever paints for them.
//!
//! # Quick Start
//!
//! ```rust
//! use folio_core::{Document, PageConfig};
//! use folio_render::{ColorCache, Frame};
//!
//! let mut doc = Document::new((1280.0, 720.0), PageConfig::default());
//! doc.add_str("hi");
//!
//! let mut colors = ColorCache::new();
//! let frame = Frame::build(&doc, &mut colors).unwrap();
//! assert_eq!(frame.pages.len(), 1);
//! assert_eq!(frame.glyphs.len(), 2);
//! ```

pub mod color;
pub mod error;
pub mod frame;

pub use color::{ColorCache, Rgba};
pub use error::RenderError;
pub use frame::{CaretCommand, Frame, GlyphCommand, PageRect};
