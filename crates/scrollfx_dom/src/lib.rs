// SPDX-License-Identifier: MIT OR Apache-2.0
//! Retained document model for the scrollfx engine.
//!
//! This crate provides the host-facing seam the effect engine operates on:
//! - Node arena with stable IDs
//! - Layout geometry in document coordinates
//! - Inline styles (transform, opacity, filter, entrance animation)
//! - Environment description (viewport, motion preference, device class)
//!
//! ## Architecture
//!
//! The document is deliberately minimal: it stores what a laid-out page
//! would expose to a style-mutating effect layer and nothing else. Layout
//! itself (computing rectangles from content) is the host's job; the
//! engine only reads rectangles and writes inline styles.

pub mod document;
pub mod env;
pub mod geometry;
pub mod node;
pub mod style;

pub use document::{Document, DomError};
pub use env::{Environment, Viewport};
pub use geometry::Rect;
pub use node::{Node, NodeId};
pub use style::{EntranceAnimation, EntranceKind, Filter, InlineStyle, Transform};
