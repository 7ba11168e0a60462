// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scroll-driven effect engine.
//!
//! This crate provides decorative scroll effects for a laid-out page:
//! - Effect registry with typed per-element descriptors
//! - Frame driver translating scroll offset into style mutations
//! - One-shot visibility reveals with sibling stagger
//! - Pointer parallax
//!
//! ## Architecture
//!
//! The engine is built on:
//! - An arena registry keyed by stable handles
//! - A single scroll sample committed once per frame
//! - Exhaustive dispatch over a tagged effect variant
//! - A cooperative frame loop with an explicit stop token
//!
//! Nothing here returns a runtime error: degenerate geometry, missing
//! markers, and unsupported host capabilities all degrade to a static
//! presentation.

pub mod config;
pub mod driver;
pub mod effect;
pub mod evaluate;
pub mod pointer;
pub mod registry;
pub mod reveal;
pub mod scroll;

pub use config::{ConfigError, EngineConfig, PointerConfig, RevealConfig};
pub use driver::{EffectDriver, StopToken};
pub use effect::{Direction, EffectEntry, EffectHandle, EffectKind};
pub use pointer::PointerParallax;
pub use registry::EffectRegistry;
pub use reveal::{RevealHandle, RevealSystem, RevealTarget};
pub use scroll::ScrollState;
