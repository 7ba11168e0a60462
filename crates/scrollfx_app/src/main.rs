// SPDX-License-Identifier: MIT OR Apache-2.0
//! scrollfx demo host.
//!
//! Builds a portfolio-shaped document, wires up the effect engine, and
//! replays a scripted scroll session through it:
//! - Parallax layers, section fades, custom parallax, progress bar
//! - One-shot visibility reveals with sibling stagger
//! - Pointer parallax
//! - Narrow-viewport disable/recover and cooperative shutdown
//!
//! Configuration is read from the RON file named by `SCROLLFX_CONFIG`
//! when set.

mod page;
mod session;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("scrollfx_app=info".parse().unwrap())
        .add_directive("scrollfx_engine=debug".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting scrollfx demo v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = session::launch() {
        tracing::error!("Session failed: {e}");
        std::process::exit(1);
    }
}
