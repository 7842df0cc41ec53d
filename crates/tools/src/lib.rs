//! Developer Tooling: world inspector, conservation checks, frame timing.
//!
//! # Invariants
//! - Tools only read the world; they never tick or mutate it.

mod inspector;
mod timer;

pub use inspector::{BodyInfo, WorldInspector, WorldSummary};
pub use timer::FrameTimer;

pub fn crate_info() -> &'static str {
    concat!("ballpit-tools v", env!("CARGO_PKG_VERSION"))
}
