//! Shared value types used across the ballpit crates.

mod types;

pub use types::{BodyId, Rgb};
