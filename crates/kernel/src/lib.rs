//! Physics kernel: owns the bodies and advances them one tick at a time.
//!
//! # Invariants
//! - After every tick each body lies fully inside the boundary.
//! - A body's mass equals its radius for its whole lifetime.
//! - Body count never changes after initialization.
//! - Given identical bodies, ticking is bit-for-bit deterministic.

pub mod body;
pub mod collision;
pub mod config;
pub mod world;

pub use body::{Body, BodySnapshot};
pub use collision::Contact;
pub use config::{Boundary, ConfigError, IntRange, WorldConfig};
pub use world::{PhysicsWorld, TickStats};
