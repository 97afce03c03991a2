//! A deterministic, fixed-tick simulation of car soccer: cars, a ball, boost pads and an arena,
//! stepped by an injectable rigid-body engine.
//!
//! Everything is in Unreal Units (uu), seconds and radians.

mod data_stream;
mod error;
mod logging;
pub mod math;
pub mod physics;
mod shared;
mod sim;

pub use data_stream::StreamValue;
pub use error::ArenaError;
pub use logging::init_logging;
pub use physics::{DiscreteDynamicsWorld, PhysicsEngine};
pub use shared::Aabb;
pub use sim::*;
