//! # Core Module
//!
//! Small shared building blocks used throughout the engine.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with interior mutability
//!
//! The world is ticked synchronously on one thread, so nothing here needs
//! atomic reference counting or locking.

pub mod st_resource;

pub use st_resource::StResource;
