//! # Voxel World
//!
//! This module contains the voxel data model and everything that fills it.
//!
//! ## Architecture
//!
//! * **Block**: block ids, face directions and the attribute registry
//! * **Chunk**: fixed-size columns of block ids and coordinate decomposition
//! * **Landmarks**: hand-authored structures and named points of interest
//! * **World**: terrain generation, the chunk cache, streaming and block queries
//!
//! ## Data Flow
//!
//! 1. The world computes the chunk window around the viewer
//! 2. Missing chunks are generated from terrain plus structure overrides
//! 3. The render adapter is told which chunks to mount, unmount and rebuild
//! 4. The adapter meshes chunks, sampling neighbours back through the world
//!
//! Everything runs on one thread, synchronously, within a single `update`.

pub mod block;
pub mod chunk;
pub mod landmarks;
pub mod world;
