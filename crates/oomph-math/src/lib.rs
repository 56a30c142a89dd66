//! Deterministic math primitives shared by the movement simulator: vectors,
//! block/chunk positions, bounding boxes, swept clipping and the client's
//! fixed-angle trigonometry.

pub mod aabb;
pub mod clip;
pub mod trig;
pub mod types;

pub use aabb::BBox;
pub use clip::bb_clip_collide;
pub use trig::{mc_cos, mc_sin, DEG_TO_RAD};
pub use types::{Axis, BlockPos, ChunkPos, Vec2, Vec3};
