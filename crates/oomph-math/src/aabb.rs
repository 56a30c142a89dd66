//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::types::{BlockPos, Vec3};

/// Axis-aligned bounding box given by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BBox {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Unit cube occupying a block cell.
    pub fn unit(pos: BlockPos) -> Self {
        let min = pos.to_vec3();
        Self::new(min, min + Vec3::new(1.0, 1.0, 1.0))
    }

    /// Entity box from a feet position: centered horizontally, `width` wide
    /// and `height` tall.
    pub fn from_feet(pos: Vec3, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Self::new(
            Vec3::new(pos.x - half, pos.y, pos.z - half),
            Vec3::new(pos.x + half, pos.y + height, pos.z + half),
        )
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }

    /// Swept hull: extends the side the velocity points toward.
    pub fn extend(&self, vel: Vec3) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        if vel.x < 0.0 {
            min.x += vel.x;
        } else if vel.x > 0.0 {
            max.x += vel.x;
        }
        if vel.y < 0.0 {
            min.y += vel.y;
        } else if vel.y > 0.0 {
            max.y += vel.y;
        }
        if vel.z < 0.0 {
            min.z += vel.z;
        } else if vel.z > 0.0 {
            max.z += vel.z;
        }
        Self::new(min, max)
    }

    /// Thin slab directly beneath the box, `depth` deep.
    pub fn below(&self, depth: f32) -> Self {
        Self::new(
            Vec3::new(self.min.x, self.min.y - depth, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
        )
    }

    /// Grow uniformly on every side. Negative values shrink.
    pub fn grow(&self, amount: f32) -> Self {
        self.grow_xyz(Vec3::new(amount, amount, amount))
    }

    /// Grow each axis independently. Negative values shrink.
    pub fn grow_xyz(&self, amount: Vec3) -> Self {
        Self::new(self.min - amount, self.max + amount)
    }

    /// Strict overlap test: touching faces do not intersect.
    pub fn intersects(&self, other: &BBox) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
            && self.max.z > other.min.z
            && self.min.z < other.max.z
    }

    /// True when any dimension has no extent.
    pub fn is_zero_volume(&self) -> bool {
        self.max.x - self.min.x <= 0.0
            || self.max.y - self.min.y <= 0.0
            || self.max.z - self.min.z <= 0.0
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Horizontal center at the bottom face: the feet position of an entity.
    pub fn bottom_center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            self.min.y,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Every block cell this box touches.
    ///
    /// A small epsilon (0.001) is subtracted from max bounds so that a box
    /// resting exactly on a block edge does not pick up the next cell.
    pub fn block_positions(&self) -> Vec<BlockPos> {
        const EPS: f32 = 0.001;
        let bx_min = self.min.x.floor() as i32;
        let bx_max = (self.max.x - EPS).floor() as i32;
        let by_min = self.min.y.floor() as i32;
        let by_max = (self.max.y - EPS).floor() as i32;
        let bz_min = self.min.z.floor() as i32;
        let bz_max = (self.max.z - EPS).floor() as i32;

        let mut results = Vec::new();
        for by in by_min..=by_max {
            for bz in bz_min..=bz_max {
                for bx in bx_min..=bx_max {
                    results.push(BlockPos::new(bx, by, bz));
                }
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_box() -> BBox {
        BBox::from_feet(Vec3::new(0.5, 4.0, 0.5), 0.6, 1.8)
    }

    #[test]
    fn from_feet_dimensions() {
        let bb = player_box();
        assert!((bb.min.x - 0.2).abs() < 0.001);
        assert!((bb.max.x - 0.8).abs() < 0.001);
        assert!((bb.min.y - 4.0).abs() < 0.001);
        assert!((bb.max.y - 5.8).abs() < 0.001);
        assert_eq!(bb.bottom_center(), Vec3::new(0.5, 4.0, 0.5));
    }

    #[test]
    fn extend_only_grows_toward_velocity() {
        let bb = player_box().extend(Vec3::new(1.0, -2.0, 0.0));
        assert!((bb.max.x - 1.8).abs() < 0.001);
        assert!((bb.min.x - 0.2).abs() < 0.001);
        assert!((bb.min.y - 2.0).abs() < 0.001);
        assert!((bb.max.y - 5.8).abs() < 0.001);
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = BBox::unit(BlockPos::new(0, 0, 0));
        let b = BBox::unit(BlockPos::new(1, 0, 0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.translate(Vec3::new(-0.01, 0.0, 0.0))));
    }

    #[test]
    fn zero_volume() {
        let flat = BBox::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.is_zero_volume());
        assert!(!player_box().is_zero_volume());
    }

    #[test]
    fn grow_negative_shrinks() {
        let bb = player_box().grow_xyz(Vec3::new(-0.025, 0.0, -0.025));
        assert!((bb.min.x - 0.225).abs() < 1e-5);
        assert!((bb.max.x - 0.775).abs() < 1e-5);
    }

    #[test]
    fn block_positions_center_of_block() {
        let blocks = player_box().block_positions();
        assert!(blocks.contains(&BlockPos::new(0, 4, 0)));
        assert!(blocks.contains(&BlockPos::new(0, 5, 0)));
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn block_positions_straddling_negative() {
        let bb = BBox::from_feet(Vec3::new(0.0, 0.0, -0.5), 0.6, 1.8);
        let blocks = bb.block_positions();
        assert!(blocks.iter().any(|b| b.x == -1));
        assert!(blocks.iter().any(|b| b.x == 0));
        assert!(blocks.iter().all(|b| b.z == -1));
    }
}
