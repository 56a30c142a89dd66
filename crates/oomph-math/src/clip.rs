//! Swept AABB clipping and depenetration against a single stationary box.

use crate::aabb::BBox;
use crate::types::{Axis, Vec3};

/// Penetrations at or below this magnitude are treated as exact contact.
const CONTACT_EPSILON: f32 = 1e-7;

fn snap(v: f32) -> f32 {
    if v.abs() <= CONTACT_EPSILON {
        0.0
    } else {
        v
    }
}

/// Resolve `velocity` of `moving` against `stationary`.
///
/// When the boxes are separated on exactly one axis the sweep along that axis
/// is clipped so the moving box stops at contact. When they already overlap
/// on every axis the velocity along the shallowest axis is replaced by one
/// that pushes the moving box out, and `penetration` (if given) records the
/// deepest push seen so far on that axis.
///
/// `one_way` selects which answer is returned: the clipped velocity (overlaps
/// are ignored) or the depenetrating one.
pub fn bb_clip_collide(
    stationary: &BBox,
    moving: &BBox,
    velocity: Vec3,
    one_way: bool,
    penetration: Option<&mut Vec3>,
) -> Vec3 {
    let mut min_pen = Vec3::ZERO;
    let mut max_pen = Vec3::ZERO;
    let mut separating = 0;
    let mut separating_axis = Axis::Y;

    for axis in Axis::ALL {
        min_pen[axis] = snap(moving.max[axis] - stationary.min[axis]);
        max_pen[axis] = snap(stationary.max[axis] - moving.min[axis]);
        if min_pen[axis] <= 0.0 || max_pen[axis] <= 0.0 {
            separating += 1;
            separating_axis = axis;
        }
    }

    if separating >= 2 {
        return velocity;
    }

    if separating == 0 {
        let mut best_axis = Axis::X;
        let mut best_pen = f32::MAX;
        let mut best_normal = 0.0;
        for axis in Axis::ALL {
            let (pen, normal) = if max_pen[axis] <= min_pen[axis] {
                (max_pen[axis], 1.0)
            } else {
                (min_pen[axis], -1.0)
            };
            if pen < best_pen {
                best_axis = axis;
                best_pen = pen;
                best_normal = normal;
            }
        }

        let mut depenetrating = velocity;
        depenetrating[best_axis] = if best_normal > 0.0 {
            best_pen.max(velocity[best_axis])
        } else {
            (-best_pen).min(velocity[best_axis])
        };

        if let Some(acc) = penetration {
            if best_pen > acc[best_axis].abs() {
                acc[best_axis] = best_pen * best_normal;
            }
        }

        return if one_way { velocity } else { depenetrating };
    }

    // Exactly one separating axis: the sweep along it may reach contact.
    let axis = separating_axis;
    let (signed_pen, normal) = if min_pen[axis] <= 0.0 {
        (min_pen[axis], -1.0)
    } else {
        (max_pen[axis], 1.0)
    };

    let mut result = velocity;
    if signed_pen - normal * velocity[axis] > 0.0 {
        result[axis] = signed_pen * normal;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockPos;

    fn player_at(x: f32, y: f32, z: f32) -> BBox {
        BBox::from_feet(Vec3::new(x, y, z), 0.6, 1.8)
    }

    #[test]
    fn falling_onto_block_stops_at_contact() {
        let ground = BBox::unit(BlockPos::new(0, -1, 0));
        let player = player_at(0.5, 0.25, 0.5);
        let v = bb_clip_collide(&ground, &player, Vec3::new(0.0, -1.0, 0.0), true, None);
        assert!((v.y + 0.25).abs() < 1e-6);
    }

    #[test]
    fn short_fall_is_not_clipped() {
        let ground = BBox::unit(BlockPos::new(0, -1, 0));
        let player = player_at(0.5, 0.25, 0.5);
        let v = bb_clip_collide(&ground, &player, Vec3::new(0.0, -0.1, 0.0), true, None);
        assert_eq!(v.y, -0.1);
    }

    #[test]
    fn resting_on_block_clips_to_zero() {
        let ground = BBox::unit(BlockPos::new(0, -1, 0));
        let player = player_at(0.5, 0.0, 0.5);
        let v = bb_clip_collide(&ground, &player, Vec3::new(0.0, -0.0784, 0.0), true, None);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn moving_away_is_unchanged() {
        let ground = BBox::unit(BlockPos::new(0, -1, 0));
        let player = player_at(0.5, 0.0, 0.5);
        let v = bb_clip_collide(&ground, &player, Vec3::new(0.0, 0.42, 0.0), true, None);
        assert_eq!(v.y, 0.42);
    }

    #[test]
    fn walking_into_wall_clips_x() {
        let wall = BBox::unit(BlockPos::new(1, 0, 0));
        let player = player_at(0.6, 0.0, 0.5);
        let v = bb_clip_collide(&wall, &player, Vec3::new(0.5, 0.0, 0.0), true, None);
        assert!((v.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn two_separating_axes_ignored() {
        let far = BBox::unit(BlockPos::new(5, 5, 0));
        let player = player_at(0.5, 0.0, 0.5);
        let vel = Vec3::new(0.3, -0.3, 0.0);
        assert_eq!(bb_clip_collide(&far, &player, vel, true, None), vel);
    }

    #[test]
    fn overlap_one_way_keeps_velocity() {
        let block = BBox::unit(BlockPos::new(0, 0, 0));
        let player = player_at(0.5, 0.9, 0.5);
        let vel = Vec3::new(0.0, -0.1, 0.0);
        let mut pen = Vec3::ZERO;
        let v = bb_clip_collide(&block, &player, vel, true, Some(&mut pen));
        assert_eq!(v, vel);
        // Still records how deep the overlap is.
        assert!((pen.y - 0.1).abs() < 1e-5);
    }

    #[test]
    fn overlap_depenetrates_along_shallowest_axis() {
        let block = BBox::unit(BlockPos::new(0, 0, 0));
        // Feet sunk 0.1 into the top of the block.
        let player = player_at(0.5, 0.9, 0.5);
        let mut pen = Vec3::ZERO;
        let v = bb_clip_collide(
            &block,
            &player,
            Vec3::new(0.0, -0.1, 0.0),
            false,
            Some(&mut pen),
        );
        assert!((v.y - 0.1).abs() < 1e-5);
        assert!(pen.y > 0.0);
    }

    #[test]
    fn depenetration_does_not_slow_faster_motion() {
        let block = BBox::unit(BlockPos::new(0, 0, 0));
        let player = player_at(0.5, 0.9, 0.5);
        let v = bb_clip_collide(&block, &player, Vec3::new(0.0, 0.5, 0.0), false, None);
        assert_eq!(v.y, 0.5);
    }

    #[test]
    fn accumulator_keeps_deepest() {
        let block = BBox::unit(BlockPos::new(0, 0, 0));
        let player = player_at(0.5, 0.9, 0.5);
        let mut pen = Vec3::new(0.0, -0.5, 0.0);
        bb_clip_collide(&block, &player, Vec3::ZERO, false, Some(&mut pen));
        assert_eq!(pen.y, -0.5);
    }
}
