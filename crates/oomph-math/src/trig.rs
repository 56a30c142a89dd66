//! Fixed-angle trigonometry matching the Bedrock client's lookup table.
//!
//! The client never calls the platform `sin`/`cos` for movement. It indexes a
//! 65536-entry table with a truncating cast, so any prediction that must agree
//! bit-for-bit with the client has to do the same.

use std::sync::OnceLock;

/// Number of entries in the sine table.
pub const TABLE_SIZE: usize = 65536;

/// `65536 / 2π` as the client writes it.
pub const RAD_TO_INDEX: f32 = 10430.378;

/// Degrees to radians, as the client writes it.
pub const DEG_TO_RAD: f32 = 0.017453292;

/// Quarter turn in table indices.
const COS_OFFSET: f32 = 16384.0;

static SIN_TABLE: OnceLock<Box<[f32; TABLE_SIZE]>> = OnceLock::new();

fn sin_table() -> &'static [f32; TABLE_SIZE] {
    SIN_TABLE.get_or_init(|| {
        let mut table = Box::new([0.0f32; TABLE_SIZE]);
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = (i as f64 * std::f64::consts::PI * 2.0 / TABLE_SIZE as f64).sin() as f32;
        }
        table
    })
}

/// Table index for an angle in radians. Truncates toward zero and then wraps
/// into `u16`.
#[inline]
fn index(scaled: f32) -> usize {
    scaled as i32 as u16 as usize
}

/// Table sine of `x` radians.
pub fn mc_sin(x: f32) -> f32 {
    sin_table()[index(x * RAD_TO_INDEX)]
}

/// Table cosine of `x` radians.
pub fn mc_cos(x: f32) -> f32 {
    sin_table()[index(x * RAD_TO_INDEX + COS_OFFSET)]
}
