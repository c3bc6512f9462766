//! Doubled-angle heading encoding.
//!
//! Yaw is first folded into `(-π/2, π/2]` through `atan(tan(yaw))`, then
//! encoded as `(cos 2θ, sin 2θ)`, so `yaw` and `yaw + π` produce the same
//! target.

use glam::Vec2;

/// Fold a yaw angle onto its principal `atan` value.
#[inline]
pub fn normalize_yaw(yaw: f32) -> f32 {
    (yaw.sin() / yaw.cos()).atan()
}

#[inline]
pub fn encode_heading(yaw: f32) -> Vec2 {
    let doubled = 2.0 * normalize_yaw(yaw);
    Vec2::new(doubled.cos(), doubled.sin())
}

/// Recover the normalized yaw from an encoded `(cos 2θ, sin 2θ)` pair.
#[inline]
pub fn decode_heading(encoded: Vec2) -> f32 {
    encoded.y.atan2(encoded.x) / 2.0
}
