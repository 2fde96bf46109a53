use egui::{Pos2, Rect};

/// Shortest distance from `pos` to the closest point of `rect`.
///
/// The pointer is clamped to the rectangle edges on each axis before measuring, so any point
/// inside (or on the border of) the rectangle is at distance zero.
pub fn distance_to_rect(pos: Pos2, rect: Rect) -> f32 {
    rect.distance_to_pos(pos)
}

/// Scale factor for an element `distance` units away from the pointer.
///
/// Falls off linearly from `1 + boost` at zero distance to `1` at the radius boundary. Returns
/// `None` once the element is at or beyond `radius`, or when the scale rounds down to 1.
pub fn proximity_scale(distance: f32, radius: f32, boost: f32) -> Option<f32> {
    if distance >= radius {
        return None;
    }

    let force = (radius - distance) / radius;
    let scale = 1. + force * boost;
    (scale > 1.).then_some(scale)
}
