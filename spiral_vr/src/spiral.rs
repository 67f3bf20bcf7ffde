use std::f32::consts::PI;

use cgmath::{vec3, InnerSpace, Quaternion, Rad, Rotation3, Vector3};
use shipyard::{IntoIter, UniqueView, View, ViewMut};
use tracing::trace;

use crate::{
    parameters::AnimationParameters,
    scene::{PropOrientation, PropSpiralGroup},
};

// Radians added per frame at speed 1.0
pub const SPIRAL_STEP: f32 = 0.2 * PI / 100.0;

/// World axis the spiral tumbles around: the diagonal between X and Y.
pub fn spiral_axis() -> Vector3<f32> {
    vec3(1.0, 1.0, 0.0).normalize()
}

pub fn spiral_increment(speed: f32) -> Quaternion<f32> {
    Quaternion::from_axis_angle(spiral_axis(), Rad(speed * SPIRAL_STEP))
}

/// Compose one frame's rotation onto `orientation` around the fixed world axis.
pub fn advance_orientation(orientation: &mut Quaternion<f32>, speed: f32) {
    *orientation = (spiral_increment(speed) * *orientation).normalize();
}

///
/// run_spiral_animation
///
/// Rotates every spiral group by one increment. The increment is per invocation,
/// not per elapsed second, so the rate follows the display's frame rate.
///
pub fn run_spiral_animation(
    u_parameters: UniqueView<AnimationParameters>,
    v_spiral_group: View<PropSpiralGroup>,
    mut v_orientation: ViewMut<PropOrientation>,
) {
    let speed = u_parameters.speed;
    for (_, orientation) in (&v_spiral_group, &mut v_orientation).iter() {
        advance_orientation(&mut orientation.0, speed);
    }
    trace!("spiral advanced at speed {}", speed);
}
