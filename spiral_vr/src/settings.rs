// Write path for the settings panel. The panel clamps its sliders to these ranges
// before handing values over; the animator itself never clamps.

use std::ops::RangeInclusive;

use cgmath::vec3;
use shipyard::{Get, UniqueView, UniqueViewMut, ViewMut, World};
use tracing::info;

use crate::{
    parameters::AnimationParameters,
    scene::{PropScale, PropWireframe, SceneHandles},
};

pub const SPEED_RANGE: RangeInclusive<f32> = 0.0..=4.0;
pub const SCALE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

pub fn set_speed(world: &World, speed: f32) -> f32 {
    let speed = clamp_to(speed, &SPEED_RANGE);
    world.run(|mut u_parameters: UniqueViewMut<AnimationParameters>| {
        u_parameters.speed = speed;
    });
    info!("spiral speed set to {}", speed);
    speed
}

/// Set the uniform ornament scale, overwriting any scale accumulated from controllers.
pub fn set_scale(world: &World, scale: f32) -> f32 {
    let scale = clamp_to(scale, &SCALE_RANGE);
    world.run(
        |mut u_parameters: UniqueViewMut<AnimationParameters>,
         handles: UniqueView<SceneHandles>,
         mut v_scale: ViewMut<PropScale>| {
            u_parameters.scale = scale;
            if let Ok(ornament_scale) = (&mut v_scale).get(handles.ornament) {
                ornament_scale.0 = vec3(scale, scale, scale);
            }
        },
    );
    info!("ornament scale set to {}", scale);
    scale
}

pub fn toggle_wireframe(world: &World) -> bool {
    let enabled = world.run(
        |mut u_parameters: UniqueViewMut<AnimationParameters>,
         handles: UniqueView<SceneHandles>,
         mut v_wireframe: ViewMut<PropWireframe>| {
            u_parameters.wireframe_enabled = !u_parameters.wireframe_enabled;
            let enabled = u_parameters.wireframe_enabled;
            if let Ok(wireframe) = (&mut v_wireframe).get(handles.ornament) {
                wireframe.0 = enabled;
            }
            enabled
        },
    );
    info!("wireframe toggled: {}", enabled);
    enabled
}
