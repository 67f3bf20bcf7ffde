// Per-frame polling of the live controller state.
//
// Held buttons are looked up in the action table and applied every frame they are held,
// so effects compound across frames. Thumbstick axes translate the ornament in the XZ plane
// regardless of which hand they belong to.

use cgmath::{vec3, Vector3};
use shipyard::{Get, UniqueView, ViewMut};
use tracing::{debug, trace, warn};

use crate::{
    controller_actions::{ActionTable, ControllerAction},
    input_context::{Handedness, InputSource},
    scene::{PropPosition, PropScale, SceneHandles},
};

/// Exclusive access to the ornament attributes the poll engine is allowed to touch.
pub struct OrnamentHandle<'a> {
    pub position: &'a mut Vector3<f32>,
    pub scale: &'a mut Vector3<f32>,
}

pub fn apply_action(
    action: ControllerAction,
    forward: Vector3<f32>,
    ornament: &mut OrnamentHandle,
) {
    match action {
        ControllerAction::MoveAlongForward(distance) => *ornament.position += forward * distance,
        ControllerAction::Grow(amount) => *ornament.scale += vec3(amount, amount, amount),
    }
}

pub fn poll_source(table: &ActionTable, source: &InputSource, ornament: &mut OrnamentHandle) {
    let gamepad = match &source.gamepad {
        Some(gamepad) => gamepad,
        None => {
            trace!("input source without gamepad, skipping");
            return;
        }
    };

    if let Some(handedness) = source.handedness {
        let forward = source.pose.forward();
        for (index, button) in gamepad.buttons.iter().enumerate() {
            if !button.pressed {
                continue;
            }

            if let Some(action) = table.lookup(handedness, index) {
                debug!("{} hand button {}: {:?}", handedness, index, action);
                apply_action(action, forward, ornament);
            }
        }
    }

    if !gamepad.axes.is_empty() {
        let mapping = table.axis_mapping();
        let axis_value = |index: usize| gamepad.axes.get(index).copied().unwrap_or(0.0);

        let dx = axis_value(mapping.x_axis) * mapping.gain;
        let dz = axis_value(mapping.z_axis) * mapping.gain;
        ornament.position.x += dx;
        ornament.position.z += dz;
    }
}

fn processing_rank(source: &InputSource) -> u8 {
    match source.handedness {
        Some(Handedness::Primary) => 0,
        Some(Handedness::Secondary) => 1,
        None => 2,
    }
}

/// Poll every forwarded source, primary hand first, then secondary.
pub fn poll_sources(table: &ActionTable, sources: &[&InputSource], ornament: &mut OrnamentHandle) {
    let mut ordered = sources.to_vec();
    ordered.sort_by_key(|source| processing_rank(source));

    for source in ordered {
        poll_source(table, source, ornament);
    }
}

///
/// run_controller_poll
///
/// Applies the forwarded sources to the ornament entity.
///
pub fn run_controller_poll(
    table: &ActionTable,
    sources: &[&InputSource],
    handles: UniqueView<SceneHandles>,
    mut v_position: ViewMut<PropPosition>,
    mut v_scale: ViewMut<PropScale>,
) {
    if sources.is_empty() {
        return;
    }

    let (position, scale) = match (
        (&mut v_position).get(handles.ornament),
        (&mut v_scale).get(handles.ornament),
    ) {
        (Ok(position), Ok(scale)) => (position, scale),
        _ => {
            warn!("ornament is missing position or scale, skipping controller poll");
            return;
        }
    };

    let mut ornament = OrnamentHandle {
        position: &mut position.0,
        scale: &mut scale.0,
    };
    poll_sources(table, sources, &mut ornament);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_context::{ButtonState, Gamepad, Pose};
    use approx::assert_relative_eq;
    use cgmath::{Deg, InnerSpace, Quaternion, Rotation3, Zero};

    struct Ornament {
        position: Vector3<f32>,
        scale: Vector3<f32>,
    }

    impl Ornament {
        fn new() -> Ornament {
            Ornament {
                position: vec3(0.0, 2.0, -2.0),
                scale: vec3(1.0, 1.0, 1.0),
            }
        }

        fn poll(&mut self, sources: &[&InputSource]) {
            let mut handle = OrnamentHandle {
                position: &mut self.position,
                scale: &mut self.scale,
            };
            poll_sources(&ActionTable::default(), sources, &mut handle);
        }
    }

    fn turned_pose() -> Pose {
        Pose::new(
            vec3(0.3, 1.2, 0.0),
            Quaternion::from_angle_y(Deg(30.0)) * Quaternion::from_angle_x(Deg(-20.0)),
        )
    }

    fn source(handedness: Handedness, gamepad: Gamepad) -> InputSource {
        InputSource::new(handedness, Some(gamepad), turned_pose())
    }

    #[test]
    fn test_primary_button_4_moves_forward() {
        let mut ornament = Ornament::new();
        let before = ornament.position;
        let forward = turned_pose().forward();
        assert_relative_eq!(forward.magnitude(), 1.0, epsilon = 1e-6);

        ornament.poll(&[&source(Handedness::Primary, Gamepad::idle(6).with_pressed(4))]);

        assert_relative_eq!(ornament.position, before + forward * 0.1, epsilon = 1e-6);
        assert_eq!(ornament.scale, vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_primary_button_5_moves_backward() {
        let mut ornament = Ornament::new();
        let before = ornament.position;
        let forward = turned_pose().forward();

        ornament.poll(&[&source(Handedness::Primary, Gamepad::idle(6).with_pressed(5))]);

        assert_relative_eq!(ornament.position, before - forward * 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_secondary_buttons_scale() {
        let mut ornament = Ornament::new();

        ornament.poll(&[&source(Handedness::Secondary, Gamepad::idle(6).with_pressed(4))]);
        assert_relative_eq!(ornament.scale, vec3(1.1, 1.1, 1.1), epsilon = 1e-6);

        ornament.poll(&[&source(Handedness::Secondary, Gamepad::idle(6).with_pressed(5))]);
        ornament.poll(&[&source(Handedness::Secondary, Gamepad::idle(6).with_pressed(5))]);
        assert_relative_eq!(ornament.scale, vec3(0.9, 0.9, 0.9), epsilon = 1e-6);
        assert_eq!(ornament.position, vec3(0.0, 2.0, -2.0));
    }

    #[test]
    fn test_held_buttons_compound_without_cap() {
        let mut ornament = Ornament::new();
        let both = source(
            Handedness::Secondary,
            Gamepad::idle(6).with_pressed(4).with_pressed(5),
        );
        let grow = source(Handedness::Secondary, Gamepad::idle(6).with_pressed(4));

        // Both pressed cancel out within the frame
        ornament.poll(&[&both]);
        assert_relative_eq!(ornament.scale, vec3(1.0, 1.0, 1.0), epsilon = 1e-6);

        for _ in 0..30 {
            ornament.poll(&[&grow]);
        }
        assert_relative_eq!(ornament.scale, vec3(4.0, 4.0, 4.0), epsilon = 1e-4);
    }

    #[test]
    fn test_axes_translate_xz_regardless_of_buttons() {
        let mut ornament = Ornament::new();
        let before = ornament.position;

        let gamepad = Gamepad::idle(6)
            .with_pressed(0)
            .with_axes(vec![0.9, -0.9, 0.5, -0.3]);
        ornament.poll(&[&source(Handedness::Secondary, gamepad)]);

        assert_relative_eq!(
            ornament.position,
            before + vec3(0.05, 0.0, -0.03),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_partial_axes_move_only_present_axis() {
        let mut ornament = Ornament::new();
        let before = ornament.position;

        // Given three axes, the Z axis entry is missing
        let gamepad = Gamepad::new(vec![], vec![0.0, 0.0, 0.5]);
        ornament.poll(&[&source(Handedness::Primary, gamepad)]);

        // Then X moves and Z is left alone
        assert_relative_eq!(ornament.position, before + vec3(0.05, 0.0, 0.0), epsilon = 1e-6);
        assert_eq!(ornament.position.z, before.z);
    }

    #[test]
    fn test_axes_apply_for_unhanded_source() {
        let mut ornament = Ornament::new();
        let before = ornament.position;
        let source = InputSource::from_host(
            "none",
            Some(Gamepad::idle(6).with_pressed(4).with_axes(vec![0.0, 0.0, 1.0, 1.0])),
            Pose::default(),
        );

        ornament.poll(&[&source]);

        // No button action without handedness, but the stick still moves the ornament
        assert_relative_eq!(ornament.position, before + vec3(0.1, 0.0, 0.1), epsilon = 1e-6);
    }

    #[test]
    fn test_missing_gamepad_is_noop() {
        let mut ornament = Ornament::new();
        let source = InputSource::new(Handedness::Primary, None, turned_pose());

        ornament.poll(&[&source]);

        assert_eq!(ornament.position, vec3(0.0, 2.0, -2.0));
        assert_eq!(ornament.scale, vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_short_sequences_are_noop() {
        let mut ornament = Ornament::new();
        // Only four buttons and two axes: indices 4/5 and axes 2/3 do not exist
        let gamepad = Gamepad::new(vec![ButtonState::pressed(); 4], vec![1.0, 1.0]);

        ornament.poll(&[
            &source(Handedness::Primary, gamepad.clone()),
            &source(Handedness::Secondary, gamepad),
        ]);

        assert_eq!(ornament.position, vec3(0.0, 2.0, -2.0));
        assert_eq!(ornament.scale, vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_axes_is_noop() {
        let mut ornament = Ornament::new();
        let gamepad = Gamepad::new(vec![], vec![]);

        ornament.poll(&[&source(Handedness::Primary, gamepad)]);

        assert_eq!(ornament.position, vec3(0.0, 2.0, -2.0));
    }

    #[test]
    fn test_two_sources_affect_independent_attributes() {
        let mut ornament = Ornament::new();
        let before = ornament.position;
        let forward = turned_pose().forward();

        let primary = source(Handedness::Primary, Gamepad::idle(6).with_pressed(4));
        let secondary = source(
            Handedness::Secondary,
            Gamepad::idle(6).with_pressed(4).with_axes(vec![0.0, 0.0, 0.5, -0.3]),
        );

        // Order of the slice does not matter, primary is always processed first
        ornament.poll(&[&secondary, &primary]);

        assert_relative_eq!(
            ornament.position,
            before + forward * 0.1 + vec3(0.05, 0.0, -0.03),
            epsilon = 1e-6
        );
        assert_relative_eq!(ornament.scale, vec3(1.1, 1.1, 1.1), epsilon = 1e-6);
    }

    #[test]
    fn test_processing_order_is_primary_first() {
        let primary = InputSource::new(Handedness::Primary, None, Pose::default());
        let secondary = InputSource::new(Handedness::Secondary, None, Pose::default());
        let unhanded = InputSource::from_host("none", None, Pose::default());

        let mut ordered = vec![&unhanded, &secondary, &primary];
        ordered.sort_by_key(|source| processing_rank(source));

        assert_eq!(ordered[0].handedness, Some(Handedness::Primary));
        assert_eq!(ordered[1].handedness, Some(Handedness::Secondary));
        assert_eq!(ordered[2].handedness, None);
        assert_eq!(ordered[2].pose.position, Vector3::zero());
    }
}
