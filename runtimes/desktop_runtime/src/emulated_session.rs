// Emulated immersive session for running without a headset.
// Two scripted controllers cycle through every mapped button, the thumbstick,
// and the select/squeeze events, so the whole interaction core gets exercised.

use std::f32::consts::TAU;

use cgmath::{vec2, vec3, Deg, Quaternion, Rotation3, Vector2, Vector3};
use spiral_vr::{
    controller_events::{ControllerEvent, ControllerEventKind},
    input_context::{ControllerSlot, Gamepad, Handedness, InputSource, Pose, Session},
};

const CYCLE_LENGTH: u64 = 240;
const BUTTON_COUNT: usize = 6;

struct HandContext {
    yaw: f32,
    pitch: f32,
    position: Vector3<f32>,
    pressed: [bool; BUTTON_COUNT],
    thumbstick: Vector2<f32>,
}

impl HandContext {
    pub fn new(position: Vector3<f32>) -> HandContext {
        HandContext {
            yaw: 0.0,
            pitch: 0.0,
            position,
            pressed: [false; BUTTON_COUNT],
            thumbstick: vec2(0.0, 0.0),
        }
    }

    fn release_all(&mut self) {
        self.pressed = [false; BUTTON_COUNT];
        self.thumbstick = vec2(0.0, 0.0);
    }

    fn to_input_source(&self, handedness: Handedness) -> InputSource {
        let mut gamepad = Gamepad::idle(BUTTON_COUNT)
            .with_axes(vec![0.0, 0.0, self.thumbstick.x, self.thumbstick.y]);
        for (index, pressed) in self.pressed.iter().enumerate() {
            if *pressed {
                gamepad = gamepad.with_pressed(index);
            }
        }

        let rotation =
            Quaternion::from_angle_y(Deg(self.yaw)) * Quaternion::from_angle_x(Deg(self.pitch));
        InputSource::from_host(
            handedness.as_str(),
            Some(gamepad),
            Pose::new(self.position, rotation),
        )
    }
}

pub struct EmulatedControllers {
    frame: u64,
    right_hand: HandContext,
    left_hand: HandContext,
}

impl EmulatedControllers {
    pub fn new() -> EmulatedControllers {
        EmulatedControllers {
            frame: 0,
            right_hand: HandContext::new(vec3(0.25, 1.3, -0.3)),
            left_hand: HandContext::new(vec3(-0.25, 1.3, -0.3)),
        }
    }

    /// Advance the script by one frame, returning the session state and any edge events.
    pub fn step(&mut self) -> (Session, Vec<ControllerEvent>) {
        let phase = self.frame % CYCLE_LENGTH;
        self.frame += 1;

        self.right_hand.release_all();
        self.left_hand.release_all();

        // Sweep the right hand so "forward" changes while pushing the ornament around
        let sweep = phase as f32 / CYCLE_LENGTH as f32 * TAU;
        self.right_hand.yaw = 30.0 * sweep.sin();
        self.right_hand.pitch = -10.0;

        match phase {
            0..=59 => self.right_hand.pressed[4] = true,
            60..=89 => self.right_hand.pressed[5] = true,
            90..=119 => self.left_hand.pressed[4] = true,
            120..=149 => self.left_hand.pressed[5] = true,
            150..=209 => {
                let t = (phase - 150) as f32 / 60.0 * TAU;
                self.left_hand.thumbstick = vec2(0.5 * t.cos(), 0.5 * t.sin());
            }
            _ => (),
        }

        let events = match phase {
            0 => vec![event(ControllerSlot::First, ControllerEventKind::SelectStart)],
            60 => vec![event(ControllerSlot::First, ControllerEventKind::SelectEnd)],
            90 => vec![event(ControllerSlot::Second, ControllerEventKind::SqueezeStart)],
            120 => vec![event(ControllerSlot::First, ControllerEventKind::SqueezeStart)],
            150 => vec![
                event(ControllerSlot::First, ControllerEventKind::SqueezeEnd),
                event(ControllerSlot::Second, ControllerEventKind::SqueezeEnd),
            ],
            180 => vec![event(ControllerSlot::Second, ControllerEventKind::SelectStart)],
            210 => vec![event(ControllerSlot::Second, ControllerEventKind::SelectEnd)],
            _ => vec![],
        };

        let session = Session::immersive(vec![
            self.right_hand.to_input_source(Handedness::Primary),
            self.left_hand.to_input_source(Handedness::Secondary),
        ]);

        (session, events)
    }
}

fn event(controller: ControllerSlot, kind: ControllerEventKind) -> ControllerEvent {
    ControllerEvent::new(controller, kind)
}
