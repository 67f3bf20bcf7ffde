// Input context is the host-facing view of the tracked controllers.
// The host (a browser-style XR runtime, or the desktop emulation) hands us a session
// with up to two input sources each frame. We only ever read from these.

use std::{fmt, str::FromStr};

use cgmath::{vec3, Quaternion, Rotation, Vector3, Zero};
use tracing::warn;

use crate::error::InputError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Primary,
    Secondary,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Primary => "right",
            Handedness::Secondary => "left",
        }
    }
}

impl FromStr for Handedness {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "right" | "primary" => Ok(Handedness::Primary),
            "left" | "secondary" => Ok(Handedness::Secondary),
            _ => Err(InputError::UnknownHandedness(s.to_owned())),
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Index of the controller object in the host's scene graph.
// This is independent of handedness - the host decides which physical device lands in which slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControllerSlot {
    First,
    Second,
}

impl ControllerSlot {
    pub const ALL: [ControllerSlot; 2] = [ControllerSlot::First, ControllerSlot::Second];

    pub fn index(&self) -> usize {
        match self {
            ControllerSlot::First => 0,
            ControllerSlot::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Result<ControllerSlot, InputError> {
        match index {
            0 => Ok(ControllerSlot::First),
            1 => Ok(ControllerSlot::Second),
            _ => Err(InputError::UnknownController(index)),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ButtonState {
    pub pressed: bool,
    pub value: f32,
}

impl ButtonState {
    pub fn pressed() -> ButtonState {
        ButtonState {
            pressed: true,
            value: 1.0,
        }
    }

    pub fn released() -> ButtonState {
        ButtonState::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gamepad {
    pub buttons: Vec<ButtonState>,
    // Typically two sticks / trackpads concatenated: [pad x, pad y, stick x, stick y]
    pub axes: Vec<f32>,
}

impl Gamepad {
    pub fn new(buttons: Vec<ButtonState>, axes: Vec<f32>) -> Gamepad {
        Gamepad { buttons, axes }
    }

    /// Gamepad with `button_count` released buttons and four centered axes.
    pub fn idle(button_count: usize) -> Gamepad {
        Gamepad {
            buttons: vec![ButtonState::released(); button_count],
            axes: vec![0.0; 4],
        }
    }

    pub fn with_pressed(mut self, index: usize) -> Gamepad {
        if self.buttons.len() <= index {
            self.buttons.resize(index + 1, ButtonState::released());
        }
        self.buttons[index] = ButtonState::pressed();
        self
    }

    pub fn with_axes(self, axes: Vec<f32>) -> Gamepad {
        Gamepad { axes, ..self }
    }
}

// World-space pose of the controller's pointer ray
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Pose {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Pose {
        Pose { position, rotation }
    }

    /// Unit direction the pointer ray is facing (-Z in controller space).
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation.rotate_vector(vec3(0.0, 0.0, -1.0))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            position: Vector3::zero(),
            rotation: Quaternion {
                v: Vector3::zero(),
                s: 1.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputSource {
    // None when the host reports a role we don't recognize; such a source
    // still drives axis translation but triggers no button actions.
    pub handedness: Option<Handedness>,
    pub gamepad: Option<Gamepad>,
    pub pose: Pose,
}

impl InputSource {
    pub fn new(handedness: Handedness, gamepad: Option<Gamepad>, pose: Pose) -> InputSource {
        InputSource {
            handedness: Some(handedness),
            gamepad,
            pose,
        }
    }

    pub fn from_host(role: &str, gamepad: Option<Gamepad>, pose: Pose) -> InputSource {
        let handedness = match role.parse::<Handedness>() {
            Ok(handedness) => Some(handedness),
            Err(err) => {
                warn!("input source has no usable handedness: {}", err);
                None
            }
        };

        InputSource {
            handedness,
            gamepad,
            pose,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub immersive: bool,
    pub input_sources: Vec<InputSource>,
}

impl Session {
    pub fn immersive(input_sources: Vec<InputSource>) -> Session {
        Session {
            immersive: true,
            input_sources,
        }
    }
}
