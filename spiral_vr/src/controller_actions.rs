use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::input_context::Handedness;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ControllerAction {
    // Translate the ornament along the controller's forward ray by the given distance
    MoveAlongForward(f32),
    // Add the given amount to every component of the ornament's scale (negative shrinks)
    Grow(f32),
}

///
/// AxisMapping
///
/// Which entries of a gamepad's axis list drive the ornament's X and Z position,
/// and by how much per frame.
///
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisMapping {
    pub x_axis: usize,
    pub z_axis: usize,
    pub gain: f32,
}

impl Default for AxisMapping {
    fn default() -> Self {
        AxisMapping {
            x_axis: 2,
            z_axis: 3,
            gain: 0.1,
        }
    }
}

///
/// ActionTable
///
/// Maps (handedness, button index) to the action a held button performs each frame.
/// The default profile follows the thumbstick-controller layout where buttons 4 and 5
/// are the face buttons and axes 2/3 are the thumbstick.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ActionTable {
    actions: HashMap<(Handedness, usize), ControllerAction>,
    axis_mapping: AxisMapping,
}

impl ActionTable {
    pub fn empty() -> ActionTable {
        ActionTable {
            actions: HashMap::new(),
            axis_mapping: AxisMapping::default(),
        }
    }

    pub fn with_action(
        mut self,
        handedness: Handedness,
        button_index: usize,
        action: ControllerAction,
    ) -> ActionTable {
        self.actions.insert((handedness, button_index), action);
        self
    }

    pub fn with_axis_mapping(self, axis_mapping: AxisMapping) -> ActionTable {
        ActionTable {
            axis_mapping,
            ..self
        }
    }

    pub fn lookup(&self, handedness: Handedness, button_index: usize) -> Option<ControllerAction> {
        self.actions.get(&(handedness, button_index)).copied()
    }

    pub fn axis_mapping(&self) -> AxisMapping {
        self.axis_mapping
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        DEFAULT_ACTION_TABLE.clone()
    }
}

const STEP: f32 = 0.1;

pub static DEFAULT_ACTION_TABLE: Lazy<ActionTable> = Lazy::new(|| {
    ActionTable::empty()
        .with_action(Handedness::Primary, 4, ControllerAction::MoveAlongForward(STEP))
        .with_action(Handedness::Primary, 5, ControllerAction::MoveAlongForward(-STEP))
        .with_action(Handedness::Secondary, 4, ControllerAction::Grow(STEP))
        .with_action(Handedness::Secondary, 5, ControllerAction::Grow(-STEP))
});
