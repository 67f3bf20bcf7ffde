use std::{collections::HashMap, fmt, str::FromStr};

use cgmath::Vector3;
use shipyard::{Get, UniqueView, ViewMut, World};
use tracing::{debug, warn};

use crate::{
    error::InputError,
    input_context::ControllerSlot,
    scene::{PropColor, SceneHandles, WHITE},
};

pub const POINTER_ACTIVE_COLOR: Vector3<f32> = Vector3 {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};

const FIRST_SQUEEZE_COLOR: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};

const SECOND_SQUEEZE_COLOR: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

pub fn squeeze_color(controller: ControllerSlot) -> Vector3<f32> {
    match controller {
        ControllerSlot::First => FIRST_SQUEEZE_COLOR,
        ControllerSlot::Second => SECOND_SQUEEZE_COLOR,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControllerEventKind {
    SelectStart,
    SelectEnd,
    SqueezeStart,
    SqueezeEnd,
}

impl ControllerEventKind {
    pub const ALL: [ControllerEventKind; 4] = [
        ControllerEventKind::SelectStart,
        ControllerEventKind::SelectEnd,
        ControllerEventKind::SqueezeStart,
        ControllerEventKind::SqueezeEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerEventKind::SelectStart => "selectstart",
            ControllerEventKind::SelectEnd => "selectend",
            ControllerEventKind::SqueezeStart => "squeezestart",
            ControllerEventKind::SqueezeEnd => "squeezeend",
        }
    }
}

impl FromStr for ControllerEventKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControllerEventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InputError::UnknownEvent(s.to_owned()))
    }
}

impl fmt::Display for ControllerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControllerEvent {
    pub controller: ControllerSlot,
    pub kind: ControllerEventKind,
}

impl ControllerEvent {
    pub fn new(controller: ControllerSlot, kind: ControllerEventKind) -> ControllerEvent {
        ControllerEvent { controller, kind }
    }

    /// Build an event from the host's controller index and event name.
    pub fn from_host(controller_index: usize, name: &str) -> Result<ControllerEvent, InputError> {
        Ok(ControllerEvent {
            controller: ControllerSlot::from_index(controller_index)?,
            kind: name.parse()?,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EventHandler {
    SetIndicatorColor {
        controller: ControllerSlot,
        color: Vector3<f32>,
    },
    // Both controllers write this one; whichever fires last wins
    SetOrnamentColor {
        color: Vector3<f32>,
    },
}

///
/// ControllerEventBridge
///
/// Edge-triggered press/release handling, separate from the per-frame poll.
/// Select recolors the controller's own pointer indicator; squeeze recolors the shared ornament.
///
#[derive(Clone, Debug)]
pub struct ControllerEventBridge {
    handlers: HashMap<(ControllerSlot, ControllerEventKind), EventHandler>,
}

impl ControllerEventBridge {
    pub fn new() -> ControllerEventBridge {
        let mut bridge = ControllerEventBridge {
            handlers: HashMap::new(),
        };

        for controller in ControllerSlot::ALL {
            bridge.register(controller);
        }

        bridge
    }

    fn register(&mut self, controller: ControllerSlot) {
        let handlers = [
            (
                ControllerEventKind::SelectStart,
                EventHandler::SetIndicatorColor {
                    controller,
                    color: POINTER_ACTIVE_COLOR,
                },
            ),
            (
                ControllerEventKind::SelectEnd,
                EventHandler::SetIndicatorColor {
                    controller,
                    color: WHITE,
                },
            ),
            (
                ControllerEventKind::SqueezeStart,
                EventHandler::SetOrnamentColor {
                    color: squeeze_color(controller),
                },
            ),
            (
                ControllerEventKind::SqueezeEnd,
                EventHandler::SetOrnamentColor { color: WHITE },
            ),
        ];

        for (kind, handler) in handlers {
            self.handlers.insert((controller, kind), handler);
        }
    }

    pub fn handler_for(&self, event: ControllerEvent) -> Option<EventHandler> {
        self.handlers.get(&(event.controller, event.kind)).copied()
    }

    pub fn registered_count(&self) -> usize {
        self.handlers.len()
    }

    /// Run the handler registered for `event`, returning what was applied.
    pub fn dispatch(&self, world: &World, event: ControllerEvent) -> Option<EventHandler> {
        let handler = self.handler_for(event)?;
        debug!(
            "controller {} {}: {:?}",
            event.controller.index(),
            event.kind,
            handler
        );

        world.run(
            |handles: UniqueView<SceneHandles>, mut v_color: ViewMut<PropColor>| {
                let target = match handler {
                    EventHandler::SetIndicatorColor { controller, .. } => {
                        handles.indicator(controller)
                    }
                    EventHandler::SetOrnamentColor { .. } => handles.ornament,
                };
                let color = match handler {
                    EventHandler::SetIndicatorColor { color, .. } => color,
                    EventHandler::SetOrnamentColor { color } => color,
                };

                match (&mut v_color).get(target) {
                    Ok(current) => current.0 = color,
                    Err(_) => warn!("no color on target of {:?}", handler),
                }
            },
        );

        Some(handler)
    }
}

impl Default for ControllerEventBridge {
    fn default() -> Self {
        ControllerEventBridge::new()
    }
}
