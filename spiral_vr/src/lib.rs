pub mod controller_actions;
pub mod controller_events;
pub mod controller_poll;
pub mod error;
pub mod input_context;
pub mod parameters;
pub mod scene;
pub mod session;
pub mod settings;
pub mod spiral;
pub mod time;

mod macros;

use std::time::Instant;

use cgmath::{vec3, Vector3};
use shipyard::{UniqueView, UniqueViewMut, ViewMut, World};
use tracing::{span, trace, Level};

use controller_actions::ActionTable;
use controller_events::{ControllerEvent, ControllerEventBridge, EventHandler};
use input_context::Session;
use parameters::AnimationParameters;
use scene::{PropPosition, PropScale, SceneHandles, SceneSnapshot};
use session::{SessionGate, SessionProvider};
use time::{FrameClock, Time};

pub use error::InputError;

#[derive(Clone, Debug)]
pub struct SceneOptions {
    pub ornament_position: Vector3<f32>,
    pub speed: f32,
    pub scale: f32,
    pub wireframe: bool,
    pub action_table: ActionTable,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            ornament_position: vec3(0.0, 2.0, -2.0),
            speed: 1.0,
            scale: 1.0,
            wireframe: false,
            action_table: ActionTable::default(),
        }
    }
}

///
/// SpiralScene
///
/// Owns the scene world and runs the interaction core once per display frame:
/// clock, spiral animation, session gate, then controller polling, always in that order.
/// Controller events arrive separately through `handle_event`.
///
pub struct SpiralScene {
    world: World,
    clock: FrameClock,
    gate: SessionGate,
    bridge: ControllerEventBridge,
    action_table: ActionTable,
}

impl SpiralScene {
    pub fn new(options: SceneOptions) -> SpiralScene {
        SpiralScene::new_with_clock(options, FrameClock::new())
    }

    pub fn new_with_clock(options: SceneOptions, clock: FrameClock) -> SpiralScene {
        let mut world = World::new();
        world.add_unique(Time::default());
        world.add_unique(AnimationParameters {
            speed: options.speed,
            scale: options.scale,
            wireframe_enabled: options.wireframe,
        });
        scene::populate(&mut world, &options);

        SpiralScene {
            world,
            clock,
            gate: SessionGate::new(),
            bridge: ControllerEventBridge::new(),
            action_table: options.action_table,
        }
    }

    /// Frame entry point for the host's animation loop.
    pub fn frame(&mut self, session: Option<&Session>) {
        self.frame_at(Instant::now(), session)
    }

    pub fn frame_at(&mut self, now: Instant, session: Option<&Session>) {
        let span = span!(Level::TRACE, "frame");
        let _enter = span.enter();

        let time = self.clock.tick_at(now);
        trace!("delta_time: {}", time.elapsed.as_secs_f32());
        self.world
            .run(|mut u_time: UniqueViewMut<Time>| *u_time = time);

        profile!("spiral", self.world.run(spiral::run_spiral_animation));

        let sources = self.gate.forward(session);
        let table = &self.action_table;
        self.world.run(
            |handles: UniqueView<SceneHandles>,
             v_position: ViewMut<PropPosition>,
             v_scale: ViewMut<PropScale>| {
                controller_poll::run_controller_poll(table, &sources, handles, v_position, v_scale)
            },
        );
    }

    pub fn drive<P: SessionProvider>(&mut self, provider: &P) {
        self.frame(provider.current_session())
    }

    /// Apply a press/release event. May be called at any point between or during frames.
    pub fn handle_event(&self, event: ControllerEvent) -> Option<EventHandler> {
        self.bridge.dispatch(&self.world, event)
    }

    pub fn set_speed(&self, speed: f32) -> f32 {
        settings::set_speed(&self.world, speed)
    }

    pub fn set_scale(&self, scale: f32) -> f32 {
        settings::set_scale(&self.world, scale)
    }

    pub fn toggle_wireframe(&self) -> bool {
        settings::toggle_wireframe(&self.world)
    }

    pub fn parameters(&self) -> AnimationParameters {
        self.world
            .run(|u_parameters: UniqueView<AnimationParameters>| u_parameters.clone())
    }

    pub fn time(&self) -> Time {
        self.world.run(|u_time: UniqueView<Time>| u_time.clone())
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    pub fn is_polling(&self) -> bool {
        self.gate.is_polling()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        scene::snapshot(&self.world)
    }
}
