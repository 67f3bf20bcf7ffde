/**
 * `scene.rs`
 *
 * Scene entities that the interaction core mutates.
 *
 * Notably:
 * - Geometry and materials live with the host renderer; these are only the attributes we touch.
 * - Entities are created once by `populate` and never created or destroyed afterwards.
 */
use std::f32::consts::TAU;

use cgmath::{vec3, Quaternion, Vector3, Zero};
use shipyard::{Component, EntityId, Get, Unique, UniqueView, View, World};
use tracing::info;

use crate::{input_context::ControllerSlot, SceneOptions};

pub const WHITE: Vector3<f32> = Vector3 {
    x: 1.0,
    y: 1.0,
    z: 1.0,
};

pub const SPOKE_COUNT: usize = 6;
const SPOKE_RADIUS: f32 = 0.6;
const SPOKE_RISE: f32 = 0.15;
const SPIRAL_GROUP_POSITION: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 1.5,
    z: -3.0,
};

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PropPosition(pub Vector3<f32>);

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PropScale(pub Vector3<f32>);

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PropColor(pub Vector3<f32>);

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PropOrientation(pub Quaternion<f32>);

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PropWireframe(pub bool);

// PropOrnament - the single object controllers can move, scale and recolor
#[derive(Component, Debug)]
pub struct PropOrnament;

// PropPointerIndicator - marker on the end of a controller's pointer ray
#[derive(Component, Debug)]
pub struct PropPointerIndicator {
    pub controller: ControllerSlot,
}

// PropSpiralGroup - parent of the spoke ornaments, rotated every frame
#[derive(Component, Debug)]
pub struct PropSpiralGroup;

#[derive(Component, Debug)]
pub struct PropSpoke {
    pub index: usize,
    pub parent: EntityId,
}

#[derive(Unique, Clone, Copy, Debug)]
pub struct SceneHandles {
    pub ornament: EntityId,
    pub indicators: [EntityId; 2],
    pub spiral_group: EntityId,
}

impl SceneHandles {
    pub fn indicator(&self, controller: ControllerSlot) -> EntityId {
        self.indicators[controller.index()]
    }
}

pub fn populate(world: &mut World, options: &SceneOptions) -> SceneHandles {
    let ornament = world.add_entity((
        PropOrnament,
        PropPosition(options.ornament_position),
        PropScale(vec3(options.scale, options.scale, options.scale)),
        PropColor(WHITE),
        PropWireframe(options.wireframe),
    ));

    let indicators = ControllerSlot::ALL.map(|controller| {
        world.add_entity((PropPointerIndicator { controller }, PropColor(WHITE)))
    });

    let spiral_group = world.add_entity((
        PropSpiralGroup,
        PropPosition(SPIRAL_GROUP_POSITION),
        PropOrientation(Quaternion::new(1.0, 0.0, 0.0, 0.0)),
    ));

    for index in 0..SPOKE_COUNT {
        let angle = index as f32 * TAU / SPOKE_COUNT as f32;
        let offset = vec3(
            SPOKE_RADIUS * angle.cos(),
            SPOKE_RISE * index as f32,
            SPOKE_RADIUS * angle.sin(),
        );
        world.add_entity((
            PropSpoke {
                index,
                parent: spiral_group,
            },
            PropPosition(offset),
        ));
    }

    let handles = SceneHandles {
        ornament,
        indicators,
        spiral_group,
    };
    info!("populated scene: {:?}", handles);
    world.add_unique(handles);
    handles
}

///
/// SceneSnapshot
///
/// Copy of everything the core mutates, for handing to a renderer or asserting on in tests.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    pub ornament_position: Vector3<f32>,
    pub ornament_scale: Vector3<f32>,
    pub ornament_color: Vector3<f32>,
    pub ornament_wireframe: bool,
    pub indicator_colors: [Vector3<f32>; 2],
    pub spiral_orientation: Quaternion<f32>,
}

pub fn snapshot(world: &World) -> SceneSnapshot {
    world.run(
        |handles: UniqueView<SceneHandles>,
         v_position: View<PropPosition>,
         v_scale: View<PropScale>,
         v_color: View<PropColor>,
         v_wireframe: View<PropWireframe>,
         v_orientation: View<PropOrientation>| {
            let color_of = |id: EntityId| v_color.get(id).map(|c| c.0).unwrap_or(WHITE);

            SceneSnapshot {
                ornament_position: v_position
                    .get(handles.ornament)
                    .map(|p| p.0)
                    .unwrap_or_else(|_| Vector3::zero()),
                ornament_scale: v_scale
                    .get(handles.ornament)
                    .map(|s| s.0)
                    .unwrap_or_else(|_| vec3(1.0, 1.0, 1.0)),
                ornament_color: color_of(handles.ornament),
                ornament_wireframe: v_wireframe
                    .get(handles.ornament)
                    .map(|w| w.0)
                    .unwrap_or(false),
                indicator_colors: handles.indicators.map(color_of),
                spiral_orientation: v_orientation
                    .get(handles.spiral_group)
                    .map(|o| o.0)
                    .unwrap_or_else(|_| Quaternion::new(1.0, 0.0, 0.0, 0.0)),
            }
        },
    )
}
