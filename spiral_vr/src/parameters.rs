use shipyard::Unique;

///
/// AnimationParameters
///
/// Values owned by the settings panel. The per-frame pass only reads `speed`;
/// `scale` and `wireframe_enabled` are written through the settings module.
///
#[derive(Unique, Clone, Debug, PartialEq)]
pub struct AnimationParameters {
    pub speed: f32,
    pub scale: f32,
    pub wireframe_enabled: bool,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            speed: 1.0,
            scale: 1.0,
            wireframe_enabled: false,
        }
    }
}
