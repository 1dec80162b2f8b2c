use serde::{Deserialize, Serialize};

/// Shape of the displayed progress of a turn.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Constant angular speed.
    #[default]
    Linear,
    /// Ease in and out.
    Cosine,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Angular speed of a turn in degrees per second.
    pub twist_speed: f32,
    /// Angular distance in degrees from the target at which a turn snaps.
    pub snap_epsilon: f32,
    pub interpolation: Interpolation,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_speed: 300.0,
            snap_epsilon: 1.0,
            interpolation: Interpolation::Linear,
        }
    }
}
