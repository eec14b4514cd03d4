use serde::{Deserialize, Serialize};

/// Primary vertex position and its longitudinal uncertainty
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingVertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub z_error: f64,
}

impl ScoutingVertex {
    pub fn new(x: f64, y: f64, z: f64, z_error: f64) -> Self {
        Self { x, y, z, z_error }
    }
}
