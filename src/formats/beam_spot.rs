use serde::{Deserialize, Serialize};

/// Luminous region of the current event, one per event
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingBeamSpot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub sigma_z: f64,
    pub width_x: f64,
    pub width_y: f64,
    pub dxdz: f64,
    pub dydz: f64,
    pub error_x: f64,
    pub error_y: f64,
    pub error_z: f64,
    pub error_sigma_z: f64,
    pub error_dxdz: f64,
    pub error_dydz: f64,
    pub error_beam_width: f64,
}
