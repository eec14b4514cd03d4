use serde::{Deserialize, Serialize};

/// Muon with isolation sums and track quality
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingMuon {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub m: f32,
    pub ecal_iso: f32,
    pub hcal_iso: f32,
    pub track_iso: f32,
    pub chi2: f32,
    pub ndof: f32,
    pub charge: i32,
    pub dxy: f32,
    pub dz: f32,
    pub n_valid_muon_hits: i32,
    pub n_valid_pixel_hits: i32,
    pub n_matched_stations: i32,
    pub n_tracker_layers_with_measurement: i32,
}
