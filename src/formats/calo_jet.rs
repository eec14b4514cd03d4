use serde::{Deserialize, Serialize};

/// Calorimeter jet
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingCaloJet {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub m: f32,
    pub jet_area: f32,
    pub max_e_in_em_towers: f32,
    pub max_e_in_had_towers: f32,
    pub had_energy_in_hb: f32,
    pub had_energy_in_he: f32,
    pub had_energy_in_hf: f32,
    pub em_energy_in_eb: f32,
    pub em_energy_in_ee: f32,
    pub em_energy_in_hf: f32,
    pub towers_area: f32,
    /// Free slot for analysis-specific information
    pub user_float: f32,
}
