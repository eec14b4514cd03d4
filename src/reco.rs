//! Reconstructed objects consumed by the scouting producers
//!
//! These mirror the parts of the full reconstruction output that are read
//! when filling scouting records. References between collections are
//! indices, resolved against the collection named in the producer
//! configuration.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kinematics::{Direction, Kinematics};

/// Particle-flow candidate
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct PfCandidate {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub mass: f64,
    pub pdg_id: i32,
}

/// Particle-flow jet together with its constituents
#[derive(Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PfJet {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub mass: f64,
    pub jet_area: f64,
    pub charged_hadron_energy: f64,
    pub neutral_hadron_energy: f64,
    pub photon_energy: f64,
    pub electron_energy: f64,
    pub muon_energy: f64,
    pub hf_hadron_energy: f64,
    pub hf_em_energy: f64,
    pub charged_hadron_multiplicity: i32,
    pub neutral_hadron_multiplicity: i32,
    pub photon_multiplicity: i32,
    pub electron_multiplicity: i32,
    pub muon_multiplicity: i32,
    pub hf_hadron_multiplicity: i32,
    pub hf_em_multiplicity: i32,
    pub ho_energy: f64,
    pub constituents: Vec<PfCandidate>,
}

/// Calorimeter jet
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CaloJet {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub mass: f64,
    pub jet_area: f64,
    pub max_e_in_em_towers: f64,
    pub max_e_in_had_towers: f64,
    pub had_energy_in_hb: f64,
    pub had_energy_in_he: f64,
    pub had_energy_in_hf: f64,
    pub em_energy_in_eb: f64,
    pub em_energy_in_ee: f64,
    pub em_energy_in_hf: f64,
    pub towers_area: f64,
}

/// b-tagging discriminant attached to the direction of the tagged jet
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct JetTag {
    pub eta: f64,
    pub phi: f64,
    pub discriminant: f64,
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub z_error: f64,
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BeamSpot {
    pub x0: f64,
    pub y0: f64,
    pub z0: f64,
    pub sigma_z: f64,
    pub beam_width_x: f64,
    pub beam_width_y: f64,
    pub dxdz: f64,
    pub dydz: f64,
    pub x0_error: f64,
    pub y0_error: f64,
    pub z0_error: f64,
    pub sigma_z0_error: f64,
    pub dxdz_error: f64,
    pub dydz_error: f64,
    pub beam_width_x_error: f64,
}

/// Missing transverse energy
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct Met {
    pub pt: f64,
    pub phi: f64,
}

/// Track fit summary
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Track {
    pub chi2: f64,
    pub ndof: f64,
    pub charge: i32,
    pub dxy: f64,
    pub dz: f64,
    pub n_valid_muon_hits: i32,
    pub n_valid_pixel_hits: i32,
    pub tracker_layers_with_measurement: i32,
}

/// Charged candidate, e.g. a muon, with an optional reference to its track
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ChargedCandidate {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub mass: f64,
    /// Index into the track collection
    #[serde(default)]
    pub track: Option<usize>,
}

/// Electromagnetic calorimeter candidate
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct EcalCandidate {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub mass: f64,
    /// Identifier of the seeding super-cluster
    #[serde(default)]
    pub super_cluster: Option<u64>,
}

/// Gaussian-sum-filter electron track
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct GsfTrack {
    pub d0: f64,
    pub dz: f64,
    pub charge: i32,
    /// Super-cluster that seeded the track
    #[serde(default)]
    pub super_cluster: Option<u64>,
}

/// Per-candidate side-table, keyed by the candidate's index
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ValueMap(pub BTreeMap<usize, f64>);

impl ValueMap {
    pub fn get(&self, idx: usize) -> Option<f64> {
        self.0.get(&idx).copied()
    }
}

impl FromIterator<(usize, f64)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

macro_rules! impl_reco_kinematics {
    ($($reco:ty),* $(,)?) => {
        $(
            impl Direction for $reco {
                fn eta(&self) -> f64 {
                    self.eta
                }

                fn phi(&self) -> f64 {
                    self.phi
                }
            }

            impl Kinematics for $reco {
                fn pt(&self) -> f64 {
                    self.pt
                }
            }
        )*
    };
}

impl_reco_kinematics!(PfCandidate, PfJet, CaloJet, ChargedCandidate, EcalCandidate);

impl Direction for JetTag {
    fn eta(&self) -> f64 {
        self.eta
    }

    fn phi(&self) -> f64 {
        self.phi
    }
}
