use serde::{Deserialize, Serialize};

/// Electron with shower-shape, track-matching and isolation variables
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingElectron {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub m: f32,
    pub d0: f32,
    pub dz: f32,
    pub d_eta_in: f32,
    pub d_phi_in: f32,
    pub sigma_ieta_ieta: f32,
    pub h_over_e: f32,
    /// 1/E - 1/p
    pub ooemoop: f32,
    pub missing_hits: i32,
    pub charge: i32,
    pub ecal_iso: f32,
    pub hcal_iso: f32,
    pub track_iso: f32,
}

/// Photon candidate
///
/// Photons share the layout of electrons so that both can be filled from
/// the same electromagnetic candidate. The charge is always zero.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingPhoton {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub m: f32,
    pub d0: f32,
    pub dz: f32,
    pub d_eta_in: f32,
    pub d_phi_in: f32,
    pub sigma_ieta_ieta: f32,
    pub h_over_e: f32,
    pub ooemoop: f32,
    pub missing_hits: i32,
    pub charge: i32,
    pub ecal_iso: f32,
    pub hcal_iso: f32,
    pub track_iso: f32,
}

impl From<ScoutingElectron> for ScoutingPhoton {
    fn from(e: ScoutingElectron) -> Self {
        Self {
            pt: e.pt,
            eta: e.eta,
            phi: e.phi,
            m: e.m,
            d0: e.d0,
            dz: e.dz,
            d_eta_in: e.d_eta_in,
            d_phi_in: e.d_phi_in,
            sigma_ieta_ieta: e.sigma_ieta_ieta,
            h_over_e: e.h_over_e,
            ooemoop: e.ooemoop,
            missing_hits: e.missing_hits,
            charge: 0,
            ecal_iso: e.ecal_iso,
            hcal_iso: e.hcal_iso,
            track_iso: e.track_iso,
        }
    }
}
