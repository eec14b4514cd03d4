use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::Event;
use crate::formats::ScoutingMuon;
use crate::input_tag::InputTag;
use crate::kinematics::KinematicCut;
use crate::producers::{Producer, SideTable};
use crate::products::Products;
use crate::reco::{ChargedCandidate, Track};

/// Scouting muons from charged candidates, their tracks and isolation maps
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MuonProducer {
    pub label: String,
    #[serde(rename = "ChargedCandidates")]
    pub charged_candidates: InputTag,
    #[serde(rename = "Tracks")]
    pub tracks: InputTag,
    #[serde(rename = "EcalPFClusterIsoMap")]
    pub ecal_pf_cluster_iso_map: InputTag,
    #[serde(rename = "HcalPFClusterIsoMap")]
    pub hcal_pf_cluster_iso_map: InputTag,
    #[serde(rename = "TrackIsoMap")]
    pub track_iso_map: InputTag,
    pub muon_pt_cut: f64,
    pub muon_eta_cut: f64,
}

impl Default for MuonProducer {
    fn default() -> Self {
        Self {
            label: "scoutingMuonProducer".to_owned(),
            charged_candidates: InputTag::new("hltL3MuonCandidates"),
            tracks: InputTag::new("hltL3Muons"),
            ecal_pf_cluster_iso_map: InputTag::new("hltMuonEcalPFClusterIsoForMuons"),
            hcal_pf_cluster_iso_map: InputTag::new("hltMuonHcalPFClusterIsoForMuons"),
            track_iso_map: InputTag::with_instance(
                "hltMuonTkRelIsolationCut0p09Map",
                "combinedRelativeIsoDeposits",
            ),
            muon_pt_cut: 10.0,
            muon_eta_cut: 2.4,
        }
    }
}

impl Producer for MuonProducer {
    fn label(&self) -> &str {
        &self.label
    }

    fn produce(&self, event: &Event) -> Result<Products> {
        let candidates: &Vec<ChargedCandidate> = event.get(&self.charged_candidates)?;
        let tracks: &Vec<Track> = event.get(&self.tracks)?;
        let ecal_iso = SideTable::get(event, &self.ecal_pf_cluster_iso_map)?;
        let hcal_iso = SideTable::get(event, &self.hcal_pf_cluster_iso_map)?;
        let track_iso = SideTable::get(event, &self.track_iso_map)?;

        let cut = KinematicCut::new(self.muon_pt_cut, self.muon_eta_cut);
        let mut muons = Vec::new();
        for (idx, muon) in candidates.iter().enumerate() {
            let Some(track) = muon.track.and_then(|t| tracks.get(t)) else {
                continue;
            };
            if !cut.accepts(muon) {
                continue;
            }
            muons.push(ScoutingMuon {
                pt: muon.pt as f32,
                eta: muon.eta as f32,
                phi: muon.phi as f32,
                m: muon.mass as f32,
                ecal_iso: ecal_iso.value(idx)?,
                hcal_iso: hcal_iso.value(idx)?,
                track_iso: track_iso.value(idx)?,
                chi2: track.chi2 as f32,
                ndof: track.ndof as f32,
                charge: track.charge,
                dxy: track.dxy as f32,
                dz: track.dz as f32,
                n_valid_muon_hits: track.n_valid_muon_hits,
                n_valid_pixel_hits: track.n_valid_pixel_hits,
                n_matched_stations: 0,
                n_tracker_layers_with_measurement: track.tracker_layers_with_measurement,
            });
        }
        debug!("{}: {} of {} muons", self.label, muons.len(), candidates.len());

        let mut products = Products::new();
        products.put("scoutingMuons", muons);
        Ok(products)
    }
}
