use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::association::{ConstituentMatcher, DEFAULT_MATCH_RADIUS};
use crate::error::Result;
use crate::event::Event;
use crate::formats::{ScoutingPFJet, ScoutingParticle, ScoutingVertex};
use crate::input_tag::InputTag;
use crate::kinematics::{above_pt_floor, delta_r, KinematicCut};
use crate::producers::Producer;
use crate::products::{Products, PLACEHOLDER};
use crate::reco::{JetTag, Met, PfCandidate, PfJet, Vertex};

/// b-tag discriminant of jets without a matching tag
pub const NO_TAG: f32 = -20.;

/// Default maximum ΔR between a jet and its b-tag
pub const DEFAULT_TAG_MATCH_RADIUS: f64 = 0.1;

/// Scouting PF jets, PF candidates and vertices from particle-flow input
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PfProducer {
    pub label: String,
    pub pf_jet_collection: InputTag,
    pub pf_jet_tag_collection: InputTag,
    pub pf_candidate_collection: InputTag,
    pub vertex_collection: InputTag,
    pub met_collection: InputTag,
    pub rho: InputTag,
    pub pf_jet_pt_cut: f64,
    pub pf_jet_eta_cut: f64,
    pub pf_candidate_pt_cut: f64,
    pub constituent_match_radius: f64,
    pub jet_tag_match_radius: f64,
    pub do_jet_tags: bool,
    pub do_candidates: bool,
    pub do_met: bool,
    pub do_vertices: bool,
}

impl Default for PfProducer {
    fn default() -> Self {
        Self {
            label: "scoutingPFJetsProducer".to_owned(),
            pf_jet_collection: InputTag::new("hltAK4PFJets"),
            pf_jet_tag_collection: InputTag::new("hltCombinedSecondaryVertexBJetTagsPF"),
            pf_candidate_collection: InputTag::new("hltParticleFlow"),
            vertex_collection: InputTag::new("hltPixelVertices"),
            met_collection: InputTag::new("hltPFMETProducer"),
            rho: InputTag::new("hltFixedGridRhoFastjetAll"),
            pf_jet_pt_cut: 20.0,
            pf_jet_eta_cut: 3.0,
            pf_candidate_pt_cut: 0.6,
            constituent_match_radius: DEFAULT_MATCH_RADIUS,
            jet_tag_match_radius: DEFAULT_TAG_MATCH_RADIUS,
            do_jet_tags: true,
            do_candidates: true,
            do_met: true,
            do_vertices: true,
        }
    }
}

impl PfProducer {
    fn jet_cut(&self) -> KinematicCut {
        KinematicCut::new(self.pf_jet_pt_cut, self.pf_jet_eta_cut)
    }

    fn matcher(&self) -> ConstituentMatcher {
        ConstituentMatcher::new(self.pf_candidate_pt_cut, self.constituent_match_radius)
    }

    /// Discriminant of the tag closest to the jet, if any is close enough
    fn tag_value(&self, jet: &PfJet, tags: &[JetTag]) -> Option<f32> {
        let mut min_dr = self.jet_tag_match_radius as f32;
        let mut value = None;
        for tag in tags {
            let dr = delta_r(jet, tag) as f32;
            if dr < min_dr {
                min_dr = dr;
                value = Some(tag.discriminant as f32);
            }
        }
        value
    }
}

impl Producer for PfProducer {
    fn label(&self) -> &str {
        &self.label
    }

    fn produce(&self, event: &Event) -> Result<Products> {
        let jets: &Vec<PfJet> = event.get(&self.pf_jet_collection)?;
        let tags: Option<&Vec<JetTag>> =
            event.get_if(self.do_jet_tags, &self.pf_jet_tag_collection)?;
        let candidates: Option<&Vec<PfCandidate>> =
            event.get_if(self.do_candidates, &self.pf_candidate_collection)?;
        let vertices: Option<&Vec<Vertex>> =
            event.get_if(self.do_vertices, &self.vertex_collection)?;
        let rho: &f64 = event.get(&self.rho)?;
        let mets: Option<&Vec<Met>> = event.get_if(self.do_met, &self.met_collection)?;

        let out_vertices: Vec<_> = vertices
            .into_iter()
            .flatten()
            .map(ScoutingVertex::from)
            .collect();

        let out_candidates: Vec<_> = candidates
            .into_iter()
            .flatten()
            .filter(|cand| above_pt_floor(*cand, self.pf_candidate_pt_cut))
            .map(ScoutingParticle::from)
            .collect();

        let matcher = self.matcher();
        let jet_cut = self.jet_cut();
        let out_jets: Vec<_> = jet_cut
            .select(jets)
            .map(|jet| {
                let csv = tags
                    .and_then(|tags| self.tag_value(jet, tags))
                    .unwrap_or(NO_TAG);
                let constituents = if self.do_candidates {
                    matcher.constituent_indices(&jet.constituents, &out_candidates)
                } else {
                    Vec::new()
                };
                project_jet(jet, csv, constituents)
            })
            .collect();

        let (met_pt, met_phi) = match mets.map(|mets| mets.first()) {
            Some(Some(met)) => (met.pt, met.phi),
            Some(None) => {
                warn!("{}: empty MET collection {}", self.label, self.met_collection);
                (PLACEHOLDER, PLACEHOLDER)
            }
            None => (PLACEHOLDER, PLACEHOLDER),
        };

        debug!(
            "{}: {} of {} jets, {} candidates, {} vertices",
            self.label,
            out_jets.len(),
            jets.len(),
            out_candidates.len(),
            out_vertices.len()
        );

        let mut products = Products::new();
        products.put("scoutingVertices", out_vertices);
        products.put("scoutingPFCandidates", out_candidates);
        products.put("scoutingPFJets", out_jets);
        products.put("rho", *rho);
        products.put("pfMetPt", met_pt);
        products.put("pfMetPhi", met_phi);
        Ok(products)
    }
}

impl From<&Vertex> for ScoutingVertex {
    fn from(vtx: &Vertex) -> Self {
        ScoutingVertex::new(vtx.x, vtx.y, vtx.z, vtx.z_error)
    }
}

impl From<&PfCandidate> for ScoutingParticle {
    fn from(cand: &PfCandidate) -> Self {
        ScoutingParticle::new(
            cand.pt as f32,
            cand.eta as f32,
            cand.phi as f32,
            cand.mass as f32,
            cand.pdg_id,
        )
    }
}

fn project_jet(jet: &PfJet, csv: f32, constituents: Vec<i32>) -> ScoutingPFJet {
    ScoutingPFJet {
        pt: jet.pt as f32,
        eta: jet.eta as f32,
        phi: jet.phi as f32,
        m: jet.mass as f32,
        jet_area: jet.jet_area as f32,
        charged_hadron_energy: jet.charged_hadron_energy as f32,
        neutral_hadron_energy: jet.neutral_hadron_energy as f32,
        photon_energy: jet.photon_energy as f32,
        electron_energy: jet.electron_energy as f32,
        muon_energy: jet.muon_energy as f32,
        hf_hadron_energy: jet.hf_hadron_energy as f32,
        hf_em_energy: jet.hf_em_energy as f32,
        charged_hadron_multiplicity: jet.charged_hadron_multiplicity,
        neutral_hadron_multiplicity: jet.neutral_hadron_multiplicity,
        photon_multiplicity: jet.photon_multiplicity,
        electron_multiplicity: jet.electron_multiplicity,
        muon_multiplicity: jet.muon_multiplicity,
        hf_hadron_multiplicity: jet.hf_hadron_multiplicity,
        hf_em_multiplicity: jet.hf_em_multiplicity,
        ho_energy: jet.ho_energy as f32,
        csv,
        user_float: 0.,
        constituents,
    }
}
