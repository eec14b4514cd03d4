use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::Event;
use crate::formats::{ScoutingBeamSpot, ScoutingCaloJet, ScoutingVertex};
use crate::input_tag::InputTag;
use crate::kinematics::KinematicCut;
use crate::producers::Producer;
use crate::products::{Products, PLACEHOLDER};
use crate::reco::{BeamSpot, CaloJet, Met, Vertex};

/// Scouting calo jets and the beam spot
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CaloProducer {
    pub label: String,
    pub calo_jet_collection: InputTag,
    pub beam_spot: InputTag,
    pub vertex_collection: InputTag,
    pub met_collection: InputTag,
    pub rho: InputTag,
    pub calo_jet_pt_cut: f64,
    pub calo_jet_eta_cut: f64,
    pub do_vertices: bool,
    pub do_met: bool,
    pub do_rho: bool,
}

impl Default for CaloProducer {
    fn default() -> Self {
        Self {
            label: "scoutingCaloJetsProducer".to_owned(),
            calo_jet_collection: InputTag::new("hltAK4CaloJets"),
            beam_spot: InputTag::new("hltOnlineBeamSpot"),
            vertex_collection: InputTag::new("hltPixelVertices"),
            met_collection: InputTag::new("hltMetCleanUsingJetID"),
            rho: InputTag::new("hltFixedGridRhoFastjetAllCalo"),
            calo_jet_pt_cut: 20.0,
            calo_jet_eta_cut: 3.0,
            do_vertices: true,
            do_met: true,
            do_rho: true,
        }
    }
}

impl Producer for CaloProducer {
    fn label(&self) -> &str {
        &self.label
    }

    fn produce(&self, event: &Event) -> Result<Products> {
        let jets: &Vec<CaloJet> = event.get(&self.calo_jet_collection)?;
        let beam_spot: &BeamSpot = event.get(&self.beam_spot)?;
        let vertices: Option<&Vec<Vertex>> =
            event.get_if(self.do_vertices, &self.vertex_collection)?;
        let mets: Option<&Vec<Met>> = event.get_if(self.do_met, &self.met_collection)?;
        let rho: Option<&f64> = event.get_if(self.do_rho, &self.rho)?;

        let cut = KinematicCut::new(self.calo_jet_pt_cut, self.calo_jet_eta_cut);
        let out_jets: Vec<_> = cut.select(jets).map(ScoutingCaloJet::from).collect();
        let out_vertices: Vec<_> = vertices
            .into_iter()
            .flatten()
            .map(ScoutingVertex::from)
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
            "{}: {} of {} calo jets, {} vertices",
            self.label,
            out_jets.len(),
            jets.len(),
            out_vertices.len()
        );

        let mut products = Products::new();
        products.put("scoutingCaloJets", out_jets);
        products.put("scoutingBeamSpot", ScoutingBeamSpot::from(beam_spot));
        products.put("scoutingVertices", out_vertices);
        products.put("rho", rho.copied().unwrap_or(PLACEHOLDER));
        products.put("caloMetPt", met_pt);
        products.put("caloMetPhi", met_phi);
        Ok(products)
    }
}

impl From<&CaloJet> for ScoutingCaloJet {
    fn from(jet: &CaloJet) -> Self {
        ScoutingCaloJet {
            pt: jet.pt as f32,
            eta: jet.eta as f32,
            phi: jet.phi as f32,
            m: jet.mass as f32,
            jet_area: jet.jet_area as f32,
            max_e_in_em_towers: jet.max_e_in_em_towers as f32,
            max_e_in_had_towers: jet.max_e_in_had_towers as f32,
            had_energy_in_hb: jet.had_energy_in_hb as f32,
            had_energy_in_he: jet.had_energy_in_he as f32,
            had_energy_in_hf: jet.had_energy_in_hf as f32,
            em_energy_in_eb: jet.em_energy_in_eb as f32,
            em_energy_in_ee: jet.em_energy_in_ee as f32,
            em_energy_in_hf: jet.em_energy_in_hf as f32,
            towers_area: jet.towers_area as f32,
            user_float: 0.,
        }
    }
}

impl From<&BeamSpot> for ScoutingBeamSpot {
    fn from(bs: &BeamSpot) -> Self {
        ScoutingBeamSpot {
            x: bs.x0,
            y: bs.y0,
            z: bs.z0,
            sigma_z: bs.sigma_z,
            width_x: bs.beam_width_x,
            width_y: bs.beam_width_y,
            dxdz: bs.dxdz,
            dydz: bs.dydz,
            error_x: bs.x0_error,
            error_y: bs.y0_error,
            error_z: bs.z0_error,
            error_sigma_z: bs.sigma_z0_error,
            error_dxdz: bs.dxdz_error,
            error_dydz: bs.dydz_error,
            error_beam_width: bs.beam_width_x_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn calo_jet(pt: f64, eta: f64) -> CaloJet {
        CaloJet {
            pt,
            eta,
            phi: 0.3,
            mass: 4.,
            em_energy_in_eb: 0.25 * pt,
            towers_area: 0.4,
            ..Default::default()
        }
    }

    fn event() -> Event {
        Event::new(3)
            .with(
                "hltAK4CaloJets",
                vec![calo_jet(80., 0.5), calo_jet(10., 0.), calo_jet(35., -2.9), calo_jet(40., 4.)],
            )
            .with(
                "hltOnlineBeamSpot",
                BeamSpot {
                    x0: 0.07,
                    y0: -0.03,
                    z0: 0.5,
                    sigma_z: 3.6,
                    beam_width_x_error: 1e-4,
                    ..Default::default()
                },
            )
            .with("hltPixelVertices", vec![Vertex::default()])
            .with("hltMetCleanUsingJetID", vec![Met { pt: 25., phi: 0.5 }])
            .with("hltFixedGridRhoFastjetAllCalo", 9.)
    }

    #[test]
    fn jets_and_beam_spot() {
        let products = CaloProducer::default().produce(&event()).unwrap();

        let jets: &Vec<ScoutingCaloJet> = products.get("scoutingCaloJets").unwrap();
        let pt: Vec<_> = jets.iter().map(|j| j.pt).collect();
        assert_eq!(pt, [80., 35.]);
        assert_eq!(jets[0].em_energy_in_eb, 20.);
        assert_eq!(jets[1].towers_area, 0.4);

        let bs: &ScoutingBeamSpot = products.get("scoutingBeamSpot").unwrap();
        assert_eq!(bs.x, 0.07);
        assert_eq!(bs.sigma_z, 3.6);
        assert_eq!(bs.error_beam_width, 1e-4);

        assert_eq!(products.get::<f64>("rho"), Some(&9.));
        assert_eq!(products.get::<f64>("caloMetPt"), Some(&25.));
    }

    #[test]
    fn optional_outputs() {
        let mut event = event();
        event.collections.remove(&InputTag::new("hltMetCleanUsingJetID"));
        event.collections.remove(&InputTag::new("hltFixedGridRhoFastjetAllCalo"));
        event.collections.remove(&InputTag::new("hltPixelVertices"));
        let producer = CaloProducer {
            do_vertices: false,
            do_met: false,
            do_rho: false,
            ..Default::default()
        };
        let products = producer.produce(&event).unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products.get::<f64>("rho"), Some(&PLACEHOLDER));
        assert_eq!(products.get::<f64>("caloMetPhi"), Some(&PLACEHOLDER));
        assert!(products.get::<Vec<ScoutingVertex>>("scoutingVertices").unwrap().is_empty());
    }

    #[test]
    fn missing_beam_spot() {
        let mut event = event();
        event.collections.remove(&InputTag::new("hltOnlineBeamSpot"));
        assert_eq!(
            CaloProducer::default().produce(&event),
            Err(Error::missing(&InputTag::new("hltOnlineBeamSpot"), "beam spot"))
        );
    }
}
