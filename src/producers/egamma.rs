use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::Event;
use crate::formats::{ScoutingElectron, ScoutingPhoton};
use crate::input_tag::InputTag;
use crate::kinematics::KinematicCut;
use crate::producers::{Producer, SideTable};
use crate::products::Products;
use crate::reco::{EcalCandidate, GsfTrack};

/// Configuration shared by the electron and photon producers
///
/// Both read the same collections and differ only in label and in the
/// names of their kinematic cuts.
macro_rules! egamma_producer {
    (
        $(#[$meta:meta])*
        $name:ident { label: $label:literal, $pt_cut:ident, $eta_cut:ident $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
        #[serde(default, deny_unknown_fields, rename_all = "camelCase")]
        pub struct $name {
            pub label: String,
            #[serde(rename = "EgammaCandidates")]
            pub candidates: InputTag,
            #[serde(rename = "EgammaGsfTracks")]
            pub gsf_tracks: InputTag,
            #[serde(rename = "SigmaIEtaIEtaMap")]
            pub sigma_ieta_ieta_map: InputTag,
            #[serde(rename = "HoverEMap")]
            pub h_over_e_map: InputTag,
            #[serde(rename = "DetaMap")]
            pub deta_map: InputTag,
            #[serde(rename = "DphiMap")]
            pub dphi_map: InputTag,
            #[serde(rename = "MissingHitsMap")]
            pub missing_hits_map: InputTag,
            #[serde(rename = "OneOEMinusOneOPMap")]
            pub one_oe_minus_one_op_map: InputTag,
            #[serde(rename = "EcalPFClusterIsoMap")]
            pub ecal_pf_cluster_iso_map: InputTag,
            #[serde(rename = "EleGsfTrackIsoMap")]
            pub ele_gsf_track_iso_map: InputTag,
            #[serde(rename = "HcalPFClusterIsoMap")]
            pub hcal_pf_cluster_iso_map: InputTag,
            pub $pt_cut: f64,
            pub $eta_cut: f64,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    label: $label.to_owned(),
                    candidates: InputTag::new("hltEgammaCandidates"),
                    gsf_tracks: InputTag::new("hltEgammaGsfTracks"),
                    sigma_ieta_ieta_map: InputTag::with_instance(
                        "hltEgammaClusterShape",
                        "sigmaIEtaIEta5x5",
                    ),
                    h_over_e_map: InputTag::new("hltEgammaHoverE"),
                    deta_map: InputTag::with_instance("hltEgammaGsfTrackVars", "Deta"),
                    dphi_map: InputTag::with_instance("hltEgammaGsfTrackVars", "Dphi"),
                    missing_hits_map: InputTag::with_instance(
                        "hltEgammaGsfTrackVars",
                        "MissingHits",
                    ),
                    one_oe_minus_one_op_map: InputTag::with_instance(
                        "hltEgammaGsfTrackVars",
                        "OneOESuperMinusOneOP",
                    ),
                    ecal_pf_cluster_iso_map: InputTag::new("hltEgammaEcalPFClusterIso"),
                    ele_gsf_track_iso_map: InputTag::new("hltEgammaEleGsfTrackIso"),
                    hcal_pf_cluster_iso_map: InputTag::new("hltEgammaHcalPFClusterIso"),
                    $pt_cut: 10.0,
                    $eta_cut: 2.5,
                }
            }
        }

        impl $name {
            fn cut(&self) -> KinematicCut {
                KinematicCut::new(self.$pt_cut, self.$eta_cut)
            }

            fn fetch<'a>(&'a self, event: &'a Event) -> Result<EgammaEvent<'a>> {
                let candidates: &Vec<EcalCandidate> = event.get(&self.candidates)?;
                let tracks: &Vec<GsfTrack> = event.get(&self.gsf_tracks)?;
                Ok(EgammaEvent {
                    candidates,
                    tracks,
                    sigma_ieta_ieta: SideTable::get(event, &self.sigma_ieta_ieta_map)?,
                    h_over_e: SideTable::get(event, &self.h_over_e_map)?,
                    deta: SideTable::get(event, &self.deta_map)?,
                    dphi: SideTable::get(event, &self.dphi_map)?,
                    missing_hits: SideTable::get(event, &self.missing_hits_map)?,
                    one_oe_minus_one_op: SideTable::get(event, &self.one_oe_minus_one_op_map)?,
                    ecal_iso: SideTable::get(event, &self.ecal_pf_cluster_iso_map)?,
                    track_iso: SideTable::get(event, &self.ele_gsf_track_iso_map)?,
                    hcal_iso: SideTable::get(event, &self.hcal_pf_cluster_iso_map)?,
                })
            }
        }
    };
}

struct EgammaEvent<'a> {
    candidates: &'a [EcalCandidate],
    tracks: &'a [GsfTrack],
    sigma_ieta_ieta: SideTable<'a>,
    h_over_e: SideTable<'a>,
    deta: SideTable<'a>,
    dphi: SideTable<'a>,
    missing_hits: SideTable<'a>,
    one_oe_minus_one_op: SideTable<'a>,
    ecal_iso: SideTable<'a>,
    track_iso: SideTable<'a>,
    hcal_iso: SideTable<'a>,
}

impl<'a> EgammaEvent<'a> {
    /// Candidates passing the cut that have a super-cluster
    fn selected(
        &self,
        cut: KinematicCut,
    ) -> impl Iterator<Item = (usize, &'a EcalCandidate, u64)> + 'a {
        let candidates: &'a [EcalCandidate] = self.candidates;
        candidates
            .iter()
            .enumerate()
            .filter(move |(_, cand)| cut.accepts(*cand))
            .filter_map(|(idx, cand)| cand.super_cluster.map(|sc| (idx, cand, sc)))
    }

    /// The last track seeded by the given super-cluster
    fn track(&self, super_cluster: u64) -> Option<&'a GsfTrack> {
        self.tracks
            .iter()
            .filter(|track| track.super_cluster == Some(super_cluster))
            .last()
    }

    fn electron(
        &self,
        idx: usize,
        cand: &EcalCandidate,
        track: Option<&GsfTrack>,
    ) -> Result<ScoutingElectron> {
        Ok(ScoutingElectron {
            pt: cand.pt as f32,
            eta: cand.eta as f32,
            phi: cand.phi as f32,
            m: cand.mass as f32,
            d0: track.map(|t| t.d0 as f32).unwrap_or_default(),
            dz: track.map(|t| t.dz as f32).unwrap_or_default(),
            d_eta_in: self.deta.value(idx)?,
            d_phi_in: self.dphi.value(idx)?,
            sigma_ieta_ieta: self.sigma_ieta_ieta.value(idx)?,
            h_over_e: self.h_over_e.value(idx)?,
            ooemoop: self.one_oe_minus_one_op.value(idx)?,
            missing_hits: self.missing_hits.value(idx)? as i32,
            charge: track.map(|t| t.charge).unwrap_or_default(),
            ecal_iso: self.ecal_iso.value(idx)?,
            hcal_iso: self.hcal_iso.value(idx)?,
            track_iso: self.track_iso.value(idx)?,
        })
    }
}

egamma_producer!(
    /// Scouting electrons: electromagnetic candidates with a GSF track
    ElectronProducer {
        label: "scoutingElectronProducer",
        electron_pt_cut,
        electron_eta_cut,
    }
);

impl Producer for ElectronProducer {
    fn label(&self) -> &str {
        &self.label
    }

    fn produce(&self, event: &Event) -> Result<Products> {
        let egamma = self.fetch(event)?;

        let mut electrons = Vec::new();
        for (idx, cand, super_cluster) in egamma.selected(self.cut()) {
            let Some(track) = egamma.track(super_cluster) else {
                continue;
            };
            electrons.push(egamma.electron(idx, cand, Some(track))?);
        }
        debug!(
            "{}: {} electrons from {} candidates",
            self.label,
            electrons.len(),
            egamma.candidates.len()
        );

        let mut products = Products::new();
        products.put("scoutingElectrons", electrons);
        Ok(products)
    }
}

egamma_producer!(
    /// Scouting electrons and photons from the same electromagnetic candidates
    ///
    /// Candidates without a matching track, or with missing inner hits, are
    /// stored as photons.
    EgammaProducer {
        label: "hltScoutingEgammaProducer",
        egamma_pt_cut,
        egamma_eta_cut,
    }
);

impl Producer for EgammaProducer {
    fn label(&self) -> &str {
        &self.label
    }

    fn produce(&self, event: &Event) -> Result<Products> {
        let egamma = self.fetch(event)?;

        let mut electrons = Vec::new();
        let mut photons = Vec::new();
        for (idx, cand, super_cluster) in egamma.selected(self.cut()) {
            let track = egamma.track(super_cluster);
            let electron = egamma.electron(idx, cand, track)?;
            // the stored hit count is truncated, the selection is not
            if track.is_none() || egamma.missing_hits.value(idx)? > 0. {
                photons.push(ScoutingPhoton::from(electron));
            } else {
                electrons.push(electron);
            }
        }
        debug!(
            "{}: {} electrons and {} photons from {} candidates",
            self.label,
            electrons.len(),
            photons.len(),
            egamma.candidates.len()
        );

        let mut products = Products::new();
        products.put("scoutingElectrons", electrons);
        products.put("scoutingPhotons", photons);
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::reco::ValueMap;

    fn candidate(pt: f64, eta: f64, super_cluster: Option<u64>) -> EcalCandidate {
        EcalCandidate {
            pt,
            eta,
            phi: 1.2,
            mass: 0.,
            super_cluster,
        }
    }

    fn track(d0: f64, charge: i32, super_cluster: u64) -> GsfTrack {
        GsfTrack {
            d0,
            dz: 0.5 * d0,
            charge,
            super_cluster: Some(super_cluster),
        }
    }

    fn event() -> Event {
        let candidates = vec![
            candidate(40., 0.3, Some(100)),
            candidate(35., -1.0, Some(101)),
            candidate(20., 2.0, Some(102)),
            candidate(8., 0.0, Some(100)),
            candidate(50., 2.7, Some(100)),
            candidate(30., 0.0, None),
        ];
        let tracks = vec![
            track(0.01, 1, 100),
            track(0.02, -1, 102),
            track(0.03, -1, 100),
        ];
        let n = candidates.len();
        let table = |f: fn(usize) -> f64| -> ValueMap { (0..n).map(|i| (i, f(i))).collect() };
        let inputs = EgammaProducer::default();
        Event::new(5)
            .with(inputs.candidates.clone(), candidates)
            .with(inputs.gsf_tracks.clone(), tracks)
            .with(inputs.sigma_ieta_ieta_map.clone(), table(|_| 0.01))
            .with(inputs.h_over_e_map.clone(), table(|_| 0.05))
            .with(inputs.deta_map.clone(), table(|_| 0.002))
            .with(inputs.dphi_map.clone(), table(|_| 0.02))
            .with(inputs.missing_hits_map.clone(), table(|i| if i == 2 { 1. } else { 0. }))
            .with(inputs.one_oe_minus_one_op_map.clone(), table(|_| 0.001))
            .with(inputs.ecal_pf_cluster_iso_map.clone(), table(|i| i as f64))
            .with(inputs.ele_gsf_track_iso_map.clone(), table(|_| 0.25))
            .with(inputs.hcal_pf_cluster_iso_map.clone(), table(|_| 0.5))
    }

    #[test]
    fn electrons_need_a_track() {
        let products = ElectronProducer::default().produce(&event()).unwrap();
        let electrons: &Vec<ScoutingElectron> = products.get("scoutingElectrons").unwrap();
        assert_eq!(electrons.len(), 2);

        // the last track seeded by the same super-cluster is used
        assert_eq!(electrons[0].pt, 40.);
        assert_eq!(electrons[0].d0, 0.03);
        assert_eq!(electrons[0].charge, -1);
        assert_eq!(electrons[0].ecal_iso, 0.);

        assert_eq!(electrons[1].pt, 20.);
        assert_eq!(electrons[1].missing_hits, 1);
        assert_eq!(electrons[1].ecal_iso, 2.);
        assert_eq!(electrons[1].track_iso, 0.25);
    }

    #[test]
    fn photons_and_electrons() {
        let products = EgammaProducer::default().produce(&event()).unwrap();
        let electrons: &Vec<ScoutingElectron> = products.get("scoutingElectrons").unwrap();
        let photons: &Vec<ScoutingPhoton> = products.get("scoutingPhotons").unwrap();

        assert_eq!(electrons.len(), 1);
        assert_eq!(electrons[0].pt, 40.);

        let pt: Vec<_> = photons.iter().map(|p| p.pt).collect();
        assert_eq!(pt, [35., 20.]);
        // no track at all
        assert_eq!(photons[0].d0, 0.);
        assert_eq!(photons[0].charge, 0);
        // track, but missing hits
        assert_eq!(photons[1].d0, 0.02);
        assert_eq!(photons[1].charge, 0);
        assert_eq!(photons[1].missing_hits, 1);
    }

    #[test]
    fn missing_side_table() {
        let mut event = event();
        let producer = EgammaProducer::default();
        event.collections.remove(&producer.dphi_map);
        assert_eq!(
            producer.produce(&event),
            Err(Error::missing(&producer.dphi_map, "value map"))
        );
    }

    #[test]
    fn fractional_missing_hits_make_a_photon() {
        let mut event = event();
        let producer = EgammaProducer::default();
        let hits: ValueMap = (0..6).map(|i| (i, if i == 0 { 0.5 } else { 0. })).collect();
        event.insert(producer.missing_hits_map.clone(), hits);

        let products = producer.produce(&event).unwrap();
        let electrons: &Vec<ScoutingElectron> = products.get("scoutingElectrons").unwrap();
        let photons: &Vec<ScoutingPhoton> = products.get("scoutingPhotons").unwrap();

        let electron_pt: Vec<_> = electrons.iter().map(|e| e.pt).collect();
        assert_eq!(electron_pt, [20.]);
        let photon_pt: Vec<_> = photons.iter().map(|p| p.pt).collect();
        assert_eq!(photon_pt, [40., 35.]);
        assert_eq!(photons[0].missing_hits, 0);
        assert_eq!(photons[0].d0, 0.03);
    }

    #[test]
    fn options_from_json() {
        let producer: ElectronProducer = serde_json::from_str(
            r#"{"label": "ele", "electronPtCut": 15.0, "DetaMap": "myTrackVars:Deta"}"#,
        )
        .unwrap();
        assert_eq!(producer.label, "ele");
        assert_eq!(producer.electron_pt_cut, 15.0);
        assert_eq!(producer.electron_eta_cut, 2.5);
        assert_eq!(producer.deta_map.label, "myTrackVars");
        assert_eq!(producer.h_over_e_map, InputTag::new("hltEgammaHoverE"));
    }

    #[test]
    fn misspelled_option() {
        let res = serde_json::from_str::<EgammaProducer>(r#"{"egammaPtcut": 15.0}"#);
        assert!(res.is_err());
        let res = serde_json::from_str::<ElectronProducer>(r#"{"egammaPtCut": 15.0}"#);
        assert!(res.is_err());
    }
}
