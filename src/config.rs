use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::pipeline::Pipeline;
use crate::producers::{
    CaloProducer, EgammaProducer, ElectronProducer, MuonProducer, PfProducer, Producer,
};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub producers: Vec<ProducerConfig>,
}

/// Configuration of a single producer, tagged by its `type`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProducerConfig {
    Pf(PfProducer),
    Calo(CaloProducer),
    Muon(MuonProducer),
    Electron(ElectronProducer),
    Egamma(EgammaProducer),
}

impl ProducerConfig {
    pub fn label(&self) -> &str {
        use ProducerConfig::*;
        match self {
            Pf(p) => p.label(),
            Calo(p) => p.label(),
            Muon(p) => p.label(),
            Electron(p) => p.label(),
            Egamma(p) => p.label(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open configuration {:?}", path))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read configuration {:?}", path))?;
        debug!("{} producers in {:?}", config.producers.len(), path);
        Ok(config)
    }

    /// Build the pipeline, rejecting duplicate module labels
    pub fn into_pipeline(self) -> Result<Pipeline> {
        let mut labels = BTreeSet::new();
        let mut pipeline = Pipeline::new();
        for producer in self.producers {
            if !labels.insert(producer.label().to_owned()) {
                bail!("Duplicate producer label '{}'", producer.label());
            }
            match producer {
                ProducerConfig::Pf(p) => pipeline.push(p),
                ProducerConfig::Calo(p) => pipeline.push(p),
                ProducerConfig::Muon(p) => pipeline.push(p),
                ProducerConfig::Electron(p) => pipeline.push(p),
                ProducerConfig::Egamma(p) => pipeline.push(p),
            }
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_tag::InputTag;

    #[test]
    fn producers_from_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "producers": [
                    {"type": "pf", "doCandidates": false, "pfJetPtCut": 30.0},
                    {"type": "calo", "label": "calo", "caloJetCollection": "hltAK8CaloJets"},
                    {"type": "muon"},
                    {"type": "egamma", "egammaEtaCut": 2.1}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.producers.len(), 4);

        let ProducerConfig::Pf(pf) = &config.producers[0] else {
            panic!("expected PF producer, got {:?}", config.producers[0]);
        };
        assert!(!pf.do_candidates);
        assert!(pf.do_met);
        assert_eq!(pf.pf_jet_pt_cut, 30.0);

        let ProducerConfig::Calo(calo) = &config.producers[1] else {
            panic!("expected calo producer, got {:?}", config.producers[1]);
        };
        assert_eq!(calo.label, "calo");
        assert_eq!(calo.calo_jet_collection, InputTag::new("hltAK8CaloJets"));

        let labels: Vec<_> = config.producers.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            [
                "scoutingPFJetsProducer",
                "calo",
                "scoutingMuonProducer",
                "hltScoutingEgammaProducer"
            ]
        );

        assert_eq!(config.into_pipeline().unwrap().len(), 4);
    }

    #[test]
    fn unknown_producer_type() {
        let config = serde_json::from_str::<Config>(r#"{"producers": [{"type": "tau"}]}"#);
        assert!(config.is_err());
    }

    #[test]
    fn misspelled_options() {
        for producer in [
            r#"{"type": "pf", "pfJetPtcut": 50.0}"#,
            r#"{"type": "pf", "doMETT": false}"#,
            r#"{"type": "calo", "caloJetPtCut": 30.0, "doRHO": false}"#,
            r#"{"type": "muon", "muonEtacut": 2.1}"#,
            r#"{"type": "electron", "EgammaCandidate": "hltEgammaCandidates"}"#,
        ] {
            let json = format!(r#"{{"producers": [{producer}]}}"#);
            let config = serde_json::from_str::<Config>(&json);
            assert!(config.is_err(), "accepted {producer}");
        }
    }

    #[test]
    fn duplicate_labels() {
        let config = Config {
            producers: vec![
                ProducerConfig::Muon(Default::default()),
                ProducerConfig::Muon(Default::default()),
            ],
        };
        assert!(config.into_pipeline().is_err());
    }
}
