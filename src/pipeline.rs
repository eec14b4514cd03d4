use std::collections::BTreeMap;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::producers::Producer;
use crate::products::Products;

/// Products of all successful producers for one event, keyed by module label
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct EventOutput {
    pub id: u64,
    pub products: BTreeMap<String, Products>,
}

/// Producers run in order on each event
#[derive(Default)]
pub struct Pipeline {
    producers: Vec<Box<dyn Producer>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<P: Producer + 'static>(&mut self, producer: P) {
        self.producers.push(Box::new(producer))
    }

    pub fn with<P: Producer + 'static>(mut self, producer: P) -> Self {
        self.push(producer);
        self
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Run all producers on a single event
    ///
    /// A failing producer stores nothing for this event. The other
    /// producers are unaffected.
    pub fn run(&self, event: &Event) -> EventOutput {
        let mut output = EventOutput {
            id: event.id,
            ..Default::default()
        };
        for producer in &self.producers {
            let label = producer.label();
            match producer.produce(event) {
                Ok(products) => {
                    for p in &products {
                        debug!(
                            "event {}: {label}:{} {} ({})",
                            event.id,
                            p.label,
                            p.product,
                            p.product.len()
                        );
                    }
                    output.products.insert(label.to_owned(), products);
                }
                Err(err) => error!("event {}: {label}: {err}", event.id),
            }
        }
        output
    }

    pub fn run_all(&self, events: &[Event]) -> Vec<EventOutput> {
        events.iter().map(|event| self.run(event)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::ScoutingCaloJet;
    use crate::input_tag::InputTag;
    use crate::producers::{CaloProducer, MuonProducer};
    use crate::reco::{BeamSpot, CaloJet};

    fn event(id: u64, pt: f64) -> Event {
        Event::new(id)
            .with(
                "hltAK4CaloJets",
                vec![CaloJet {
                    pt,
                    ..Default::default()
                }],
            )
            .with("hltOnlineBeamSpot", BeamSpot::default())
    }

    fn pipeline() -> Pipeline {
        Pipeline::new()
            .with(MuonProducer::default())
            .with(CaloProducer {
                do_vertices: false,
                do_met: false,
                do_rho: false,
                ..Default::default()
            })
    }

    #[test]
    fn failing_producer_is_isolated() {
        let pipeline = pipeline();
        assert_eq!(pipeline.len(), 2);

        let output = pipeline.run(&event(7, 50.));
        assert_eq!(output.id, 7);
        assert!(!output.products.contains_key("scoutingMuonProducer"));

        let calo = &output.products["scoutingCaloJetsProducer"];
        let jets: &Vec<ScoutingCaloJet> = calo.get("scoutingCaloJets").unwrap();
        assert_eq!(jets.len(), 1);
    }

    #[test]
    fn events_are_independent() {
        let mut events = vec![event(1, 50.), event(2, 10.), event(3, 30.)];
        events[1]
            .collections
            .remove(&InputTag::new("hltOnlineBeamSpot"));

        let outputs = pipeline().run_all(&events);
        let ids: Vec<_> = outputs.iter().map(|o| o.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert!(outputs[1].products.is_empty());

        let n_jets: Vec<_> = [&outputs[0], &outputs[2]]
            .iter()
            .map(|o| {
                o.products["scoutingCaloJetsProducer"]
                    .get::<Vec<ScoutingCaloJet>>("scoutingCaloJets")
                    .unwrap()
                    .len()
            })
            .collect();
        assert_eq!(n_jets, [1, 1]);
    }

    #[test]
    fn empty_pipeline() {
        let output = Pipeline::new().run(&event(4, 50.));
        assert_eq!(output.id, 4);
        assert!(output.products.is_empty());
    }
}
