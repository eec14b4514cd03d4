use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::{Error, Result};
use crate::input_tag::InputTag;
use crate::reco::{
    BeamSpot, CaloJet, ChargedCandidate, EcalCandidate, GsfTrack, JetTag, Met,
    PfCandidate, PfJet, Track, ValueMap, Vertex,
};

/// Upstream data available to the producers for a single event
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Event {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub collections: BTreeMap<InputTag, Collection>,
}

/// Typed view into a [Collection]
pub trait FromCollection: Sized {
    /// Name of the collection type, for error messages
    const KIND: &'static str;

    fn from_collection(collection: &Collection) -> Option<&Self>;
}

macro_rules! collections {
    ($($variant:ident($ty:ty) => $kind:literal),* $(,)?) => {
        /// One upstream collection
        #[derive(Display, Clone, PartialEq, Debug, Deserialize, Serialize)]
        #[serde(tag = "type", content = "data", rename_all = "snake_case")]
        pub enum Collection {
            $(
                #[strum(to_string = $kind)]
                $variant($ty),
            )*
        }

        $(
            impl FromCollection for $ty {
                const KIND: &'static str = $kind;

                fn from_collection(collection: &Collection) -> Option<&Self> {
                    match collection {
                        Collection::$variant(c) => Some(c),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Collection {
                fn from(c: $ty) -> Self {
                    Collection::$variant(c)
                }
            }
        )*
    };
}

collections!(
    PfJets(Vec<PfJet>) => "PF jets",
    PfCandidates(Vec<PfCandidate>) => "PF candidates",
    CaloJets(Vec<CaloJet>) => "calo jets",
    JetTags(Vec<JetTag>) => "jet tags",
    Vertices(Vec<Vertex>) => "vertices",
    BeamSpot(BeamSpot) => "beam spot",
    Mets(Vec<Met>) => "MET",
    Tracks(Vec<Track>) => "tracks",
    ChargedCandidates(Vec<ChargedCandidate>) => "charged candidates",
    EcalCandidates(Vec<EcalCandidate>) => "ECAL candidates",
    GsfTracks(Vec<GsfTrack>) => "GSF tracks",
    ValueMap(ValueMap) => "value map",
    Double(f64) => "double",
);

impl Event {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            collections: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, tag: impl Into<InputTag>, collection: impl Into<Collection>) {
        self.collections.insert(tag.into(), collection.into());
    }

    pub fn with(mut self, tag: impl Into<InputTag>, collection: impl Into<Collection>) -> Self {
        self.insert(tag, collection);
        self
    }

    /// Look up a collection of the given type
    ///
    /// A collection that is present under the tag but has a different type
    /// is just as unusable as a missing one.
    pub fn get<T: FromCollection>(&self, tag: &InputTag) -> Result<&T> {
        let Some(collection) = self.collections.get(tag) else {
            return Err(Error::missing(tag, T::KIND));
        };
        T::from_collection(collection).ok_or_else(|| {
            debug!("{tag} holds {collection}, not {}", T::KIND);
            Error::missing(tag, T::KIND)
        })
    }

    /// Look up a collection only if `enabled`
    pub fn get_if<T: FromCollection>(&self, enabled: bool, tag: &InputTag) -> Result<Option<&T>> {
        if enabled {
            self.get(tag).map(Some)
        } else {
            Ok(None)
        }
    }
}
