//! Per-event producers of scouting records
//!
//! A producer is its own configuration: it holds the tags of the
//! collections it reads, the kinematic thresholds and the feature switches.
//! All required collections are fetched before any output is built, so a
//! failing producer never leaves partial output behind.
mod calo;
mod egamma;
mod muon;
mod pf;

pub use calo::CaloProducer;
pub use egamma::{EgammaProducer, ElectronProducer};
pub use muon::MuonProducer;
pub use pf::PfProducer;

use crate::error::{Error, Result};
use crate::event::{Event, FromCollection};
use crate::input_tag::InputTag;
use crate::products::Products;
use crate::reco::ValueMap;

pub trait Producer {
    /// Module label under which the products are stored
    fn label(&self) -> &str;

    fn produce(&self, event: &Event) -> Result<Products>;
}

/// A side-table together with the tag it was read from
#[derive(Copy, Clone, Debug)]
pub(crate) struct SideTable<'a> {
    tag: &'a InputTag,
    values: &'a ValueMap,
}

impl<'a> SideTable<'a> {
    pub(crate) fn get(event: &'a Event, tag: &'a InputTag) -> Result<Self> {
        Ok(Self {
            tag,
            values: event.get(tag)?,
        })
    }

    /// Value for the candidate at `idx`
    ///
    /// A table that does not cover a selected candidate cannot be used for
    /// this event, just like a missing one.
    pub(crate) fn value(&self, idx: usize) -> Result<f32> {
        self.values
            .get(idx)
            .map(|v| v as f32)
            .ok_or_else(|| Error::missing(self.tag, ValueMap::KIND))
    }
}
