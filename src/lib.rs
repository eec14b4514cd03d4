//! Compact *scouting* records for trigger-level physics objects and the
//! per-event producers that fill them.
//!
//! Producers read upstream reconstructed collections from an [Event],
//! apply kinematic selections, associate jet constituents and b-tags, and
//! emit flat records such as [ScoutingPFJet] or [ScoutingMuon]. A
//! [Pipeline] runs a list of configured producers over many events.
//!
//! # How to use
//!
//! ```text
//! scouting --config producers.json events.json
//! ```
//!
//! The configuration lists the producers by `type` together with their
//! options, for example
//!
//! ```json
//! {"producers": [{"type": "pf", "pfJetPtCut": 30.0}, {"type": "muon"}]}
//! ```
#![warn(clippy::all, rust_2018_idioms)]

pub mod association;
pub mod config;
pub mod error;
pub mod event;
pub mod formats;
pub mod import;
pub mod input_tag;
pub mod kinematics;
pub mod pipeline;
pub mod producers;
pub mod products;
pub mod reco;

pub use error::{Error, Result};
pub use event::Event;
pub use formats::*;
pub use input_tag::InputTag;
pub use pipeline::{EventOutput, Pipeline};
pub use producers::Producer;
