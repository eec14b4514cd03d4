//! Scouting records written out for every event
//!
//! The content of these records must only ever change in backwards
//! compatible ways: field order and field types are part of the persisted
//! layout. Cross references between records are positional indices into a
//! sibling collection, never pointers.
mod beam_spot;
mod calo_jet;
mod electron;
mod muon;
mod particle;
mod pf_jet;
mod vertex;

pub use beam_spot::ScoutingBeamSpot;
pub use calo_jet::ScoutingCaloJet;
pub use electron::{ScoutingElectron, ScoutingPhoton};
pub use muon::ScoutingMuon;
pub use particle::ScoutingParticle;
pub use pf_jet::{ScoutingPFJet, NO_MATCH};
pub use vertex::ScoutingVertex;

/// Implement the kinematic traits for a record with `f32` `pt`, `eta`, `phi`
macro_rules! impl_record_kinematics {
    ($($record:ty),* $(,)?) => {
        $(
            impl $crate::kinematics::Direction for $record {
                fn eta(&self) -> f64 {
                    self.eta.into()
                }

                fn phi(&self) -> f64 {
                    self.phi.into()
                }
            }

            impl $crate::kinematics::Kinematics for $record {
                fn pt(&self) -> f64 {
                    self.pt.into()
                }
            }
        )*
    };
}

impl_record_kinematics!(
    ScoutingParticle,
    ScoutingPFJet,
    ScoutingCaloJet,
    ScoutingMuon,
    ScoutingElectron,
    ScoutingPhoton,
);
