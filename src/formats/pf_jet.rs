use serde::{Deserialize, Serialize};

/// Constituent index of a jet constituent without a matching candidate
pub const NO_MATCH: i32 = -1;

/// Particle-flow jet
///
/// The constituents are stored as indices into the scouting particle
/// collection written for the same event. Constituents that could not be
/// matched to any particle are recorded as [NO_MATCH].
#[derive(Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingPFJet {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub m: f32,
    pub jet_area: f32,
    pub charged_hadron_energy: f32,
    pub neutral_hadron_energy: f32,
    pub photon_energy: f32,
    pub electron_energy: f32,
    pub muon_energy: f32,
    pub hf_hadron_energy: f32,
    pub hf_em_energy: f32,
    pub charged_hadron_multiplicity: i32,
    pub neutral_hadron_multiplicity: i32,
    pub photon_multiplicity: i32,
    pub electron_multiplicity: i32,
    pub muon_multiplicity: i32,
    pub hf_hadron_multiplicity: i32,
    pub hf_em_multiplicity: i32,
    pub ho_energy: f32,
    /// b-tagging discriminant
    pub csv: f32,
    pub user_float: f32,
    pub constituents: Vec<i32>,
}

impl ScoutingPFJet {
    /// Constituent indices, with unmatched constituents as `None`
    pub fn constituent_indices(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.constituents
            .iter()
            .map(|&idx| usize::try_from(idx).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_maps_to_none() {
        let jet = ScoutingPFJet {
            constituents: vec![0, NO_MATCH, 3],
            ..Default::default()
        };
        let idx: Vec<_> = jet.constituent_indices().collect();
        assert_eq!(idx, [Some(0), None, Some(3)]);
    }
}
