//! Association of jet constituents with the scouting particle collection
//!
//! Each constituent above the transverse momentum floor is assigned the
//! index of the closest particle in (η, φ), provided that particle is closer
//! than the matching radius. The match is greedy: several constituents may
//! claim the same particle, and no attempt is made to find a one-to-one
//! assignment.
use serde::{Deserialize, Serialize};

use crate::formats::NO_MATCH;
use crate::kinematics::{above_pt_floor, plain_delta_r, Direction, Kinematics};

/// Default maximum ΔR between a constituent and its matched particle
pub const DEFAULT_MATCH_RADIUS: f64 = 0.01;

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct ConstituentMatcher {
    /// Constituents with transverse momentum at or below this are ignored
    pub pt_floor: f64,
    /// Matches must be strictly closer than this
    pub max_delta_r: f64,
}

impl Default for ConstituentMatcher {
    fn default() -> Self {
        Self {
            pt_floor: 0.,
            max_delta_r: DEFAULT_MATCH_RADIUS,
        }
    }
}

impl ConstituentMatcher {
    pub fn new(pt_floor: f64, max_delta_r: f64) -> Self {
        Self {
            pt_floor,
            max_delta_r,
        }
    }

    /// Index of the closest candidate within the matching radius
    ///
    /// Ties go to the candidate appearing first. The scan stops at the
    /// first candidate at exactly the same position.
    pub fn nearest<C, N>(&self, constituent: &C, candidates: &[N]) -> Option<usize>
    where
        C: Direction + ?Sized,
        N: Direction,
    {
        // distances are compared in the single precision of the stored records
        let mut min_dr = self.max_delta_r as f32;
        let mut best = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let dr = plain_delta_r(constituent, candidate) as f32;
            if dr < min_dr {
                min_dr = dr;
                best = Some(idx);
            }
            if min_dr == 0. {
                break;
            }
        }
        best
    }

    /// Match all constituents above the floor, preserving their order
    pub fn associate<C, N>(&self, constituents: &[C], candidates: &[N]) -> Vec<Option<usize>>
    where
        C: Kinematics,
        N: Direction,
    {
        constituents
            .iter()
            .filter(|c| above_pt_floor(*c, self.pt_floor))
            .map(|c| self.nearest(c, candidates))
            .collect()
    }

    /// Like [associate](Self::associate), in the persisted index convention
    pub fn constituent_indices<C, N>(&self, constituents: &[C], candidates: &[N]) -> Vec<i32>
    where
        C: Kinematics,
        N: Direction,
    {
        self.associate(constituents, candidates)
            .into_iter()
            .map(to_index)
            .collect()
    }
}

/// Convert an optional match into a persisted index
///
/// Persisted indices are `i32`, so the particle collection must not hold
/// more than `i32::MAX` entries. Debug builds check this; release builds
/// store such a match as [NO_MATCH].
pub fn to_index(idx: Option<usize>) -> i32 {
    let Some(idx) = idx else {
        return NO_MATCH;
    };
    let persisted = i32::try_from(idx);
    debug_assert!(persisted.is_ok(), "particle index {idx} does not fit into i32");
    persisted.unwrap_or(NO_MATCH)
}
