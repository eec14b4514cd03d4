use num_traits::{Float, FloatConst};
use serde::{Deserialize, Serialize};

/// Anything with a direction in the (η, φ) plane
pub trait Direction {
    fn eta(&self) -> f64;
    fn phi(&self) -> f64;
}

/// Anything with a direction and a transverse momentum
pub trait Kinematics: Direction {
    fn pt(&self) -> f64;
}

/// Difference in azimuthal angle, wrapped into [-π, π]
pub fn delta_phi<T: Float + FloatConst>(phi1: T, phi2: T) -> T {
    let two_pi = T::PI() + T::PI();
    let mut dphi = phi1 - phi2;
    while dphi > T::PI() {
        dphi = dphi - two_pi;
    }
    while dphi < -T::PI() {
        dphi = dphi + two_pi;
    }
    dphi
}

/// Angular distance ΔR with the azimuthal difference wrapped around
pub fn delta_r<A: Direction + ?Sized, B: Direction + ?Sized>(a: &A, b: &B) -> f64 {
    let deta = a.eta() - b.eta();
    let dphi = delta_phi(a.phi(), b.phi());
    (deta * deta + dphi * dphi).sqrt()
}

/// Angular distance computed from the plain differences in η and φ
///
/// No azimuthal wrapping is applied. This is the distance used when
/// matching jet constituents, where both sides come from the same
/// reconstruction and live in the same φ range.
pub fn plain_delta_r<A: Direction + ?Sized, B: Direction + ?Sized>(a: &A, b: &B) -> f64 {
    let deta = a.eta() - b.eta();
    let dphi = a.phi() - b.phi();
    (deta * deta + dphi * dphi).sqrt()
}

/// Minimum transverse momentum and maximum absolute pseudorapidity
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct KinematicCut {
    pub min_pt: f64,
    pub max_abs_eta: f64,
}

impl Default for KinematicCut {
    fn default() -> Self {
        Self {
            min_pt: 0.,
            max_abs_eta: f64::INFINITY,
        }
    }
}

impl KinematicCut {
    pub fn new(min_pt: f64, max_abs_eta: f64) -> Self {
        Self { min_pt, max_abs_eta }
    }

    /// Objects exactly at either threshold are kept
    pub fn accepts<K: Kinematics + ?Sized>(&self, obj: &K) -> bool {
        !(obj.pt() < self.min_pt || obj.eta().abs() > self.max_abs_eta)
    }

    /// Objects passing the cut, in their original order
    pub fn select<'a, K: Kinematics + 'a>(
        &'a self,
        objects: &'a [K],
    ) -> impl Iterator<Item = &'a K> + 'a {
        objects.iter().filter(move |obj| self.accepts(*obj))
    }
}

/// Strict transverse momentum floor, as used for particle-flow candidates
pub fn above_pt_floor<K: Kinematics + ?Sized>(obj: &K, floor: f64) -> bool {
    obj.pt() > floor
}
