use particle_id::ParticleID;
use serde::{Deserialize, Serialize};

/// Particle-flow candidate information
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct ScoutingParticle {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub m: f32,
    pub pdg_id: i32,
}

impl ScoutingParticle {
    pub fn new(pt: f32, eta: f32, phi: f32, m: f32, pdg_id: i32) -> Self {
        Self {
            pt,
            eta,
            phi,
            m,
            pdg_id,
        }
    }

    pub fn particle_id(&self) -> ParticleID {
        ParticleID::new(self.pdg_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_type() {
        let pion = ScoutingParticle::new(3.2, 0.4, -1.1, 0.14, -211);
        assert_eq!(pion.particle_id().id(), -211);
        assert!(pion.particle_id().is_anti_particle());
    }

    #[test]
    fn field_order_is_stable() {
        let json = serde_json::to_string(&ScoutingParticle::new(1.5, 0.5, 0.25, 0., 13)).unwrap();
        assert_eq!(json, r#"{"pt":1.5,"eta":0.5,"phi":0.25,"m":0.0,"pdg_id":13}"#);
    }
}
