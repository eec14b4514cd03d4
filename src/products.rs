use serde::{Deserialize, Serialize};
use strum::Display;

use crate::formats::{
    ScoutingBeamSpot, ScoutingCaloJet, ScoutingElectron, ScoutingMuon, ScoutingPFJet,
    ScoutingParticle, ScoutingPhoton, ScoutingVertex,
};

/// Sentinel for scalar outputs whose computation was switched off
pub const PLACEHOLDER: f64 = -999.;

/// One output of a producer
#[derive(Display, Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Product {
    #[strum(to_string = "PF jets")]
    PfJets(Vec<ScoutingPFJet>),
    #[strum(to_string = "particles")]
    Particles(Vec<ScoutingParticle>),
    #[strum(to_string = "calo jets")]
    CaloJets(Vec<ScoutingCaloJet>),
    #[strum(to_string = "vertices")]
    Vertices(Vec<ScoutingVertex>),
    #[strum(to_string = "beam spot")]
    BeamSpot(ScoutingBeamSpot),
    #[strum(to_string = "muons")]
    Muons(Vec<ScoutingMuon>),
    #[strum(to_string = "electrons")]
    Electrons(Vec<ScoutingElectron>),
    #[strum(to_string = "photons")]
    Photons(Vec<ScoutingPhoton>),
    #[strum(to_string = "double")]
    Double(f64),
}

impl Product {
    /// Number of entries, one for scalar products
    pub fn len(&self) -> usize {
        use Product::*;
        match self {
            PfJets(v) => v.len(),
            Particles(v) => v.len(),
            CaloJets(v) => v.len(),
            Vertices(v) => v.len(),
            Muons(v) => v.len(),
            Electrons(v) => v.len(),
            Photons(v) => v.len(),
            BeamSpot(_) | Double(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Typed view into a [Product]
pub trait FromProduct: Sized {
    fn from_product(product: &Product) -> Option<&Self>;
}

macro_rules! impl_product {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl FromProduct for $ty {
                fn from_product(product: &Product) -> Option<&Self> {
                    match product {
                        Product::$variant(p) => Some(p),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Product {
                fn from(p: $ty) -> Self {
                    Product::$variant(p)
                }
            }
        )*
    };
}

impl_product!(
    PfJets(Vec<ScoutingPFJet>),
    Particles(Vec<ScoutingParticle>),
    CaloJets(Vec<ScoutingCaloJet>),
    Vertices(Vec<ScoutingVertex>),
    BeamSpot(ScoutingBeamSpot),
    Muons(Vec<ScoutingMuon>),
    Electrons(Vec<ScoutingElectron>),
    Photons(Vec<ScoutingPhoton>),
    Double(f64),
);

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct LabelledProduct {
    pub label: String,
    pub product: Product,
}

/// All outputs of one producer for one event, in the order they were put
///
/// Products are identified by their type together with their label, so
/// outputs of different types may share a label.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Products(Vec<LabelledProduct>);

impl Products {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, label: impl Into<String>, product: impl Into<Product>) {
        self.0.push(LabelledProduct {
            label: label.into(),
            product: product.into(),
        })
    }

    pub fn get<T: FromProduct>(&self, label: &str) -> Option<&T> {
        self.0
            .iter()
            .filter(|p| p.label == label)
            .find_map(|p| T::from_product(&p.product))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelledProduct> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Products {
    type Item = &'a LabelledProduct;
    type IntoIter = std::slice::Iter<'a, LabelledProduct>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
