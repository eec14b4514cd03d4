use thiserror::Error;

use crate::input_tag::InputTag;

/// Errors raised while producing scouting objects for one event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A collection the producer needs is not available in this event
    #[error("invalid collection: {tag} (expected {kind})")]
    MissingCollection {
        tag: InputTag,
        kind: &'static str,
    },
}

impl Error {
    pub fn missing(tag: &InputTag, kind: &'static str) -> Self {
        Self::MissingCollection {
            tag: tag.clone(),
            kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
