use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of an upstream collection: `label[:instance[:process]]`
#[derive(
    Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deserialize, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct InputTag {
    pub label: String,
    pub instance: String,
    pub process: String,
}

impl InputTag {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_instance(
        label: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            instance: instance.into(),
            ..Default::default()
        }
    }
}

impl Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if !self.instance.is_empty() || !self.process.is_empty() {
            write!(f, ":{}", self.instance)?;
        }
        if !self.process.is_empty() {
            write!(f, ":{}", self.process)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputTagError {
    #[error("Input tag has an empty module label: {0:?}")]
    EmptyLabel(String),
    #[error("Input tag has too many components: {0:?}")]
    TooManyComponents(String),
}

impl FromStr for InputTag {
    type Err = InputTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let label = parts.next().unwrap_or_default();
        if label.is_empty() {
            return Err(InputTagError::EmptyLabel(s.to_owned()));
        }
        let instance = parts.next().unwrap_or_default();
        let process = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(InputTagError::TooManyComponents(s.to_owned()));
        }
        Ok(Self {
            label: label.to_owned(),
            instance: instance.to_owned(),
            process: process.to_owned(),
        })
    }
}

impl TryFrom<String> for InputTag {
    type Error = InputTagError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<InputTag> for String {
    fn from(tag: InputTag) -> Self {
        tag.to_string()
    }
}

impl From<&str> for InputTag {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| InputTag::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let tag: InputTag = "hltEgammaGsfTrackVars:Deta".parse().unwrap();
        assert_eq!(tag.label, "hltEgammaGsfTrackVars");
        assert_eq!(tag.instance, "Deta");
        assert!(tag.process.is_empty());
        assert_eq!(tag.to_string(), "hltEgammaGsfTrackVars:Deta");

        let tag: InputTag = "hltParticleFlow".parse().unwrap();
        assert_eq!(tag, InputTag::new("hltParticleFlow"));
        assert_eq!(tag.to_string(), "hltParticleFlow");

        let tag: InputTag = "TriggerResults::HLT".parse().unwrap();
        assert_eq!(tag.instance, "");
        assert_eq!(tag.process, "HLT");
        assert_eq!(tag.to_string(), "TriggerResults::HLT");
    }

    #[test]
    fn reject_malformed() {
        assert_eq!(
            "".parse::<InputTag>(),
            Err(InputTagError::EmptyLabel(String::new()))
        );
        assert!(":instance".parse::<InputTag>().is_err());
        assert!("a:b:c:d".parse::<InputTag>().is_err());
    }

    #[test]
    fn serde_as_string() {
        let tag = InputTag::with_instance("hltMuonTkRelIsolationCut0p09Map", "combinedRelativeIsoDeposits");
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, "\"hltMuonTkRelIsolationCut0p09Map:combinedRelativeIsoDeposits\"");
        let back: InputTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tag);
    }
}
