//! Core identifier types
//!
//! Thin newtypes over the opaque strings the ledger hands out, so that a
//! party can never be confused with a piece of text or a contract id.

use crate::proto;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names a ledger-defined type (template, record, variant or enum)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    /// Package containing the type
    pub package_id: String,
    /// Dot-separated module name
    pub module_name: String,
    /// Dot-separated entity name
    pub entity_name: String,
}

impl Identifier {
    /// Create new identifier
    pub fn new(
        package_id: impl Into<String>,
        module_name: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            module_name: module_name.into(),
            entity_name: entity_name.into(),
        }
    }

    /// `Module:Entity`, without the package
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.module_name, self.entity_name)
    }

    /// Wire form
    pub fn to_proto(&self) -> proto::Identifier {
        proto::Identifier {
            package_id: self.package_id.clone(),
            module_name: self.module_name.clone(),
            entity_name: self.entity_name.clone(),
        }
    }

    /// From wire form
    pub fn from_proto(id: &proto::Identifier) -> Self {
        Self {
            package_id: id.package_id.clone(),
            module_name: id.module_name.clone(),
            entity_name: id.entity_name.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.package_id, self.module_name, self.entity_name)
    }
}

/// Builds identifiers for the types of one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    package_id: String,
}

impl Package {
    /// Package by id; a `#name` id refers to the package by name
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
        }
    }

    /// Identifier of `module:entity` in this package
    pub fn id(&self, module_name: impl Into<String>, entity_name: impl Into<String>) -> Identifier {
        Identifier::new(self.package_id.clone(), module_name, entity_name)
    }
}

/// Ledger party identifier (`hint::fingerprint`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
    /// Create new party
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the first `:` separator, or the whole id
    pub fn base_name(&self) -> &str {
        match self.0.split_once(':') {
            Some((base, _)) => base,
            None => &self.0,
        }
    }

    /// Whether `name` is this party's full id or its base name
    pub fn matches(&self, name: &str) -> bool {
        self.0 == name || self.base_name() == name
    }

    /// Take the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Party {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Party {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque contract identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    /// Create new contract id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First and last eight characters, for log lines
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() > 16 {
            let head: String = chars[..8].iter().collect();
            let tail: String = chars[chars.len() - 8..].iter().collect();
            format!("{}...{}", head, tail)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContractId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Position in the ledger's update log
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Offset {
    /// Before the first update
    Begin,
    /// Ledger end at the time the request is served
    End,
    /// Absolute offset as reported by the ledger
    Absolute(String),
}

impl Offset {
    /// Wire form
    pub fn to_proto(&self) -> proto::ParticipantOffset {
        use proto::participant_offset::{ParticipantBoundary, Value};

        let value = match self {
            Offset::Begin => Value::Boundary(ParticipantBoundary::ParticipantBegin as i32),
            Offset::End => Value::Boundary(ParticipantBoundary::ParticipantEnd as i32),
            Offset::Absolute(offset) => Value::Absolute(offset.clone()),
        };

        proto::ParticipantOffset { value: Some(value) }
    }

    /// From wire form; an unset offset is the ledger begin
    pub fn from_proto(offset: &proto::ParticipantOffset) -> crate::Result<Self> {
        use proto::participant_offset::{ParticipantBoundary, Value};

        match &offset.value {
            None => Ok(Offset::Begin),
            Some(Value::Absolute(abs)) if abs.is_empty() => Ok(Offset::Begin),
            Some(Value::Absolute(abs)) => Ok(Offset::Absolute(abs.clone())),
            Some(Value::Boundary(b)) => match ParticipantBoundary::try_from(*b) {
                Ok(ParticipantBoundary::ParticipantBegin) => Ok(Offset::Begin),
                Ok(ParticipantBoundary::ParticipantEnd) => Ok(Offset::End),
                Err(_) => Err(crate::Error::decode_failure(
                    offset,
                    Some("unknown participant boundary"),
                )),
            },
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Begin => write!(f, "BEGIN"),
            Offset::End => write!(f, "END"),
            Offset::Absolute(offset) => write!(f, "{}", offset),
        }
    }
}

/// Party as known to the participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDetails {
    /// Party identifier
    pub party: Party,
    /// Hosted by this participant
    pub is_local: bool,
}

impl PartyDetails {
    /// From wire form
    pub fn from_proto(details: &proto::PartyDetails) -> Self {
        Self {
            party: Party::new(details.party.clone()),
            is_local: details.is_local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_base_name() {
        let party = Party::new("alice::1220abcd");
        assert_eq!(party.base_name(), "alice");
        assert!(party.matches("alice"));
        assert!(party.matches("alice::1220abcd"));
        assert!(!party.matches("bob"));

        let bare = Party::new("carol");
        assert_eq!(bare.base_name(), "carol");
    }

    #[test]
    fn test_contract_id_abbreviated() {
        let cid = ContractId::new("00aabbccddeeff00112233445566778899");
        assert_eq!(cid.abbreviated(), "00aabbcc...66778899");
        assert_eq!(ContractId::new("short").abbreviated(), "short");
    }

    #[test]
    fn test_offset_round_trip() {
        for offset in [Offset::Begin, Offset::End, Offset::Absolute("0000000a".into())] {
            assert_eq!(Offset::from_proto(&offset.to_proto()).unwrap(), offset);
        }
    }

    #[test]
    fn test_identifier_display() {
        let id = Identifier::new("pkg", "Main", "Asset");
        assert_eq!(id.to_string(), "pkg:Main:Asset");
        assert_eq!(id.qualified_name(), "Main:Asset");
        assert_eq!(Package::new("pkg").id("Main", "Asset"), id);
    }
}
