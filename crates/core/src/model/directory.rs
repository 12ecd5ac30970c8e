use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::MemberId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DirectoryError {
    #[error("{member} has already chosen the name {current:?}")]
    AlreadyClaimed { member: MemberId, current: String },

    #[error("display name must not be empty")]
    EmptyDisplayName,
}

/// Where a member stands in the naming flow.
///
/// `Named` is terminal; there is no transition back to `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberIdentity {
    Anonymous(MemberId),
    Named(String),
}

impl MemberIdentity {
    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(self, MemberIdentity::Named(_))
    }
}

/// Maps opaque member identifiers to self-chosen display names.
///
/// An empty string marks a seeded but unclaimed slot. Once claimed, a
/// member's display name is immutable through normal flow and becomes the
/// key under which that member's journal is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory(BTreeMap<MemberId, String>);

impl Directory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The member's display name, if one has been claimed.
    #[must_use]
    pub fn display_name(&self, member: MemberId) -> Option<&str> {
        self.0
            .get(&member)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// Resolves the member's place in the naming flow.
    #[must_use]
    pub fn resolve(&self, member: MemberId) -> MemberIdentity {
        match self.display_name(member) {
            Some(name) => MemberIdentity::Named(name.to_string()),
            None => MemberIdentity::Anonymous(member),
        }
    }

    /// Records the member's chosen display name.
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::AlreadyClaimed` if the member already has a
    /// display name; the existing mapping is left unchanged. Returns
    /// `DirectoryError::EmptyDisplayName` if the chosen name trims to empty.
    pub fn claim(&mut self, member: MemberId, chosen: &str) -> Result<String, DirectoryError> {
        if let Some(current) = self.display_name(member) {
            return Err(DirectoryError::AlreadyClaimed {
                member,
                current: current.to_string(),
            });
        }
        let name = chosen.trim();
        if name.is_empty() {
            return Err(DirectoryError::EmptyDisplayName);
        }
        self.0.insert(member, name.to_string());
        Ok(name.to_string())
    }

    /// Registers an unclaimed slot for the member if absent.
    pub fn ensure_member(&mut self, member: MemberId) {
        self.0.entry(member).or_default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemberId, Option<&str>)> {
        self.0.keys().map(|member| (*member, self.display_name(*member)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_records_trimmed_name() {
        let mut directory = Directory::new();
        let name = directory.claim(MemberId::new(3), "  Alice ").unwrap();
        assert_eq!(name, "Alice");
        assert_eq!(directory.display_name(MemberId::new(3)), Some("Alice"));
        assert!(directory.resolve(MemberId::new(3)).is_named());
    }

    #[test]
    fn reclaiming_fails_and_keeps_original_mapping() {
        let mut directory = Directory::new();
        directory.claim(MemberId::new(3), "Alice").unwrap();

        let err = directory.claim(MemberId::new(3), "Bob").unwrap_err();
        assert_eq!(
            err,
            DirectoryError::AlreadyClaimed {
                member: MemberId::new(3),
                current: "Alice".to_string(),
            }
        );
        assert_eq!(directory.display_name(MemberId::new(3)), Some("Alice"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut directory = Directory::new();
        let err = directory.claim(MemberId::new(1), "   ").unwrap_err();
        assert_eq!(err, DirectoryError::EmptyDisplayName);
        assert!(!directory.resolve(MemberId::new(1)).is_named());
    }

    #[test]
    fn seeded_slot_is_still_anonymous() {
        let mut directory = Directory::new();
        directory.ensure_member(MemberId::new(2));
        assert_eq!(directory.display_name(MemberId::new(2)), None);
        assert_eq!(
            directory.resolve(MemberId::new(2)),
            MemberIdentity::Anonymous(MemberId::new(2))
        );
        // a seeded slot can still be claimed
        directory.claim(MemberId::new(2), "Bob").unwrap();
        assert!(directory.resolve(MemberId::new(2)).is_named());
    }

    #[test]
    fn directory_document_roundtrip() {
        let mut directory = Directory::new();
        directory.ensure_member(MemberId::new(2));
        directory.claim(MemberId::new(1), "Alice").unwrap();

        let json = serde_json::to_string(&directory).unwrap();
        assert_eq!(json, r#"{"Member 1":"Alice","Member 2":""}"#);

        let back: Directory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, directory);
    }
}
