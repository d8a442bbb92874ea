//! Dispatch configuration and the versioned custom-tag reservation.
//!
//! Custom encodings (delay, raw, Panasonic raw) occupy tag values in
//! `239..=255`. Which value means what has moved between device revisions,
//! so the assignment is an explicit `TagTable` selected by revision or
//! loaded from JSON, and validated before use: every custom tag must sit in
//! the reserved range, be unique, and never shadow a standard protocol id.
//! Only the `custom` revision may move a role; `legacy` and `current` tables
//! must carry their fixed tags, plus any raw aliases.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocols::command::StandardProtocol;
use crate::protocols::command::layout::{
    DEFAULT_DELAY_TAG, DEFAULT_PANASONIC_RAW_TAG, DEFAULT_RAW_TAG, RESERVED_TAG_RANGE,
};
pub use crate::protocols::raw::IntervalWidth;

/// Gap issued after every message so consecutive protocols stay apart.
pub const DEFAULT_MESSAGE_GAP_MS: u16 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{role} tag {tag} is outside the reserved range 239..=255")]
    TagOutOfRange { role: &'static str, tag: u8 },
    #[error("tag {tag} is assigned to both {first} and {second}")]
    DuplicateTag {
        tag: u8,
        first: &'static str,
        second: &'static str,
    },
    #[error("{role} tag {tag} collides with standard protocol {protocol}")]
    CollidesWithStandard {
        role: &'static str,
        tag: u8,
        protocol: StandardProtocol,
    },
    #[error("revision {revision} fixes the {role} tag; use revision \"custom\" to reassign it")]
    RevisionMismatch {
        revision: TagRevision,
        role: &'static str,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Known custom-tag layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRevision {
    /// Raw and Panasonic raw only; no delay command.
    Legacy,
    /// Delay 239, raw 240, Panasonic raw 241.
    #[default]
    Current,
    /// User supplied assignment.
    Custom,
}

impl TagRevision {
    pub fn as_str(self) -> &'static str {
        match self {
            TagRevision::Legacy => "legacy",
            TagRevision::Current => "current",
            TagRevision::Custom => "custom",
        }
    }
}

impl std::fmt::Display for TagRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a tag byte is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Standard(StandardProtocol),
    Delay,
    Raw,
    PanasonicRaw,
    Unknown,
}

/// Assignment of custom encodings to tag values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagTable {
    pub revision: TagRevision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u8>,
    pub raw: u8,
    /// Extra values some senders use for raw.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_aliases: Vec<u8>,
    pub panasonic_raw: u8,
}

impl TagTable {
    pub fn for_revision(revision: TagRevision) -> Self {
        let delay = match revision {
            TagRevision::Legacy => None,
            TagRevision::Current | TagRevision::Custom => Some(DEFAULT_DELAY_TAG),
        };
        Self {
            revision,
            delay,
            raw: DEFAULT_RAW_TAG,
            raw_aliases: Vec::new(),
            panasonic_raw: DEFAULT_PANASONIC_RAW_TAG,
        }
    }

    fn roles(&self) -> Vec<(&'static str, u8)> {
        let mut roles = Vec::with_capacity(3 + self.raw_aliases.len());
        if let Some(delay) = self.delay {
            roles.push(("delay", delay));
        }
        roles.push(("raw", self.raw));
        roles.extend(self.raw_aliases.iter().map(|&tag| ("raw alias", tag)));
        roles.push(("panasonic_raw", self.panasonic_raw));
        roles
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_revision()?;
        let roles = self.roles();
        for (i, &(role, tag)) in roles.iter().enumerate() {
            if let Some(protocol) = StandardProtocol::from_tag(tag) {
                return Err(ConfigError::CollidesWithStandard {
                    role,
                    tag,
                    protocol,
                });
            }
            if !RESERVED_TAG_RANGE.contains(&tag) {
                return Err(ConfigError::TagOutOfRange { role, tag });
            }
            if let Some(&(first, _)) = roles[..i].iter().find(|(_, other)| *other == tag) {
                return Err(ConfigError::DuplicateTag {
                    tag,
                    first,
                    second: role,
                });
            }
        }
        Ok(())
    }

    /// A versioned table must match its revision role for role.
    fn check_revision(&self) -> Result<(), ConfigError> {
        if self.revision == TagRevision::Custom {
            return Ok(());
        }
        let fixed = Self::for_revision(self.revision);
        let role = if self.delay != fixed.delay {
            "delay"
        } else if self.raw != fixed.raw {
            "raw"
        } else if self.panasonic_raw != fixed.panasonic_raw {
            "panasonic_raw"
        } else {
            return Ok(());
        };
        Err(ConfigError::RevisionMismatch {
            revision: self.revision,
            role,
        })
    }

    pub fn classify(&self, tag: u8) -> TagClass {
        if let Some(protocol) = StandardProtocol::from_tag(tag) {
            return TagClass::Standard(protocol);
        }
        if self.delay == Some(tag) {
            TagClass::Delay
        } else if self.raw == tag || self.raw_aliases.contains(&tag) {
            TagClass::Raw
        } else if self.panasonic_raw == tag {
            TagClass::PanasonicRaw
        } else {
            TagClass::Unknown
        }
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::for_revision(TagRevision::default())
    }
}

/// Settings for one dispatcher.
///
/// # Examples
/// ```
/// use irbridge_core::{DispatchConfig, IntervalWidth};
///
/// let config = DispatchConfig::from_json_str(r#"{"interval_width": "u32"}"#)?;
/// assert_eq!(config.interval_width, IntervalWidth::U32);
/// assert_eq!(config.message_gap_ms, 100);
/// # Ok::<(), irbridge_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub tags: TagTable,
    #[serde(default)]
    pub interval_width: IntervalWidth,
    /// Delay issued after each message, in milliseconds; 0 disables it.
    #[serde(default = "default_message_gap_ms")]
    pub message_gap_ms: u16,
}

fn default_message_gap_ms() -> u16 {
    DEFAULT_MESSAGE_GAP_MS
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tags: TagTable::default(),
            interval_width: IntervalWidth::default(),
            message_gap_ms: DEFAULT_MESSAGE_GAP_MS,
        }
    }
}

impl DispatchConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DispatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tags.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revisions_validate() {
        for revision in [TagRevision::Legacy, TagRevision::Current, TagRevision::Custom] {
            TagTable::for_revision(revision).validate().unwrap();
        }
    }

    #[test]
    fn legacy_has_no_delay() {
        let table = TagTable::for_revision(TagRevision::Legacy);
        assert_eq!(table.classify(239), TagClass::Unknown);
        assert_eq!(table.classify(240), TagClass::Raw);
        assert_eq!(table.classify(241), TagClass::PanasonicRaw);
    }

    #[test]
    fn current_classifies_every_role() {
        let table = TagTable::default();
        assert_eq!(table.classify(3), TagClass::Standard(StandardProtocol::Nec));
        assert_eq!(table.classify(239), TagClass::Delay);
        assert_eq!(table.classify(240), TagClass::Raw);
        assert_eq!(table.classify(241), TagClass::PanasonicRaw);
        assert_eq!(table.classify(242), TagClass::Unknown);
        assert_eq!(table.classify(0), TagClass::Unknown);
    }

    #[test]
    fn raw_alias_classifies_as_raw() {
        let mut table = TagTable::for_revision(TagRevision::Custom);
        table.raw_aliases.push(250);
        table.validate().unwrap();
        assert_eq!(table.classify(250), TagClass::Raw);
    }

    #[test]
    fn tag_outside_reservation_rejected() {
        let mut table = TagTable::for_revision(TagRevision::Custom);
        table.raw = 200;
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TagOutOfRange {
                role: "raw",
                tag: 200
            }
        ));
    }

    #[test]
    fn duplicate_tags_rejected() {
        let mut table = TagTable::for_revision(TagRevision::Custom);
        table.panasonic_raw = table.raw;
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("assigned to both raw and panasonic_raw"));
    }

    #[test]
    fn alias_cannot_shadow_standard_protocol() {
        let mut table = TagTable::for_revision(TagRevision::Custom);
        table.raw_aliases.push(StandardProtocol::Nec.tag());
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CollidesWithStandard {
                role: "raw alias",
                tag: 3,
                protocol: StandardProtocol::Nec
            }
        ));
        assert!(err.to_string().contains("standard protocol nec"));
    }

    #[test]
    fn versioned_revision_keeps_its_tags() {
        let json = r#"{"tags": {"revision": "current", "delay": 239, "raw": 250, "panasonic_raw": 241}}"#;
        let err = DispatchConfig::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RevisionMismatch {
                revision: TagRevision::Current,
                role: "raw"
            }
        ));
        assert!(err.to_string().contains("revision current fixes the raw tag"));

        let json = r#"{"tags": {"revision": "legacy", "delay": 239, "raw": 240, "panasonic_raw": 241}}"#;
        let err = DispatchConfig::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RevisionMismatch {
                revision: TagRevision::Legacy,
                role: "delay"
            }
        ));

        let json = r#"{"tags": {"revision": "custom", "delay": 239, "raw": 250, "panasonic_raw": 241}}"#;
        let config = DispatchConfig::from_json_str(json).unwrap();
        assert_eq!(config.tags.classify(250), TagClass::Raw);
    }

    #[test]
    fn versioned_revision_accepts_raw_aliases() {
        let mut table = TagTable::for_revision(TagRevision::Legacy);
        table.raw_aliases.push(250);
        table.validate().unwrap();
        assert_eq!(table.classify(250), TagClass::Raw);
    }

    #[test]
    fn config_json_defaults_and_validation() {
        let config = DispatchConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DispatchConfig::default());

        let json = r#"{"tags": {"revision": "custom", "raw": 245, "panasonic_raw": 245}}"#;
        let err = DispatchConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTag { tag: 245, .. }));

        let err = DispatchConfig::from_json_str("{\"interval_width\": \"u8\"}").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
