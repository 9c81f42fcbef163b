//! Boundary normalization for loosely-typed UI input.
//!
//! Bonus flags arrive from the UI layer either as JSON booleans or as the
//! strings `"true"`/`"false"`. They are normalized into strict booleans
//! here; the engine crates never see the ambiguity.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use steward::BonusSet;

/// A boolean that also accepts its string spellings on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LooseBool(pub bool);

impl LooseBool {
    pub fn as_bool(self) -> bool {
        self.0
    }
}

impl From<bool> for LooseBool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl Serialize for LooseBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for LooseBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LooseBoolVisitor;

        impl Visitor<'_> for LooseBoolVisitor {
            type Value = LooseBool;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or the strings \"true\"/\"false\"")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(LooseBool(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                match value {
                    v if v.eq_ignore_ascii_case("true") => Ok(LooseBool(true)),
                    v if v.eq_ignore_ascii_case("false") => Ok(LooseBool(false)),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(LooseBoolVisitor)
    }
}

/// Bonus fields as they arrive over the wire. Every field is optional;
/// missing fields normalize to "did not happen".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusFields {
    pub positions_gained_at_start: i32,
    pub clean_overtakes: u32,
    pub net_positions_lost: u32,
    pub fastest_lap: LooseBool,
    pub caused_vsc: LooseBool,
    pub caused_sc: LooseBool,
    pub caused_red_flag: LooseBool,
    pub dnf_driver_error: LooseBool,
    pub dnf_no_fault: LooseBool,
}

impl BonusFields {
    pub fn normalized(&self) -> BonusSet {
        BonusSet {
            positions_gained_at_start: self.positions_gained_at_start,
            clean_overtakes: self.clean_overtakes,
            net_positions_lost: self.net_positions_lost,
            fastest_lap: self.fastest_lap.as_bool(),
            caused_vsc: self.caused_vsc.as_bool(),
            caused_sc: self.caused_sc.as_bool(),
            caused_red_flag: self.caused_red_flag.as_bool(),
            dnf_driver_error: self.dnf_driver_error.as_bool(),
            dnf_no_fault: self.dnf_no_fault.as_bool(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_booleans_and_their_string_spellings() {
        let fields: BonusFields = serde_json::from_str(
            r#"{"fastest_lap": "true", "caused_vsc": false, "dnf_no_fault": "False"}"#,
        )
        .unwrap();
        let bonuses = fields.normalized();
        assert!(bonuses.fastest_lap);
        assert!(!bonuses.caused_vsc);
        assert!(!bonuses.dnf_no_fault);
    }

    #[test]
    fn rejects_other_strings() {
        let result: Result<BonusFields, _> = serde_json::from_str(r#"{"fastest_lap": "yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_fields_default_to_no_event() {
        let fields: BonusFields = serde_json::from_str("{}").unwrap();
        assert_eq!(fields.normalized(), BonusSet::default());
    }
}
