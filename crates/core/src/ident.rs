//! Identifier validation and closed identifier/type enums.
//!
//! Every entity-addressing path or query parameter must pass
//! [`parse_uuid_param`] before it reaches a repository; a malformed value is
//! a validation error naming the offending parameter, never a store call.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityId;

/// Lengths of the five hyphen-separated groups in a canonical UUID.
const UUID_GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

/// Check whether `s` matches the canonical 8-4-4-4-12 hexadecimal UUID
/// grouping, case-insensitive.
pub fn is_valid_uuid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    if groups.len() != UUID_GROUP_LENGTHS.len() {
        return false;
    }
    groups
        .iter()
        .zip(UUID_GROUP_LENGTHS)
        .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Parse a UUID-shaped request parameter, reporting the parameter name on
/// failure.
pub fn parse_uuid_param(name: &str, value: &str) -> Result<EntityId, CoreError> {
    if !is_valid_uuid(value) {
        return Err(CoreError::Validation(format!(
            "Invalid UUID in parameter '{name}': '{value}'"
        )));
    }
    value
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid UUID in parameter '{name}': '{value}'")))
}

/// The type of a typed package identifier attached to a product or component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    Cpe,
    Tei,
    Purl,
    Swid,
}

impl IdType {
    /// All accepted wire values, in declaration order.
    pub const VALID_VALUES: &'static [&'static str] = &["cpe", "tei", "purl", "swid"];

    pub fn as_str(self) -> &'static str {
        match self {
            IdType::Cpe => "cpe",
            IdType::Tei => "tei",
            IdType::Purl => "purl",
            IdType::Swid => "swid",
        }
    }

    /// Parse a wire value, for use on query parameters where serde enum
    /// rejection would bypass the standard error body.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "cpe" => Ok(IdType::Cpe),
            "tei" => Ok(IdType::Tei),
            "purl" => Ok(IdType::Purl),
            "swid" => Ok(IdType::Swid),
            other => Err(CoreError::Validation(format!(
                "Invalid idType '{other}'. Must be one of: {}",
                Self::VALID_VALUES.join(", ")
            ))),
        }
    }
}

/// A typed identifier (`{idType, idValue}`) carried by products, components
/// and releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityIdentifier {
    pub id_type: IdType,
    pub id_value: String,
}

/// Package-ecosystem type for products and components.
///
/// A closed enum validated at deserialization; stored as its lowercase wire
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Generic,
    Apk,
    Cargo,
    Cocoapods,
    Composer,
    Deb,
    Docker,
    Gem,
    Github,
    Golang,
    Maven,
    Npm,
    Nuget,
    Pypi,
    Rpm,
    Swift,
}

impl ProductType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Generic => "generic",
            ProductType::Apk => "apk",
            ProductType::Cargo => "cargo",
            ProductType::Cocoapods => "cocoapods",
            ProductType::Composer => "composer",
            ProductType::Deb => "deb",
            ProductType::Docker => "docker",
            ProductType::Gem => "gem",
            ProductType::Github => "github",
            ProductType::Golang => "golang",
            ProductType::Maven => "maven",
            ProductType::Npm => "npm",
            ProductType::Nuget => "nuget",
            ProductType::Pypi => "pypi",
            ProductType::Rpm => "rpm",
            ProductType::Swift => "swift",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn valid_uuid_canonical_grouping() {
        assert!(is_valid_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(is_valid_uuid("00000000-0000-0000-0000-000000000000"));
        // Case-insensitive.
        assert!(is_valid_uuid("123E4567-E89B-12D3-A456-426614174000"));
    }

    #[test]
    fn invalid_uuid_wrong_length() {
        assert!(!is_valid_uuid("123e4567-e89b-12d3-a456-42661417400"));
        assert!(!is_valid_uuid("123e4567-e89b-12d3-a456-4266141740000"));
        assert!(!is_valid_uuid(""));
    }

    #[test]
    fn invalid_uuid_missing_hyphens() {
        assert!(!is_valid_uuid("123e4567e89b12d3a456426614174000"));
        assert!(!is_valid_uuid("123e4567-e89b-12d3-a456426614174000"));
    }

    #[test]
    fn invalid_uuid_non_hex() {
        assert!(!is_valid_uuid("123e4567-e89b-12d3-a456-42661417400g"));
        assert!(!is_valid_uuid("zzze4567-e89b-12d3-a456-426614174000"));
    }

    #[test]
    fn parse_uuid_param_names_the_parameter() {
        let err = parse_uuid_param("uuid", "not-a-uuid").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("'uuid'"));
    }

    #[test]
    fn id_type_parse_rejects_unknown() {
        assert_eq!(IdType::parse("purl").unwrap(), IdType::Purl);
        assert_matches!(IdType::parse("gtin"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn product_type_defaults_to_generic() {
        assert_eq!(ProductType::default(), ProductType::Generic);
        assert_eq!(ProductType::default().as_str(), "generic");
    }

    #[test]
    fn entity_identifier_wire_shape() {
        let ident = EntityIdentifier {
            id_type: IdType::Purl,
            id_value: "pkg:cargo/libfoo@1.0.0".to_string(),
        };
        let json = serde_json::to_value(&ident).unwrap();
        assert_eq!(json["idType"], "purl");
        assert_eq!(json["idValue"], "pkg:cargo/libfoo@1.0.0");
    }
}
