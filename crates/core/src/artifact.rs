//! Artifact and update-reason value types carried by collections.
//!
//! These are embedded structures: the DB layer stores them as JSONB and this
//! module is their one schema. Type-like fields are closed enums, validated
//! at deserialization.

use serde::{Deserialize, Serialize};

/// Kind of transparency artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactType {
    Bom,
    Vex,
    Attestation,
    Certification,
    License,
    ReleaseNotes,
    Other,
}

/// Checksum algorithms accepted on artifact digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

/// A digest over an artifact's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactChecksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

/// A single artifact entry in a collection's ordered artifact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<ArtifactType>,
    #[serde(default)]
    pub download_urls: Vec<String>,
    #[serde(default)]
    pub checksums: Vec<ArtifactChecksum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Why a collection was created or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateReasonType {
    InitialRelease,
    VexUpdated,
    ArtifactUpdated,
    ArtifactAdded,
    ArtifactRemoved,
}

/// The `updateReason` value carried by every collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReason {
    #[serde(rename = "type")]
    pub reason_type: UpdateReasonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
