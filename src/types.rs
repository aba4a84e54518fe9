use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server response envelope wrapping every payload.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub status: ResultStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultStatus {
    Ok,
    Warn,
    Error,
}

/// Registration request for a VCF file already present on the server side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRegistration {
    pub reference_id: u64,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Registered VCF file, as returned by registration and file listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VcfFile {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub reference_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// INFO/FORMAT field metadata of a VCF file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    #[serde(default)]
    pub info_items: Vec<InfoItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoItem {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of a variant-detail lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationQuery {
    pub id: u64,
    pub chromosome_id: u64,
    pub position: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
}

/// A single variant with its details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    #[serde(default)]
    pub start_index: Option<u64>,
    #[serde(default)]
    pub end_index: Option<u64>,
    #[serde(default)]
    pub reference_allele: Option<String>,
    #[serde(default)]
    pub alternative_alleles: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a track-block load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackQuery {
    pub id: u64,
    pub chromosome_id: u64,
    pub start_index: u64,
    pub end_index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_factor: Option<f64>,
}

/// One block of a loaded VCF track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationBlock {
    #[serde(default)]
    pub start_index: Option<u64>,
    #[serde(default)]
    pub end_index: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Loaded VCF track keeping the difference between a missing and an empty block list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VcfTrack {
    #[serde(default)]
    pub blocks: Option<Vec<VariationBlock>>,
}
