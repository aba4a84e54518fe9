use crate::transport::{Transport, truthy};
use crate::types::{
    FieldInfo, TrackQuery, VariantRegistration, Variation, VariationBlock, VariationQuery, VcfFile,
    VcfTrack,
};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Client for the server's `vcf/*` endpoints.
#[derive(Clone)]
pub struct VcfDataService {
    transport: Arc<dyn Transport>,
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Decode(format!("{}: {}", path, e)))
}

impl VcfDataService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// INFO/FORMAT field metadata of a VCF file. A falsy payload yields `None`.
    pub async fn fetch_field_info(&self, vcf_file_id: u64) -> Result<Option<FieldInfo>> {
        let path = format!("vcf/{}/fieldInfo", vcf_file_id);
        self.transport
            .get(&path)
            .await?
            .map(|payload| decode(&path, payload))
            .transpose()
    }

    /// Register a VCF file (and its index) against a reference.
    pub async fn register_track(
        &self,
        registration: &VariantRegistration,
    ) -> Result<Option<VcfFile>> {
        let path = "vcf/register";
        self.transport
            .post(path, serde_json::to_value(registration)?)
            .await?
            .map(|payload| decode(path, payload))
            .transpose()
    }

    /// Best-effort variant lookup. Any failure resolves to `None`.
    pub async fn fetch_variant_info(&self, query: &VariationQuery) -> Option<Variation> {
        let path = "vcf/variation/load";
        let body = match serde_json::to_value(query) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("failed to encode variation query: {}", e);
                return None;
            }
        };

        match self.transport.post(path, body).await {
            Ok(Some(payload)) => match decode(path, payload) {
                Ok(variation) => Some(variation),
                Err(e) => {
                    tracing::warn!("discarding variation: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("variation lookup failed: {}", e);
                None
            }
        }
    }

    /// Load a track, keeping a missing (or falsy) `blocks` field distinct from an empty one.
    pub async fn load_track(&self, query: &TrackQuery) -> Result<VcfTrack> {
        let path = "vcf/track/get";
        let payload = self
            .transport
            .post(path, serde_json::to_value(query)?)
            .await?
            .ok_or_else(Error::track_load)?;

        let blocks = truthy(payload.get("blocks").cloned())
            .map(|blocks| decode(path, blocks))
            .transpose()?;
        Ok(VcfTrack { blocks })
    }

    /// Load the blocks of a track. A missing block list yields an empty one.
    pub async fn load_track_blocks(&self, query: &TrackQuery) -> Result<Vec<VariationBlock>> {
        let track = self.load_track(query).await?;
        if track.blocks.is_none() {
            tracing::debug!("track {} returned no blocks", query.id);
        }
        Ok(track.blocks.unwrap_or_default())
    }

    /// All VCF files registered for a reference.
    pub async fn list_all_files(&self, reference_id: u64) -> Result<Vec<VcfFile>> {
        let path = format!("vcf/{}/loadAll", reference_id);
        match self.transport.get(&path).await? {
            Some(payload) => decode(&path, payload),
            None => Ok(Vec::new()),
        }
    }
}
