use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::foundation::error::{AssetError, AssetResult};

/// Type tag the host bundler uses for SVG assets.
pub const VECTOR_ASSET_TYPE: &str = "svg";
/// Type tag written on the converted raster descriptor.
pub const RASTER_ASSET_TYPE: &str = "png";

/// The host bundler's record for one logical asset.
///
/// `files` and `scales` are parallel: entry `i` of `files` is the variant rendered at `scales[i]`.
/// Fields the transform doesn't interpret are kept in `extra` and written back unchanged.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    /// Format tag, compared as an opaque string.
    #[serde(rename = "type")]
    pub asset_type: String,
    /// Base file name without scale suffix or extension.
    pub name: String,
    /// Directory holding the asset files.
    pub file_system_location: String,
    /// Absolute file paths, one per scale.
    pub files: Vec<String>,
    /// Scale factor of each file.
    pub scales: Vec<f64>,
    /// Intrinsic raster width. The outer `Option` is key presence, the inner one a JSON `null`.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<Option<u32>>,
    /// Intrinsic raster height, with the same presence/null split as `width`.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<Option<u32>>,
    /// Remaining host fields (hash, server location, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AssetDescriptor {
    /// Descriptor for a single unity-scale SVG file.
    pub fn svg(
        name: impl Into<String>,
        file_system_location: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            asset_type: VECTOR_ASSET_TYPE.to_string(),
            name: name.into(),
            file_system_location: file_system_location.into(),
            files: vec![file.into()],
            scales: vec![1.0],
            width: None,
            height: None,
            extra: serde_json::Map::new(),
        }
    }

    /// `true` when the type tag names the vector format this crate converts.
    pub fn is_vector(&self) -> bool {
        self.asset_type == VECTOR_ASSET_TYPE
    }

    /// Width and height when both are present and non-null.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width.flatten()?, self.height.flatten()?))
    }

    /// Parse a descriptor from a JSON reader.
    pub fn from_reader<R: Read>(r: R) -> AssetResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AssetError::validation(format!("parse asset descriptor JSON: {e}")))
    }

    /// Parse a descriptor from a JSON string.
    pub fn from_json_str(s: &str) -> AssetResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Serialize the descriptor to a JSON string in the host's field naming.
    pub fn to_json_string(&self) -> AssetResult<String> {
        serde_json::to_string(self)
            .map_err(|e| AssetError::validation(format!("serialize asset descriptor JSON: {e}")))
    }
}

// Missing keys fall back to `None` through `#[serde(default)]`; a present key, even `null`,
// lands here and becomes `Some(..)`.
fn present_or_null<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/asset/descriptor.rs"]
mod tests;
