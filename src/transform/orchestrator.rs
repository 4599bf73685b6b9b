use std::path::Path;

use crate::{
    asset::descriptor::{AssetDescriptor, RASTER_ASSET_TYPE},
    foundation::error::{AssetError, AssetResult},
    raster::adapter::{Rasterizer, SvgRasterizer},
    scale::generator::{build_thread_pool, generate_scale_set},
};

#[derive(Clone, Debug, Default)]
/// Options for [`transform`].
pub struct TransformOpts {
    /// Worker threads for the concurrent renders. `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

/// Outcome of [`transform`].
#[derive(Debug, PartialEq)]
pub enum Transformed<'a> {
    /// Not an SVG asset; the input is handed back untouched.
    Unchanged(&'a AssetDescriptor),
    /// A freshly built raster descriptor.
    Converted(AssetDescriptor),
}

impl Transformed<'_> {
    /// `true` when the asset was rasterized.
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }

    /// Borrow the resulting descriptor.
    pub fn descriptor(&self) -> &AssetDescriptor {
        match self {
            Self::Unchanged(a) => a,
            Self::Converted(a) => a,
        }
    }

    /// Owned resulting descriptor; clones in the unchanged case.
    pub fn into_descriptor(self) -> AssetDescriptor {
        match self {
            Self::Unchanged(a) => a.clone(),
            Self::Converted(a) => a,
        }
    }
}

/// Turn a single 1x SVG asset into 1x/2x/3x PNG variants.
///
/// Non-SVG assets are passed through without any IO. SVG assets are validated, decoded, rendered
/// at three densities and described by a new descriptor with the `png` type, the decoded
/// intrinsic size, and one file per scale. The input descriptor is never modified.
#[tracing::instrument(skip(asset, rasterizer, opts), fields(name = %asset.name, asset_type = %asset.asset_type))]
pub fn transform<'a, R: Rasterizer + ?Sized>(
    asset: &'a AssetDescriptor,
    rasterizer: &R,
    opts: &TransformOpts,
) -> AssetResult<Transformed<'a>> {
    if !asset.is_vector() {
        tracing::trace!("not an svg asset, passing through");
        return Ok(Transformed::Unchanged(asset));
    }

    validate_svg_asset(asset)?;
    let input_file = &asset.files[0];
    let input_scale = asset.scales[0];

    let pool = opts.threads.map(build_thread_pool).transpose()?;
    let image = rasterizer.decode(Path::new(input_file))?;
    let variants = generate_scale_set(
        rasterizer,
        &image,
        &asset.file_system_location,
        &asset.name,
        input_scale,
        pool.as_ref(),
    )?;

    let mut out = asset.clone();
    out.asset_type = RASTER_ASSET_TYPE.to_string();
    out.width = Some(Some(image.width));
    out.height = Some(Some(image.height));
    out.files = variants
        .iter()
        .map(|v| v.path.to_string_lossy().into_owned())
        .collect();
    out.scales = variants.iter().map(|v| v.scale).collect();

    tracing::debug!(files = out.files.len(), "converted svg asset");
    Ok(Transformed::Converted(out))
}

/// [`transform`] with the default [`SvgRasterizer`] and options, returning an owned descriptor.
pub fn transform_svg_asset(asset: &AssetDescriptor) -> AssetResult<AssetDescriptor> {
    transform(asset, &SvgRasterizer::default(), &TransformOpts::default())
        .map(Transformed::into_descriptor)
}

/// Input-contract checks, in precedence order.
pub fn validate_svg_asset(asset: &AssetDescriptor) -> AssetResult<()> {
    let files = asset.files.len();
    let scales = asset.scales.len();
    if scales != files {
        return Err(AssetError::Mismatch { scales, files });
    }
    if files == 0 {
        return Err(AssetError::EmptyInput);
    }
    if files > 1 {
        return Err(AssetError::UnsupportedMultiScale { files });
    }
    let scale = asset.scales[0];
    if scale != 1.0 {
        return Err(AssetError::UnsupportedPrescaled { scale });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/orchestrator.rs"]
mod tests;
