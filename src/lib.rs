//! pixelscale is an asset hook for bundlers: it turns one SVG asset into PNG variants at 1x, 2x
//! and 3x density and rewrites the asset descriptor to point at them.
//!
//! # Pipeline overview
//!
//! 1. **Gate**: descriptors whose type isn't `svg` are returned untouched, with no IO.
//! 2. **Validate**: exactly one file, tagged with scale 1.
//! 3. **Decode**: [`Rasterizer::decode`] reads and parses the SVG (intrinsic size and density).
//! 4. **Render**: [`generate_scale_set`] renders the three tiers concurrently and gathers them in
//!    table order.
//! 5. **Rebuild**: a new `png` descriptor lists the written files and their scales.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic output**: PNG encoding parameters are fixed (no filtering, best compression),
//!   so reruns produce byte-identical files.
//! - **Non-mutating**: [`transform()`] borrows its input and returns [`Transformed`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod asset;
mod foundation;
mod raster;
mod scale;
mod transform;

#[cfg(test)]
#[path = "../tests/unit/support/mod.rs"]
mod test_support;

pub use asset::descriptor::{AssetDescriptor, RASTER_ASSET_TYPE, VECTOR_ASSET_TYPE};
pub use foundation::error::{AssetError, AssetResult};
pub use raster::adapter::{
    DEFAULT_SVG_DENSITY, DecodedSvg, MAX_RASTER_DIM, Rasterizer, RenderedRaster, SvgRasterizer,
    SvgRasterizerOpts, encode_png, raster_size, rasterize_svg_to_rgba8,
};
pub use scale::generator::{RenderedVariant, build_thread_pool, generate_scale_set};
pub use scale::table::{OUTPUT_EXTENSION, SCALE_SPECS, ScaleSpec};
pub use transform::orchestrator::{
    TransformOpts, Transformed, transform, transform_svg_asset, validate_svg_asset,
};
