//! SVG decoding and PNG rendering.

/// The [`Rasterizer`](adapter::Rasterizer) seam and its `resvg` implementation.
pub mod adapter;
