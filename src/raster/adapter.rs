use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use image::{
    ExtendedColorType, ImageEncoder,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};

use crate::foundation::error::{AssetError, AssetResult};

/// Largest raster edge we are willing to allocate.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Density most bundlers assume for SVG sources (CSS pixels at 72 dpi).
pub const DEFAULT_SVG_DENSITY: f32 = 72.0;

/// Parsed SVG plus the metadata needed to rasterize it at an absolute density.
///
/// Shared read-only between concurrent renders.
#[derive(Clone, Debug)]
pub struct DecodedSvg {
    /// Raw file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
    /// Intrinsic width in pixels at `density`.
    pub width: u32,
    /// Intrinsic height in pixels at `density`.
    pub height: u32,
    /// Density the intrinsic size is expressed in, if known.
    pub density: Option<f32>,
}

impl DecodedSvg {
    /// Parse `bytes` read from `path` into a decoded image.
    pub fn from_data(
        path: &Path,
        bytes: Vec<u8>,
        density: Option<f32>,
        opts: &usvg::Options<'_>,
    ) -> AssetResult<Self> {
        let tree = usvg::Tree::from_data(&bytes, opts)
            .map_err(|e| AssetError::decode(path, e.to_string()))?;

        let size = tree.size();
        let width = intrinsic_px(size.width()).ok_or_else(|| {
            AssetError::decode(path, format!("invalid svg width {}", size.width()))
        })?;
        let height = intrinsic_px(size.height()).ok_or_else(|| {
            AssetError::decode(path, format!("invalid svg height {}", size.height()))
        })?;

        Ok(Self {
            bytes: Arc::new(bytes),
            tree: Arc::new(tree),
            width,
            height,
            density,
        })
    }
}

fn intrinsic_px(v: f32) -> Option<u32> {
    if !v.is_finite() || v <= 0.0 {
        return None;
    }
    Some((v.ceil() as u32).max(1))
}

/// A raster file written by [`Rasterizer::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRaster {
    /// Output file.
    pub path: PathBuf,
    /// Pixel width of the written image.
    pub width: u32,
    /// Pixel height of the written image.
    pub height: u32,
}

/// Rasterization capability used by the scale-set generator.
///
/// Implementations must be shareable across worker threads: one decoded image is rendered at
/// several densities concurrently.
pub trait Rasterizer: Sync {
    /// Read and parse the SVG at `path` without rasterizing it.
    fn decode(&self, path: &Path) -> AssetResult<DecodedSvg>;

    /// Render `image` at the absolute `target_density` and write a PNG to `output_path`.
    ///
    /// Fails with [`AssetError::DensityMissing`] before writing anything when the image has no
    /// intrinsic density.
    fn render(
        &self,
        image: &DecodedSvg,
        target_density: f32,
        output_path: &Path,
    ) -> AssetResult<RenderedRaster>;
}

#[derive(Clone, Debug)]
/// Options for [`SvgRasterizer`].
pub struct SvgRasterizerOpts {
    /// Density reported for decoded SVGs. `None` leaves it unknown, which makes rendering fail.
    pub density: Option<f32>,
    /// Load system fonts for SVG `<text>`.
    pub system_fonts: bool,
}

impl Default for SvgRasterizerOpts {
    fn default() -> Self {
        Self {
            density: Some(DEFAULT_SVG_DENSITY),
            system_fonts: true,
        }
    }
}

/// [`Rasterizer`] backed by `usvg` parsing, `resvg` rendering and `image`'s PNG encoder.
#[derive(Clone, Debug, Default)]
pub struct SvgRasterizer {
    opts: SvgRasterizerOpts,
}

impl SvgRasterizer {
    /// Create a rasterizer with explicit options.
    pub fn new(opts: SvgRasterizerOpts) -> Self {
        Self { opts }
    }

    /// Options this rasterizer was built with.
    pub fn opts(&self) -> &SvgRasterizerOpts {
        &self.opts
    }
}

impl Rasterizer for SvgRasterizer {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    fn decode(&self, path: &Path) -> AssetResult<DecodedSvg> {
        let bytes = std::fs::read(path).map_err(|e| AssetError::io(path, e))?;

        let resources_dir = path.parent().map(Path::to_path_buf);
        let fontdb = build_svg_fontdb(self.opts.system_fonts, resources_dir.as_deref());
        let opts = usvg::Options {
            resources_dir,
            fontdb,
            ..Default::default()
        };

        DecodedSvg::from_data(path, bytes, self.opts.density, &opts)
    }

    fn render(
        &self,
        image: &DecodedSvg,
        target_density: f32,
        output_path: &Path,
    ) -> AssetResult<RenderedRaster> {
        let density = image.density.ok_or(AssetError::DensityMissing)?;
        if !target_density.is_finite() || target_density <= 0.0 {
            return Err(AssetError::render(format!(
                "target density must be finite and > 0, got {target_density}"
            )));
        }

        let (width, height) = raster_size(&image.tree, target_density / density)?;
        let rgba = rasterize_svg_to_rgba8(&image.tree, width, height)?;
        let png = encode_png(&rgba, width, height)?;
        std::fs::write(output_path, png).map_err(|e| AssetError::io(output_path, e))?;

        Ok(RenderedRaster {
            path: output_path.to_path_buf(),
            width,
            height,
        })
    }
}

/// Pixel size of `tree` rendered at `scale` times its intrinsic size.
pub fn raster_size(tree: &usvg::Tree, scale: f32) -> AssetResult<(u32, u32)> {
    let size = tree.size();
    let w = (size.width() * scale).ceil();
    let h = (size.height() * scale).ceil();
    if !w.is_finite() || !h.is_finite() {
        return Err(AssetError::render("svg raster size is not finite"));
    }

    let w = w.max(1.0) as u32;
    let h = h.max(1.0) as u32;
    if w > MAX_RASTER_DIM || h > MAX_RASTER_DIM {
        return Err(AssetError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_RASTER_DIM}x{MAX_RASTER_DIM})"
        )));
    }
    Ok((w, h))
}

/// Rasterize into straight-alpha RGBA8, stretching the SVG to exactly `width`x`height`.
pub fn rasterize_svg_to_rgba8(tree: &usvg::Tree, width: u32, height: u32) -> AssetResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AssetError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(tree, xform, &mut pixmap.as_mut());

    // PNG stores straight alpha; tiny-skia hands back premultiplied pixels.
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(rgba)
}

/// Encode straight RGBA8 as PNG with filtering disabled and maximum compression.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> AssetResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::NoFilter)
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .with_context(|| format!("encode {width}x{height} png"))?;
    Ok(buf)
}

fn build_svg_fontdb(
    system_fonts: bool,
    resources_dir: Option<&Path>,
) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    if system_fonts {
        db.load_system_fonts();
    }

    if let Some(dir) = resources_dir {
        load_fonts_from_dir(&mut db, dir);
        load_fonts_from_dir(&mut db, &dir.join("fonts"));
    }

    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/adapter.rs"]
mod tests;
