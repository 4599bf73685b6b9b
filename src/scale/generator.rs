use std::path::PathBuf;

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::error::{AssetError, AssetResult},
    raster::adapter::{DecodedSvg, Rasterizer},
    scale::table::SCALE_SPECS,
};

/// One generated raster file and the scale recorded for it on the output descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedVariant {
    /// Written PNG file.
    pub path: PathBuf,
    /// Effective scale (`relative_scale / input_scale`).
    pub scale: f64,
    /// Pixel width of the written image.
    pub width: u32,
    /// Pixel height of the written image.
    pub height: u32,
}

struct RenderJob {
    path: PathBuf,
    scale: f64,
}

/// Render one variant per [`SCALE_SPECS`] entry.
///
/// Renders run concurrently, on `pool` when given and on the global rayon pool otherwise. The
/// result is always in table order (1x, 2x, 3x). If any render fails the whole set fails; when
/// several fail, the error of the lowest table index is returned. Files already written by
/// sibling renders are left in place.
#[tracing::instrument(skip(rasterizer, image, pool))]
pub fn generate_scale_set<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    image: &DecodedSvg,
    location: &str,
    name: &str,
    input_scale: f64,
    pool: Option<&rayon::ThreadPool>,
) -> AssetResult<Vec<RenderedVariant>> {
    if !input_scale.is_finite() || input_scale <= 0.0 {
        return Err(AssetError::validation(format!(
            "input scale must be finite and > 0, got {input_scale}"
        )));
    }
    // Checked once up front so a missing density never reaches a render.
    let density = image.density.ok_or(AssetError::DensityMissing)?;

    let jobs = SCALE_SPECS
        .iter()
        .map(|spec| RenderJob {
            path: spec.output_path(location, name),
            scale: spec.effective_scale(input_scale),
        })
        .collect::<Vec<_>>();

    // Indexed collect: slot `i` holds job `i`'s result whatever order the workers finish in.
    let rendered = match pool {
        Some(pool) => pool.install(|| {
            jobs.par_iter()
                .map(|job| render_variant(rasterizer, image, density, job))
                .collect::<Vec<_>>()
        }),
        None => jobs
            .par_iter()
            .map(|job| render_variant(rasterizer, image, density, job))
            .collect::<Vec<_>>(),
    };

    let mut out = Vec::with_capacity(rendered.len());
    for item in rendered {
        out.push(item?);
    }
    Ok(out)
}

fn render_variant<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    image: &DecodedSvg,
    density: f32,
    job: &RenderJob,
) -> AssetResult<RenderedVariant> {
    let target_density = (f64::from(density) * job.scale) as f32;
    let raster = rasterizer.render(image, target_density, &job.path)?;
    tracing::debug!(
        path = %raster.path.display(),
        scale = job.scale,
        density = target_density,
        width = raster.width,
        height = raster.height,
        "rendered variant"
    );

    Ok(RenderedVariant {
        path: raster.path,
        scale: job.scale,
        width: raster.width,
        height: raster.height,
    })
}

/// Build a dedicated pool for scale-set renders.
pub fn build_thread_pool(threads: usize) -> AssetResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(AssetError::validation(
            "transform option 'threads' must be >= 1 when set",
        ));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("pixelscale-render-{i}"))
        .build()
        .context("build rayon thread pool")?;
    Ok(pool)
}

#[cfg(test)]
#[path = "../../tests/unit/scale/generator.rs"]
mod tests;
