use std::path::PathBuf;

/// One output tier: a scale relative to the 1x asset and the file-name suffix it is written with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSpec {
    /// Scale relative to the 1x variant.
    pub relative_scale: f64,
    /// Suffix appended to the asset name, before the extension.
    pub suffix: &'static str,
}

/// Output tiers, in the order variants appear on the converted descriptor.
pub const SCALE_SPECS: [ScaleSpec; 3] = [
    ScaleSpec {
        relative_scale: 1.0,
        suffix: "",
    },
    ScaleSpec {
        relative_scale: 2.0,
        suffix: "@2x",
    },
    ScaleSpec {
        relative_scale: 3.0,
        suffix: "@3x",
    },
];

/// Extension of every generated file.
pub const OUTPUT_EXTENSION: &str = "png";

impl ScaleSpec {
    /// Scale recorded on the output descriptor for an input tagged with `input_scale`.
    pub fn effective_scale(&self, input_scale: f64) -> f64 {
        self.relative_scale / input_scale
    }

    /// `<location>/<name><suffix>.png`
    pub fn output_path(&self, location: &str, name: &str) -> PathBuf {
        PathBuf::from(format!(
            "{location}/{name}{}.{OUTPUT_EXTENSION}",
            self.suffix
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/table.rs"]
mod tests;
