use std::path::PathBuf;

/// Convenience result type used across pixelscale.
pub type AssetResult<T> = Result<T, AssetError>;

/// Top-level error taxonomy for the asset transform.
///
/// The first four variants are input-contract violations and are raised before any IO happens.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// `scales` and `files` have different lengths.
    #[error("asset error: passed scales ({scales}) don't match passed files ({files})")]
    Mismatch {
        /// Number of scale entries.
        scales: usize,
        /// Number of file entries.
        files: usize,
    },

    /// The descriptor lists no files.
    #[error("asset error: no files passed")]
    EmptyInput,

    /// More than one pre-supplied SVG scale.
    #[error("asset error: multiple svg scales not supported ({files} files passed)")]
    UnsupportedMultiScale {
        /// Number of file entries.
        files: usize,
    },

    /// The single SVG input is tagged with a non-unity scale.
    #[error("asset error: scaled svgs not supported (input scale {scale})")]
    UnsupportedPrescaled {
        /// Scale the input was tagged with.
        scale: f64,
    },

    /// Reading or writing a file failed.
    #[error("io error: '{}': {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Input bytes are not a valid SVG document.
    #[error("decode error: '{}': {message}", path.display())]
    Decode {
        /// Input file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The decoded image carries no density, so absolute render densities can't be computed.
    #[error("density error: input image missing density information")]
    DensityMissing,

    /// Rasterization or PNG encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid options or malformed descriptor data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies (PNG encoder, thread pool).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AssetError {
    /// Build an [`AssetError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build an [`AssetError::Decode`] value.
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build an [`AssetError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`AssetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `true` for the errors raised by descriptor validation, before any IO.
    pub fn is_input_contract(&self) -> bool {
        matches!(
            self,
            Self::Mismatch { .. }
                | Self::EmptyInput
                | Self::UnsupportedMultiScale { .. }
                | Self::UnsupportedPrescaled { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
