/// Error taxonomy shared by every layer.
pub mod error;
