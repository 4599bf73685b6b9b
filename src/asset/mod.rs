//! Host bundler asset records.

/// The asset descriptor and its type tags.
pub mod descriptor;
