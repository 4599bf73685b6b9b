//! Fixed output tiers and the concurrent multi-density renderer.

/// Concurrent scale-set rendering.
pub mod generator;
/// The constant 1x/2x/3x tier table.
pub mod table;
