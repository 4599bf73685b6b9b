/// Descriptor validation and SVG-to-PNG conversion.
pub mod orchestrator;
