//! Output artifacts.
//!
//! Manufacturing export proper (Gerber/drill) lives outside this tool; the
//! SVG preview here is the artifact a layout run leaves behind for a human
//! to sanity-check the geometry.

pub mod svg;
