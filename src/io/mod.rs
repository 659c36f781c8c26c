//! Export of the live map for rendering and audit.

pub mod svg;

pub use svg::{render_svg, write_svg_file, SvgColorScheme, SvgConfig};
