//! SVG audit rendering of the segment store.
//!
//! Renders the current wall map (and optionally the operator's trail) to
//! a standalone SVG file. The SVG serves as an audit artifact: what the
//! engine believes the walls look like at a point in a session, with no
//! GUI toolkit involved.

use std::fmt::Write as _;
use std::path::Path;

use crate::core::Point2D;
use crate::resolver::SegmentStore;

/// SVG color scheme.
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Fitted wall segment color.
    pub wall: &'static str,
    /// Nascent (single-point) segment marker color.
    pub nascent: &'static str,
    /// Operator trail color.
    pub trail: &'static str,
    /// Background color.
    pub background: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            wall: "#2222AA",
            nascent: "#AAAAAA",
            trail: "#22AA22",
            background: "#FFFFFF",
        }
    }
}

/// Configuration for SVG rendering.
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Output pixels per world unit.
    pub scale: f32,
    /// Wall stroke width in pixels.
    pub wall_width: f32,
    /// Trail stroke width in pixels.
    pub trail_width: f32,
    /// Nascent point marker radius in pixels.
    pub marker_radius: f32,
    /// Padding around the map in pixels.
    pub padding: f32,
    /// Color scheme.
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            wall_width: 2.0,
            trail_width: 1.0,
            marker_radius: 3.0,
            padding: 20.0,
            colors: SvgColorScheme::default(),
        }
    }
}

/// Render the store (and an optional operator trail) to an SVG string.
pub fn render_svg(store: &SegmentStore, trail: &[Point2D], config: &SvgConfig) -> String {
    // Bounds over segments and trail; fall back to a unit box when empty.
    let mut bounds = store.bounds();
    for p in trail {
        match &mut bounds {
            Some(b) => b.expand_to_include(*p),
            None => bounds = Some(crate::core::Bounds::from_point(*p)),
        }
    }
    let bounds = bounds.unwrap_or(crate::core::Bounds {
        min: Point2D::ZERO,
        max: Point2D::new(1.0, 1.0),
    });

    let width = bounds.width() * config.scale + 2.0 * config.padding;
    let height = bounds.height() * config.scale + 2.0 * config.padding;
    let to_px = |p: Point2D| -> (f32, f32) {
        (
            (p.x - bounds.min.x) * config.scale + config.padding,
            // Flip y: SVG grows downward, the world frame grows upward
            height - ((p.y - bounds.min.y) * config.scale + config.padding),
        )
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        width, height, width, height
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        config.colors.background
    );

    for segment in store.segments() {
        let [a, b] = segment.endpoints();
        if segment.fit().is_some() && segment.point_count() >= 2 {
            let (x1, y1) = to_px(a);
            let (x2, y2) = to_px(b);
            let _ = writeln!(
                svg,
                r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
                x1, y1, x2, y2, config.colors.wall, config.wall_width
            );
        } else {
            // Not enough evidence for a line yet: draw a marker
            let (cx, cy) = to_px(a);
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                cx, cy, config.marker_radius, config.colors.nascent
            );
        }
    }

    if trail.len() > 1 {
        let mut points = String::new();
        for p in trail {
            let (x, y) = to_px(*p);
            let _ = write!(points, "{:.1},{:.1} ", x, y);
        }
        let _ = writeln!(
            svg,
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{:.1}"/>"#,
            points.trim_end(),
            config.colors.trail,
            config.trail_width
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render the store to an SVG file.
pub fn write_svg_file<P: AsRef<Path>>(
    path: P,
    store: &SegmentStore,
    trail: &[Point2D],
    config: &SvgConfig,
) -> std::io::Result<()> {
    std::fs::write(path, render_svg(store, trail, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapperConfig;
    use crate::resolver::Resolver;

    fn store_with_wall() -> Resolver {
        let mut r = Resolver::new(MapperConfig::default()).unwrap();
        for x in [0.0_f32, 10.0, 20.0, 30.0] {
            r.step(Point2D::new(x, 0.0)).unwrap();
        }
        r
    }

    #[test]
    fn test_render_contains_one_line_per_fitted_segment() {
        let r = store_with_wall();
        let svg = render_svg(r.store(), &[], &SvgConfig::default());
        assert_eq!(svg.matches("<line ").count(), 1);
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_nascent_as_marker() {
        let mut r = store_with_wall();
        r.step(Point2D::new(500.0, 500.0)).unwrap();
        let svg = render_svg(r.store(), &[], &SvgConfig::default());
        assert_eq!(svg.matches("<line ").count(), 1);
        assert_eq!(svg.matches("<circle ").count(), 1);
    }

    #[test]
    fn test_render_trail_polyline() {
        let r = store_with_wall();
        let trail = [
            Point2D::new(0.0, 5.0),
            Point2D::new(10.0, 5.0),
            Point2D::new(20.0, 5.0),
        ];
        let svg = render_svg(r.store(), &trail, &SvgConfig::default());
        assert_eq!(svg.matches("<polyline ").count(), 1);
    }

    #[test]
    fn test_render_empty_store() {
        let store = SegmentStore::new();
        let svg = render_svg(&store, &[], &SvgConfig::default());
        assert!(svg.contains("<svg "));
        assert_eq!(svg.matches("<line ").count(), 0);
    }
}
