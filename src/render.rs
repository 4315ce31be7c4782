use crate::config::RenderStyle;
use crate::geometry::Point;
use crate::router::Layout;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, style: &RenderStyle) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        style.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        style.line_color
    ));
    svg.push_str("</defs>");

    svg.push_str(&format!(
        "<g transform=\"translate({:.2} {:.2})\">",
        layout.offset_x, layout.offset_y
    ));

    for connector in &layout.connectors {
        let d = points_to_path(&connector.points);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" marker-end=\"url(#arrow)\" />",
            d, style.line_color, style.line_width
        ));

        if let Some(label) = &connector.label
            && let Some((x, y)) = label_anchor(&connector.points)
        {
            svg.push_str(&format!(
                "<text x=\"{x:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
                y - 6.0,
                style.font_family,
                style.font_size,
                style.text_color,
                escape_xml(label)
            ));
        }
    }

    for block in &layout.blocks {
        let bounds = &block.bounds;
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\" ry=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            style.block_corner_radius,
            style.block_corner_radius,
            style.block_fill,
            style.block_stroke,
            style.block_stroke_width
        ));
        let center_x = bounds.x + bounds.width / 2.0;
        let center_y = bounds.y + bounds.height / 2.0;
        svg.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{center_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
            style.font_family,
            style.font_size,
            style.text_color,
            escape_xml(&block.label)
        ));
    }

    svg.push_str("</g>");
    svg.push_str("</svg>");
    svg
}

fn points_to_path(points: &[Point]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].x, points[0].y));
    for point in &points[1..] {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
    }
    d
}

/// Midpoint of the longest segment, where a label is least likely to sit
/// on a bend.
fn label_anchor(points: &[Point]) -> Option<(f32, f32)> {
    if points.len() < 2 {
        return None;
    }
    let mut best_idx = 0;
    let mut best_len = -1.0f32;
    for (idx, segment) in points.windows(2).enumerate() {
        let dx = segment[1].x - segment[0].x;
        let dy = segment[1].y - segment[0].y;
        let len = dx * dx + dy * dy;
        if len > best_len {
            best_len = len;
            best_idx = idx;
        }
    }
    let a = points[best_idx];
    let b = points[best_idx + 1];
    Some(((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
