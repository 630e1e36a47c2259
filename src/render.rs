#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::points_to_path;
use crate::scene::{Primitive, Scene};
use crate::theme::Theme;
use crate::viewport::ViewportTransform;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(scene: &Scene, theme: &Theme, transform: Option<&ViewportTransform>) -> String {
    let canvas = scene.canvas;
    let width = canvas.width().max(1.0);
    let height = canvas.height().max(1.0);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{:.2} {:.2} {width:.2} {height:.2}\">",
        canvas.min_x, canvas.min_y
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
        canvas.min_x,
        canvas.min_y,
        escape_xml(&theme.background)
    ));

    match transform {
        Some(transform) => svg.push_str(&format!(
            "<g class=\"viewport\" transform=\"{}\">",
            transform.svg_transform()
        )),
        None => svg.push_str("<g class=\"viewport\">"),
    }
    for item in &scene.items {
        svg.push_str(&primitive_svg(&item.primitive, theme));
    }
    svg.push_str("</g></svg>");
    svg
}

fn primitive_svg(primitive: &Primitive, theme: &Theme) -> String {
    match primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            corner_radius,
            fill,
            stroke,
            stroke_width,
        } => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{corner_radius:.2}\" ry=\"{corner_radius:.2}\" fill=\"{}\"{}/>",
            escape_xml(fill),
            stroke_attrs(stroke.as_deref(), *stroke_width)
        ),
        Primitive::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{}\"{}/>",
            escape_xml(fill),
            stroke_attrs(stroke.as_deref(), *stroke_width)
        ),
        Primitive::Path {
            points,
            stroke,
            stroke_width,
            dasharray,
        } => {
            let dash = dasharray
                .as_deref()
                .map(|dash| format!(" stroke-dasharray=\"{}\"", escape_xml(dash)))
                .unwrap_or_default();
            format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{stroke_width:.2}\"{dash}/>",
                points_to_path(points),
                escape_xml(stroke)
            )
        }
        Primitive::Text {
            x,
            y,
            lines,
            font_size,
            line_height,
            anchor,
            fill,
        } => text_block_svg(*x, *y, lines, *font_size, *line_height, anchor.as_svg(), fill, theme),
    }
}

fn stroke_attrs(stroke: Option<&str>, width: f32) -> String {
    match stroke {
        Some(stroke) if width > 0.0 => format!(
            " stroke=\"{}\" stroke-width=\"{width:.2}\"",
            escape_xml(stroke)
        ),
        _ => String::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn text_block_svg(
    x: f32,
    y: f32,
    lines: &[String],
    font_size: f32,
    line_height: f32,
    anchor: &str,
    fill: &str,
    theme: &Theme,
) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let step = font_size * line_height;
    // 0.35em moves each baseline so the glyphs, not the baselines, are centered.
    let start_y = y - step * (lines.len() as f32 - 1.0) / 2.0 + font_size * 0.35;
    let mut text = format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{font_size:.2}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        escape_xml(fill)
    );
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { step };
        text.push_str(&format!(
            "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    text.push_str("</text>");
    text
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
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(1200.0, 800.0))
        .ok_or_else(|| anyhow::anyhow!("invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
