//! Rasterize a laid-out graph
//!
//! Edges are drawn first with their `weight` as line width and their `color`,
//! then nodes as discs labelled with their `eTigID`. Edges carrying both a
//! `coverage` and a `tigLen` attribute get a `<coverage>-<tigLen>` label.

use crate::attrs::Attributes;
use crate::error::{PlotGfaError, Result};
use crate::font;
use crate::graph::AssemblyGraph;
use crate::layout::Layout;
use image::{Rgb, RgbImage};
use std::path::Path;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GRAY: Rgb<u8> = Rgb([128, 128, 128]);
const NODE_FILL: Rgb<u8> = Rgb([0x1f, 0x78, 0xb4]);

/// Canvas settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Blank border kept around the drawing
    pub margin: u32,
    pub node_radius: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            margin: 40,
            node_radius: 10,
        }
    }
}

/// Map a color attribute to RGB. Accepts a few common names and `#rrggbb`;
/// anything else is gray.
pub fn parse_color(name: &str) -> Rgb<u8> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(v) = u32::from_str_radix(hex, 16) {
                return Rgb([(v >> 16) as u8, (v >> 8) as u8, v as u8]);
            }
        }
        return GRAY;
    }
    match name.to_ascii_lowercase().as_str() {
        "black" => BLACK,
        "white" => WHITE,
        "green" => Rgb([0, 128, 0]),
        "red" => Rgb([255, 0, 0]),
        "blue" => Rgb([0, 0, 255]),
        "orange" => Rgb([255, 165, 0]),
        "purple" => Rgb([128, 0, 128]),
        "yellow" => Rgb([255, 255, 0]),
        _ => GRAY,
    }
}

/// Label drawn on an edge, if it has the columns for one
pub fn edge_label(attrs: &Attributes) -> Option<String> {
    let coverage = attrs.get("coverage")?;
    let tig_len = attrs.get("tigLen")?;
    Some(format!("{}-{}", coverage, tig_len))
}

/// Line width from `weight`, capped at `max`
fn edge_width(attrs: &Attributes, max: f64) -> f64 {
    attrs
        .get("weight")
        .and_then(|w| w.as_f64())
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(1.0)
        .min(max)
}

fn edge_color(attrs: &Attributes) -> Rgb<u8> {
    attrs
        .get("color")
        .map(|c| parse_color(&c.to_string()))
        .unwrap_or(BLACK)
}

struct Canvas {
    img: RgbImage,
}

impl Canvas {
    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < self.img.width() as i64 && y < self.img.height() as i64 {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
        let r = radius.max(0.5);
        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = (x as f64 - cx, y as f64 - cy);
                if dx * dx + dy * dy <= r * r {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            self.disc(from.0 + dx * t, from.1 + dy * t, width / 2.0, color);
        }
    }

    fn rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb<u8>) {
        for yy in y..y + h as i64 {
            for xx in x..x + w as i64 {
                self.put(xx, yy, color);
            }
        }
    }

    /// Draw `text` centered on `(cx, cy)`
    fn text(&mut self, cx: f64, cy: f64, text: &str, color: Rgb<u8>) {
        let x0 = cx.round() as i64 - (font::text_width(text) / 2) as i64;
        let y0 = cy.round() as i64 - (font::GLYPH_HEIGHT / 2) as i64;
        for (i, c) in text.chars().enumerate() {
            let gx = x0 + (i as u32 * font::ADVANCE) as i64;
            for (row, bits) in font::glyph(c).iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if bits & (0x80u8 >> col) != 0 {
                        self.put(gx + col as i64, y0 + row as i64, color);
                    }
                }
            }
        }
    }
}

/// Draw `graph` at the positions of `layout`
pub fn render(graph: &AssemblyGraph, layout: &Layout, config: &RenderConfig) -> Result<RgbImage> {
    if config.width <= 2 * config.margin || config.height <= 2 * config.margin {
        return Err(PlotGfaError::InvalidInput(format!(
            "canvas {}x{} leaves no room inside a {}px margin",
            config.width, config.height, config.margin
        )));
    }
    if layout.len() != graph.node_count() {
        return Err(PlotGfaError::InvalidInput(format!(
            "layout has {} positions for {} nodes",
            layout.len(),
            graph.node_count()
        )));
    }

    let inner_w = (config.width - 2 * config.margin) as f64;
    let inner_h = (config.height - 2 * config.margin) as f64;
    let to_px = |(x, y): (f64, f64)| {
        (
            config.margin as f64 + (x + 1.0) / 2.0 * inner_w,
            config.margin as f64 + (1.0 - (y + 1.0) / 2.0) * inner_h,
        )
    };
    let points: Vec<(f64, f64)> = layout.positions.iter().copied().map(to_px).collect();
    let radius = config.node_radius as f64;

    let mut canvas = Canvas {
        img: RgbImage::from_pixel(config.width, config.height, WHITE),
    };

    let mut labels = Vec::new();
    for (edge, (i, j)) in graph.edges().zip(graph.edge_endpoints()) {
        if i == j {
            continue;
        }
        let (a, b) = (points[i], points[j]);
        let color = edge_color(edge.attrs);
        canvas.line(a, b, edge_width(edge.attrs, 2.0 * radius), color);
        arrowhead(&mut canvas, a, b, radius, color);

        if let Some(label) = edge_label(edge.attrs) {
            labels.push(((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0, label));
        }
    }

    for (node, &(x, y)) in graph.nodes().zip(points.iter()) {
        canvas.disc(x, y, radius, NODE_FILL);
        let label = node
            .attrs
            .get("eTigID")
            .map(|v| v.to_string())
            .unwrap_or_else(|| node.name.clone());
        canvas.text(x, y, &label, BLACK);
    }

    for (x, y, label) in labels {
        let w = font::text_width(&label) + 4;
        let h = font::GLYPH_HEIGHT + 4;
        canvas.rect(
            x.round() as i64 - (w / 2) as i64,
            y.round() as i64 - (h / 2) as i64,
            w,
            h,
            WHITE,
        );
        canvas.text(x, y, &label, BLACK);
    }

    Ok(canvas.img)
}

fn arrowhead(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64), radius: f64, color: Rgb<u8>) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= radius {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let tip = (to.0 - ux * radius, to.1 - uy * radius);
    let size = 10.0;
    for angle in [0.45f64, -0.45] {
        let (s, c) = angle.sin_cos();
        let bx = -(ux * c - uy * s);
        let by = -(ux * s + uy * c);
        canvas.line(tip, (tip.0 + bx * size, tip.1 + by * size), 2.0, color);
    }
}

/// Write `img` to `path`; the format follows the extension
pub fn save_image<P: AsRef<Path>>(img: &RgbImage, path: P) -> Result<()> {
    img.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{segment_defaults, AttrValue};
    use crate::layout::{spring_layout, LayoutConfig};

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("black"), BLACK);
        assert_eq!(parse_color("Green"), Rgb([0, 128, 0]));
        assert_eq!(parse_color("#ff8000"), Rgb([255, 128, 0]));
        assert_eq!(parse_color("#zz"), GRAY);
        assert_eq!(parse_color("chartreuse-ish"), GRAY);
    }

    #[test]
    fn test_edge_label() {
        let mut attrs = segment_defaults();
        assert_eq!(edge_label(&attrs), None);
        attrs.insert("coverage".to_string(), AttrValue::from("30.5"));
        assert_eq!(edge_label(&attrs), None);
        attrs.insert("tigLen".to_string(), AttrValue::from("5000"));
        assert_eq!(edge_label(&attrs), Some("30.5-5000".to_string()));
    }

    #[test]
    fn test_edge_width() {
        assert_eq!(edge_width(&segment_defaults(), 20.0), 5.0);
        let mut attrs = Attributes::new();
        assert_eq!(edge_width(&attrs, 20.0), 1.0);
        attrs.insert("weight".to_string(), AttrValue::from("thick"));
        assert_eq!(edge_width(&attrs, 20.0), 1.0);
        attrs.insert("weight".to_string(), AttrValue::from("10000"));
        assert_eq!(edge_width(&attrs, 20.0), 20.0);
    }

    #[test]
    fn test_render_draws_something() {
        let mut graph = AssemblyGraph::new();
        graph.add_edge("tig1_start", "tig1_end", segment_defaults());
        let layout = spring_layout(&graph, &LayoutConfig::default());
        let config = RenderConfig {
            width: 200,
            height: 150,
            ..RenderConfig::default()
        };

        let img = render(&graph, &layout, &config).unwrap();
        assert_eq!(img.dimensions(), (200, 150));
        assert!(img.pixels().any(|p| *p != WHITE));
    }

    #[test]
    fn test_render_rejects_tiny_canvas() {
        let graph = AssemblyGraph::new();
        let config = RenderConfig {
            width: 50,
            height: 50,
            ..RenderConfig::default()
        };
        let err = render(&graph, &Layout::default(), &config).unwrap_err();
        assert!(matches!(err, PlotGfaError::InvalidInput(_)));
    }
}
