//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in game pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for an axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    quad(r.left(), r.top(), r.right(), r.bottom(), color).to_vec()
}

fn quad(x0: f32, y0: f32, x1: f32, y1: f32, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangle outline of the given thickness, drawn inside `r`
pub fn frame(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.size.x / 2.0).min(r.size.y / 2.0);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(quad(r.left(), r.top(), r.right(), r.top() + t, color));
    vertices.extend(quad(r.left(), r.bottom() - t, r.right(), r.bottom(), color));
    vertices.extend(quad(r.left(), r.top() + t, r.left() + t, r.bottom() - t, color));
    vertices.extend(quad(r.right() - t, r.top() + t, r.right(), r.bottom() - t, color));
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Width in pixels of `s` drawn at `scale` pixels per font cell
pub fn text_width(s: &str, scale: f32) -> f32 {
    let chars = s.chars().count() as u32;
    if chars == 0 {
        return 0.0;
    }
    (chars * ADVANCE - 1) as f32 * scale
}

/// Height in pixels of a line of text at `scale`
pub fn text_height(scale: f32) -> f32 {
    GLYPH_HEIGHT as f32 * scale
}

/// Bitmap text with its top-left corner at `pos`
pub fn text(s: &str, pos: Vec2, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut x = pos.x;

    for c in s.chars() {
        let rows = font::glyph(c);
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if font::lit(&rows, col, row) {
                    let px = x + col as f32 * scale;
                    let py = pos.y + row as f32 * scale;
                    vertices.extend(quad(px, py, px + scale, py + scale, color));
                }
            }
        }
        x += ADVANCE as f32 * scale;
    }

    vertices
}

/// Bitmap text centered horizontally on `center_x`
pub fn text_centered(s: &str, center_x: f32, y: f32, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let x = center_x - text_width(s, scale) / 2.0;
    text(s, Vec2::new(x, y), scale, color)
}

/// Largest scale up to `max_scale` at which `s` fits in `width`
pub fn fit_scale(s: &str, width: f32, max_scale: f32) -> f32 {
    let mut scale = max_scale;
    while scale > 1.0 && text_width(s, scale) > width {
        scale -= 1.0;
    }
    scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let v = rect(&r, [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_frame_stays_inside() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        for v in frame(&r, 4.0, [1.0; 4]) {
            assert!(r.contains_point(Vec2::from(v.position)));
        }
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 3.0), 0.0);
        assert_eq!(text_width("A", 1.0), 5.0);
        assert_eq!(text_width("AB", 2.0), 22.0);
    }

    #[test]
    fn test_text_one_quad_per_lit_cell() {
        // 'I' has 3 + 5 + 3 lit cells
        assert_eq!(text("I", Vec2::ZERO, 1.0, [1.0; 4]).len(), 11 * 6);
        assert!(text(" ", Vec2::ZERO, 2.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_text_centered_is_symmetric() {
        let v = text_centered("HH", 100.0, 0.0, 2.0, [1.0; 4]);
        let min = v.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_eq!(min + max, 200.0);
    }

    #[test]
    fn test_fit_scale() {
        assert_eq!(fit_scale("Play", 280.0, 3.0), 3.0);
        let long = "Move Right: ArrowRight and more";
        let s = fit_scale(long, 280.0, 3.0);
        assert!(s < 3.0);
        assert!(text_width(long, s) <= 280.0 || s == 1.0);
    }
}
