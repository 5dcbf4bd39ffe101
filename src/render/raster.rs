//! Minimal CPU raster backend: executes a [`ScenePlan`] into an RGBA8
//! buffer. Hard-edged fills, 1px strokes, no anti-aliasing — enough to
//! write PNGs; presentation-grade rendering lives outside the crate.

use image::{Rgba, RgbaImage};

use crate::{
    eval::scene::{DrawOp, ScenePlan},
    foundation::core::{Point, Rect, Rgb8},
};

pub fn render_frame(plan: &ScenePlan) -> RgbaImage {
    let canvas = plan.canvas;
    let mut img = RgbaImage::from_pixel(canvas.width, canvas.height, to_rgba(plan.background));

    for op in &plan.ops {
        match op {
            DrawOp::ShadowRect { rect, radius, fill } => {
                fill_round_rect(&mut img, *rect, *radius, to_rgba(*fill), to_rgba(*fill));
            }
            DrawOp::Connector { a, b, stroke } | DrawOp::OrnamentLine { a, b, stroke } => {
                draw_line(&mut img, *a, *b, to_rgba(*stroke));
            }
            DrawOp::FillRect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                fill_round_rect(&mut img, *rect, *radius, to_rgba(*fill), to_rgba(*stroke));
            }
        }
    }

    // The reserved control strip stays blank on top of everything.
    let strip_top = canvas.height - canvas.control_strip;
    for y in strip_top..canvas.height {
        for x in 0..canvas.width {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }

    img
}

fn to_rgba(c: Rgb8) -> Rgba<u8> {
    Rgba([c.r, c.g, c.b, 255])
}

/// Point-in-rounded-rect test against pixel centers.
fn inside_round_rect(rect: Rect, radius: f64, px: f64, py: f64) -> bool {
    if px < rect.x0 || px > rect.x1 || py < rect.y0 || py > rect.y1 {
        return false;
    }
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    if r <= 0.0 {
        return true;
    }
    let cx = px.clamp(rect.x0 + r, rect.x1 - r);
    let cy = py.clamp(rect.y0 + r, rect.y1 - r);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

fn fill_round_rect(img: &mut RgbaImage, rect: Rect, radius: f64, fill: Rgba<u8>, stroke: Rgba<u8>) {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    let x_min = rect.x0.floor().max(0.0) as u32;
    let y_min = rect.y0.floor().max(0.0) as u32;
    let x_max = (rect.x1.ceil().min(f64::from(img.width())) as u32).min(img.width());
    let y_max = (rect.y1.ceil().min(f64::from(img.height())) as u32).min(img.height());
    if rect.x1 < 0.0 || rect.y1 < 0.0 {
        return;
    }

    let inner = rect.inset(-1.0);
    let inner_radius = (radius - 1.0).max(0.0);

    for y in y_min..y_max {
        for x in x_min..x_max {
            let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
            if !inside_round_rect(rect, radius, px, py) {
                continue;
            }
            let c = if inside_round_rect(inner, inner_radius, px, py) {
                fill
            } else {
                stroke
            };
            img.put_pixel(x, y, c);
        }
    }
}

fn draw_line(img: &mut RgbaImage, a: Point, b: Point, color: Rgba<u8>) {
    let steps = (b - a).hypot().ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let p = a.lerp(b, t);
        let (x, y) = (p.x.round(), p.y.round());
        if x >= 0.0 && y >= 0.0 && x < f64::from(img.width()) && y < f64::from(img.height()) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}
