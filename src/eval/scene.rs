use crate::{
    color,
    composition::{
        model::{Composition, Element, Layer, LayerKind},
        params::{Params, ShadowPolicy},
    },
    foundation::{
        core::{Canvas, FrameIndex, Fps, Point, Rect, Rgb8, Stage, Vec2},
        error::LanderResult,
    },
};

/// Stage background clear color.
const BACKGROUND_GRAY: u8 = 127;

/// One drawable primitive. Ops are emitted in z-order: executing them in
/// sequence reproduces the frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DrawOp {
    /// Offset copy of an element, drawn before everything else in its layer.
    ShadowRect { rect: Rect, radius: f64, fill: Rgb8 },
    /// Center-to-center segment between adjacent elements of a layer.
    Connector { a: Point, b: Point, stroke: Rgb8 },
    /// The element itself: filled and stroked rounded rect.
    FillRect {
        rect: Rect,
        radius: f64,
        fill: Rgb8,
        stroke: Rgb8,
    },
    /// Rotating antenna line from pivot to tip.
    OrnamentLine { a: Point, b: Point, stroke: Rgb8 },
}

/// The compiled draw sequence for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenePlan {
    pub canvas: Canvas,
    pub background: Rgb8,
    pub ops: Vec<DrawOp>,
}

/// Compile one frame of the composition into an ordered draw sequence.
///
/// Per layer (back to front): all shadows, then all connectors, then all
/// fills, then ornament lines. Pure in its inputs: the same frame compiles
/// to the same plan every time.
#[tracing::instrument(skip(comp, params), fields(frame = frame.0))]
pub fn compile_frame(
    comp: &Composition,
    params: &Params,
    canvas: Canvas,
    frame: FrameIndex,
    fps: Fps,
) -> LanderResult<ScenePlan> {
    params.validate()?;
    comp.validate()?;

    let params = params.clamped();
    let stage = canvas.stage();
    let secs = fps.frames_to_secs(frame.0);
    let shift_deg = if params.auto_pulse {
        color::pulse_shift_deg(secs)
    } else {
        params.color_shift_deg
    };

    let mut ops = Vec::new();
    for layer in &comp.layers {
        // Shadows.
        for el in &layer.elements {
            let offset = shadow_offset(
                params.shadow_policy,
                stage.center(),
                comp.vanishing_point,
                el.center(),
                params.shadow_offset,
            );
            ops.push(DrawOp::ShadowRect {
                rect: el.rect() + offset,
                radius: params.corner_radius,
                fill: Rgb8::BLACK,
            });
        }

        // Adjacent-pair connectors, circular; needs at least two elements.
        if layer.elements.len() >= 2 {
            let stroke = connector_stroke(layer.kind);
            for (i, el) in layer.elements.iter().enumerate() {
                let next = &layer.elements[(i + 1) % layer.elements.len()];
                ops.push(DrawOp::Connector {
                    a: el.center(),
                    b: next.center(),
                    stroke,
                });
            }
        }

        // Fills.
        for el in &layer.elements {
            ops.push(DrawOp::FillRect {
                rect: el.rect(),
                radius: params.corner_radius,
                fill: element_fill(el, layer, stage, shift_deg, &params),
                stroke: Rgb8::BLACK,
            });
        }

        // Ornaments.
        for el in &layer.elements {
            if let Some(o) = &el.ornament {
                ops.push(DrawOp::OrnamentLine {
                    a: o.pivot,
                    b: o.tip_at(frame.0, params.antenna_rpm, fps),
                    stroke: Rgb8::BLACK,
                });
            }
        }
    }

    Ok(ScenePlan {
        canvas,
        background: Rgb8::gray(BACKGROUND_GRAY),
        ops,
    })
}

/// Back-layer connectors are white so they read against the gray field;
/// middle/front connectors are black.
fn connector_stroke(kind: LayerKind) -> Rgb8 {
    match kind {
        LayerKind::Back => Rgb8::WHITE,
        LayerKind::Middle | LayerKind::Front => Rgb8::BLACK,
    }
}

/// Stored colors are authoritative except under auto-pulse, where gradient
/// layers are recomputed live from frame time.
fn element_fill(
    el: &Element,
    layer: &Layer,
    stage: Stage,
    shift_deg: f64,
    params: &Params,
) -> Rgb8 {
    if params.auto_pulse && layer.kind == LayerKind::Front {
        color::gradient(el.pos, stage, shift_deg, params.darkness)
    } else {
        el.color
    }
}

/// Shadow displacement for one element. Zero distance between the element
/// center and the reference point skips the offset entirely.
fn shadow_offset(
    policy: ShadowPolicy,
    stage_center: Point,
    vanishing_point: Point,
    el_center: Point,
    amount: f64,
) -> Vec2 {
    match policy {
        ShadowPolicy::CanvasCenter => {
            let d = stage_center - el_center;
            let dist = d.hypot();
            if dist > 0.0 {
                d * (amount / dist)
            } else {
                Vec2::ZERO
            }
        }
        ShadowPolicy::VanishingPoint => {
            let d = el_center - vanishing_point;
            if d.hypot() > 0.0 {
                let angle = d.y.atan2(d.x);
                Vec2::new(angle.cos(), angle.sin()) * amount
            } else {
                Vec2::ZERO
            }
        }
    }
}
