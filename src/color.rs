//! Color derivation. Both policies are pure in (position, layer
//! parameters): they never read or mutate geometry. Channels are computed
//! in f64 and quantized to [`Rgb8`] at the very end.

use crate::foundation::core::{Point, Rgb8, Stage};

/// Live gray range for the gray+variation policy.
pub const GRAY_MIN: f64 = 100.0;
pub const GRAY_MAX: f64 = 220.0;
/// Per-element gray offset is drawn once from [-GRAY_OFFSET_SPAN, +span].
pub const GRAY_OFFSET_SPAN: f64 = 30.0;

/// Blue channel constant of the position-gradient base color.
const GRADIENT_BLUE: f64 = 150.0;

/// Auto-pulse triangle wave period.
const PULSE_PERIOD_SECS: f64 = 20.0;

/// Gray+variation policy (back/middle layers): the layer-wide slider value
/// plus the element's stored offset, clamped into the live gray range.
pub fn gray(layer_gray: f64, offset: f64) -> Rgb8 {
    let v = (layer_gray + offset).clamp(GRAY_MIN, GRAY_MAX);
    Rgb8::from_channels(v, v, v)
}

/// Position-gradient policy (front layer): base RGB from the element's
/// stage-relative position, hue-rotated by `shift_deg` and scaled toward
/// black by `darkness`.
pub fn gradient(pos: Point, stage: Stage, shift_deg: f64, darkness: f64) -> Rgb8 {
    let base = [
        pos.x / stage.width * 255.0,
        pos.y / stage.height * 255.0,
        GRADIENT_BLUE,
    ];
    let [r, g, b] = hue_rotate(base, shift_deg.rem_euclid(360.0) / 360.0);
    let k = 1.0 - darkness.clamp(0.0, 1.0);
    Rgb8::from_channels(r * k, g * k, b * k)
}

/// Cyclic channel cross-fade: `shift_percent` in [0,1) is split into three
/// equal sub-ranges; within each, the source channels feeding r/g/b are
/// rotated one step and linearly cross-faded. Continuous at the sub-range
/// boundaries and 360-periodic (t=1 of one segment equals t=0 of the next).
pub fn hue_rotate(base: [f64; 3], shift_percent: f64) -> [f64; 3] {
    let p = shift_percent.rem_euclid(1.0);
    let [r, g, b] = base;

    if p < 1.0 / 3.0 {
        let t = p * 3.0;
        [lerp(r, g, t), lerp(g, b, t), lerp(b, r, t)]
    } else if p < 2.0 / 3.0 {
        let t = (p - 1.0 / 3.0) * 3.0;
        [lerp(g, b, t), lerp(b, r, t), lerp(r, g, t)]
    } else {
        let t = (p - 2.0 / 3.0) * 3.0;
        [lerp(b, r, t), lerp(r, g, t), lerp(g, b, t)]
    }
}

/// Auto-pulse color shift: a 20-second triangle wave sweeping 0..360
/// degrees and back. Time is injected so replays are deterministic.
pub fn pulse_shift_deg(secs: f64) -> f64 {
    let phase = secs.rem_euclid(PULSE_PERIOD_SECS) / PULSE_PERIOD_SECS;
    let tri = if phase < 0.5 {
        phase * 2.0
    } else {
        2.0 - phase * 2.0
    };
    tri * 360.0
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
