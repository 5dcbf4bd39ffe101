//! Lander is a procedural layered-rectangle composition engine.
//!
//! A [`Composition`] owns ordered layers of placed, sized and colored
//! rectangles plus a vanishing point biasing shadow directions. Sixteen
//! [`PlacementMode`]s map element indices into stage positions; weighted
//! [`SizeClass`] draws with stable per-element interpolation ratios derive
//! dimensions; two color policies (gray+offset and position gradient with a
//! continuous hue rotation) derive fills; optional antenna [`Ornament`]s
//! rotate at a configured RPM.
//!
//! # Pipeline overview
//!
//! 1. **Generate**: `Params + seed -> Composition` (or incrementally
//!    reconcile counts / reapply sizes, colors, ornaments)
//! 2. **Compile**: `Composition + FrameIndex -> ScenePlan` (ordered draw
//!    ops: shadows, connectors, fills, ornament lines per layer)
//! 3. **Render**: `ScenePlan -> RgbaImage` (CPU backend)
//!
//! Evaluation is deterministic: a fixed seed reproduces a composition
//! exactly, and compiling the same frame twice yields the same plan.
#![forbid(unsafe_code)]

mod color;
mod composition;
mod eval;
mod foundation;
mod ornament;
mod place;
mod render;
mod size;

pub use color::{GRAY_MAX, GRAY_MIN, GRAY_OFFSET_SPAN, gradient, gray, hue_rotate, pulse_shift_deg};
pub use composition::model::{ColorSeed, Composition, Element, Layer, LayerKind};
pub use composition::params::{Params, ShadowPolicy};
pub use eval::scene::{DrawOp, ScenePlan, compile_frame};
pub use foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgb8, Stage, Vec2};
pub use foundation::error::{LanderError, LanderResult};
pub use foundation::rng::Rng;
pub use ornament::{ANCHOR_INSET, Ornament, Spin, anchors};
pub use place::{PlacementMode, place};
pub use render::raster::render_frame;
pub use size::{SizeClass, SizePolicy};
