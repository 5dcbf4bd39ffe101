use crate::composition::model::LayerKind;
use crate::foundation::error::{LanderError, LanderResult};
use crate::place::PlacementMode;

/// How shadow offset directions are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShadowPolicy {
    /// Offset each shadow toward the stage center.
    #[default]
    CanvasCenter,
    /// Offset each shadow away from the composition's per-regeneration
    /// random vanishing point.
    VanishingPoint,
}

/// The full parameter panel. Defaults mirror the original control panel's
/// slider positions; `clamped()` pins every field into its slider range so
/// the core never sees out-of-range values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Params {
    pub mode: PlacementMode,

    pub back_count: usize,
    pub middle_count: usize,
    pub front_count: usize,

    pub back_max_size: f64,
    pub middle_max_size: f64,
    pub front_max_size: f64,

    pub corner_radius: f64,
    pub shadow_offset: f64,
    pub shadow_policy: ShadowPolicy,

    pub back_gray: f64,
    pub middle_gray: f64,
    pub color_shift_deg: f64,
    pub darkness: f64,
    /// When set, the effective color shift is a 20s triangle wave of frame
    /// time instead of `color_shift_deg`.
    pub auto_pulse: bool,

    pub antenna_density: f64,
    pub antenna_length: f64,
    pub antenna_rpm: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            mode: PlacementMode::Random,
            back_count: 5,
            middle_count: 0,
            front_count: 5,
            back_max_size: 400.0,
            middle_max_size: 300.0,
            front_max_size: 250.0,
            corner_radius: 10.0,
            shadow_offset: 15.0,
            shadow_policy: ShadowPolicy::CanvasCenter,
            back_gray: 180.0,
            middle_gray: 140.0,
            color_shift_deg: 0.0,
            darkness: 0.0,
            auto_pulse: false,
            antenna_density: 0.3,
            antenna_length: 1.0,
            antenna_rpm: 10.0,
        }
    }
}

impl Params {
    pub fn clamped(&self) -> Self {
        Self {
            mode: self.mode,
            back_count: self.back_count.clamp(2, 25),
            middle_count: self.middle_count.min(25),
            front_count: self.front_count.clamp(2, 25),
            back_max_size: self.back_max_size.clamp(100.0, 600.0),
            middle_max_size: self.middle_max_size.clamp(100.0, 600.0),
            front_max_size: self.front_max_size.clamp(50.0, 400.0),
            corner_radius: self.corner_radius.clamp(0.0, 50.0),
            shadow_offset: self.shadow_offset.clamp(0.0, 30.0),
            shadow_policy: self.shadow_policy,
            back_gray: self.back_gray.clamp(100.0, 220.0),
            middle_gray: self.middle_gray.clamp(100.0, 220.0),
            color_shift_deg: self.color_shift_deg.rem_euclid(360.0),
            darkness: self.darkness.clamp(0.0, 1.0),
            auto_pulse: self.auto_pulse,
            antenna_density: self.antenna_density.clamp(0.0, 1.0),
            antenna_length: self.antenna_length.clamp(0.25, 3.0),
            antenna_rpm: self.antenna_rpm.clamp(0.0, 60.0),
        }
    }

    pub fn validate(&self) -> LanderResult<()> {
        for (name, v) in [
            ("back_max_size", self.back_max_size),
            ("middle_max_size", self.middle_max_size),
            ("front_max_size", self.front_max_size),
            ("corner_radius", self.corner_radius),
            ("shadow_offset", self.shadow_offset),
            ("back_gray", self.back_gray),
            ("middle_gray", self.middle_gray),
            ("color_shift_deg", self.color_shift_deg),
            ("darkness", self.darkness),
            ("antenna_density", self.antenna_density),
            ("antenna_length", self.antenna_length),
            ("antenna_rpm", self.antenna_rpm),
        ] {
            if !v.is_finite() {
                return Err(LanderError::validation(format!("{name} must be finite")));
            }
        }
        if self.back_count > 25 || self.middle_count > 25 || self.front_count > 25 {
            return Err(LanderError::validation("layer counts must be <= 25"));
        }
        Ok(())
    }

    /// Count and max-size a layer kind currently owns.
    pub fn layer_count(&self, kind: LayerKind) -> usize {
        match kind {
            LayerKind::Back => self.back_count,
            LayerKind::Middle => self.middle_count,
            LayerKind::Front => self.front_count,
        }
    }

    pub fn layer_max_size(&self, kind: LayerKind) -> f64 {
        match kind {
            LayerKind::Back => self.back_max_size,
            LayerKind::Middle => self.middle_max_size,
            LayerKind::Front => self.front_max_size,
        }
    }

    /// Slider gray for the gray-policy layers; `None` for gradient layers.
    pub fn layer_gray(&self, kind: LayerKind) -> Option<f64> {
        match kind {
            LayerKind::Back => Some(self.back_gray),
            LayerKind::Middle => Some(self.middle_gray),
            LayerKind::Front => None,
        }
    }
}
