use crate::foundation::rng::Rng;

/// Discrete size category assigned at element creation. Which categories a
/// layer can produce depends on its [`SizePolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SizeClass {
    Tiny,
    Small,
    Medium,
    Large,
    /// Wide, flat slab; height interpolated over an absolute pixel range.
    Panel,
    /// Long, thin bar; height interpolated over an absolute pixel range.
    Beam,
}

/// Per-layer size policy: the weighted class distribution and the
/// interpolation ranges mapping (class, ratios, max size) to dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SizePolicy {
    Back,
    Front,
}

impl SizePolicy {
    /// Weighted random class draw.
    ///
    /// Back: 30% Large, 30% Medium, 40% split evenly Small/Beam.
    /// Front: 20% Tiny, 30% Small, 30% Medium, 20% split 60/40 Panel/Large.
    pub fn classify(self, rng: &mut Rng) -> SizeClass {
        let r = rng.unit();
        match self {
            Self::Back => {
                if r < 0.3 {
                    SizeClass::Large
                } else if r < 0.6 {
                    SizeClass::Medium
                } else if rng.chance(0.5) {
                    SizeClass::Small
                } else {
                    SizeClass::Beam
                }
            }
            Self::Front => {
                if r < 0.2 {
                    SizeClass::Tiny
                } else if r < 0.5 {
                    SizeClass::Small
                } else if r < 0.8 {
                    SizeClass::Medium
                } else if rng.chance(0.6) {
                    SizeClass::Panel
                } else {
                    SizeClass::Large
                }
            }
        }
    }

    /// Map a class plus the element's fixed interpolation ratios onto
    /// concrete dimensions under the layer's current max size.
    ///
    /// Idempotent and total: classes the policy's classifier never emits
    /// alias to the nearest in-policy range, and ratios are clamped.
    pub fn dimensions(
        self,
        class: SizeClass,
        ratio_w: f64,
        ratio_h: f64,
        max_size: f64,
    ) -> (f64, f64) {
        let rw = ratio_w.clamp(0.0, 1.0);
        let rh = ratio_h.clamp(0.0, 1.0);
        let m = max_size.max(0.0);

        match (self, class) {
            (Self::Back, SizeClass::Large) => {
                (lerp(m * 0.5, m, rw), lerp(m * 0.4, m * 0.9, rh))
            }
            (Self::Back, SizeClass::Medium) => {
                (lerp(m * 0.24, m * 0.5, rw), lerp(m * 0.2, m * 0.5, rh))
            }
            (Self::Back, SizeClass::Small | SizeClass::Tiny) => {
                (lerp(m * 0.08, m * 0.24, rw), lerp(m * 0.08, m * 0.24, rh))
            }
            (Self::Back, SizeClass::Beam | SizeClass::Panel) => {
                (lerp(m * 0.3, m * 0.8, rw), lerp(20.0, 60.0, rh))
            }
            (Self::Front, SizeClass::Tiny) => {
                (lerp(20.0, m * 0.2, rw), lerp(20.0, m * 0.32, rh))
            }
            (Self::Front, SizeClass::Small) => {
                (lerp(m * 0.2, m * 0.48, rw), lerp(m * 0.2, m * 0.48, rh))
            }
            (Self::Front, SizeClass::Medium) => {
                (lerp(m * 0.48, m * 0.8, rw), lerp(m * 0.4, m * 0.72, rh))
            }
            (Self::Front, SizeClass::Panel | SizeClass::Beam) => {
                (lerp(m * 0.72, m * 1.4, rw), lerp(40.0, m * 0.4, rh))
            }
            (Self::Front, SizeClass::Large) => {
                (lerp(m * 0.72, m * 1.12, rw), lerp(m * 0.64, m * 1.04, rh))
            }
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
