use crate::foundation::error::{LanderError, LanderResult};

pub use kurbo::{Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> LanderResult<Self> {
        if den == 0 {
            return Err(LanderError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LanderError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Output surface: total pixel dimensions plus the strip of height
/// `control_strip` reserved at the bottom for the parameter panel.
/// Placement and color gradients only ever see the remaining stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub control_strip: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, control_strip: u32) -> LanderResult<Self> {
        if width == 0 || height == 0 {
            return Err(LanderError::validation("canvas width/height must be > 0"));
        }
        if control_strip >= height {
            return Err(LanderError::validation(
                "canvas control_strip must leave a usable stage",
            ));
        }
        Ok(Self {
            width,
            height,
            control_strip,
        })
    }

    /// Usable placement bounds: canvas minus the reserved control strip.
    pub fn stage(self) -> Stage {
        Stage {
            width: f64::from(self.width),
            height: f64::from(self.height - self.control_strip),
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 900,
            height: 1040,
            control_strip: 40,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

impl Stage {
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn clamp(self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Straight (non-premultiplied) opaque RGB; every drawable in a scene is
/// fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Quantize f64 channels, clamping into [0,255].
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        fn q(c: f64) -> u8 {
            c.round().clamp(0.0, 255.0) as u8
        }
        Self {
            r: q(r),
            g: q(g),
            b: q(b),
        }
    }
}
