use std::f64::consts::TAU;

use crate::foundation::{
    core::{Fps, Point, Rect},
    rng::Rng,
};

/// Corner anchors are pulled in from the rectangle corners by this margin.
pub const ANCHOR_INSET: f64 = 10.0;

/// Rotation direction of an ornament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Spin {
    Cw,
    Ccw,
}

impl Spin {
    pub fn sign(self) -> f64 {
        match self {
            Self::Cw => 1.0,
            Self::Ccw => -1.0,
        }
    }
}

/// Rotating line decoration pivoted on an element's boundary. The stored
/// state is the spawn-time snapshot; the live angle is a pure function of
/// elapsed frames, so animation is resumable and replayable.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ornament {
    pub pivot: Point,
    pub length: f64,
    pub angle0: f64,
    pub direction: Spin,
}

/// The 8 candidate pivot points on a rectangle boundary: 4 inset corners
/// and 4 edge midpoints.
pub fn anchors(rect: Rect) -> [Point; 8] {
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
    let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    [
        Point::new(x0 + ANCHOR_INSET, y0 + ANCHOR_INSET),
        Point::new(x1 - ANCHOR_INSET, y0 + ANCHOR_INSET),
        Point::new(x0 + ANCHOR_INSET, y1 - ANCHOR_INSET),
        Point::new(x1 - ANCHOR_INSET, y1 - ANCHOR_INSET),
        Point::new(cx, y0),
        Point::new(x1, cy),
        Point::new(cx, y1),
        Point::new(x0, cy),
    ]
}

impl Ornament {
    /// Bernoulli trial with probability `density`; on success, an ornament
    /// anchored at one of the 8 boundary points with length proportional to
    /// the element's mean extent.
    pub fn spawn(rect: Rect, density: f64, length_mult: f64, rng: &mut Rng) -> Option<Self> {
        if !rng.chance(density) {
            return None;
        }
        let pivot = *rng.pick(&anchors(rect));
        let mean_extent = (rect.width() + rect.height()) / 2.0;
        Some(Self {
            pivot,
            length: mean_extent * length_mult.max(0.0) * rng.range(0.8, 1.2),
            angle0: rng.range(0.0, TAU),
            direction: if rng.chance(0.5) { Spin::Cw } else { Spin::Ccw },
        })
    }

    /// Angle after `frames` rendered frames at the given RPM: a constant
    /// angular step per frame, `rpm * 2pi / (fps * 60)`.
    pub fn angle_at(&self, frames: u64, rpm: f64, fps: Fps) -> f64 {
        let step = rpm * TAU / (fps.as_f64() * 60.0);
        self.angle0 + self.direction.sign() * step * frames as f64
    }

    /// Free endpoint of the ornament line at the given frame.
    pub fn tip_at(&self, frames: u64, rpm: f64, fps: Fps) -> Point {
        let a = self.angle_at(frames, rpm, fps);
        Point::new(
            self.pivot.x + a.cos() * self.length,
            self.pivot.y + a.sin() * self.length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(100.0, 200.0, 300.0, 300.0)
    }

    #[test]
    fn density_zero_never_spawns() {
        let mut rng = Rng::seed_from_u64(1);
        for _ in 0..256 {
            assert!(Ornament::spawn(rect(), 0.0, 1.0, &mut rng).is_none());
        }
    }

    #[test]
    fn density_one_always_spawns() {
        let mut rng = Rng::seed_from_u64(2);
        for _ in 0..256 {
            assert!(Ornament::spawn(rect(), 1.0, 1.0, &mut rng).is_some());
        }
    }

    #[test]
    fn pivot_is_one_of_the_eight_anchors() {
        let mut rng = Rng::seed_from_u64(3);
        let candidates = anchors(rect());
        for _ in 0..128 {
            let o = Ornament::spawn(rect(), 1.0, 1.0, &mut rng).unwrap();
            assert!(candidates.contains(&o.pivot));
        }
    }

    #[test]
    fn length_scales_with_mean_extent() {
        let mut rng = Rng::seed_from_u64(4);
        // rect is 200x100 -> mean extent 150.
        for _ in 0..128 {
            let o = Ornament::spawn(rect(), 1.0, 2.0, &mut rng).unwrap();
            assert!(o.length >= 150.0 * 2.0 * 0.8);
            assert!(o.length < 150.0 * 2.0 * 1.2);
        }
    }

    #[test]
    fn angle_is_pure_in_elapsed_frames() {
        let fps = Fps::new(60, 1).unwrap();
        let o = Ornament {
            pivot: Point::new(0.0, 0.0),
            length: 10.0,
            angle0: 1.0,
            direction: Spin::Cw,
        };
        assert_eq!(o.angle_at(0, 30.0, fps), 1.0);
        // 30 rpm at 60 fps: one full turn takes 120 frames.
        let full_turn = o.angle_at(120, 30.0, fps);
        assert!((full_turn - (1.0 + TAU)).abs() < 1e-9);
        // Idempotent: the same frame always yields the same angle.
        assert_eq!(o.angle_at(77, 30.0, fps), o.angle_at(77, 30.0, fps));
    }

    #[test]
    fn ccw_spins_opposite() {
        let fps = Fps::default();
        let base = Ornament {
            pivot: Point::new(0.0, 0.0),
            length: 10.0,
            angle0: 0.0,
            direction: Spin::Cw,
        };
        let mirrored = Ornament {
            direction: Spin::Ccw,
            ..base
        };
        assert_eq!(
            base.angle_at(10, 15.0, fps),
            -mirrored.angle_at(10, 15.0, fps)
        );
    }

    #[test]
    fn tip_sits_at_length_from_pivot() {
        let fps = Fps::default();
        let o = Ornament {
            pivot: Point::new(5.0, 5.0),
            length: 10.0,
            angle0: 0.3,
            direction: Spin::Ccw,
        };
        let tip = o.tip_at(42, 20.0, fps);
        let d = ((tip.x - 5.0).powi(2) + (tip.y - 5.0).powi(2)).sqrt();
        assert!((d - 10.0).abs() < 1e-9);
    }
}
