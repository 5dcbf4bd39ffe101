use std::f64::consts::TAU;
use std::str::FromStr;

use crate::foundation::{
    core::{Point, Stage},
    rng::Rng,
};

/// Spatial distribution law shared by every layer of a composition.
///
/// Serializes as the panel label ("Grid + Jitter"); deserializing an
/// unrecognized mode name falls back to `Random` — mode selection is never
/// an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlacementMode {
    Random,
    RuleOfThirds,
    Radial,
    GridJitter,
    Symmetrical,
    DiagonalBias,
    CenterCluster,
    EdgeFocus,
    HorizontalBands,
    VerticalColumns,
    FibonacciSpiral,
    CornersFocus,
    XPattern,
    CircleRing,
    ScatteredClusters,
    GoldenRatio,
}

impl PlacementMode {
    pub const ALL: [PlacementMode; 16] = [
        PlacementMode::Random,
        PlacementMode::RuleOfThirds,
        PlacementMode::Radial,
        PlacementMode::GridJitter,
        PlacementMode::Symmetrical,
        PlacementMode::DiagonalBias,
        PlacementMode::CenterCluster,
        PlacementMode::EdgeFocus,
        PlacementMode::HorizontalBands,
        PlacementMode::VerticalColumns,
        PlacementMode::FibonacciSpiral,
        PlacementMode::CornersFocus,
        PlacementMode::XPattern,
        PlacementMode::CircleRing,
        PlacementMode::ScatteredClusters,
        PlacementMode::GoldenRatio,
    ];

    /// Panel label for the mode, as shown in the selector dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::RuleOfThirds => "Rule of Thirds",
            Self::Radial => "Radial",
            Self::GridJitter => "Grid + Jitter",
            Self::Symmetrical => "Symmetrical",
            Self::DiagonalBias => "Diagonal Bias",
            Self::CenterCluster => "Center Cluster",
            Self::EdgeFocus => "Edge Focus",
            Self::HorizontalBands => "Horizontal Bands",
            Self::VerticalColumns => "Vertical Columns",
            Self::FibonacciSpiral => "Fibonacci Spiral",
            Self::CornersFocus => "Corners Focus",
            Self::XPattern => "X Pattern",
            Self::CircleRing => "Circle Ring",
            Self::ScatteredClusters => "Scattered Clusters",
            Self::GoldenRatio => "Golden Ratio",
        }
    }
}

impl PlacementMode {
    /// Accepts both panel labels ("Grid + Jitter") and variant names
    /// ("GridJitter"); anything else is `Random`.
    fn parse_lossy(s: &str) -> Self {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.label().eq_ignore_ascii_case(trimmed)
                    || format!("{m:?}").eq_ignore_ascii_case(trimmed)
            })
            .unwrap_or(Self::Random)
    }
}

impl FromStr for PlacementMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lossy(s))
    }
}

impl std::fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for PlacementMode {
    fn from(s: String) -> Self {
        Self::parse_lossy(&s)
    }
}

impl From<PlacementMode> for String {
    fn from(mode: PlacementMode) -> Self {
        mode.label().to_string()
    }
}

const GOLDEN_ANGLE_DEG: f64 = 137.5;

/// Position element `index` of `total` inside `stage` according to `mode`.
///
/// Re-invocable per element: incremental layer growth calls this with only
/// the new indices (and the target total as context for index-dependent
/// modes). The result is always clamped into the stage.
pub fn place(mode: PlacementMode, stage: Stage, index: usize, total: usize, rng: &mut Rng) -> Point {
    let w = stage.width;
    let h = stage.height;
    let total = total.max(1);
    let i = index as f64;

    let p = match mode {
        PlacementMode::Random => Point::new(rng.range(0.0, w), rng.range(0.0, h)),

        PlacementMode::RuleOfThirds => {
            let targets = [
                Point::new(w / 3.0, h / 3.0),
                Point::new(w * 2.0 / 3.0, h / 3.0),
                Point::new(w / 3.0, h * 2.0 / 3.0),
                Point::new(w * 2.0 / 3.0, h * 2.0 / 3.0),
                Point::new(w / 2.0, h / 2.0),
            ];
            let target = *rng.pick(&targets);
            Point::new(
                target.x + rng.gaussian(0.0, 80.0),
                target.y + rng.gaussian(0.0, 80.0),
            )
        }

        PlacementMode::Radial => {
            // Deterministic angle, random radius.
            let angle = i / total as f64 * TAU;
            let radius = rng.range(100.0, 400.0);
            Point::new(
                w / 2.0 + angle.cos() * radius,
                h / 2.0 + angle.sin() * radius,
            )
        }

        PlacementMode::GridJitter => {
            let cols = (total as f64).sqrt().ceil() as usize;
            let rows = total.div_ceil(cols);
            let grid_x = (index % cols) as f64 / cols as f64 * w;
            let grid_y = (index / cols) as f64 / rows as f64 * h;
            Point::new(
                grid_x + rng.range(-50.0, 50.0),
                grid_y + rng.range(-50.0, 50.0),
            )
        }

        PlacementMode::Symmetrical => {
            // Half-split: even indices populate the left half, odd indices
            // mirror an independently sampled left-half position.
            let x = if index % 2 == 0 {
                rng.range(0.0, w / 2.0)
            } else {
                w - rng.range(0.0, w / 2.0)
            };
            Point::new(x, rng.range(0.0, h))
        }

        PlacementMode::DiagonalBias => {
            let t = rng.unit();
            Point::new(
                w * t + rng.gaussian(0.0, 60.0),
                h * t + rng.gaussian(0.0, 60.0),
            )
        }

        PlacementMode::CenterCluster => Point::new(
            w / 2.0 + rng.gaussian(0.0, w / 5.0),
            h / 2.0 + rng.gaussian(0.0, h / 5.0),
        ),

        PlacementMode::EdgeFocus => {
            let x = if rng.chance(0.5) {
                if rng.chance(0.5) {
                    rng.range(0.0, w * 0.25)
                } else {
                    rng.range(w * 0.75, w)
                }
            } else {
                rng.range(0.0, w)
            };
            let y = if rng.chance(0.5) {
                if rng.chance(0.5) {
                    rng.range(0.0, h * 0.25)
                } else {
                    rng.range(h * 0.75, h)
                }
            } else {
                rng.range(0.0, h)
            };
            Point::new(x, y)
        }

        PlacementMode::HorizontalBands => {
            let bands = 3.0;
            let band_height = h / bands;
            let band = (rng.unit() * bands).floor().min(bands - 1.0);
            Point::new(
                rng.range(0.0, w),
                band * band_height + rng.range(0.0, band_height) * 0.8 + band_height * 0.1,
            )
        }

        PlacementMode::VerticalColumns => {
            let cols = 4.0;
            let col_width = w / cols;
            let col = (rng.unit() * cols).floor().min(cols - 1.0);
            Point::new(
                col * col_width + rng.range(0.0, col_width) * 0.8 + col_width * 0.1,
                rng.range(0.0, h),
            )
        }

        PlacementMode::FibonacciSpiral => {
            let theta = i * GOLDEN_ANGLE_DEG.to_radians();
            let r = 20.0 * i.sqrt();
            Point::new(w / 2.0 + r * theta.cos(), h / 2.0 + r * theta.sin())
        }

        PlacementMode::CornersFocus => {
            let corners = [
                Point::new(w * 0.15, h * 0.15),
                Point::new(w * 0.85, h * 0.15),
                Point::new(w * 0.15, h * 0.85),
                Point::new(w * 0.85, h * 0.85),
            ];
            let corner = *rng.pick(&corners);
            Point::new(
                corner.x + rng.gaussian(0.0, 60.0),
                corner.y + rng.gaussian(0.0, 60.0),
            )
        }

        PlacementMode::XPattern => {
            let t = rng.unit();
            let x = if rng.chance(0.5) { w * t } else { w * (1.0 - t) };
            Point::new(x + rng.gaussian(0.0, 40.0), h * t + rng.gaussian(0.0, 40.0))
        }

        PlacementMode::CircleRing => {
            let angle = rng.range(0.0, TAU);
            let radius = rng.range(200.0, 350.0);
            Point::new(
                w / 2.0 + angle.cos() * radius,
                h / 2.0 + angle.sin() * radius,
            )
        }

        PlacementMode::ScatteredClusters => {
            let anchors = [
                Point::new(w * 0.25, h * 0.3),
                Point::new(w * 0.75, h * 0.3),
                Point::new(w * 0.5, h * 0.6),
                Point::new(w * 0.2, h * 0.8),
                Point::new(w * 0.8, h * 0.8),
            ];
            let anchor = *rng.pick(&anchors);
            Point::new(
                anchor.x + rng.gaussian(0.0, 70.0),
                anchor.y + rng.gaussian(0.0, 70.0),
            )
        }

        PlacementMode::GoldenRatio => {
            let gx = *rng.pick(&[w * 0.382, w * 0.618]);
            let gy = *rng.pick(&[h * 0.382, h * 0.618]);
            Point::new(gx + rng.gaussian(0.0, 60.0), gy + rng.gaussian(0.0, 60.0))
        }
    };

    stage.clamp(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Canvas;

    fn stage() -> Stage {
        Canvas::default().stage()
    }

    #[test]
    fn placement_is_deterministic_per_seed() {
        for mode in PlacementMode::ALL {
            let mut a = Rng::seed_from_u64(99);
            let mut b = Rng::seed_from_u64(99);
            for i in 0..8 {
                assert_eq!(
                    place(mode, stage(), i, 8, &mut a),
                    place(mode, stage(), i, 8, &mut b),
                    "mode {mode:?} diverged at index {i}"
                );
            }
        }
    }

    #[test]
    fn all_modes_stay_within_stage() {
        let stage = stage();
        for mode in PlacementMode::ALL {
            let mut rng = Rng::seed_from_u64(1234);
            for total in [1usize, 2, 9, 25] {
                for i in 0..total {
                    let p = place(mode, stage, i, total, &mut rng);
                    assert!(stage.contains(p), "mode {mode:?} escaped: {p:?}");
                }
            }
        }
    }

    #[test]
    fn zero_total_is_treated_as_one() {
        let mut rng = Rng::seed_from_u64(5);
        let p = place(PlacementMode::Radial, stage(), 0, 0, &mut rng);
        assert!(stage().contains(p));
    }

    #[test]
    fn grid_jitter_nine_elements_center_cell() {
        // total=9 -> cols=3, rows=3; index 4 is the middle cell.
        let stage = stage();
        let mut rng = Rng::seed_from_u64(42);
        for _ in 0..64 {
            let p = place(PlacementMode::GridJitter, stage, 4, 9, &mut rng);
            let cell_x = stage.width / 3.0;
            let cell_y = stage.height / 3.0;
            assert!((cell_x - 50.0..=cell_x + 50.0).contains(&p.x));
            assert!((cell_y - 50.0..=cell_y + 50.0).contains(&p.y));
        }
    }

    #[test]
    fn radial_angle_is_even_spaced() {
        // With radius fixed by the rng draw, index 0 of 4 sits due east of
        // center and index 1 due south (y grows downward).
        let stage = stage();
        let mut rng = Rng::seed_from_u64(7);
        let p0 = place(PlacementMode::Radial, stage, 0, 4, &mut rng);
        assert!((p0.y - stage.height / 2.0).abs() < 1e-9);
        assert!(p0.x > stage.width / 2.0);

        let p1 = place(PlacementMode::Radial, stage, 1, 4, &mut rng);
        assert!((p1.x - stage.width / 2.0).abs() < 1e-6);
        assert!(p1.y > stage.height / 2.0);
    }

    #[test]
    fn fibonacci_index_zero_is_center() {
        let stage = stage();
        let mut rng = Rng::seed_from_u64(0);
        let p = place(PlacementMode::FibonacciSpiral, stage, 0, 10, &mut rng);
        assert_eq!(p, stage.center());
    }

    #[test]
    fn symmetrical_alternates_halves() {
        let stage = stage();
        let mut rng = Rng::seed_from_u64(11);
        for i in 0..32 {
            let p = place(PlacementMode::Symmetrical, stage, i, 32, &mut rng);
            if i % 2 == 0 {
                assert!(p.x <= stage.width / 2.0);
            } else {
                assert!(p.x >= stage.width / 2.0);
            }
        }
    }

    #[test]
    fn horizontal_bands_inset_within_band() {
        let stage = stage();
        let band_height = stage.height / 3.0;
        let mut rng = Rng::seed_from_u64(13);
        for _ in 0..128 {
            let p = place(PlacementMode::HorizontalBands, stage, 0, 5, &mut rng);
            let band = (p.y / band_height).floor().min(2.0);
            let local = p.y - band * band_height;
            assert!(local >= band_height * 0.1 - 1e-9);
            assert!(local <= band_height * 0.9 + 1e-9);
        }
    }

    #[test]
    fn unknown_mode_name_parses_as_random() {
        assert_eq!(
            "definitely not a mode".parse::<PlacementMode>().unwrap(),
            PlacementMode::Random
        );
        assert_eq!(
            "Grid + Jitter".parse::<PlacementMode>().unwrap(),
            PlacementMode::GridJitter
        );
        assert_eq!(
            "fibonaccispiral".parse::<PlacementMode>().unwrap(),
            PlacementMode::FibonacciSpiral
        );
    }

    #[test]
    fn unknown_mode_json_deserializes_as_random() {
        let m: PlacementMode = serde_json::from_str("\"NotAMode\"").unwrap();
        assert_eq!(m, PlacementMode::Random);
        let m: PlacementMode = serde_json::from_str("\"CircleRing\"").unwrap();
        assert_eq!(m, PlacementMode::CircleRing);
    }
}
