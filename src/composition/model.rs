use crate::{
    color,
    composition::params::Params,
    foundation::{
        core::{Canvas, Point, Rect, Rgb8},
        error::{LanderError, LanderResult},
        rng::Rng,
    },
    ornament::Ornament,
    place,
    size::{SizeClass, SizePolicy},
};

/// Depth band of a layer. Bands render back to front; back and middle use
/// the gray+variation color policy, front the position gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LayerKind {
    Back,
    Middle,
    Front,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Back, LayerKind::Middle, LayerKind::Front];

    pub fn size_policy(self) -> SizePolicy {
        match self {
            Self::Back | Self::Middle => SizePolicy::Back,
            Self::Front => SizePolicy::Front,
        }
    }
}

/// Per-element color identity: gray layers store a fixed offset drawn at
/// creation; gradient layers derive color live from position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColorSeed {
    GrayOffset(f64),
    Gradient,
}

/// One placed rectangle. `width`/`height` are always derivable purely from
/// `(size_class, ratio_w, ratio_h, layer max_size)`; the ratios are rolled
/// once at creation and never re-rolled by a parameter change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub pos: Point,
    pub size_class: SizeClass,
    pub ratio_w: f64,
    pub ratio_h: f64,
    pub width: f64,
    pub height: f64,
    pub color_seed: ColorSeed,
    pub color: Rgb8,
    pub ornament: Option<Ornament>,
}

impl Element {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            self.pos.x + self.width,
            self.pos.y + self.height,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }
}

/// An ordered run of elements sharing one size/color policy and one depth
/// band. Insertion order is render order and adjacency order (circular).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub elements: Vec<Element>,
}

/// The full scene state: ordered layers plus the per-regeneration vanishing
/// point biasing shadow directions. All mutation happens through the
/// explicit operations below; parameter-only changes recompute exactly the
/// derived fields they own.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    pub layers: Vec<Layer>,
    pub vanishing_point: Point,
}

impl Composition {
    /// Full rebuild: discards every element and the vanishing point and
    /// regenerates all layers with fresh randomness.
    pub fn generate(params: &Params, canvas: Canvas, rng: &mut Rng) -> Self {
        let params = params.clamped();
        let stage = canvas.stage();
        let vanishing_point = Point::new(rng.range(0.0, stage.width), rng.range(0.0, stage.height));

        let layers = LayerKind::ALL
            .into_iter()
            .map(|kind| {
                let count = params.layer_count(kind);
                let elements = (0..count)
                    .map(|i| new_element(kind, &params, canvas, i, count, rng))
                    .collect();
                Layer { kind, elements }
            })
            .collect();

        tracing::debug!(mode = %params.mode, "regenerated composition");
        Self {
            layers,
            vanishing_point,
        }
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Reconcile one layer's element count with the parameters: growing
    /// appends elements placed with the target total as context, shrinking
    /// truncates from the end. Existing elements are never perturbed.
    pub fn reconcile_count(
        &mut self,
        kind: LayerKind,
        params: &Params,
        canvas: Canvas,
        rng: &mut Rng,
    ) {
        let params = params.clamped();
        let target = params.layer_count(kind);
        let Some(layer) = self.layers.iter_mut().find(|l| l.kind == kind) else {
            return;
        };

        let current = layer.elements.len();
        if target > current {
            for i in current..target {
                layer
                    .elements
                    .push(new_element(kind, &params, canvas, i, target, rng));
            }
        } else {
            layer.elements.truncate(target);
        }
    }

    /// Recompute every element's dimensions from its stored class and
    /// ratios under the current max-size parameters. Geometry only; colors,
    /// classes and ratios are untouched.
    pub fn apply_sizes(&mut self, params: &Params) {
        let params = params.clamped();
        for layer in &mut self.layers {
            let policy = layer.kind.size_policy();
            let max_size = params.layer_max_size(layer.kind);
            for el in &mut layer.elements {
                (el.width, el.height) =
                    policy.dimensions(el.size_class, el.ratio_w, el.ratio_h, max_size);
            }
        }
    }

    /// Recompute every element's color from its seed and the current color
    /// parameters. Never touches position or dimensions.
    pub fn apply_colors(&mut self, params: &Params, canvas: Canvas) {
        let params = params.clamped();
        let stage = canvas.stage();
        for layer in &mut self.layers {
            let layer_gray = params.layer_gray(layer.kind);
            for el in &mut layer.elements {
                el.color = match (el.color_seed, layer_gray) {
                    (ColorSeed::GrayOffset(offset), Some(gray)) => color::gray(gray, offset),
                    _ => color::gradient(el.pos, stage, params.color_shift_deg, params.darkness),
                };
            }
        }
    }

    /// Re-roll every ornament against the current density. Independent
    /// lifecycle: element geometry and color are untouched.
    pub fn apply_ornaments(&mut self, params: &Params, rng: &mut Rng) {
        let params = params.clamped();
        for layer in &mut self.layers {
            for el in &mut layer.elements {
                el.ornament = Ornament::spawn(
                    el.rect(),
                    params.antenna_density,
                    params.antenna_length,
                    rng,
                );
            }
        }
    }

    pub fn validate(&self) -> LanderResult<()> {
        for layer in &self.layers {
            for (i, el) in layer.elements.iter().enumerate() {
                if !(0.0..=1.0).contains(&el.ratio_w) || !(0.0..=1.0).contains(&el.ratio_h) {
                    return Err(LanderError::validation(format!(
                        "{:?} element {i} has ratios outside [0,1]",
                        layer.kind
                    )));
                }
                if !el.width.is_finite() || !el.height.is_finite() || el.width < 0.0 || el.height < 0.0
                {
                    return Err(LanderError::validation(format!(
                        "{:?} element {i} has degenerate dimensions",
                        layer.kind
                    )));
                }
                if let ColorSeed::GrayOffset(offset) = el.color_seed
                    && offset.abs() > color::GRAY_OFFSET_SPAN
                {
                    return Err(LanderError::validation(format!(
                        "{:?} element {i} gray offset exceeds span",
                        layer.kind
                    )));
                }
            }
        }
        Ok(())
    }
}

fn new_element(
    kind: LayerKind,
    params: &Params,
    canvas: Canvas,
    index: usize,
    total: usize,
    rng: &mut Rng,
) -> Element {
    let stage = canvas.stage();
    let pos = place::place(params.mode, stage, index, total, rng);

    let policy = kind.size_policy();
    let size_class = policy.classify(rng);
    let ratio_w = rng.unit();
    let ratio_h = rng.unit();
    let (width, height) =
        policy.dimensions(size_class, ratio_w, ratio_h, params.layer_max_size(kind));

    let (color_seed, color) = match params.layer_gray(kind) {
        Some(gray) => {
            let offset = rng.range(-color::GRAY_OFFSET_SPAN, color::GRAY_OFFSET_SPAN);
            (ColorSeed::GrayOffset(offset), color::gray(gray, offset))
        }
        None => (
            ColorSeed::Gradient,
            color::gradient(pos, stage, params.color_shift_deg, params.darkness),
        ),
    };

    let rect = Rect::new(pos.x, pos.y, pos.x + width, pos.y + height);
    let ornament = Ornament::spawn(rect, params.antenna_density, params.antenna_length, rng);

    Element {
        pos,
        size_class,
        ratio_w,
        ratio_h,
        width,
        height,
        color_seed,
        color,
        ornament,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(params: &Params) -> (Composition, Rng) {
        let mut rng = Rng::seed_from_u64(1701);
        let comp = Composition::generate(params, Canvas::default(), &mut rng);
        (comp, rng)
    }

    #[test]
    fn generate_honors_layer_counts() {
        let params = Params {
            back_count: 7,
            middle_count: 3,
            front_count: 4,
            ..Params::default()
        };
        let (comp, _) = setup(&params);
        assert_eq!(comp.layer(LayerKind::Back).unwrap().elements.len(), 7);
        assert_eq!(comp.layer(LayerKind::Middle).unwrap().elements.len(), 3);
        assert_eq!(comp.layer(LayerKind::Front).unwrap().elements.len(), 4);
        assert!(comp.validate().is_ok());
    }

    #[test]
    fn generate_is_deterministic_per_seed() {
        let params = Params::default();
        let mut a = Rng::seed_from_u64(9);
        let mut b = Rng::seed_from_u64(9);
        let ca = Composition::generate(&params, Canvas::default(), &mut a);
        let cb = Composition::generate(&params, Canvas::default(), &mut b);
        assert_eq!(ca, cb);
    }

    #[test]
    fn growing_preserves_existing_elements() {
        let params = Params::default();
        let (mut comp, mut rng) = setup(&params);
        let before = comp.layer(LayerKind::Back).unwrap().elements.clone();

        let grown = Params {
            back_count: 12,
            ..params
        };
        comp.reconcile_count(LayerKind::Back, &grown, Canvas::default(), &mut rng);

        let after = &comp.layer(LayerKind::Back).unwrap().elements;
        assert_eq!(after.len(), 12);
        assert_eq!(&after[..before.len()], &before[..]);
    }

    #[test]
    fn shrinking_truncates_from_the_end() {
        let params = Params {
            back_count: 10,
            ..Params::default()
        };
        let (mut comp, mut rng) = setup(&params);
        let before = comp.layer(LayerKind::Back).unwrap().elements.clone();

        let shrunk = Params {
            back_count: 4,
            ..params
        };
        comp.reconcile_count(LayerKind::Back, &shrunk, Canvas::default(), &mut rng);

        let after = &comp.layer(LayerKind::Back).unwrap().elements;
        assert_eq!(after.len(), 4);
        assert_eq!(&after[..], &before[..4]);
    }

    #[test]
    fn color_change_never_touches_geometry() {
        let params = Params::default();
        let (mut comp, _) = setup(&params);
        let geometry: Vec<_> = comp
            .layers
            .iter()
            .flat_map(|l| l.elements.iter())
            .map(|e| (e.pos, e.width, e.height))
            .collect();

        let recolored = Params {
            back_gray: 120.0,
            color_shift_deg: 213.0,
            darkness: 0.6,
            ..params
        };
        comp.apply_colors(&recolored, Canvas::default());

        let after: Vec<_> = comp
            .layers
            .iter()
            .flat_map(|l| l.elements.iter())
            .map(|e| (e.pos, e.width, e.height))
            .collect();
        assert_eq!(geometry, after);
    }

    #[test]
    fn size_change_keeps_ratios_and_scales_monotonically() {
        let params = Params {
            back_max_size: 200.0,
            ..Params::default()
        };
        let (mut comp, _) = setup(&params);
        let before: Vec<_> = comp
            .layer(LayerKind::Back)
            .unwrap()
            .elements
            .iter()
            .map(|e| (e.ratio_w, e.ratio_h, e.width, e.height, e.color))
            .collect();

        let bigger = Params {
            back_max_size: 500.0,
            ..params
        };
        comp.apply_sizes(&bigger);

        for (el, (rw, rh, w, h, c)) in comp
            .layer(LayerKind::Back)
            .unwrap()
            .elements
            .iter()
            .zip(&before)
        {
            assert_eq!(el.ratio_w, *rw);
            assert_eq!(el.ratio_h, *rh);
            assert!(el.width >= *w);
            assert!(el.height >= *h);
            assert_eq!(el.color, *c);
        }
    }

    #[test]
    fn zero_density_leaves_no_ornaments() {
        let params = Params {
            antenna_density: 0.0,
            ..Params::default()
        };
        let (comp, _) = setup(&params);
        assert!(
            comp.layers
                .iter()
                .flat_map(|l| l.elements.iter())
                .all(|e| e.ornament.is_none())
        );
    }

    #[test]
    fn ornament_reroll_keeps_geometry_and_color() {
        let params = Params::default();
        let (mut comp, mut rng) = setup(&params);
        let snapshot: Vec<_> = comp
            .layers
            .iter()
            .flat_map(|l| l.elements.iter())
            .map(|e| (e.pos, e.width, e.height, e.color))
            .collect();

        let dense = Params {
            antenna_density: 1.0,
            ..params
        };
        comp.apply_ornaments(&dense, &mut rng);

        let after: Vec<_> = comp
            .layers
            .iter()
            .flat_map(|l| l.elements.iter())
            .map(|e| (e.pos, e.width, e.height, e.color))
            .collect();
        assert_eq!(snapshot, after);
        assert!(
            comp.layers
                .iter()
                .flat_map(|l| l.elements.iter())
                .all(|e| e.ornament.is_some())
        );
    }

    #[test]
    fn gray_layers_store_offsets_front_derives_from_position() {
        let params = Params {
            middle_count: 2,
            ..Params::default()
        };
        let (comp, _) = setup(&params);
        for el in &comp.layer(LayerKind::Back).unwrap().elements {
            assert!(matches!(el.color_seed, ColorSeed::GrayOffset(_)));
            assert_eq!(el.color.r, el.color.g);
            assert_eq!(el.color.g, el.color.b);
        }
        for el in &comp.layer(LayerKind::Middle).unwrap().elements {
            assert!(matches!(el.color_seed, ColorSeed::GrayOffset(_)));
        }
        for el in &comp.layer(LayerKind::Front).unwrap().elements {
            assert!(matches!(el.color_seed, ColorSeed::Gradient));
        }
    }

    #[test]
    fn json_roundtrip() {
        let (comp, _) = setup(&Params::default());
        let s = serde_json::to_string(&comp).unwrap();
        let de: Composition = serde_json::from_str(&s).unwrap();
        assert_eq!(de, comp);
    }
}
