//! Contains the [`Easing`] enum which defines the standard timing curves available for animations,
//! as well as a [`TimingFunction`] trait for defining custom curves.

use crate::error::AnimationError;
use dyn_clone::{clone_trait_object, DynClone};
use lazy_static::lazy_static;
use lyon_geom::{CubicBezierSegment, Point};
use std::f32::consts::PI;
use std::fmt::Debug;
use std::str::FromStr;

/// Maps normalized animation progress onto eased progress.
///
/// Timing functions are pure: the same `x` always produces the same result. The animator feeds
/// the eased value to [`interpolate`](crate::interpolation::interpolate), so a timing function
/// only changes _where along the line_ the interpolation lands at a given time.
pub trait TimingFunction: Debug + DynClone {
    /// Computes the eased progress for a normalized progress `x` in `0..=1`.
    ///
    /// The result is typically also between 0 and 1, but overshooting curves such as
    /// [`Easing::OutBack`] or [`Easing::OutElastic`] leave that range on purpose.
    fn solve(&self, x: f32) -> f32;
}

clone_trait_object!(TimingFunction);

/// Specifies a standard or custom [`TimingFunction`].
///
/// Available easings include:
/// - `Linear`, i.e. no easing at all.
/// - CSS keywords: `Ease`, `EaseIn`, `EaseOut`, `EaseInOut`, defined as cubic bezier curves.
/// - The families listed on <https://easings.net>, each with `In`, `Out` and `InOut` variants.
/// - User-defined functions via [`Custom`](Easing::Custom).
///
/// Easings can also be selected by name through [`FromStr`], e.g. `"quadInOut".parse()`.
#[derive(Clone, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// CSS `ease`.
    Ease,
    /// CSS `ease-in`.
    EaseIn,
    /// CSS `ease-out`.
    EaseOut,
    /// CSS `ease-in-out`.
    EaseInOut,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    /// Moves slightly backward (below 0) before accelerating toward the end.
    InBack,
    /// Overshoots the end (above 1) and settles back.
    OutBack,
    InOutBack,
    /// Oscillates around the start with growing amplitude before snapping to the end.
    InElastic,
    /// Overshoots and oscillates around the end with decaying amplitude.
    OutElastic,
    InOutElastic,
    InBounce,
    /// Bounces against the end value like a dropped ball.
    OutBounce,
    InOutBounce,
    /// User-defined curve, such as an ad-hoc [`CubicBezierEasing`].
    Custom(Box<dyn TimingFunction>),
}

lazy_static! {
    static ref EASE_WEB: CubicBezierEasing = CubicBezierEasing::new(0.25, 0.1, 0.25, 1.0);
    static ref EASE_IN: CubicBezierEasing = CubicBezierEasing::new(0.42, 0.0, 1.0, 1.0);
    static ref EASE_OUT: CubicBezierEasing = CubicBezierEasing::new(0.0, 0.0, 0.58, 1.0);
    static ref EASE_IN_OUT: CubicBezierEasing = CubicBezierEasing::new(0.42, 0.0, 0.58, 1.0);
}

impl TimingFunction for Easing {
    fn solve(&self, x: f32) -> f32 {
        match self {
            Self::Custom(custom) => custom.solve(x),
            // Built-in curves all pass through (0, 0) and (1, 1). Pinned so that rounding in the
            // trigonometric and exponential forms cannot leave the endpoints slightly off.
            _ if x == 0.0 => 0.0,
            _ if x == 1.0 => 1.0,
            Self::Linear => x,
            Self::Ease => EASE_WEB.solve(x),
            Self::EaseIn => EASE_IN.solve(x),
            Self::EaseOut => EASE_OUT.solve(x),
            Self::EaseInOut => EASE_IN_OUT.solve(x),
            Self::InSine => 1.0 - (x * PI / 2.0).cos(),
            Self::OutSine => (x * PI / 2.0).sin(),
            Self::InOutSine => -((PI * x).cos() - 1.0) / 2.0,
            Self::InQuad => x.powi(2),
            Self::OutQuad => ease_out(x, |x| x.powi(2)),
            Self::InOutQuad => ease_in_out(x, |x| x.powi(2)),
            Self::InCubic => x.powi(3),
            Self::OutCubic => ease_out(x, |x| x.powi(3)),
            Self::InOutCubic => ease_in_out(x, |x| x.powi(3)),
            Self::InQuart => x.powi(4),
            Self::OutQuart => ease_out(x, |x| x.powi(4)),
            Self::InOutQuart => ease_in_out(x, |x| x.powi(4)),
            Self::InQuint => x.powi(5),
            Self::OutQuint => ease_out(x, |x| x.powi(5)),
            Self::InOutQuint => ease_in_out(x, |x| x.powi(5)),
            Self::InExpo => in_expo(x),
            Self::OutExpo => ease_out(x, in_expo),
            Self::InOutExpo => ease_in_out(x, in_expo),
            Self::InCirc => in_circ(x),
            Self::OutCirc => ease_out(x, in_circ),
            Self::InOutCirc => ease_in_out(x, in_circ),
            Self::InBack => in_back(x),
            Self::OutBack => ease_out(x, in_back),
            Self::InOutBack => in_out_back(x),
            Self::InElastic => in_elastic(x),
            Self::OutElastic => ease_out(x, in_elastic),
            Self::InOutElastic => in_out_elastic(x),
            Self::InBounce => ease_out(x, out_bounce),
            Self::OutBounce => out_bounce(x),
            Self::InOutBounce => ease_in_out(x, |x| ease_out(x, out_bounce)),
        }
    }
}

// Mirrors an "in" curve to get the matching "out" curve.
fn ease_out(x: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    1.0 - ease_in(1.0 - x)
}

// Runs the "in" curve over the first half and its mirror over the second half.
fn ease_in_out(x: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if x < 0.5 {
        ease_in(2.0 * x) / 2.0
    } else {
        1.0 - ease_in(2.0 - 2.0 * x) / 2.0
    }
}

fn in_expo(x: f32) -> f32 {
    if x <= 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * x - 10.0)
    }
}

fn in_circ(x: f32) -> f32 {
    1.0 - (1.0 - x * x).max(0.0).sqrt()
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;

fn in_back(x: f32) -> f32 {
    BACK_C3 * x.powi(3) - BACK_C1 * x.powi(2)
}

fn in_out_back(x: f32) -> f32 {
    if x < 0.5 {
        ((2.0 * x).powi(2) * ((BACK_C2 + 1.0) * 2.0 * x - BACK_C2)) / 2.0
    } else {
        ((2.0 * x - 2.0).powi(2) * ((BACK_C2 + 1.0) * (x * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

fn in_elastic(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    -(2f32.powf(10.0 * x - 10.0)) * ((x * 10.0 - 10.75) * ELASTIC_C4).sin()
}

fn in_out_elastic(x: f32) -> f32 {
    let wave = ((20.0 * x - 11.125) * ELASTIC_C5).sin();
    if x < 0.5 {
        -(2f32.powf(20.0 * x - 10.0) * wave) / 2.0
    } else {
        (2f32.powf(-20.0 * x + 10.0) * wave) / 2.0 + 1.0
    }
}

fn out_bounce(x: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if x < 1.0 / D1 {
        N1 * x * x
    } else if x < 2.0 / D1 {
        let x = x - 1.5 / D1;
        N1 * x * x + 0.75
    } else if x < 2.5 / D1 {
        let x = x - 2.25 / D1;
        N1 * x * x + 0.9375
    } else {
        let x = x - 2.625 / D1;
        N1 * x * x + 0.984375
    }
}

/// Easing function defined by a cubic bezier curve with the start and end points fixed at `(0, 0)`
/// and `(1, 1)`, i.e. only the control points are specified.
///
/// This is the same model as CSS `cubic-bezier()`: the curve is solved for the parameter whose
/// `x` equals the progress, and the `y` at that parameter is the eased progress.
#[derive(Clone, Debug)]
pub struct CubicBezierEasing {
    segment: CubicBezierSegment<f32>,
}

impl CubicBezierEasing {
    /// Creates a new [`CubicBezierEasing`] with control points `(x1, y1)` and `(x2, y2)`.
    ///
    /// `x1` and `x2` are clamped to `0..=1` so that the curve remains a function of `x`.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            segment: CubicBezierSegment {
                from: Point::new(0.0, 0.0),
                ctrl1: Point::new(x1.clamp(0.0, 1.0), y1),
                ctrl2: Point::new(x2.clamp(0.0, 1.0), y2),
                to: Point::new(1.0, 1.0),
            },
        }
    }

    fn t_for_x(&self, x: f32) -> f32 {
        const EPSILON: f32 = 1e-6;

        let mut t = x;
        for _ in 0..8 {
            let error = self.segment.x(t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.segment.dx(t);
            if slope.abs() < EPSILON {
                break;
            }
            t -= error / slope;
        }

        // Newton did not converge (flat spot in x); fall back to bisection.
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = x.clamp(0.0, 1.0);
        for _ in 0..32 {
            let value = self.segment.x(t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        t
    }
}

impl TimingFunction for CubicBezierEasing {
    fn solve(&self, x: f32) -> f32 {
        self.segment.y(self.t_for_x(x))
    }
}

#[derive(Clone, Copy)]
enum Mode {
    In,
    Out,
    InOut,
}

impl FromStr for Easing {
    type Err = AnimationError;

    /// Selects an easing by name.
    ///
    /// Names are case-insensitive and ignore `-`, `_` and spaces. Family curves may be written
    /// family-first (`quadInOut`), mode-first (`inOutQuad`) or with an `ease` prefix
    /// (`easeInOutQuad`). The CSS keywords `ease`, `ease-in`, `ease-out` and `ease-in-out` and
    /// `linear` are also accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match name.as_str() {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "easein" => return Ok(Self::EaseIn),
            "easeout" => return Ok(Self::EaseOut),
            "easeinout" => return Ok(Self::EaseInOut),
            _ => {}
        }
        let name = name.strip_prefix("ease").unwrap_or(&name);
        split_mode(name)
            .and_then(|(family, mode)| family_easing(family, mode))
            .ok_or_else(|| AnimationError::UnsupportedEasing(s.to_string()))
    }
}

fn split_mode(name: &str) -> Option<(&str, Mode)> {
    const MODES: [(&str, Mode); 3] = [("inout", Mode::InOut), ("in", Mode::In), ("out", Mode::Out)];
    MODES
        .iter()
        .find_map(|(tag, mode)| name.strip_prefix(tag).map(|family| (family, *mode)))
        .or_else(|| {
            MODES
                .iter()
                .find_map(|(tag, mode)| name.strip_suffix(tag).map(|family| (family, *mode)))
        })
        .filter(|(family, _)| !family.is_empty())
}

fn family_easing(family: &str, mode: Mode) -> Option<Easing> {
    use Mode::*;
    let easing = match (family, mode) {
        ("sine", In) => Easing::InSine,
        ("sine", Out) => Easing::OutSine,
        ("sine", InOut) => Easing::InOutSine,
        ("quad", In) => Easing::InQuad,
        ("quad", Out) => Easing::OutQuad,
        ("quad", InOut) => Easing::InOutQuad,
        ("cubic", In) => Easing::InCubic,
        ("cubic", Out) => Easing::OutCubic,
        ("cubic", InOut) => Easing::InOutCubic,
        ("quart", In) => Easing::InQuart,
        ("quart", Out) => Easing::OutQuart,
        ("quart", InOut) => Easing::InOutQuart,
        ("quint", In) => Easing::InQuint,
        ("quint", Out) => Easing::OutQuint,
        ("quint", InOut) => Easing::InOutQuint,
        ("expo", In) => Easing::InExpo,
        ("expo", Out) => Easing::OutExpo,
        ("expo", InOut) => Easing::InOutExpo,
        ("circ", In) => Easing::InCirc,
        ("circ", Out) => Easing::OutCirc,
        ("circ", InOut) => Easing::InOutCirc,
        ("back", In) => Easing::InBack,
        ("back", Out) => Easing::OutBack,
        ("back", InOut) => Easing::InOutBack,
        ("elastic", In) => Easing::InElastic,
        ("elastic", Out) => Easing::OutElastic,
        ("elastic", InOut) => Easing::InOutElastic,
        ("bounce", In) => Easing::InBounce,
        ("bounce", Out) => Easing::OutBounce,
        ("bounce", InOut) => Easing::InOutBounce,
        _ => return None,
    };
    Some(easing)
}
