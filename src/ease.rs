/// Fade-in curve for the newest reveal group.
///
/// Any curve here satisfies `apply(0) == 0`, `apply(1) == 1` and is strictly
/// increasing in between; the exact shape is presentational.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Fade {
    /// Half-cosine: `0.5 * (1 - cos(pi * t))`.
    HalfCosine,
    /// Exponential saturation: `(1 - e^(-k*t))^p`, normalized so that
    /// `apply(1) == 1` exactly.
    ExpSaturate,
}

const EXP_SATURATE_K: f64 = 4.0;
const EXP_SATURATE_P: f64 = 2.0;

impl Fade {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::HalfCosine => 0.5 * (1.0 - (std::f64::consts::PI * t).cos()),
            Self::ExpSaturate => {
                let raw = |t: f64| (1.0 - (-EXP_SATURATE_K * t).exp()).powf(EXP_SATURATE_P);
                raw(t) / raw(1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        for fade in [Fade::HalfCosine, Fade::ExpSaturate] {
            assert!(fade.apply(0.0).abs() < 1e-12);
            assert!((fade.apply(1.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn strictly_increasing_spot_check() {
        for fade in [Fade::HalfCosine, Fade::ExpSaturate] {
            let mut prev = fade.apply(0.0);
            for i in 1..=20 {
                let v = fade.apply(f64::from(i) / 20.0);
                assert!(v > prev, "{fade:?} not increasing at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(Fade::HalfCosine.apply(-1.0), Fade::HalfCosine.apply(0.0));
        assert_eq!(Fade::HalfCosine.apply(2.0), Fade::HalfCosine.apply(1.0));
    }
}
