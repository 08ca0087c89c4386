//! Special functions missing from `f64`
//!
//! - `erf`: Abramowitz & Stegun 7.1.26, max error about 1.5e-7
//! - `gamma` / `lgamma`: Lanczos approximation (g = 7, 9 terms)
//! - `sech`: `1 / cosh`

use std::f64::consts::PI;

const ERF_A1: f64 = 0.254_829_592;
const ERF_A2: f64 = -0.284_496_736;
const ERF_A3: f64 = 1.421_413_741;
const ERF_A4: f64 = -1.453_152_027;
const ERF_A5: f64 = 1.061_405_429;
const ERF_P: f64 = 0.327_591_1;

const LANCZOS_G: f64 = 7.0;
#[allow(clippy::unreadable_literal)]
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gauss error function
#[must_use]
pub fn erf(x: f64) -> f64 {
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ((((ERF_A5 * t + ERF_A4) * t + ERF_A3) * t + ERF_A2) * t + ERF_A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Hyperbolic secant
#[must_use]
pub fn sech(x: f64) -> f64 {
    1.0 / x.cosh()
}

fn is_pole(z: f64) -> bool {
    z <= 0.0 && z.fract() == 0.0
}

/// Lanczos series for `z >= 0.5`, returns (t, series) with `z` already shifted
fn lanczos(z: f64) -> (f64, f64) {
    let z = z - 1.0;
    let series = LANCZOS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS[0], |acc, (i, c)| acc + c / (z + i as f64));
    (z + LANCZOS_G + 0.5, series)
}

/// Gamma function, infinite at the poles 0, -1, -2, ...
#[must_use]
pub fn gamma(z: f64) -> f64 {
    if is_pole(z) {
        return f64::INFINITY;
    }
    if z < 0.5 {
        // Reflection: Γ(z) Γ(1-z) = π / sin(πz)
        return PI / ((PI * z).sin() * gamma(1.0 - z));
    }
    let (t, series) = lanczos(z);
    (2.0 * PI).sqrt() * t.powf(z - 0.5) * (-t).exp() * series
}

/// Natural log of |Γ(z)|
#[must_use]
pub fn lgamma(z: f64) -> f64 {
    if is_pole(z) {
        return f64::INFINITY;
    }
    if z < 0.5 {
        return (PI / (PI * z).sin().abs()).ln() - lgamma(1.0 - z);
    }
    let (t, series) = lanczos(z);
    0.5 * (2.0 * PI).ln() + (z - 0.5) * t.ln() - t + series.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance * b.abs().max(1.0)
    }

    #[test]
    fn erf_reference_values() {
        assert!(erf(0.0).abs() < 1e-8);
        assert!(close(erf(0.5), 0.520_499_877_813_046_5, 2e-7));
        assert!(close(erf(1.0), 0.842_700_792_949_714_9, 2e-7));
        assert!(close(erf(3.0), 0.999_977_909_503_001_4, 2e-7));
    }

    #[test]
    fn erf_is_odd() {
        for x in [0.1, 0.7, 1.3, 2.9] {
            assert_eq!(erf(-x), -erf(x));
        }
    }

    #[test]
    fn gamma_at_integers_is_factorial() {
        let mut factorial = 1.0;
        for n in 1..=10 {
            assert!(close(gamma(f64::from(n)), factorial, 1e-10), "gamma({n})");
            factorial *= f64::from(n);
        }
    }

    #[test]
    fn gamma_half_is_sqrt_pi() {
        assert!(close(gamma(0.5), PI.sqrt(), 1e-10));
        assert!(close(gamma(-0.5), -2.0 * PI.sqrt(), 1e-10));
    }

    #[test]
    fn gamma_poles() {
        assert!(gamma(0.0).is_infinite());
        assert!(gamma(-3.0).is_infinite());
        assert!(lgamma(-1.0).is_infinite());
    }

    #[test]
    fn lgamma_matches_log_of_gamma() {
        assert!(close(lgamma(11.0), 3_628_800f64.ln(), 1e-10));
        assert!(lgamma(1.0).abs() < 1e-10);
        assert!(lgamma(2.0).abs() < 1e-10);
        for z in [0.3, 1.7, 4.2, 7.5] {
            assert!(close(lgamma(z), gamma(z).abs().ln(), 1e-10), "lgamma({z})");
        }
    }

    #[test]
    fn sech_values() {
        assert_eq!(sech(0.0), 1.0);
        assert!(close(sech(1.0), 0.648_054_273_663_885_4, 1e-12));
        assert_eq!(sech(2.0), sech(-2.0));
    }
}
