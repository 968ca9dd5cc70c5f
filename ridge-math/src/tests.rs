//! Testes do módulo ridge-math

use super::*;
use crate::constants::{HALF_PI, PI, SQRT_THRESHOLD};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ═══════════════════════════════════════════════════════════════════════════════
// TESTES DE TRIGONOMETRIA
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_sin_cos_within_tolerance_over_full_turn() {
    let steps = 10_000;
    for i in 0..=steps {
        let theta = -PI + 2.0 * PI * i as f32 / steps as f32;
        let sin_err = (approximate_sin(theta) - theta.sin()).abs();
        let cos_err = (approximate_cos(theta) - theta.cos()).abs();
        assert!(sin_err < 1e-3, "sin({theta}) err {sin_err}");
        assert!(cos_err < 1e-3, "cos({theta}) err {cos_err}");
    }
}

#[test]
fn test_sin_cos_fold_outside_principal_range() {
    for &theta in &[4.0f32, -4.0, 10.0, -25.0, 2.0 * PI + 0.3] {
        assert!((approximate_sin(theta) - theta.sin()).abs() < 1e-3, "sin({theta})");
        assert!((approximate_cos(theta) - theta.cos()).abs() < 1e-3, "cos({theta})");
    }
}

#[test]
fn test_atan2_all_quadrants() {
    let steps = 720;
    for i in 0..steps {
        let angle = -PI + 2.0 * PI * (i as f32 + 0.5) / steps as f32;
        for radius in [0.01f32, 1.0, 250.0] {
            let (y, x) = (radius * angle.sin(), radius * angle.cos());
            let err = (approximate_atan2(y, x) - y.atan2(x)).abs();
            assert!(err < 1e-3, "atan2({y}, {x}) err {err}");
        }
    }
}

#[test]
fn test_atan2_axis_cases() {
    assert_eq!(approximate_atan2(1.0, 0.0), HALF_PI);
    assert_eq!(approximate_atan2(-1.0, 0.0), -HALF_PI);
    assert_eq!(approximate_atan2(0.0, 0.0), 0.0);
    assert!((approximate_atan2(0.0, 1.0)).abs() < 1e-6);
    assert!((approximate_atan2(0.0, -1.0) - PI).abs() < 1e-6);
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTES DE RAIZ E LOGARITMO
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_sqrt_relative_threshold() {
    for &x in &[1e-6f32, 0.01, 0.5, 1.0, 2.0, 16.0, 12345.0, 1e12] {
        let s = approximate_sqrt(x);
        let relative = (s * s - x).abs() / x;
        assert!(relative <= SQRT_THRESHOLD * 1.01, "sqrt({x}) = {s}, rel {relative}");
    }
}

#[test]
fn test_ln_tracks_std() {
    for &x in &[0.001f32, 0.1, 0.5, 1.0, 2.0, 10.0, 1000.0] {
        assert!((approximate_ln(x) - x.ln()).abs() < 1e-3, "ln({x})");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTES DE RUÍDO GAUSSIANO
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_gaussian_moments() {
    let samples = 20_000;
    for math in [MathPrecision::Exact.provider(), MathPrecision::Approximate.provider()] {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for _ in 0..samples {
            let x = math.gaussian_noise(&mut rng) as f64;
            assert!(x.is_finite());
            sum += x;
            sum_sq += x * x;
        }
        let mean = sum / samples as f64;
        let variance = sum_sq / samples as f64 - mean * mean;
        assert!(mean.abs() < 0.05, "{} mean {mean}", math.name());
        assert!((variance - 1.0).abs() < 0.1, "{} variance {variance}", math.name());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTES DE INTEGRAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_precision_serde_roundtrip() {
    let json = serde_json::to_string(&MathPrecision::Approximate).unwrap();
    assert_eq!(json, "\"approximate\"");
    let back: MathPrecision = serde_json::from_str(&json).unwrap();
    assert_eq!(back, MathPrecision::Approximate);
}

#[test]
fn test_providers_interchangeable_behind_trait_object() {
    let exact = MathPrecision::Exact.provider();
    let fast = MathPrecision::Approximate.provider();
    for i in 0..100 {
        let theta = i as f32 * 0.1 - 5.0;
        assert!((exact.sin(theta) - fast.sin(theta)).abs() < 1e-3);
        assert!((exact.cos(theta) - fast.cos(theta)).abs() < 1e-3);
    }
}
