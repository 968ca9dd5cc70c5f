//! Aproximações rápidas de funções não lineares
//!
//! Em IEEE 754, `f32` tem cerca de 7 dígitos de precisão: as séries abaixo
//! são truncadas onde o erro já fica abaixo de 1e-3 em toda a faixa útil.

use rand::{Rng, RngCore};

use crate::constants::{
    GAUSSIAN_MAX_ATTEMPTS, HALF_PI, PI, SQRT_MAX_ITERATIONS, SQRT_THRESHOLD, TWO_PI,
};

// ═══════════════════════════════════════════════════════════════════════════════
// TRIGONOMETRIA
// ═══════════════════════════════════════════════════════════════════════════════

/// Seno por série de potência de 7ª ordem
///
/// θ é dobrado para [-π, π] e espelhado para [-π/2, π/2] antes da série,
/// o que mantém o erro absoluto abaixo de 2e-4.
pub fn approximate_sin(theta: f32) -> f32 {
    let mut theta = fold_theta(theta);

    // sin(π - θ) = sin(θ)
    if theta > HALF_PI {
        theta = PI - theta;
    } else if theta < -HALF_PI {
        theta = -PI - theta;
    }

    let theta_2 = theta * theta;
    let theta_3 = theta_2 * theta;
    let theta_5 = theta_3 * theta_2;
    let theta_7 = theta_5 * theta_2;

    let mut sin_theta = theta;
    sin_theta -= theta_3 / 6.0;
    sin_theta += theta_5 / 120.0;
    sin_theta -= theta_7 / 5040.0;

    sin_theta
}

/// Cosseno por série de potência de 8ª ordem
pub fn approximate_cos(theta: f32) -> f32 {
    let mut theta = approximate_abs(fold_theta(theta));

    // cos(π - θ) = -cos(θ)
    let sign = if theta > HALF_PI {
        theta = PI - theta;
        -1.0
    } else {
        1.0
    };

    let theta_2 = theta * theta;
    let theta_4 = theta_2 * theta_2;
    let theta_6 = theta_4 * theta_2;
    let theta_8 = theta_6 * theta_2;

    let mut cos_theta = 1.0 - theta_2 / 2.0;
    cos_theta += theta_4 / 24.0;
    cos_theta -= theta_6 / 720.0;
    cos_theta += theta_8 / 40320.0;

    sign * cos_theta
}

/// Arco-tangente de quatro quadrantes, resultado em (-π, π]
///
/// Com `x = 0`: `y > 0` → π/2, `y < 0` → -π/2, `y = 0` → 0.
pub fn approximate_atan2(y: f32, x: f32) -> f32 {
    if x != 0.0 {
        if approximate_abs(x) > approximate_abs(y) {
            let z = y / x;
            if x > 0.0 {
                // atan2(y,x) = atan(y/x) se x > 0
                approximate_atan(z)
            } else if y >= 0.0 {
                // atan2(y,x) = atan(y/x) + π se x < 0, y >= 0
                approximate_atan(z) + PI
            } else {
                // atan2(y,x) = atan(y/x) - π se x < 0, y < 0
                approximate_atan(z) - PI
            }
        } else {
            // atan(y/x) = π/2 - atan(x/y) quando |y/x| > 1
            let z = x / y;
            if y > 0.0 {
                -approximate_atan(z) + HALF_PI
            } else {
                -approximate_atan(z) - HALF_PI
            }
        }
    } else if y > 0.0 {
        HALF_PI
    } else if y < 0.0 {
        -HALF_PI
    } else {
        0.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ARITMÉTICA
// ═══════════════════════════════════════════════════════════════════════════════

/// Valor absoluto por desvio de sinal
pub fn approximate_abs(x: f32) -> f32 {
    if x >= 0.0 { x } else { -x }
}

/// Raiz quadrada por Newton, semeada em `x / 2`
///
/// Itera enquanto `|s² - x| / x > SQRT_THRESHOLD`, com no máximo
/// `SQRT_MAX_ITERATIONS` passos. Contrato: `x >= 0`. `sqrt(0) = 0`;
/// entrada negativa ou NaN devolve NaN.
pub fn approximate_sqrt(x: f32) -> f32 {
    if x == 0.0 {
        return 0.0;
    }
    if !(x > 0.0) {
        return f32::NAN;
    }
    if x.is_infinite() {
        return x;
    }

    let mut sqrt_x = x / 2.0;
    let mut iterations = 0;

    while approximate_abs(sqrt_x * sqrt_x - x) / x > SQRT_THRESHOLD
        && iterations < SQRT_MAX_ITERATIONS
    {
        sqrt_x = 0.5 * (sqrt_x + x / sqrt_x);
        iterations += 1;
    }

    sqrt_x
}

/// log₂ pelo truque de bits do IEEE-754
///
/// Expoente vem dos bits brutos; a mantissa, reinterpretada em [0.5, 1),
/// entra numa correção racional. Erro absoluto em torno de 1.5e-4.
pub fn approximate_log2(x: f32) -> f32 {
    let bits = x.to_bits();
    let mantissa = f32::from_bits((bits & 0x007F_FFFF) | 0x3F00_0000);
    let y = bits as f32 * 1.192_092_9e-7;

    y - 124.225_52 - 1.498_030_3 * mantissa - 1.725_88 / (0.352_088_7 + mantissa)
}

/// Logaritmo natural: `ln(x) = ln(2) · log₂(x)`
pub fn approximate_ln(x: f32) -> f32 {
    std::f32::consts::LN_2 * approximate_log2(x)
}

// ═══════════════════════════════════════════════════════════════════════════════
// RUÍDO GAUSSIANO
// ═══════════════════════════════════════════════════════════════════════════════

/// Amostra normal padrão com as aproximações rápidas
pub fn approximate_normal(rng: &mut dyn RngCore) -> f32 {
    polar_normal(rng, approximate_sqrt, approximate_ln)
}

/// Método polar com rejeição limitada
///
/// Sorteia pares uniformes em [-1, 1]² até que `0 < r <= 1`. Se a fonte
/// uniforme for degenerada (sempre zero, por exemplo) e as tentativas se
/// esgotarem, devolve a média 0.0.
pub(crate) fn polar_normal(
    rng: &mut dyn RngCore,
    sqrt: fn(f32) -> f32,
    ln: fn(f32) -> f32,
) -> f32 {
    for _ in 0..GAUSSIAN_MAX_ATTEMPTS {
        let u: f32 = rng.gen_range(-1.0..=1.0);
        let v: f32 = rng.gen_range(-1.0..=1.0);
        let r = u * u + v * v;

        if r == 0.0 || r > 1.0 {
            continue;
        }

        // ln aproximado pode ficar levemente positivo perto de r = 1
        let radicand = (-2.0 * ln(r) / r).max(0.0);
        return u * sqrt(radicand);
    }

    tracing::warn!(
        attempts = GAUSSIAN_MAX_ATTEMPTS,
        "degenerate uniform source, gaussian sample falls back to the mean"
    );
    0.0
}

/// Dobra θ para [-π, π)
fn fold_theta(theta: f32) -> f32 {
    (theta + PI).rem_euclid(TWO_PI) - PI
}

/// atan(z) para |z| <= 1, polinômio minimax ímpar de 9ª ordem
fn approximate_atan(z: f32) -> f32 {
    const A1: f32 = 0.999_866;
    const A3: f32 = -0.330_299_5;
    const A5: f32 = 0.180_141;
    const A7: f32 = -0.085_133;
    const A9: f32 = 0.020_835_1;

    let z_2 = z * z;
    z * (A1 + z_2 * (A3 + z_2 * (A5 + z_2 * (A7 + z_2 * A9))))
}
