//! Fast recursive discrete cosine transform (unscaled DCT-II).
//!
//! Splits the input into symmetric and antisymmetric halves, transforms both
//! recursively and recombines them. Input length must be a power of two.

use std::f64::consts::PI;

use iscc_core::{IsccError, IsccResult};

/// Computes the DCT of `input`.
pub(crate) fn dct(input: &[f64]) -> IsccResult<Vec<f64>> {
    if !input.len().is_power_of_two() {
        return Err(IsccError::InvalidArgument(format!(
            "DCT input length must be a power of two, got {}",
            input.len()
        )));
    }
    Ok(transform(input))
}

fn transform(v: &[f64]) -> Vec<f64> {
    let n = v.len();
    if n == 1 {
        return v.to_vec();
    }
    let half = n / 2;
    let (alpha, beta): (Vec<f64>, Vec<f64>) = (0..half)
        .map(|i| {
            let (a, b) = (v[i], v[n - 1 - i]);
            let scale = ((i as f64 + 0.5) * PI / n as f64).cos();
            (a + b, (a - b) / scale / 2.0)
        })
        .unzip();
    let alpha = transform(&alpha);
    let beta = transform(&beta);

    let mut out = Vec::with_capacity(n);
    for i in 0..half - 1 {
        out.push(alpha[i]);
        out.push(beta[i] + beta[i + 1]);
    }
    out.push(alpha[half - 1]);
    out.push(beta[half - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct O(n^2) DCT-II without normalization.
    fn naive(v: &[f64]) -> Vec<f64> {
        let n = v.len() as f64;
        (0..v.len())
            .map(|k| {
                v.iter()
                    .enumerate()
                    .map(|(i, x)| x * (PI / n * (i as f64 + 0.5) * k as f64).cos())
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_dct_rejects_bad_lengths() {
        assert!(dct(&[]).is_err());
        assert!(dct(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_dct_constant_input() {
        let out = dct(&[2.0; 8]).unwrap();
        assert!((out[0] - 16.0).abs() < 1e-9, "DC term is the sum");
        for value in &out[1..] {
            assert!(value.abs() < 1e-9, "expected ~0, got {value}");
        }
    }

    #[test]
    fn test_dct_matches_naive() {
        let input: Vec<f64> = (0..32).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
        let fast = dct(&input).unwrap();
        for (k, (a, b)) in fast.iter().zip(naive(&input)).enumerate() {
            assert!((a - b).abs() < 1e-9, "coefficient {k}: {a} != {b}");
        }
    }
}
