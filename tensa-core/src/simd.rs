//! # SIMD Kernels
//!
//! Vectorized per-element kernels backing the [`Element`](crate::element::Element)
//! hooks. Enabled with the `simd` cargo feature; without it (or on other
//! architectures) every entry point falls back to the scalar loop, which
//! the auto-vectorizer handles well for contiguous buffers.
//!
//! ## Operações Disponíveis
//!
//! - `add_*` / `sub_*` / `mul_*`: elementwise binary ops
//! - `scale_*`: multiply by scalar
//! - `axpy_*`: `y += a * x` (GEMM inner kernel)
//! - `dot_*`: dot product with horizontal reduction
//! - `sum_*`: horizontal sum
//!
//! ## Arquiteturas Suportadas
//!
//! - x86-64 with AVX2 (8 × f32 / 4 × f64 per instruction)
//! - ARM64 with NEON (4 × f32 / 2 × f64 per instruction)
//! - Scalar fallback everywhere else

// ═════════════════════════════════════════════════════════════════════════════
// x86-64 AVX2 Implementation
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
mod x86_simd {
    use std::arch::x86_64::*;

    #[target_feature(enable = "avx2")]
    pub unsafe fn add_f32_avx2(a: &[f32], b: &[f32], out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 8 <= n {
                let va = _mm256_loadu_ps(a.as_ptr().add(i));
                let vb = _mm256_loadu_ps(b.as_ptr().add(i));
                _mm256_storeu_ps(out.as_mut_ptr().add(i), _mm256_add_ps(va, vb));
                i += 8;
            }
            while i < n {
                out[i] = a[i] + b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn sub_f32_avx2(a: &[f32], b: &[f32], out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 8 <= n {
                let va = _mm256_loadu_ps(a.as_ptr().add(i));
                let vb = _mm256_loadu_ps(b.as_ptr().add(i));
                _mm256_storeu_ps(out.as_mut_ptr().add(i), _mm256_sub_ps(va, vb));
                i += 8;
            }
            while i < n {
                out[i] = a[i] - b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn mul_f32_avx2(a: &[f32], b: &[f32], out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 8 <= n {
                let va = _mm256_loadu_ps(a.as_ptr().add(i));
                let vb = _mm256_loadu_ps(b.as_ptr().add(i));
                _mm256_storeu_ps(out.as_mut_ptr().add(i), _mm256_mul_ps(va, vb));
                i += 8;
            }
            while i < n {
                out[i] = a[i] * b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn scale_f32_avx2(a: &[f32], k: f32, out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let vk = _mm256_set1_ps(k);
            let mut i = 0;
            while i + 8 <= n {
                let va = _mm256_loadu_ps(a.as_ptr().add(i));
                _mm256_storeu_ps(out.as_mut_ptr().add(i), _mm256_mul_ps(va, vk));
                i += 8;
            }
            while i < n {
                out[i] = a[i] * k;
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn axpy_f32_avx2(a: f32, x: &[f32], y: &mut [f32]) {
        unsafe {
            let n = y.len();
            let va = _mm256_set1_ps(a);
            let mut i = 0;
            while i + 8 <= n {
                let vx = _mm256_loadu_ps(x.as_ptr().add(i));
                let vy = _mm256_loadu_ps(y.as_ptr().add(i));
                _mm256_storeu_ps(
                    y.as_mut_ptr().add(i),
                    _mm256_add_ps(vy, _mm256_mul_ps(va, vx)),
                );
                i += 8;
            }
            while i < n {
                y[i] += a * x[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn dot_f32_avx2(a: &[f32], b: &[f32]) -> f32 {
        unsafe {
            let n = a.len();
            let mut acc = _mm256_setzero_ps();
            let mut i = 0;
            while i + 8 <= n {
                let va = _mm256_loadu_ps(a.as_ptr().add(i));
                let vb = _mm256_loadu_ps(b.as_ptr().add(i));
                acc = _mm256_add_ps(acc, _mm256_mul_ps(va, vb));
                i += 8;
            }
            let mut lanes = [0.0f32; 8];
            _mm256_storeu_ps(lanes.as_mut_ptr(), acc);
            let mut sum: f32 = lanes.iter().sum();
            while i < n {
                sum += a[i] * b[i];
                i += 1;
            }
            sum
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn sum_f32_avx2(a: &[f32]) -> f32 {
        unsafe {
            let n = a.len();
            let mut acc = _mm256_setzero_ps();
            let mut i = 0;
            while i + 8 <= n {
                acc = _mm256_add_ps(acc, _mm256_loadu_ps(a.as_ptr().add(i)));
                i += 8;
            }
            let mut lanes = [0.0f32; 8];
            _mm256_storeu_ps(lanes.as_mut_ptr(), acc);
            let mut sum: f32 = lanes.iter().sum();
            while i < n {
                sum += a[i];
                i += 1;
            }
            sum
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn add_f64_avx2(a: &[f64], b: &[f64], out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 4 <= n {
                let va = _mm256_loadu_pd(a.as_ptr().add(i));
                let vb = _mm256_loadu_pd(b.as_ptr().add(i));
                _mm256_storeu_pd(out.as_mut_ptr().add(i), _mm256_add_pd(va, vb));
                i += 4;
            }
            while i < n {
                out[i] = a[i] + b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn sub_f64_avx2(a: &[f64], b: &[f64], out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 4 <= n {
                let va = _mm256_loadu_pd(a.as_ptr().add(i));
                let vb = _mm256_loadu_pd(b.as_ptr().add(i));
                _mm256_storeu_pd(out.as_mut_ptr().add(i), _mm256_sub_pd(va, vb));
                i += 4;
            }
            while i < n {
                out[i] = a[i] - b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn mul_f64_avx2(a: &[f64], b: &[f64], out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 4 <= n {
                let va = _mm256_loadu_pd(a.as_ptr().add(i));
                let vb = _mm256_loadu_pd(b.as_ptr().add(i));
                _mm256_storeu_pd(out.as_mut_ptr().add(i), _mm256_mul_pd(va, vb));
                i += 4;
            }
            while i < n {
                out[i] = a[i] * b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn scale_f64_avx2(a: &[f64], k: f64, out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let vk = _mm256_set1_pd(k);
            let mut i = 0;
            while i + 4 <= n {
                let va = _mm256_loadu_pd(a.as_ptr().add(i));
                _mm256_storeu_pd(out.as_mut_ptr().add(i), _mm256_mul_pd(va, vk));
                i += 4;
            }
            while i < n {
                out[i] = a[i] * k;
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn axpy_f64_avx2(a: f64, x: &[f64], y: &mut [f64]) {
        unsafe {
            let n = y.len();
            let va = _mm256_set1_pd(a);
            let mut i = 0;
            while i + 4 <= n {
                let vx = _mm256_loadu_pd(x.as_ptr().add(i));
                let vy = _mm256_loadu_pd(y.as_ptr().add(i));
                _mm256_storeu_pd(
                    y.as_mut_ptr().add(i),
                    _mm256_add_pd(vy, _mm256_mul_pd(va, vx)),
                );
                i += 4;
            }
            while i < n {
                y[i] += a * x[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn dot_f64_avx2(a: &[f64], b: &[f64]) -> f64 {
        unsafe {
            let n = a.len();
            let mut acc = _mm256_setzero_pd();
            let mut i = 0;
            while i + 4 <= n {
                let va = _mm256_loadu_pd(a.as_ptr().add(i));
                let vb = _mm256_loadu_pd(b.as_ptr().add(i));
                acc = _mm256_add_pd(acc, _mm256_mul_pd(va, vb));
                i += 4;
            }
            let mut lanes = [0.0f64; 4];
            _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
            let mut sum: f64 = lanes.iter().sum();
            while i < n {
                sum += a[i] * b[i];
                i += 1;
            }
            sum
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn sum_f64_avx2(a: &[f64]) -> f64 {
        unsafe {
            let n = a.len();
            let mut acc = _mm256_setzero_pd();
            let mut i = 0;
            while i + 4 <= n {
                acc = _mm256_add_pd(acc, _mm256_loadu_pd(a.as_ptr().add(i)));
                i += 4;
            }
            let mut lanes = [0.0f64; 4];
            _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
            let mut sum: f64 = lanes.iter().sum();
            while i < n {
                sum += a[i];
                i += 1;
            }
            sum
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// ARM NEON Implementation
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
mod arm_simd {
    use std::arch::aarch64::*;

    #[target_feature(enable = "neon")]
    pub unsafe fn add_f32_neon(a: &[f32], b: &[f32], out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 4 <= n {
                let va = vld1q_f32(a.as_ptr().add(i));
                let vb = vld1q_f32(b.as_ptr().add(i));
                vst1q_f32(out.as_mut_ptr().add(i), vaddq_f32(va, vb));
                i += 4;
            }
            while i < n {
                out[i] = a[i] + b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn sub_f32_neon(a: &[f32], b: &[f32], out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 4 <= n {
                let va = vld1q_f32(a.as_ptr().add(i));
                let vb = vld1q_f32(b.as_ptr().add(i));
                vst1q_f32(out.as_mut_ptr().add(i), vsubq_f32(va, vb));
                i += 4;
            }
            while i < n {
                out[i] = a[i] - b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn mul_f32_neon(a: &[f32], b: &[f32], out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 4 <= n {
                let va = vld1q_f32(a.as_ptr().add(i));
                let vb = vld1q_f32(b.as_ptr().add(i));
                vst1q_f32(out.as_mut_ptr().add(i), vmulq_f32(va, vb));
                i += 4;
            }
            while i < n {
                out[i] = a[i] * b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn scale_f32_neon(a: &[f32], k: f32, out: &mut [f32]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 4 <= n {
                let va = vld1q_f32(a.as_ptr().add(i));
                vst1q_f32(out.as_mut_ptr().add(i), vmulq_n_f32(va, k));
                i += 4;
            }
            while i < n {
                out[i] = a[i] * k;
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn axpy_f32_neon(a: f32, x: &[f32], y: &mut [f32]) {
        unsafe {
            let n = y.len();
            let va = vdupq_n_f32(a);
            let mut i = 0;
            while i + 4 <= n {
                let vx = vld1q_f32(x.as_ptr().add(i));
                let vy = vld1q_f32(y.as_ptr().add(i));
                vst1q_f32(y.as_mut_ptr().add(i), vfmaq_f32(vy, va, vx));
                i += 4;
            }
            while i < n {
                y[i] += a * x[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn dot_f32_neon(a: &[f32], b: &[f32]) -> f32 {
        unsafe {
            let n = a.len();
            let mut acc = vdupq_n_f32(0.0);
            let mut i = 0;
            while i + 4 <= n {
                let va = vld1q_f32(a.as_ptr().add(i));
                let vb = vld1q_f32(b.as_ptr().add(i));
                acc = vfmaq_f32(acc, va, vb);
                i += 4;
            }
            let mut sum = vaddvq_f32(acc);
            while i < n {
                sum += a[i] * b[i];
                i += 1;
            }
            sum
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn sum_f32_neon(a: &[f32]) -> f32 {
        unsafe {
            let n = a.len();
            let mut acc = vdupq_n_f32(0.0);
            let mut i = 0;
            while i + 4 <= n {
                acc = vaddq_f32(acc, vld1q_f32(a.as_ptr().add(i)));
                i += 4;
            }
            let mut sum = vaddvq_f32(acc);
            while i < n {
                sum += a[i];
                i += 1;
            }
            sum
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn add_f64_neon(a: &[f64], b: &[f64], out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 2 <= n {
                let va = vld1q_f64(a.as_ptr().add(i));
                let vb = vld1q_f64(b.as_ptr().add(i));
                vst1q_f64(out.as_mut_ptr().add(i), vaddq_f64(va, vb));
                i += 2;
            }
            while i < n {
                out[i] = a[i] + b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn sub_f64_neon(a: &[f64], b: &[f64], out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 2 <= n {
                let va = vld1q_f64(a.as_ptr().add(i));
                let vb = vld1q_f64(b.as_ptr().add(i));
                vst1q_f64(out.as_mut_ptr().add(i), vsubq_f64(va, vb));
                i += 2;
            }
            while i < n {
                out[i] = a[i] - b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn mul_f64_neon(a: &[f64], b: &[f64], out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 2 <= n {
                let va = vld1q_f64(a.as_ptr().add(i));
                let vb = vld1q_f64(b.as_ptr().add(i));
                vst1q_f64(out.as_mut_ptr().add(i), vmulq_f64(va, vb));
                i += 2;
            }
            while i < n {
                out[i] = a[i] * b[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn scale_f64_neon(a: &[f64], k: f64, out: &mut [f64]) {
        unsafe {
            let n = out.len();
            let mut i = 0;
            while i + 2 <= n {
                let va = vld1q_f64(a.as_ptr().add(i));
                vst1q_f64(out.as_mut_ptr().add(i), vmulq_n_f64(va, k));
                i += 2;
            }
            while i < n {
                out[i] = a[i] * k;
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn axpy_f64_neon(a: f64, x: &[f64], y: &mut [f64]) {
        unsafe {
            let n = y.len();
            let va = vdupq_n_f64(a);
            let mut i = 0;
            while i + 2 <= n {
                let vx = vld1q_f64(x.as_ptr().add(i));
                let vy = vld1q_f64(y.as_ptr().add(i));
                vst1q_f64(y.as_mut_ptr().add(i), vfmaq_f64(vy, va, vx));
                i += 2;
            }
            while i < n {
                y[i] += a * x[i];
                i += 1;
            }
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn dot_f64_neon(a: &[f64], b: &[f64]) -> f64 {
        unsafe {
            let n = a.len();
            let mut acc = vdupq_n_f64(0.0);
            let mut i = 0;
            while i + 2 <= n {
                let va = vld1q_f64(a.as_ptr().add(i));
                let vb = vld1q_f64(b.as_ptr().add(i));
                acc = vfmaq_f64(acc, va, vb);
                i += 2;
            }
            let mut sum = vaddvq_f64(acc);
            while i < n {
                sum += a[i] * b[i];
                i += 1;
            }
            sum
        }
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn sum_f64_neon(a: &[f64]) -> f64 {
        unsafe {
            let n = a.len();
            let mut acc = vdupq_n_f64(0.0);
            let mut i = 0;
            while i + 2 <= n {
                acc = vaddq_f64(acc, vld1q_f64(a.as_ptr().add(i)));
                i += 2;
            }
            let mut sum = vaddvq_f64(acc);
            while i < n {
                sum += a[i];
                i += 1;
            }
            sum
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Dispatch + Scalar Fallback
// ═════════════════════════════════════════════════════════════════════════════

pub fn add_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::add_f32_avx2(a, b, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::add_f32_neon(a, b, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] + b[i];
    }
}

pub fn sub_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::sub_f32_avx2(a, b, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::sub_f32_neon(a, b, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] - b[i];
    }
}

pub fn mul_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::mul_f32_avx2(a, b, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::mul_f32_neon(a, b, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] * b[i];
    }
}

pub fn add_f64(a: &[f64], b: &[f64], out: &mut [f64]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::add_f64_avx2(a, b, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::add_f64_neon(a, b, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] + b[i];
    }
}

pub fn sub_f64(a: &[f64], b: &[f64], out: &mut [f64]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::sub_f64_avx2(a, b, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::sub_f64_neon(a, b, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] - b[i];
    }
}

pub fn mul_f64(a: &[f64], b: &[f64], out: &mut [f64]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::mul_f64_avx2(a, b, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::mul_f64_neon(a, b, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] * b[i];
    }
}

pub fn scale_f32(a: &[f32], k: f32, out: &mut [f32]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::scale_f32_avx2(a, k, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::scale_f32_neon(a, k, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] * k;
    }
}

pub fn scale_f64(a: &[f64], k: f64, out: &mut [f64]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::scale_f64_avx2(a, k, out) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::scale_f64_neon(a, k, out) };

    #[allow(unreachable_code)]
    for i in 0..out.len() {
        out[i] = a[i] * k;
    }
}

pub fn axpy_f32(a: f32, x: &[f32], y: &mut [f32]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::axpy_f32_avx2(a, x, y) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::axpy_f32_neon(a, x, y) };

    #[allow(unreachable_code)]
    for i in 0..y.len() {
        y[i] += a * x[i];
    }
}

pub fn axpy_f64(a: f64, x: &[f64], y: &mut [f64]) {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::axpy_f64_avx2(a, x, y) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::axpy_f64_neon(a, x, y) };

    #[allow(unreachable_code)]
    for i in 0..y.len() {
        y[i] += a * x[i];
    }
}

pub fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::dot_f32_avx2(a, b) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::dot_f32_neon(a, b) };

    #[allow(unreachable_code)]
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::dot_f64_avx2(a, b) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::dot_f64_neon(a, b) };

    #[allow(unreachable_code)]
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn sum_f32(a: &[f32]) -> f32 {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::sum_f32_avx2(a) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::sum_f32_neon(a) };

    #[allow(unreachable_code)]
    a.iter().sum()
}

pub fn sum_f64(a: &[f64]) -> f64 {
    #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx2"))]
    return unsafe { x86_simd::sum_f64_avx2(a) };

    #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))]
    return unsafe { arm_simd::sum_f64_neon(a) };

    #[allow(unreachable_code)]
    a.iter().sum()
}
