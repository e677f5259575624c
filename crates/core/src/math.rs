use num_traits::{Float as NumFloat, FromPrimitive};
use std::ops::{AddAssign, MulAssign, SubAssign};
use std::time::{Duration, Instant};

pub trait RealNumber:
    NumFloat + FromPrimitive + Send + Sync + AddAssign + SubAssign + MulAssign + 'static
{
}

impl<T> RealNumber for T where
    T: NumFloat + FromPrimitive + Send + Sync + AddAssign + SubAssign + MulAssign + 'static
{
}

#[cfg(not(feature = "f32"))]
pub type Scalar = f64;

#[cfg(feature = "f32")]
pub type Scalar = f32;

pub fn dot<T: RealNumber>(lhs: &[T], rhs: &[T]) -> T {
    assert_eq!(lhs.len(), rhs.len(), "dot product dimension mismatch");
    lhs.iter()
        .zip(rhs.iter())
        .fold(T::zero(), |acc, (a, b)| acc + (*a) * (*b))
}

pub fn norm2<T: RealNumber>(data: &[T]) -> T {
    dot(data, data).sqrt()
}

pub fn norm2_diff<T: RealNumber>(lhs: &[T], rhs: &[T]) -> T {
    assert_eq!(lhs.len(), rhs.len(), "norm2_diff dimension mismatch");
    lhs.iter()
        .zip(rhs.iter())
        .fold(T::zero(), |acc, (a, b)| {
            let diff = *a - *b;
            acc + diff * diff
        })
        .sqrt()
}

/// Clamp `value` into `[lower, upper]`. The caller guarantees
/// `lower <= upper`; an inverted interval gives a meaningless result.
pub fn clamp<T: RealNumber>(value: T, lower: T, upper: T) -> T {
    value.max(lower).min(upper)
}

#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    elapsed: Duration,
    running: bool,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.elapsed += self.start.elapsed();
            self.running = false;
        }
    }

    pub fn resume(&mut self) {
        if !self.running {
            self.start = Instant::now();
            self.running = true;
        }
    }

    pub fn elapsed(&self) -> Duration {
        if self.running {
            self.elapsed + self.start.elapsed()
        } else {
            self.elapsed
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp, dot, norm2, norm2_diff, Scalar};
    use approx::assert_relative_eq;

    #[test]
    fn test_dot_norms() {
        let v = [3.0 as Scalar, 4.0];
        assert_relative_eq!(dot(&v, &v), 25.0, epsilon = 1e-12);
        assert_relative_eq!(norm2(&v), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_norm2_diff() {
        let a = [4.0 as Scalar, 6.0];
        let b = [1.0, 2.0];
        assert_relative_eq!(norm2_diff(&a, &b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0 as Scalar, 0.0, 3.0), 3.0);
        assert_eq!(clamp(-1.0 as Scalar, 0.0, 3.0), 0.0);
        assert_eq!(clamp(1.5 as Scalar, 0.0, 3.0), 1.5);
        assert_eq!(clamp(1.5 as Scalar, Scalar::NEG_INFINITY, Scalar::INFINITY), 1.5);
    }
}
