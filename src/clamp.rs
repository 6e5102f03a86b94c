use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{ProjectedError, Result};

// ------------- RangeClamp -------------
/// A value that is kept within `[min, max]` on every write, including the
/// initial one.
///
/// ```
/// use projected::clamp::RangeClamp;
/// let mut volume = RangeClamp::new(50, 0, 100).unwrap();
/// volume.set_value(150);
/// assert_eq!(volume.value(), 100);
/// assert!(volume.projection().is_at_max());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeClamp<V> {
    value: V,
    min: V,
    max: V,
}

impl<V: PartialOrd + Clone + fmt::Debug> RangeClamp<V> {
    /// Creates a clamp over `[min, max]` holding `value` clamped into range.
    ///
    /// Fails with [`ProjectedError::InvalidRange`] when `min > max` or when the
    /// bounds cannot be compared at all (a NaN bound, for instance).
    pub fn new(value: V, min: V, max: V) -> Result<Self> {
        match min.partial_cmp(&max) {
            Some(Ordering::Less) | Some(Ordering::Equal) => {}
            Some(Ordering::Greater) => {
                return Err(ProjectedError::InvalidRange {
                    message: format!("minimum {:?} is greater than maximum {:?}", min, max),
                });
            }
            None => {
                return Err(ProjectedError::InvalidRange {
                    message: format!("bounds {:?} and {:?} are not comparable", min, max),
                });
            }
        }
        let value = clamp(value, &min, &max);
        Ok(Self { value, min, max })
    }
}

impl<V: PartialOrd + Clone> RangeClamp<V> {
    pub fn value(&self) -> V {
        self.value.clone()
    }
    pub fn set_value(&mut self, value: V) {
        self.value = clamp(value, &self.min, &self.max);
    }
    pub fn min(&self) -> &V {
        &self.min
    }
    pub fn max(&self) -> &V {
        &self.max
    }
    pub fn projection(&self) -> ClampedState<V> {
        ClampedState {
            current_value: self.value.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
        }
    }
}

// A value that cannot be ordered against the bounds lands on the minimum,
// which keeps the range invariant total.
fn clamp<V: PartialOrd + Clone>(value: V, min: &V, max: &V) -> V {
    match value.partial_cmp(min) {
        None | Some(Ordering::Less) => min.clone(),
        _ if value > *max => max.clone(),
        _ => value,
    }
}

// ------------- ClampedState -------------
#[derive(Debug, Clone, PartialEq)]
pub struct ClampedState<V> {
    pub current_value: V,
    pub min: V,
    pub max: V,
}

impl<V: PartialOrd + Clone> ClampedState<V> {
    pub fn range(&self) -> RangeInclusive<V> {
        self.min.clone()..=self.max.clone()
    }
    pub fn is_at_min(&self) -> bool {
        self.current_value == self.min
    }
    pub fn is_at_max(&self) -> bool {
        self.current_value == self.max
    }
}

impl<V: Measure> ClampedState<V> {
    /// Position of the current value within the range, in `[0, 1]`, computed
    /// in `f64`. A degenerate range (`min == max`) reports 0. Ranges wider
    /// than `f64::MAX` are handled, integers beyond 2^53 are rounded to the
    /// nearest `f64` first, and infinite bounds give NaN.
    pub fn percentage(&self) -> f64 {
        let current = self.current_value.measure();
        let min = self.min.measure();
        let max = self.max.measure();
        if max == min {
            return 0.;
        }
        let span = max - min;
        if span.is_finite() {
            (current - min) / span
        } else {
            (current / 2. - min / 2.) / (max / 2. - min / 2.)
        }
    }
}

/// Numbers whose position in a range can be measured as an `f64`.
pub trait Measure {
    fn measure(&self) -> f64;
}

macro_rules! measure_as_f64 {
    ($($number:ty),*) => {
        $(
            impl Measure for $number {
                fn measure(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

measure_as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<V: fmt::Display> fmt::Display for ClampedState<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} in [{}, {}]", self.current_value, self.min, self.max)
    }
}
