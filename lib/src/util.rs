extern crate num_traits;

use std::ops::{AddAssign, Deref};

use num_traits::Unsigned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Monotonic counter for tracking written fields during a backfill pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Counter<T>(T)
where
    T: Copy + Unsigned + AddAssign;

impl<T> Counter<T>
where
    T: Copy + Unsigned + AddAssign,
{
    pub fn new(counter: T) -> Self {
        Self(counter)
    }

    pub fn increment(&mut self) {
        self.increment_by(T::one());
    }

    fn increment_by(&mut self, count: T) {
        self.0 += count;
    }

    #[inline]
    pub fn get(&self) -> T {
        self.0
    }
}

impl<T> Deref for Counter<T>
where
    T: Copy + Unsigned + AddAssign,
{
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> AddAssign for Counter<T>
where
    T: Copy + Unsigned + AddAssign,
{
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

/// Coerce a JSON value into an integer.
///
/// Upstream alignment tooling emits verse numbers and pericope bounds
/// either as numbers or as numeric strings. Anything else stays absent.
pub fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Serde adapter over [`coerce_u32`] for optional numeric fields.
pub fn de_coerce_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_u32))
}
