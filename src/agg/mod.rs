pub(crate) mod avg;
pub(crate) mod max;
pub(crate) mod min;
pub(crate) mod stream;

pub use avg::Avg;
pub use max::Max;
pub use min::Min;
pub use stream::{Aggregation, BucketStream};

use crate::Value;

/// Running aggregate of the present values of one column.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bucket {
    /// Accumulated value
    pub value: Value,

    /// Number of values folded in
    pub len: usize,
}

impl Bucket {
    /// Folds a value into the bucket.
    ///
    /// Missing values (and NaNs) are skipped.
    pub fn push<A: Aggregation>(&mut self, x: Option<Value>) {
        let Some(x) = x.filter(|x| !x.is_nan()) else {
            return;
        };

        if self.len == 0 {
            self.value = A::init(x);
        } else {
            self.value = A::transform(self.value, x);
        }
        self.len += 1;
    }

    /// Final aggregate, or `None` if no value was folded in.
    #[must_use]
    pub fn finish<A: Aggregation>(&self) -> Option<Value> {
        (self.len > 0).then(|| A::finish(self))
    }
}

/// Aggregates a column of values, ignoring missing ones.
pub fn aggregate<A: Aggregation>(values: impl IntoIterator<Item = Option<Value>>) -> Option<Value> {
    let mut bucket = Bucket::default();

    for x in values {
        bucket.push::<A>(x);
    }

    bucket.finish::<A>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn aggregate_skips_missing() {
        let values = [Some(1.0), None, Some(Value::NAN), Some(3.0)];

        assert_eq!(Some(2.0), aggregate::<Avg>(values));
        assert_eq!(Some(1.0), aggregate::<Min>(values));
        assert_eq!(Some(3.0), aggregate::<Max>(values));
    }

    #[test]
    fn aggregate_all_missing() {
        assert_eq!(None, aggregate::<Avg>([None, None]));
        assert_eq!(None, aggregate::<Max>([]));
    }

    #[test]
    fn aggregate_negative_values() {
        let values = [Some(-4.0), Some(-2.0)];

        assert_eq!(Some(-3.0), aggregate::<Avg>(values));
        assert_eq!(Some(-4.0), aggregate::<Min>(values));
        assert_eq!(Some(-2.0), aggregate::<Max>(values));
    }
}
