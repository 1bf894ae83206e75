use super::Bucket;
use crate::Value;

/// Arithmetic mean
#[derive(Clone)]
pub struct Avg;

impl super::stream::Aggregation for Avg {
    #[allow(clippy::cast_precision_loss)]
    fn finish(bucket: &Bucket) -> Value {
        bucket.value / bucket.len as Value
    }
}
