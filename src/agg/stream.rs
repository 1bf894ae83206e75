use super::Bucket;
use crate::{granularity::Granularity, table::Row, Value};
use std::{iter::Peekable, marker::PhantomData};

/// Defines an aggregation.
///
/// - `init` is applied to the first value of a bucket (default: Identity)
///
/// - `transform` defines what to do with each further value (default: Add)
///
/// - `finish` can transform the result value (default: Identity)
pub trait Aggregation {
    /// Seeds the accumulator with the first value.
    fn init(value: Value) -> Value {
        value
    }

    /// Folds another value into the accumulator.
    fn transform(accu: Value, x: Value) -> Value {
        accu + x
    }

    /// Produces the final value of a non-empty bucket.
    fn finish(bucket: &Bucket) -> Value {
        bucket.value
    }
}

/// A streaming bucketer
///
/// Takes in a stream of rows in ascending timestamp order, and emits one
/// aggregated row per non-empty, epoch-aligned bucket.
///
/// The emitted row is stamped with the bucket start, each column holds the
/// aggregate of the values present in that bucket.
pub struct BucketStream<A: Aggregation, I: Iterator> {
    granularity: Granularity,
    width: usize,
    reader: Peekable<I>,
    phantom: PhantomData<A>,
}

impl<'a, A: Aggregation, I: Iterator<Item = &'a Row>> BucketStream<A, I> {
    /// Creates a bucketer over `width` columns.
    pub fn new(granularity: Granularity, width: usize, reader: I) -> Self {
        Self {
            granularity,
            width,
            reader: reader.peekable(),
            phantom: PhantomData,
        }
    }

    fn fold(buckets: &mut [Bucket], row: &Row) {
        for (idx, bucket) in buckets.iter_mut().enumerate() {
            bucket.push::<A>(row.get(idx));
        }
    }
}

impl<'a, A: Aggregation, I: Iterator<Item = &'a Row>> Iterator for BucketStream<A, I> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        let granularity = self.granularity;

        loop {
            // NOTE: Initialize bucket
            let first = self.reader.next()?;
            let bucket_id = granularity.bucket_id(first.ts);

            let mut buckets = vec![Bucket::default(); self.width];
            Self::fold(&mut buckets, first);
            let mut len = 1;

            // NOTE: Add to bucket until the next row starts a new one
            while let Some(row) = self
                .reader
                .next_if(|row| granularity.bucket_id(row.ts) == bucket_id)
            {
                Self::fold(&mut buckets, row);
                len += 1;
            }

            let Some(start) = granularity.bucket_start(first.ts) else {
                log::warn!(
                    "skipping {len} rows at {}: {granularity} bucket is out of range",
                    first.ts
                );
                continue;
            };

            log::trace!("bucket {start} <- {len} rows");

            return Some(Row::new(
                start,
                buckets.iter().map(Bucket::finish::<A>).collect(),
            ));
        }
    }
}
