//! Rolling window of per-operation latency samples

use std::time::Duration;

/// Keeps the most recent `capacity` samples, overwriting the oldest.
pub struct SampleWindow {
    samples: Vec<Duration>,
    capacity: usize,
    next: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    /// Record one batch: `elapsed` spent on `ops` operations.
    pub fn record_batch(&mut self, elapsed: Duration, ops: u32) {
        if ops == 0 {
            return;
        }
        self.push(elapsed / ops);
    }

    pub fn push(&mut self, sample: Duration) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.next] = sample;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let sum: Duration = self.samples.iter().sum();
        sum / self.samples.len() as u32
    }

    pub fn min_max(&self) -> (Duration, Duration) {
        let mut iter = self.samples.iter().copied();
        let Some(first) = iter.next() else {
            return (Duration::ZERO, Duration::ZERO);
        };
        iter.fold((first, first), |(min, max), s| (min.min(s), max.max(s)))
    }
}
