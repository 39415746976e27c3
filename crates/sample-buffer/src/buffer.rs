//! Lock-Free Sample Window Implementation

use crate::RawSample;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Fixed window of the last `N` raw samples.
///
/// The window has no "full" flag: it always holds `N` values, zero-seeded
/// until `N` real samples have arrived. The writer overwrites one slot at a
/// time, so a reader racing with it sees at most one slot that is stale by a
/// single sample.
pub struct SampleBuffer<const N: usize> {
    /// Pre-allocated slots
    slots: [AtomicU32; N],
    /// Next slot to overwrite (always in `0..N`)
    write_index: AtomicUsize,
    /// Total samples written (for statistics)
    samples_received: AtomicUsize,
}

impl<const N: usize> SampleBuffer<N> {
    /// Create a zero-seeded window
    pub fn new() -> Self {
        assert!(N > 0, "Sample window must hold at least one slot");
        Self {
            slots: std::array::from_fn(|_| AtomicU32::new(0)),
            write_index: AtomicUsize::new(0),
            samples_received: AtomicUsize::new(0),
        }
    }

    /// Overwrite the oldest slot with `sample`.
    ///
    /// Must only be called from one producer context.
    pub fn push(&self, sample: RawSample) {
        let index = self.write_index.load(Ordering::Relaxed);

        self.slots[index].store(sample, Ordering::Release);
        self.write_index.store((index + 1) % N, Ordering::Release);
        self.samples_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy out every slot, in storage order
    pub fn snapshot(&self) -> [RawSample; N] {
        std::array::from_fn(|i| self.slots[i].load(Ordering::Acquire))
    }

    /// Index of the slot the next sample will overwrite
    pub fn write_index(&self) -> usize {
        self.write_index.load(Ordering::Acquire)
    }

    /// Number of slots in the window
    pub fn capacity(&self) -> usize {
        N
    }

    /// Total samples pushed since construction
    pub fn samples_received(&self) -> usize {
        self.samples_received.load(Ordering::Relaxed)
    }

    /// Whether at least `N` real samples have replaced the zero seed
    pub fn is_warm(&self) -> bool {
        self.samples_received() >= N
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::fmt::Debug for SampleBuffer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleBuffer")
            .field("slots", &self.snapshot())
            .field("write_index", &self.write_index())
            .field("samples_received", &self.samples_received())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_zero_seeded() {
        let buffer: SampleBuffer<4> = SampleBuffer::new();

        assert_eq!(buffer.snapshot(), [0; 4]);
        assert_eq!(buffer.write_index(), 0);
        assert!(!buffer.is_warm());
    }

    #[test]
    fn test_push_advances_index() {
        let buffer: SampleBuffer<3> = SampleBuffer::new();

        buffer.push(7);
        assert_eq!(buffer.write_index(), 1);
        buffer.push(8);
        assert_eq!(buffer.write_index(), 2);
        buffer.push(9);
        // Wraps back to the oldest slot
        assert_eq!(buffer.write_index(), 0);

        assert_eq!(buffer.snapshot(), [7, 8, 9]);
        assert!(buffer.is_warm());
    }

    #[test]
    fn test_overwrite_oldest() {
        let buffer: SampleBuffer<3> = SampleBuffer::new();

        for sample in [1, 2, 3, 4, 5] {
            buffer.push(sample);
        }

        assert_eq!(buffer.snapshot(), [4, 5, 3]);
        assert_eq!(buffer.samples_received(), 5);
    }

    #[test]
    fn test_concurrent_reader_sees_written_values() {
        use std::sync::Arc;

        let buffer: Arc<SampleBuffer<10>> = Arc::new(SampleBuffer::new());
        let writer = Arc::clone(&buffer);

        let handle = std::thread::spawn(move || {
            for _ in 0..10_000 {
                writer.push(2050);
            }
        });

        // Every slot is either still zero or a complete sample
        for _ in 0..1_000 {
            for slot in buffer.snapshot() {
                assert!(slot == 0 || slot == 2050);
            }
        }

        handle.join().unwrap();
        assert_eq!(buffer.snapshot(), [2050; 10]);
    }

    proptest! {
        #[test]
        fn test_window_holds_most_recent_samples(
            samples in proptest::collection::vec(0u32..4096, 10..200)
        ) {
            let buffer: SampleBuffer<10> = SampleBuffer::new();
            for &sample in &samples {
                buffer.push(sample);
            }

            let mut window = buffer.snapshot().to_vec();
            let mut expected = samples[samples.len() - 10..].to_vec();
            window.sort_unstable();
            expected.sort_unstable();

            prop_assert_eq!(window, expected);
            prop_assert_eq!(buffer.write_index(), samples.len() % 10);
        }
    }
}
