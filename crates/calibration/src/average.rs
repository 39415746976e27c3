//! Moving Average over the Sample Window

use sample_buffer::RawSample;

/// Arithmetic mean of `samples`, truncated to an unsigned reading.
///
/// Accumulates in single precision and drops the fractional part of the
/// result, so `[1, 2]` averages to `1`. An empty window averages to `0`.
pub fn moving_average(samples: &[RawSample]) -> RawSample {
    if samples.is_empty() {
        return 0;
    }

    let sum: f32 = samples.iter().map(|&s| s as f32).sum();
    (sum / samples.len() as f32) as RawSample
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_constant_window() {
        assert_eq!(moving_average(&[100; 10]), 100);
        assert_eq!(moving_average(&[4000; 10]), 4000);
    }

    #[test]
    fn test_average_is_truncated() {
        assert_eq!(moving_average(&[1, 2]), 1);
        assert_eq!(moving_average(&[10, 10, 11]), 10);
    }

    #[test]
    fn test_zero_seeded_warm_up() {
        // Three real samples in a ten-slot window still count the seed
        let mut window = [0; 10];
        window[..3].copy_from_slice(&[1000, 1000, 1000]);
        assert_eq!(moving_average(&window), 300);
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(moving_average(&[]), 0);
    }

    proptest! {
        #[test]
        fn test_matches_integer_mean_for_adc_range(
            samples in proptest::collection::vec(0u32..4096, 1..32)
        ) {
            let exact = samples.iter().map(|&s| s as u64).sum::<u64>() / samples.len() as u64;
            prop_assert_eq!(moving_average(&samples) as u64, exact);
        }
    }
}
