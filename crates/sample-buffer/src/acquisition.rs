//! Conversion-Complete Acquisition
//!
//! The analog front end writes each finished conversion into a
//! [`ConversionRegister`] and then raises its completion interrupt. The
//! interrupt is bound to an [`AcquisitionHandle`], which copies the register
//! into the next window slot.

use crate::{RawSample, SampleBuffer};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Target of the front end's continuous conversion
#[derive(Debug, Default)]
pub struct ConversionRegister {
    value: AtomicU32,
}

impl ConversionRegister {
    /// Create a register holding zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a completed conversion (peripheral side)
    pub fn store(&self, sample: RawSample) {
        self.value.store(sample, Ordering::Release);
    }

    /// Read the latest completed conversion
    pub fn load(&self) -> RawSample {
        self.value.load(Ordering::Acquire)
    }
}

/// Handle bound to the conversion-complete interrupt.
///
/// Cloning shares the same register and window; only one clone may act as
/// the producer at a time.
#[derive(Debug)]
pub struct AcquisitionHandle<const N: usize> {
    register: Arc<ConversionRegister>,
    buffer: Arc<SampleBuffer<N>>,
}

impl<const N: usize> AcquisitionHandle<N> {
    /// Bind a register to the window it feeds
    pub fn new(register: Arc<ConversionRegister>, buffer: Arc<SampleBuffer<N>>) -> Self {
        Self { register, buffer }
    }

    /// Register the peripheral converts into
    pub fn register(&self) -> &ConversionRegister {
        &self.register
    }

    /// Interrupt entry point: move the latched reading into the window
    pub fn on_conversion_complete(&self) {
        let sample = self.register.load();
        self.buffer.push(sample);
        trace!(sample, "Conversion complete");
    }
}

impl<const N: usize> Clone for AcquisitionHandle<N> {
    fn clone(&self) -> Self {
        Self {
            register: Arc::clone(&self.register),
            buffer: Arc::clone(&self.buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_copies_register_into_window() {
        let register = Arc::new(ConversionRegister::new());
        let buffer: Arc<SampleBuffer<4>> = Arc::new(SampleBuffer::new());
        let handle = AcquisitionHandle::new(Arc::clone(&register), Arc::clone(&buffer));

        register.store(1234);
        handle.on_conversion_complete();
        register.store(99);
        handle.on_conversion_complete();

        assert_eq!(buffer.snapshot(), [1234, 99, 0, 0]);
        assert_eq!(buffer.write_index(), 2);
    }

    #[test]
    fn test_repeated_callback_without_new_conversion() {
        let register = Arc::new(ConversionRegister::new());
        let buffer: Arc<SampleBuffer<3>> = Arc::new(SampleBuffer::new());
        let handle = AcquisitionHandle::new(register, Arc::clone(&buffer));

        handle.register().store(500);
        for _ in 0..3 {
            handle.on_conversion_complete();
        }

        assert_eq!(buffer.snapshot(), [500; 3]);
    }
}
