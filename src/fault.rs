//! Capture-anomaly bookkeeping.
//!
//! A malformed event ordering never crashes the capture cycle: the in-flight
//! read is discarded, the next cycle starts clean, and the anomaly is parked
//! here for a diagnostic consumer to report at its leisure.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// Why a capture cycle was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// Coincidence event with no capture open: the second wavefront fired
    /// without a first. The cycle is not a valid start.
    SpuriousCoincidence = 1,

    /// A new first-wavefront event arrived while a capture was already open
    /// or settling. The in-flight capture is discarded.
    OverlappingCapture = 2,

    /// A capture completed before the previous record was consumed. The
    /// poll loop is running slower than the settle timeout allows for.
    ConsumerLag = 3,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::SpuriousCoincidence,
            2 => FaultCode::OverlappingCapture,
            3 => FaultCode::ConsumerLag,
            _ => FaultCode::None,
        }
    }

    /// Short description for diagnostic output.
    pub fn message(self) -> &'static str {
        match self {
            FaultCode::None => "no fault",
            FaultCode::SpuriousCoincidence => "coincidence without wavefront",
            FaultCode::OverlappingCapture => "overlapping capture",
            FaultCode::ConsumerLag => "capture overwritten before read",
        }
    }
}

impl core::fmt::Display for FaultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Interrupt-safe fault state.
///
/// Set from the capture interrupt, read and cleared by the poll loop. The
/// cumulative count is never cleared so repeated anomalies stay visible
/// across reports.
pub struct FaultState {
    /// True while an unreported fault is pending.
    active: AtomicBool,

    /// Most recent fault code.
    code: AtomicU8,

    /// Code-specific detail (e.g. the counter timestamp of the stray event).
    data: AtomicU32,

    /// Total faults since power-up.
    count: AtomicU32,
}

impl FaultState {
    /// Create new fault state (no fault). Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Record a fault. Safe from interrupt context; never blocks.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.code.store(code as u8, Ordering::Release);
        self.data.store(data, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    /// Check whether an unreported fault is pending.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Most recent fault code (meaningful while `is_active()`).
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    /// Code-specific detail value.
    #[inline]
    pub fn data(&self) -> u32 {
        self.data.load(Ordering::Acquire)
    }

    /// Total faults since power-up.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Mark the pending fault as reported. The counter is preserved.
    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Consistent one-shot view for reporting.
    #[inline]
    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            active: self.is_active(),
            code: self.code(),
            data: self.data(),
            count: self.count(),
        }
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the fault state.
#[derive(Clone, Copy, Debug)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    pub data: u32,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_set_and_clear() {
        let fault = FaultState::new();

        assert!(!fault.is_active());
        assert_eq!(fault.code(), FaultCode::None);
        assert_eq!(fault.count(), 0);

        fault.set(FaultCode::SpuriousCoincidence, 0x1234);

        assert!(fault.is_active());
        assert_eq!(fault.code(), FaultCode::SpuriousCoincidence);
        assert_eq!(fault.data(), 0x1234);
        assert_eq!(fault.count(), 1);

        fault.clear();

        assert!(!fault.is_active());
        assert_eq!(fault.count(), 1); // history preserved
    }

    #[test]
    fn test_fault_count_accumulates() {
        let fault = FaultState::new();

        fault.set(FaultCode::OverlappingCapture, 1);
        fault.clear();
        fault.set(FaultCode::ConsumerLag, 2);
        fault.clear();
        fault.set(FaultCode::OverlappingCapture, 3);

        assert_eq!(fault.count(), 3);
        assert_eq!(fault.code(), FaultCode::OverlappingCapture);
    }
}
