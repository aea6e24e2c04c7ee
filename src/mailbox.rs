//! Lock-free single-slot hand-off between the capture interrupt and the
//! dispatch loop.
//!
//! ```text
//! Capture ISR ──────▶ CaptureMailbox ──────▶ Dispatch loop
//!                     (one slot, one flag)
//! ```
//!
//! There is deliberately no queue: the hardware settle timeout bounds how
//! fast keystrokes can complete, and the poll-and-decode path is far shorter
//! than that window. A second publish landing before the previous record was
//! consumed is a design-error signal, not a buffering problem — the mailbox
//! reports it to the producer so it can be counted as a fault.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::record::CaptureRecord;

/// Single-producer/single-consumer capture mailbox.
///
/// # Safety
///
/// Uses `UnsafeCell` internally but is safe under the access discipline the
/// rest of the crate follows:
/// - The interrupt context is the sole writer of the slot and the sole
///   setter of `ready`.
/// - The poll context is the sole reader of the slot and the sole clearer
///   of `ready` (its acknowledgment that decoding is done).
///
/// # Memory ordering
///
/// The producer's slot write happens-before its `ready` Release store; the
/// consumer's Acquire load of `ready` therefore makes all record fields
/// visible before they are read.
pub struct CaptureMailbox {
    slot: UnsafeCell<CaptureRecord>,
    ready: AtomicBool,
}

// SAFETY: single producer, single consumer, coordination through `ready`.
unsafe impl Sync for CaptureMailbox {}

impl CaptureMailbox {
    /// Create an empty mailbox. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            slot: UnsafeCell::new(CaptureRecord::EMPTY),
            ready: AtomicBool::new(false),
        }
    }

    /// Publish a completed capture. Producer side only.
    ///
    /// Returns `false` if the previous record had not been consumed yet; the
    /// new record still wins the slot (last writer wins, matching the
    /// hardware's latch behavior) and the caller should record a fault.
    ///
    /// Never blocks, never allocates.
    #[inline]
    pub fn publish(&self, record: CaptureRecord) -> bool {
        // SAFETY: producer is the sole writer of the slot.
        unsafe {
            *self.slot.get() = record;
        }
        // AcqRel: publishes the slot write and reports a still-set flag.
        !self.ready.swap(true, Ordering::AcqRel)
    }

    /// Take the pending record, clearing the ready flag. Consumer side only.
    ///
    /// Returns `None` when no unconsumed capture is pending. A second call
    /// without an intervening publish returns `None` — consumed data is
    /// never handed out again as new.
    #[inline]
    pub fn try_take(&self) -> Option<CaptureRecord> {
        if !self.ready.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: consumer is the sole reader; the Acquire load above made
        // the producer's slot write visible.
        let record = unsafe { *self.slot.get() };

        // Release: the slot read completes before the acknowledgment is
        // visible to the producer.
        self.ready.store(false, Ordering::Release);
        Some(record)
    }

    /// Non-consuming check for a pending capture.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Default for CaptureMailbox {
    fn default() -> Self {
        Self::new()
    }
}
