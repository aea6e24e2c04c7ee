//! Interrupt-driven keystroke capture state machine.
//!
//! Pure logic over a small hardware seam. The hardware supplies three
//! coordinated counter channels sharing one free-running 16-bit counter:
//! edge-timestamp capture for the first wavefront, edge-timestamp capture
//! for the coincidence, and a compare-match settle timer. This engine turns
//! those raw events into exactly one validated [`CaptureRecord`] per
//! keystroke, published through the [`CaptureMailbox`].
//!
//! ```text
//! Idle ──wavefront──▶ WavefrontSeen ──coincidence──▶ Complete ──settle──▶ Idle
//! ```
//!
//! Runs to completion inside the interrupt context: no blocking, no
//! allocation. Side effects are limited to the mailbox, the fault state and
//! the HAL lines.

use crate::fault::{FaultCode, FaultState};
use crate::mailbox::CaptureMailbox;
use crate::record::{CaptureRecord, LatchSnapshot};

/// The hardware lines the capture engine drives.
///
/// The implementation behind this trait is the only part of the capture path
/// that touches registers; everything above it is host-testable.
pub trait CaptureHal {
    /// Sample the polarity and first-arrival latches. Only meaningful while
    /// the latch reset line is deasserted.
    fn read_latches(&self) -> LatchSnapshot;

    /// Drive the latch reset line.
    fn set_latch_reset(&mut self, asserted: bool);

    /// Start the settle countdown from zero.
    fn arm_settle_timer(&mut self);

    /// Suppress further settle-timer events until rearmed.
    fn disarm_settle_timer(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// No capture in progress.
    Idle,
    /// First wavefront timestamped; waiting for the coincidence.
    WavefrontSeen,
    /// Cycle closed; latch reset asserted until the settle timer fires.
    Complete,
}

/// The capture producer.
///
/// Owned by the interrupt context. Each `on_*` handler corresponds to one
/// hardware event and runs to completion before the next can arrive (the
/// interrupt is not re-entrant).
pub struct CaptureEngine<'a> {
    state: State,
    start_ticks: u16,
    error: bool,
    mailbox: &'a CaptureMailbox,
    fault: &'a FaultState,
}

impl<'a> CaptureEngine<'a> {
    pub fn new(mailbox: &'a CaptureMailbox, fault: &'a FaultState) -> Self {
        Self {
            state: State::Idle,
            start_ticks: 0,
            error: false,
            mailbox,
            fault,
        }
    }

    /// First-wavefront event. `timestamp` is the counter value latched by
    /// the capture hardware at the edge, not a software read.
    pub fn on_wavefront(&mut self, _hal: &mut dyn CaptureHal, timestamp: u16) {
        match self.state {
            State::Idle => {
                // Clean cycle start.
                self.error = false;
                self.start_ticks = timestamp;
                self.state = State::WavefrontSeen;
            }
            State::WavefrontSeen | State::Complete => {
                // A second strike while the first is still in flight. The
                // open cycle keeps its original start; whatever completes is
                // not trustworthy and will be discarded.
                self.error = true;
                self.fault.set(FaultCode::OverlappingCapture, timestamp as u32);
            }
        }
    }

    /// Coincidence event: the second channel's wavefront arrived.
    pub fn on_coincidence(&mut self, hal: &mut dyn CaptureHal, timestamp: u16) {
        match self.state {
            State::WavefrontSeen => {
                // The latches clear the moment reset asserts, so the
                // snapshot has to come first.
                let latches = hal.read_latches();

                // Modulo-2^16 difference handles a single rollover of the
                // free-running counter. The settle timeout bounds a capture
                // to far less than one counter period, so more than one
                // wrap cannot occur within a cycle.
                let delta = timestamp.wrapping_sub(self.start_ticks);

                if !self.error {
                    let record = CaptureRecord::from_latches(latches, delta);
                    if !self.mailbox.publish(record) {
                        self.fault.set(FaultCode::ConsumerLag, delta as u32);
                    }
                }
            }
            State::Idle | State::Complete => {
                // Coincidence with no capture open. Not a valid cycle
                // start; reset the latches and let the settle timer bring
                // things back to a known state.
                self.error = true;
                self.fault.set(FaultCode::SpuriousCoincidence, timestamp as u32);
            }
        }

        hal.set_latch_reset(true);
        hal.arm_settle_timer();
        self.state = State::Complete;
    }

    /// Settle-timer event: the transducer ring-down window has passed.
    pub fn on_settle_timeout(&mut self, hal: &mut dyn CaptureHal) {
        hal.set_latch_reset(false);
        hal.disarm_settle_timer();

        // The error flag never carries into the next cycle.
        self.error = false;
        self.state = State::Idle;
    }

    /// True while a capture is open or settling.
    pub fn capture_open(&self) -> bool {
        self.state != State::Idle
    }

    /// True while the current cycle is poisoned and will be discarded.
    pub fn error_pending(&self) -> bool {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Channel;

    struct TestHal {
        latches: LatchSnapshot,
        reset_asserted: bool,
        settle_armed: bool,
    }

    impl Default for TestHal {
        fn default() -> Self {
            Self {
                latches: LatchSnapshot {
                    channel_a_positive: true,
                    channel_b_positive: false,
                    channel_b_first: false,
                },
                reset_asserted: false,
                settle_armed: false,
            }
        }
    }

    impl CaptureHal for TestHal {
        fn read_latches(&self) -> LatchSnapshot {
            self.latches
        }
        fn set_latch_reset(&mut self, asserted: bool) {
            self.reset_asserted = asserted;
        }
        fn arm_settle_timer(&mut self) {
            self.settle_armed = true;
        }
        fn disarm_settle_timer(&mut self) {
            self.settle_armed = false;
        }
    }

    #[test]
    fn test_clean_cycle_publishes_once() {
        let mailbox = CaptureMailbox::new();
        let fault = FaultState::new();
        let mut hal = TestHal::default();
        let mut engine = CaptureEngine::new(&mailbox, &fault);

        engine.on_wavefront(&mut hal, 100);
        assert!(!mailbox.is_ready());

        engine.on_coincidence(&mut hal, 400);
        assert!(mailbox.is_ready());
        assert!(hal.reset_asserted);
        assert!(hal.settle_armed);

        let record = mailbox.try_take().unwrap();
        assert_eq!(record.delta_ticks, 300);
        assert_eq!(record.first_channel, Channel::A);
        assert!(!fault.is_active());

        engine.on_settle_timeout(&mut hal);
        assert!(!hal.reset_asserted);
        assert!(!hal.settle_armed);
        assert!(!engine.capture_open());
    }

    #[test]
    fn test_rollover_delta() {
        let mailbox = CaptureMailbox::new();
        let fault = FaultState::new();
        let mut hal = TestHal::default();
        let mut engine = CaptureEngine::new(&mailbox, &fault);

        engine.on_wavefront(&mut hal, 0xFFF0);
        engine.on_coincidence(&mut hal, 0x0010);

        assert_eq!(mailbox.try_take().unwrap().delta_ticks, 0x0020);
    }

    #[test]
    fn test_coincidence_without_wavefront() {
        let mailbox = CaptureMailbox::new();
        let fault = FaultState::new();
        let mut hal = TestHal::default();
        let mut engine = CaptureEngine::new(&mailbox, &fault);

        engine.on_coincidence(&mut hal, 500);

        assert!(!mailbox.is_ready());
        assert!(fault.is_active());
        assert_eq!(fault.code(), FaultCode::SpuriousCoincidence);
        // Latches still get reset so the next keystroke starts clean.
        assert!(hal.reset_asserted);

        engine.on_settle_timeout(&mut hal);
        assert!(!engine.error_pending());
    }

    #[test]
    fn test_overlapping_wavefront_discards_cycle() {
        let mailbox = CaptureMailbox::new();
        let fault = FaultState::new();
        let mut hal = TestHal::default();
        let mut engine = CaptureEngine::new(&mailbox, &fault);

        engine.on_wavefront(&mut hal, 10);
        engine.on_wavefront(&mut hal, 20); // second strike, capture open

        assert!(fault.is_active());
        assert_eq!(fault.code(), FaultCode::OverlappingCapture);

        // The poisoned cycle completes but publishes nothing.
        engine.on_coincidence(&mut hal, 40);
        assert!(!mailbox.is_ready());

        // Next cycle is clean.
        engine.on_settle_timeout(&mut hal);
        engine.on_wavefront(&mut hal, 100);
        engine.on_coincidence(&mut hal, 103);
        assert_eq!(mailbox.try_take().unwrap().delta_ticks, 3);
    }
}
