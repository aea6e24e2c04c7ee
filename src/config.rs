//! Compile-time tunables.
//!
//! Every constant here is fixed at build time: the decode tables are
//! hand-calibrated to one physical keyboard, so there is nothing to set or
//! persist at runtime.

/// Counter ticks per quantization bucket entry. The free-running capture
/// counter advances roughly three ticks per table slot of wavefront travel,
/// so integer division by this value turns a raw TDOA into a table index.
pub const QUANT_DIVISOR: u16 = 3;

/// Entries per decode table: a short leading bucket plus 21 full buckets of
/// rounding tolerance (see [`crate::tables`]).
pub const TABLE_LEN: usize = 108;

/// Compare-match value for the settle timer. After a coincidence event the
/// latch reset stays asserted this many counter ticks so the transducer
/// ring-down cannot retrigger the latches.
pub const SETTLE_TIMEOUT_TICKS: u16 = 0x00F0;

/// Entries in the interrupt-safe log ring.
pub const LOG_BUFFER_SIZE: usize = 64;

/// Maximum formatted log message length in bytes.
pub const MAX_LOG_MSG_LEN: usize = 96;
