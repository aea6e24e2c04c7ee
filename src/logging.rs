//! Interrupt-safe logging.
//!
//! The capture interrupt cannot touch the serial port: a blocked UART write
//! inside the ISR would stretch the capture cycle past the settle window.
//! Log messages therefore go into a lock-free ring and the poll loop drains
//! them to the transport when it has nothing better to do.
//!
//! ```text
//! Capture ISR            LogStream             Poll loop
//! ───────────            ─────────             ─────────
//! log_warn!() ─────────▶ [e0][e1][e2] ───────▶ serial TX
//! non-blocking           lock-free ring        blocking ok
//! ```
//!
//! One producer context, one consumer context. Push never blocks; if the
//! ring is full the message is counted as dropped and lost — losing a log
//! line is acceptable, stalling the capture path is not.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{LOG_BUFFER_SIZE, MAX_LOG_MSG_LEN};

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Free-running counter value when the entry was pushed.
    pub timestamp_ticks: u32,
    /// Log level.
    pub level: LogLevel,
    /// Message length in bytes.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_LOG_MSG_LEN],
}

const EMPTY_ENTRY: LogEntry = LogEntry {
    timestamp_ticks: 0,
    level: LogLevel::Info,
    len: 0,
    msg: [0; MAX_LOG_MSG_LEN],
};

/// Lock-free SPSC log ring.
///
/// # Safety
///
/// `UnsafeCell` inside, safe under the crate's context discipline: exactly
/// one producer context pushes, exactly one consumer context drains. The
/// producer is the sole writer of `write_idx`, the consumer the sole writer
/// of `read_idx`; each entry slot is written before the Release store that
/// publishes it.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: single producer, single consumer, atomic index hand-off.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream. Usable in a `static`.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be power of 2");

        Self {
            entries: UnsafeCell::new([EMPTY_ENTRY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry. Producer side only; never blocks.
    ///
    /// Returns `false` if the ring was full and the message dropped.
    #[inline]
    pub fn push(&self, timestamp_ticks: u32, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: sole producer; the slot at `write` is not visible to the
        // consumer until the Release store below.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_ticks = timestamp_ticks;
            entry.level = level;
            entry.len = msg.len().min(MAX_LOG_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the oldest entry. Consumer side only.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: sole consumer; the Acquire load above published the slot.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Count of messages dropped because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Whether entries are waiting to be drained.
    #[inline]
    pub fn has_entries(&self) -> bool {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        read != write
    }

    /// Number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format arguments into a byte buffer, truncating to fit.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Push a formatted message at an explicit level.
#[macro_export]
macro_rules! log_msg {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::config::MAX_LOG_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_msg!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_msg!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_msg!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_msg!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}
