//! Keystroke decoding: quantize a capture's arrival delta and look the key
//! up in the right table.
//!
//! Pure logic, no hardware dependencies, no side effects. The selection of
//! the table is an exhaustive three-way dispatch over (first channel,
//! channel A polarity, shift); the decode itself is a bounds-checked index.

use crate::config::{QUANT_DIVISOR, TABLE_LEN};
use crate::record::{CaptureRecord, Channel, Polarity};
use crate::tables::{self, DecodeTable};

/// One symbol of the keyboard's closed code space.
///
/// Printable ASCII for the type keys, plus a private control block for the
/// machine keys (tab, margins, shift, index...). Control codes are
/// first-class decoder output: downstream consumers interpret them, the
/// decoder just reports which key was struck.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Symbol(u8);

impl Symbol {
    /// Dead-zone entry: the timing landed between keys.
    pub const DEAD: Symbol = Symbol(0);

    /// Margin release key (rings the terminal bell).
    pub const MARGIN_RELEASE: Symbol = Symbol(0x07);
    /// Backspace key.
    pub const BACKSPACE: Symbol = Symbol(0x08);
    /// Tab key.
    pub const TAB: Symbol = Symbol(0x09);
    /// Form feed; shares a code with the right-margin key.
    pub const FORM_FEED: Symbol = Symbol(0x0C);
    /// Right margin set key.
    pub const RIGHT_MARGIN: Symbol = Symbol(0x0C);
    /// Carriage return.
    pub const CARRIAGE_RETURN: Symbol = Symbol(0x0D);
    /// Left margin set key; shares a code with carriage return.
    pub const LEFT_MARGIN: Symbol = Symbol(0x0D);
    /// Correction key (delete).
    pub const CORRECT: Symbol = Symbol(0x7F);

    /// Shift key itself (the wavefront of pressing it).
    pub const SHIFT: Symbol = Symbol(0x80);
    /// Paper index (line advance without carriage return).
    pub const INDEX: Symbol = Symbol(0x81);
    /// Tab clear key.
    pub const TAB_CLEAR: Symbol = Symbol(0x84);
    /// Tab set key.
    pub const TAB_SET: Symbol = Symbol(0x85);
    /// Half-space key.
    pub const HALF_SPACE: Symbol = Symbol(0x86);
    /// The 1/2 glyph key.
    pub const HALF: Symbol = Symbol(171);
    /// The 1/4 glyph key.
    pub const QUARTER: Symbol = Symbol(172);

    /// Wrap a raw code (e.g. a byte from the serial transport).
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        Symbol(code)
    }

    /// The raw code value.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Dead-zone check. Distinct from a decode failure: a dead zone is a
    /// defined table entry, just one with no key behind it.
    #[inline]
    pub const fn is_dead(self) -> bool {
        self.0 == 0
    }

    /// Printable ASCII check.
    #[inline]
    pub const fn is_printable(self) -> bool {
        self.0 >= 0x20 && self.0 <= 0x7E
    }

    /// Anything defined that is not printable: the machine-function keys.
    #[inline]
    pub const fn is_control(self) -> bool {
        !self.is_printable() && !self.is_dead()
    }

    /// The symbol as a character, for printable entries only.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        if self.is_printable() {
            Some(self.0 as char)
        } else {
            None
        }
    }
}

impl core::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.as_char() {
            Some(c) => write!(f, "Symbol({:?})", c),
            None => write!(f, "Symbol(0x{:02X})", self.0),
        }
    }
}

/// Decode failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The quantized delta points past every table: the arrival gap is
    /// larger than the bar is long. Bad capture, not a key.
    OutOfRange { index: u16 },
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::OutOfRange { index } => {
                write!(f, "quantized index {} past table end", index)
            }
        }
    }
}

/// Which of the eight tables a capture decodes against.
///
/// Selection is keyed off channel A's polarity only; channel B's is the
/// hardware complement for a clean strike and rides along in the record for
/// diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableKey {
    pub first_channel: Channel,
    pub channel_a_polarity: Polarity,
    pub shift: bool,
}

impl TableKey {
    /// The selector for a capture under the given shift state.
    #[inline]
    pub fn for_record(record: &CaptureRecord, shift_active: bool) -> Self {
        Self {
            first_channel: record.first_channel,
            channel_a_polarity: record.channel_a_polarity,
            shift: shift_active,
        }
    }

    /// The table this key selects. Exhaustive over all eight combinations.
    pub fn table(self) -> &'static DecodeTable {
        use Channel::*;
        use Polarity::*;

        match (self.first_channel, self.channel_a_polarity, self.shift) {
            (A, Positive, false) => &tables::A_SIDE_A_POSITIVE_NO_SHIFT,
            (A, Positive, true) => &tables::A_SIDE_A_POSITIVE_SHIFT,
            (A, Negative, false) => &tables::A_SIDE_B_POSITIVE_NO_SHIFT,
            (A, Negative, true) => &tables::A_SIDE_B_POSITIVE_SHIFT,
            (B, Positive, false) => &tables::B_SIDE_A_POSITIVE_NO_SHIFT,
            (B, Positive, true) => &tables::B_SIDE_A_POSITIVE_SHIFT,
            (B, Negative, false) => &tables::B_SIDE_B_POSITIVE_NO_SHIFT,
            (B, Negative, true) => &tables::B_SIDE_B_POSITIVE_SHIFT,
        }
    }
}

/// Quantize a raw arrival delta into a table index.
///
/// Integer division truncates, so each index covers `QUANT_DIVISOR` ticks of
/// timing jitter; the repeated table entries widen that to a full bucket.
#[inline]
pub fn quantize(delta_ticks: u16) -> u16 {
    delta_ticks / QUANT_DIVISOR
}

/// Decode a capture into the struck key's symbol.
///
/// Returns [`DecodeError::OutOfRange`] instead of reading past the table
/// when the delta is larger than any key can produce — an unrecognized
/// keystroke is reported, never mistaken for the code-0 dead zone.
pub fn decode(record: &CaptureRecord, shift_active: bool) -> Result<Symbol, DecodeError> {
    let index = quantize(record.delta_ticks);
    if index as usize >= TABLE_LEN {
        return Err(DecodeError::OutOfRange { index });
    }

    let table = TableKey::for_record(record, shift_active).table();
    Ok(Symbol::from_code(table[index as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(first: Channel, a_pol: Polarity, delta: u16) -> CaptureRecord {
        CaptureRecord {
            first_channel: first,
            channel_a_polarity: a_pol,
            channel_b_polarity: match a_pol {
                Polarity::Positive => Polarity::Negative,
                Polarity::Negative => Polarity::Positive,
            },
            delta_ticks: delta,
        }
    }

    #[test]
    fn test_symbol_classification() {
        assert!(Symbol::DEAD.is_dead());
        assert!(!Symbol::DEAD.is_control());

        assert!(Symbol::from_code(b'h').is_printable());
        assert_eq!(Symbol::from_code(b'h').as_char(), Some('h'));

        assert!(Symbol::SHIFT.is_control());
        assert_eq!(Symbol::SHIFT.as_char(), None);
        assert!(Symbol::TAB.is_control());
        assert!(Symbol::HALF.is_control());
    }

    #[test]
    fn test_quantize_buckets() {
        assert_eq!(quantize(0), 0);
        assert_eq!(quantize(2), 0);
        assert_eq!(quantize(3), 1);
        assert_eq!(quantize(24), 8);
    }

    #[test]
    fn test_center_key_decodes() {
        let record = capture(Channel::A, Polarity::Positive, 0);
        assert_eq!(decode(&record, false).unwrap(), Symbol::from_code(b'h'));
        assert_eq!(decode(&record, true).unwrap(), Symbol::from_code(b'H'));
    }

    #[test]
    fn test_selection_uses_channel_a_polarity() {
        // Same delta, opposite A polarity: different table, different key.
        let pos = capture(Channel::B, Polarity::Positive, 45);
        let neg = capture(Channel::B, Polarity::Negative, 45);
        assert_eq!(decode(&pos, false).unwrap(), Symbol::from_code(b'8'));
        assert_eq!(decode(&neg, false).unwrap(), Symbol::from_code(b'j'));
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let record = capture(Channel::A, Polarity::Positive, (TABLE_LEN as u16) * 3);
        assert_eq!(
            decode(&record, false),
            Err(DecodeError::OutOfRange { index: TABLE_LEN as u16 })
        );

        // Largest in-range delta still decodes.
        let record = capture(Channel::A, Polarity::Positive, (TABLE_LEN as u16) * 3 - 1);
        assert!(decode(&record, false).is_ok());
    }
}
