//! The eight keystroke decode tables.
//!
//! Pure data, compiled in. A quantized time-difference-of-arrival indexes
//! one of these tables; which table is decided by the side of the keyboard
//! the struck key's tab sits on, which channel's wave started positive, and
//! the shift state (see [`crate::decoder::TableKey`]).
//!
//! Each table holds [`TABLE_LEN`] entries: adjacent entries repeat the same
//! symbol so that a few ticks of timing jitter still land in the right
//! bucket. A zero entry is a dead zone — no key maps there.

use crate::config::TABLE_LEN;
use crate::decoder::Symbol;

/// A full quantized-TDOA lookup table.
pub type DecodeTable = [u8; TABLE_LEN];

const SHIFT: u8 = Symbol::SHIFT.code();
const INDEX: u8 = Symbol::INDEX.code();
const TAB: u8 = Symbol::TAB.code();
const TAB_SET: u8 = Symbol::TAB_SET.code();
const TAB_CLEAR: u8 = Symbol::TAB_CLEAR.code();
const MARGIN_RELEASE: u8 = Symbol::MARGIN_RELEASE.code();
const LEFT_MARGIN: u8 = Symbol::LEFT_MARGIN.code();
const RIGHT_MARGIN: u8 = Symbol::RIGHT_MARGIN.code();
const HALF_SPACE: u8 = Symbol::HALF_SPACE.code();
const BACKSPACE: u8 = Symbol::BACKSPACE.code();
const CORRECT: u8 = Symbol::CORRECT.code();
const HALF: u8 = Symbol::HALF.code();
const QUARTER: u8 = Symbol::QUARTER.code();

/// Keys with tabs on channel A's side of the acoustic bar, channel A's
/// wavefront initially positive, shift up.
pub static A_SIDE_A_POSITIVE_NO_SHIFT: DecodeTable = [
    b'h', b'h', b'h', b'y',
    b'y', b'y', b'y', b'y',
    b'6', b'6', b'6', b'6', b'6',
    b'g', b'g', b'g', b'g', b'g',
    b'v', b'v', b'v', b'v', b'v',
    b'5', b'5', b'5', b'5', b'5',
    b'r', b'r', b'r', b'r', b'r',
    b'c', b'c', b'c', b'c', b'c',
    b'd', b'd', b'd', b'd', b'd',
    b'e', b'e', b'e', b'e', b'e',
    b'3', b'3', b'3', b'3', b'3',
    b's', b's', b's', b's', b's',
    b'z', b'z', b'z', b'z', b'z',
    b'2', b'2', b'2', b'2', b'2',
    b'q', b'q', b'q', b'q', b'q',
    b' ', b' ', b' ', b' ', b' ',
    SHIFT, SHIFT, SHIFT, SHIFT, SHIFT,
    0, 0, 0, 0, 0,
    TAB, TAB, TAB, TAB, TAB,
    0, 0, 0, 0, 0,
    TAB_SET, TAB_SET, TAB_SET, TAB_SET, TAB_SET,
    MARGIN_RELEASE, MARGIN_RELEASE, MARGIN_RELEASE, MARGIN_RELEASE, MARGIN_RELEASE,
];

/// Keys with tabs on channel A's side of the acoustic bar, channel A's
/// wavefront initially positive, shift down.
pub static A_SIDE_A_POSITIVE_SHIFT: DecodeTable = [
    b'H', b'H', b'H', b'Y',
    b'Y', b'Y', b'Y', b'Y',
    b'^', b'^', b'^', b'^', b'^',
    b'G', b'G', b'G', b'G', b'G',
    b'V', b'V', b'V', b'V', b'V',
    b'%', b'%', b'%', b'%', b'%',
    b'R', b'R', b'R', b'R', b'R',
    b'C', b'C', b'C', b'C', b'C',
    b'D', b'D', b'D', b'D', b'D',
    b'E', b'E', b'E', b'E', b'E',
    b'#', b'#', b'#', b'#', b'#',
    b'S', b'S', b'S', b'S', b'S',
    b'Z', b'Z', b'Z', b'Z', b'Z',
    b'@', b'@', b'@', b'@', b'@',
    b'Q', b'Q', b'Q', b'Q', b'Q',
    b' ', b' ', b' ', b' ', b' ',
    SHIFT, SHIFT, SHIFT, SHIFT, SHIFT,
    0, 0, 0, 0, 0,
    TAB, TAB, TAB, TAB, TAB,
    0, 0, 0, 0, 0,
    TAB_SET, TAB_SET, TAB_SET, TAB_SET, TAB_SET,
    MARGIN_RELEASE, MARGIN_RELEASE, MARGIN_RELEASE, MARGIN_RELEASE, MARGIN_RELEASE,
];

/// Keys with tabs on channel A's side of the acoustic bar, channel B's
/// wavefront initially positive, shift up.
pub static A_SIDE_B_POSITIVE_NO_SHIFT: DecodeTable = [
    b'h', b'h', b'h', b'b',
    b'b', b'b', b'b', b'b',
    b'6', b'6', b'6', b'6', b'6',
    b't', b't', b't', b't', b't',
    b'v', b'v', b'v', b'v', b'v',
    b'f', b'f', b'f', b'f', b'f',
    b'r', b'r', b'r', b'r', b'r',
    b'4', b'4', b'4', b'4', b'4',
    b'd', b'd', b'd', b'd', b'd',
    b'x', b'x', b'x', b'x', b'x',
    b'3', b'3', b'3', b'3', b'3',
    b'w', b'w', b'w', b'w', b'w',
    b'z', b'z', b'z', b'z', b'z',
    b'a', b'a', b'a', b'a', b'a',
    b'q', b'q', b'q', b'q', b'q',
    b'1', b'1', b'1', b'1', b'1',
    SHIFT, SHIFT, SHIFT, SHIFT, SHIFT,
    0, 0, 0, 0, 0,
    TAB, TAB, TAB, TAB, TAB,
    HALF_SPACE, HALF_SPACE, HALF_SPACE, HALF_SPACE, HALF_SPACE,
    TAB_SET, TAB_SET, TAB_SET, TAB_SET, TAB_SET,
    TAB_CLEAR, TAB_CLEAR, TAB_CLEAR, TAB_CLEAR, TAB_CLEAR,
];

/// Keys with tabs on channel A's side of the acoustic bar, channel B's
/// wavefront initially positive, shift down.
pub static A_SIDE_B_POSITIVE_SHIFT: DecodeTable = [
    b'H', b'H', b'H', b'B',
    b'B', b'B', b'B', b'B',
    b'^', b'^', b'^', b'^', b'^',
    b'T', b'T', b'T', b'T', b'T',
    b'V', b'V', b'V', b'V', b'V',
    b'F', b'F', b'F', b'F', b'F',
    b'R', b'R', b'R', b'R', b'R',
    b'$', b'$', b'$', b'$', b'$',
    b'D', b'D', b'D', b'D', b'D',
    b'X', b'X', b'X', b'X', b'X',
    b'#', b'#', b'#', b'#', b'#',
    b'W', b'W', b'W', b'W', b'W',
    b'Z', b'Z', b'Z', b'Z', b'Z',
    b'A', b'A', b'A', b'A', b'A',
    b'Q', b'Q', b'Q', b'Q', b'Q',
    b'!', b'!', b'!', b'!', b'!',
    SHIFT, SHIFT, SHIFT, SHIFT, SHIFT,
    0, 0, 0, 0, 0,
    TAB, TAB, TAB, TAB, TAB,
    HALF_SPACE, HALF_SPACE, HALF_SPACE, HALF_SPACE, HALF_SPACE,
    TAB_SET, TAB_SET, TAB_SET, TAB_SET, TAB_SET,
    TAB_CLEAR, TAB_CLEAR, TAB_CLEAR, TAB_CLEAR, TAB_CLEAR,
];

/// Keys with tabs on channel B's side of the acoustic bar, channel A's
/// wavefront initially positive, shift up.
pub static B_SIDE_A_POSITIVE_NO_SHIFT: DecodeTable = [
    b'h', b'h', b'h', b'n',
    b'n', b'n', b'n', b'n',
    b'u', b'u', b'u', b'u', b'u',
    b'8', b'8', b'8', b'8', b'8',
    b'm', b'm', b'm', b'm', b'm',
    b'k', b'k', b'k', b'k', b'k',
    b'9', b'9', b'9', b'9', b'9',
    b'o', b'o', b'o', b'o', b'o',
    b'l', b'l', b'l', b'l', b'l',
    b'.', b'.', b'.', b'.', b'.',
    b'p', b'p', b'p', b'p', b'p',
    b'-', b'-', b'-', b'-', b'-',
    b'/', b'/', b'/', b'/', b'/',
    b'\'', b'\'', b'\'', b'\'', b'\'',
    b'=', b'=', b'=', b'=', b'=',
    SHIFT, SHIFT, SHIFT, SHIFT, SHIFT,
    b'[', b'[', b'[', b'[', b'[',
    b'\r', b'\r', b'\r', b'\r', b'\r',
    0, 0, 0, 0, 0,
    INDEX, INDEX, INDEX, INDEX, INDEX,
    LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN,
    RIGHT_MARGIN, RIGHT_MARGIN, RIGHT_MARGIN, RIGHT_MARGIN, RIGHT_MARGIN,
];

/// Keys with tabs on channel B's side of the acoustic bar, channel A's
/// wavefront initially positive, shift down.
pub static B_SIDE_A_POSITIVE_SHIFT: DecodeTable = [
    b'H', b'H', b'H', b'H',
    b'N', b'N', b'N', b'N',
    b'U', b'U', b'U', b'U', b'U',
    b'*', b'*', b'*', b'*', b'*',
    b'M', b'M', b'M', b'M', b'M',
    b'K', b'K', b'K', b'K', b'K',
    b'(', b'(', b'(', b'(', b'(',
    b'O', b'O', b'O', b'O', b'O',
    b'L', b'L', b'L', b'L', b'L',
    b'>', b'>', b'>', b'>', b'>',
    b'P', b'P', b'P', b'P', b'P',
    b'_', b'_', b'_', b'_', b'_',
    b'?', b'?', b'?', b'?', b'?',
    b'"', b'"', b'"', b'"', b'"',
    b'+', b'+', b'+', b'+', b'+',
    SHIFT, SHIFT, SHIFT, SHIFT, SHIFT,
    b']', b']', b']', b']', b']',
    b'\r', b'\r', b'\r', b'\r', b'\r',
    0, 0, 0, 0, 0,
    INDEX, INDEX, INDEX, INDEX, INDEX,
    LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN,
    RIGHT_MARGIN, RIGHT_MARGIN, RIGHT_MARGIN, RIGHT_MARGIN, RIGHT_MARGIN,
];

/// Keys with tabs on channel B's side of the acoustic bar, channel B's
/// wavefront initially positive, shift up.
pub static B_SIDE_B_POSITIVE_NO_SHIFT: DecodeTable = [
    b'h', b'h', b'h', b'7',
    b'7', b'7', b'7', b'7',
    b'u', b'u', b'u', b'u', b'u',
    b'j', b'j', b'j', b'j', b'j',
    b'm', b'm', b'm', b'm', b'm',
    b'i', b'i', b'i', b'i', b'i',
    b'9', b'9', b'9', b'9', b'9',
    b',', b',', b',', b',', b',',
    b'l', b'l', b'l', b'l', b'l',
    b'0', b'0', b'0', b'0', b'0',
    b'p', b'p', b'p', b'p', b'p',
    b';', b';', b';', b';', b';',
    b'/', b'/', b'/', b'/', b'/',
    HALF, HALF, HALF, HALF, HALF,
    b'=', b'=', b'=', b'=', b'=',
    0, 0, 0, 0, 0,
    b'[', b'[', b'[', b'[', b'[',
    CORRECT, CORRECT, CORRECT, CORRECT, CORRECT,
    0, 0, 0, 0, 0,
    0, 0, 0, 0, 0,
    LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN,
    BACKSPACE, BACKSPACE, BACKSPACE, BACKSPACE, BACKSPACE,
];

/// Keys with tabs on channel B's side of the acoustic bar, channel B's
/// wavefront initially positive, shift down.
pub static B_SIDE_B_POSITIVE_SHIFT: DecodeTable = [
    b'H', b'H', b'H', b'&',
    b'&', b'&', b'&', b'&',
    b'U', b'U', b'U', b'U', b'U',
    b'J', b'J', b'J', b'J', b'J',
    b'M', b'M', b'M', b'M', b'M',
    b'I', b'I', b'I', b'I', b'I',
    b'(', b'(', b'(', b'(', b'(',
    b'<', b'<', b'<', b'<', b'<',
    b'L', b'L', b'L', b'L', b'L',
    b')', b')', b')', b')', b')',
    b'P', b'P', b'P', b'P', b'P',
    b':', b':', b':', b':', b':',
    b'?', b'?', b'?', b'?', b'?',
    QUARTER, QUARTER, QUARTER, QUARTER, QUARTER,
    b'+', b'+', b'+', b'+', b'+',
    0, 0, 0, 0, 0,
    b']', b']', b']', b']', b']',
    CORRECT, CORRECT, CORRECT, CORRECT, CORRECT,
    0, 0, 0, 0, 0,
    0, 0, 0, 0, 0,
    LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN, LEFT_MARGIN,
    BACKSPACE, BACKSPACE, BACKSPACE, BACKSPACE, BACKSPACE,
];
