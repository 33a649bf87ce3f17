//! Symbol codes stored in the key map, and their translation to HID usages.
//!
//! Symbols follow the usual microcontroller keyboard library convention:
//! - `0..=127`: ASCII, translated with a US layout
//! - `128..=135`: modifiers, `128 + bit` of the HID modifier byte
//! - `136..=255`: raw HID usage, offset by 136

/// HID modifier bit of the left shift key.
pub const MODIFIER_LEFT_SHIFT: u8 = 1 << 1;

const MODIFIER_BASE: u8 = 128;
const RAW_USAGE_BASE: u8 = 136;

// Digits
pub const ZERO: u8 = b'0';
pub const ONE: u8 = b'1';
pub const TWO: u8 = b'2';
pub const THREE: u8 = b'3';
pub const FOUR: u8 = b'4';
pub const FIVE: u8 = b'5';
pub const SIX: u8 = b'6';
pub const SEVEN: u8 = b'7';
pub const EIGHT: u8 = b'8';
pub const NINE: u8 = b'9';

// Letters
pub const KEY_A: u8 = b'a';
pub const KEY_B: u8 = b'b';
pub const KEY_C: u8 = b'c';
pub const KEY_D: u8 = b'd';
pub const KEY_E: u8 = b'e';
pub const KEY_F: u8 = b'f';
pub const KEY_G: u8 = b'g';
pub const KEY_H: u8 = b'h';
pub const KEY_I: u8 = b'i';
pub const KEY_J: u8 = b'j';
pub const KEY_K: u8 = b'k';
pub const KEY_L: u8 = b'l';
pub const KEY_M: u8 = b'm';
pub const KEY_N: u8 = b'n';
pub const KEY_O: u8 = b'o';
pub const KEY_P: u8 = b'p';
pub const KEY_Q: u8 = b'q';
pub const KEY_R: u8 = b'r';
pub const KEY_S: u8 = b's';
pub const KEY_T: u8 = b't';
pub const KEY_U: u8 = b'u';
pub const KEY_V: u8 = b'v';
pub const KEY_W: u8 = b'w';
pub const KEY_X: u8 = b'x';
pub const KEY_Y: u8 = b'y';
pub const KEY_Z: u8 = b'z';

// Punctuation
pub const LEFT_BRACKET: u8 = b'[';
pub const RIGHT_BRACKET: u8 = b']';
pub const BACKSLASH: u8 = b'\\';
pub const COMMA: u8 = b',';
pub const PERIOD: u8 = b'.';
pub const FORWARDSLASH: u8 = b'/';
pub const SEMICOLON: u8 = b';';
pub const SINGLE_QUOTE: u8 = b'\'';
pub const DASH: u8 = b'-';
pub const EQUALS: u8 = b'=';
pub const BACK_TICK: u8 = b'`';
pub const SPACE: u8 = b' ';

// Modifiers
pub const LEFT_CTRL: u8 = 128;
pub const LEFT_SHIFT: u8 = 129;
pub const LEFT_ALT: u8 = 130;
pub const LEFT_WIN: u8 = 131;
pub const RIGHT_CTRL: u8 = 132;
pub const RIGHT_SHIFT: u8 = 133;
pub const RIGHT_ALT: u8 = 134;
pub const RIGHT_WIN: u8 = 135;

// Raw usages
pub const RETURN: u8 = 176;
pub const ESC: u8 = 177;
pub const BACKSPACE: u8 = 178;
pub const TAB: u8 = 179;
pub const CAPS_LOCK: u8 = 193;
pub const F1: u8 = 194;
pub const F2: u8 = 195;
pub const F3: u8 = 196;
pub const F4: u8 = 197;
pub const F5: u8 = 198;
pub const F6: u8 = 199;
pub const F7: u8 = 200;
pub const F8: u8 = 201;
pub const F9: u8 = 202;
pub const F10: u8 = 203;
pub const F11: u8 = 204;
pub const F12: u8 = 205;

/// What a symbol contributes to a boot keyboard report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidKey {
    /// Bits of the modifier byte
    Modifier(u8),
    /// Key usage, plus the modifier bits it implies (shift for `'A'`, `'!'`, ...)
    Usage { usage: u8, modifier: u8 },
    /// Symbol without a HID mapping
    Unmapped,
}

impl HidKey {
    pub const fn from_symbol(symbol: u8) -> Self {
        if symbol >= RAW_USAGE_BASE {
            HidKey::Usage {
                usage: symbol - RAW_USAGE_BASE,
                modifier: 0,
            }
        } else if symbol >= MODIFIER_BASE {
            HidKey::Modifier(1 << (symbol - MODIFIER_BASE))
        } else {
            match ascii_to_usage(symbol) {
                Some((usage, shifted)) => HidKey::Usage {
                    usage,
                    modifier: if shifted { MODIFIER_LEFT_SHIFT } else { 0 },
                },
                None => HidKey::Unmapped,
            }
        }
    }
}

/// US layout usage of an ASCII character and whether it needs shift.
const fn ascii_to_usage(c: u8) -> Option<(u8, bool)> {
    let mapped = match c {
        b'\x08' => (0x2A, false),
        b'\t' => (0x2B, false),
        b'\n' => (0x28, false),
        b'\x1B' => (0x29, false),
        b' ' => (0x2C, false),
        b'a'..=b'z' => (0x04 + (c - b'a'), false),
        b'A'..=b'Z' => (0x04 + (c - b'A'), true),
        b'1'..=b'9' => (0x1E + (c - b'1'), false),
        b'0' => (0x27, false),
        b'!' => (0x1E, true),
        b'@' => (0x1F, true),
        b'#' => (0x20, true),
        b'$' => (0x21, true),
        b'%' => (0x22, true),
        b'^' => (0x23, true),
        b'&' => (0x24, true),
        b'*' => (0x25, true),
        b'(' => (0x26, true),
        b')' => (0x27, true),
        b'-' => (0x2D, false),
        b'_' => (0x2D, true),
        b'=' => (0x2E, false),
        b'+' => (0x2E, true),
        b'[' => (0x2F, false),
        b'{' => (0x2F, true),
        b']' => (0x30, false),
        b'}' => (0x30, true),
        b'\\' => (0x31, false),
        b'|' => (0x31, true),
        b';' => (0x33, false),
        b':' => (0x33, true),
        b'\'' => (0x34, false),
        b'"' => (0x34, true),
        b'`' => (0x35, false),
        b'~' => (0x35, true),
        b',' => (0x36, false),
        b'<' => (0x36, true),
        b'.' => (0x37, false),
        b'>' => (0x37, true),
        b'/' => (0x38, false),
        b'?' => (0x38, true),
        _ => return None,
    };
    Some(mapped)
}
