//! Key and code values for emulated keystrokes.

use smol_str::{SmolStr, format_smolstr};

use crate::events::KeyDetail;

/// Legacy `keyCode` for Backspace.
pub const BACKSPACE_KEY_CODE: u32 = 8;

/// Physical `KeyboardEvent.code` for a character on a US layout.
///
/// Anything without an obvious physical key maps to `"Unidentified"`.
pub fn code_for_char(ch: char) -> SmolStr {
    match ch {
        'a'..='z' | 'A'..='Z' => format_smolstr!("Key{}", ch.to_ascii_uppercase()),
        '0'..='9' => format_smolstr!("Digit{ch}"),
        ' ' => SmolStr::new_static("Space"),
        '-' | '_' => SmolStr::new_static("Minus"),
        '=' | '+' => SmolStr::new_static("Equal"),
        '[' | '{' => SmolStr::new_static("BracketLeft"),
        ']' | '}' => SmolStr::new_static("BracketRight"),
        '\\' | '|' => SmolStr::new_static("Backslash"),
        ';' | ':' => SmolStr::new_static("Semicolon"),
        '\'' | '"' => SmolStr::new_static("Quote"),
        ',' | '<' => SmolStr::new_static("Comma"),
        '.' | '>' => SmolStr::new_static("Period"),
        '/' | '?' => SmolStr::new_static("Slash"),
        '`' | '~' => SmolStr::new_static("Backquote"),
        _ => SmolStr::new_static("Unidentified"),
    }
}

/// Key fields for typing `text`. Only the first character picks the code.
pub fn key_for_char(text: &str) -> KeyDetail {
    let code = text
        .chars()
        .next()
        .map(code_for_char)
        .unwrap_or_else(|| SmolStr::new_static("Unidentified"));
    KeyDetail {
        key: SmolStr::new(text),
        code,
        key_code: None,
    }
}

/// Key fields for Backspace, including the legacy key code.
pub fn backspace_key() -> KeyDetail {
    KeyDetail {
        key: SmolStr::new_static("Backspace"),
        code: SmolStr::new_static("Backspace"),
        key_code: Some(BACKSPACE_KEY_CODE),
    }
}
