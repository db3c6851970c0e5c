//! Denylists and weak-pattern detection.
//!
//! The same detectors back both the validator's complexity rules and the
//! strength checker's complexity component.

/// Common passwords rejected as case-insensitive substrings.
pub const COMMON_PATTERNS: &[&str] = &[
    "123456", "password", "qwerty", "admin", "welcome", "monkey", "letmein", "dragon",
    "baseball", "iloveyou", "trustno1", "sunshine", "master", "hello", "shadow", "ashley",
    "football", "jesus", "michael", "ninja", "mustang", "password1", "12345678", "qwerty123",
    "admin123",
];

/// Dictionary words penalized by the strength checker.
pub const COMMON_WORDS: &[&str] = &[
    "password", "admin", "user", "login", "welcome", "hello", "world", "test", "guest",
    "default",
];

const KEYBOARD_ROWS: &[&str] = &["qwertyuiop", "asdfghjkl", "zxcvbnm"];

const SEQUENCE_RUN: usize = 3;
const KEYBOARD_RUN: usize = 4;

/// True if any character occurs three or more times in a row.
pub fn has_repeated_characters(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars
        .windows(SEQUENCE_RUN)
        .any(|w| w.iter().all(|&c| c == w[0]))
}

/// True for ascending digit runs (`012`..`789`), ascending letter runs
/// (`abc`..`xyz`, any case) or keyboard row runs (`qwer`, `asdf`, `zxcv`...).
pub fn has_sequential_characters(password: &str) -> bool {
    let lowered: Vec<char> = password.chars().map(|c| c.to_ascii_lowercase()).collect();
    has_ascending_run(&lowered, |c| c.is_ascii_digit())
        || has_ascending_run(&lowered, |c| c.is_ascii_lowercase())
        || has_keyboard_run(&lowered)
}

fn has_ascending_run(chars: &[char], in_range: impl Fn(char) -> bool) -> bool {
    chars.windows(SEQUENCE_RUN).any(|w| {
        w.iter().all(|&c| in_range(c)) && w.windows(2).all(|p| p[1] as u32 == p[0] as u32 + 1)
    })
}

fn has_keyboard_run(chars: &[char]) -> bool {
    chars.windows(KEYBOARD_RUN).any(|w| {
        let run: String = w.iter().collect();
        KEYBOARD_ROWS.iter().any(|row| row.contains(&run))
    })
}

/// True if the password contains an entry of [`COMMON_PATTERNS`].
pub fn contains_common_pattern(password: &str) -> bool {
    contains_any(password, COMMON_PATTERNS)
}

/// True if the password contains an entry of [`COMMON_WORDS`].
pub fn contains_common_word(password: &str) -> bool {
    contains_any(password, COMMON_WORDS)
}

fn contains_any(password: &str, list: &[&str]) -> bool {
    let lowered = password.to_lowercase();
    list.iter().any(|entry| lowered.contains(entry))
}
