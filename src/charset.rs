//! Character classes and the alphabets used to generate them.
//!
//! Classification is regex-style: anything outside `[A-Za-z0-9]` counts as
//! special. The generator draws specials from [`SPECIAL`], which is a strict
//! subset of that class.

use std::fmt;

pub const UPPERCASE: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

pub const LOWERCASE: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

pub const SPECIAL: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '-', '=', '[', ']', '{', '}',
    '|', ';', ':', ',', '.', '<', '>', '?',
];

/// One of the four character classes a policy can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl CharClass {
    /// All classes, in the order they are filled when padding a password up
    /// to a required number of distinct classes.
    pub const ALL: [CharClass; 4] = [
        CharClass::Uppercase,
        CharClass::Lowercase,
        CharClass::Digit,
        CharClass::Special,
    ];

    pub fn of(c: char) -> CharClass {
        if c.is_ascii_uppercase() {
            CharClass::Uppercase
        } else if c.is_ascii_lowercase() {
            CharClass::Lowercase
        } else if c.is_ascii_digit() {
            CharClass::Digit
        } else {
            CharClass::Special
        }
    }

    /// Alphabet the generator draws from for this class.
    pub fn alphabet(self) -> &'static [char] {
        match self {
            CharClass::Uppercase => UPPERCASE,
            CharClass::Lowercase => LOWERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Special => SPECIAL,
        }
    }

    pub fn is_letter(self) -> bool {
        matches!(self, CharClass::Uppercase | CharClass::Lowercase)
    }

    /// Nominal charset size used by the entropy estimate.
    pub fn charset_size(self) -> u32 {
        match self {
            CharClass::Uppercase | CharClass::Lowercase => 26,
            CharClass::Digit => 10,
            CharClass::Special => 32,
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CharClass::Uppercase => "uppercase",
            CharClass::Lowercase => "lowercase",
            CharClass::Digit => "digit",
            CharClass::Special => "special",
        })
    }
}

/// Per-class character counts of a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub uppercase: usize,
    pub lowercase: usize,
    pub digits: usize,
    pub special: usize,
}

impl ClassCounts {
    pub fn of(password: &str) -> Self {
        let mut counts = ClassCounts::default();
        for c in password.chars() {
            match CharClass::of(c) {
                CharClass::Uppercase => counts.uppercase += 1,
                CharClass::Lowercase => counts.lowercase += 1,
                CharClass::Digit => counts.digits += 1,
                CharClass::Special => counts.special += 1,
            }
        }
        counts
    }

    pub fn letters(&self) -> usize {
        self.uppercase + self.lowercase
    }

    pub fn get(&self, class: CharClass) -> usize {
        match class {
            CharClass::Uppercase => self.uppercase,
            CharClass::Lowercase => self.lowercase,
            CharClass::Digit => self.digits,
            CharClass::Special => self.special,
        }
    }

    pub fn has(&self, class: CharClass) -> bool {
        self.get(class) > 0
    }

    /// Number of distinct classes present.
    pub fn distinct(&self) -> usize {
        CharClass::ALL.iter().filter(|&&c| self.has(c)).count()
    }
}
