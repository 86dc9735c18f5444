//! Pitch-class sets and their 12-bit presence encodings.
//!
//! Bit convention, used for both generation and validation: bit `i` of the
//! mask is pitch class `i`, and the binary string is written most significant
//! bit first. String position `p` therefore holds pitch class `11 - p`, and the
//! decimal value is the mask itself (`u16::from_str_radix(binary, 2)`).
//!
//! C major (`{0, 4, 7}`) is `"000010010001"` / `145`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pitch::PitchClass;

const MASK: u16 = 0x0FFF;

/// A set of pitch classes stored as a 12-bit presence mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClassSet(u16);

/// Why a binary string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryParseError {
    /// The string is not twelve characters long.
    WrongLength(usize),
    /// A character other than '0' or '1' was found.
    InvalidChar(char),
}

impl fmt::Display for BinaryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryParseError::WrongLength(len) => {
                write!(f, "binary must have 12 characters, got {}", len)
            }
            BinaryParseError::InvalidChar(c) => {
                write!(f, "binary may only contain '0' and '1', got '{}'", c)
            }
        }
    }
}

impl std::error::Error for BinaryParseError {}

impl PitchClassSet {
    pub fn new() -> Self {
        PitchClassSet(0)
    }

    /// Wraps a raw mask; bits above the twelfth are discarded.
    pub fn from_mask(mask: u16) -> Self {
        PitchClassSet(mask & MASK)
    }

    /// Builds a set from raw pitch-class numbers, reducing each modulo 12.
    pub fn from_values<I: IntoIterator<Item = u8>>(values: I) -> Self {
        values.into_iter().map(PitchClass::new).collect()
    }

    /// Decodes a binary string under the module's bit convention.
    pub fn from_binary(binary: &str) -> Result<Self, BinaryParseError> {
        let len = binary.chars().count();
        if len != 12 {
            return Err(BinaryParseError::WrongLength(len));
        }
        let mut mask = 0u16;
        for (position, c) in binary.chars().enumerate() {
            match c {
                '1' => mask |= 1 << (11 - position),
                '0' => {}
                other => return Err(BinaryParseError::InvalidChar(other)),
            }
        }
        Ok(PitchClassSet(mask))
    }

    pub fn insert(&mut self, pc: PitchClass) {
        self.0 |= 1 << pc.value();
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.0 & (1 << pc.value()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn mask(&self) -> u16 {
        self.0
    }

    /// Decimal encoding: the mask read as an unsigned 12-bit integer.
    pub fn decimal(&self) -> u32 {
        self.0 as u32
    }

    /// Twelve-character binary string, most significant bit (pitch class 11) first.
    pub fn to_binary(&self) -> String {
        format!("{:012b}", self.0)
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        (0..12u8)
            .filter(move |&i| self.0 & (1 << i) != 0)
            .map(PitchClass::new)
    }

    /// Members in ascending order as raw numbers.
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().map(PitchClass::value).collect()
    }

    /// Rotates every member up by `semitones`.
    pub fn transpose(&self, semitones: u8) -> Self {
        let n = semitones % 12;
        let rotated = ((self.0 << n) | (self.0 >> (12 - n))) & MASK;
        PitchClassSet(rotated)
    }
}

impl FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchClassSet::new();
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}

impl fmt::Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.iter().map(|pc| pc.to_string()).collect();
        write!(f, "{{{}}}", members.join(", "))
    }
}
