use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must contain at least one digit")]
    Empty,
    #[error("PIN contains invalid digit `{0}`")]
    InvalidDigit(char),
}

/// Secret digit sequence of a card.
///
/// Comparison is exact: same length and same digits in the same order.
/// `Debug` never prints the digits.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(Vec<u8>);

impl Pin {
    pub fn from_digits(digits: &[u8]) -> Result<Self, PinError> {
        if digits.is_empty() {
            return Err(PinError::Empty);
        }
        if let Some(digit) = digits.iter().find(|d| **d > 9) {
            // out of range digits are reported as their char form when possible
            let ch = char::from_digit(u32::from(*digit), 36).unwrap_or('?');
            return Err(PinError::InvalidDigit(ch));
        }
        Ok(Self(digits.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .chars()
            .map(|ch| {
                ch.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(PinError::InvalidDigit(ch))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_digits(&digits)
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}
