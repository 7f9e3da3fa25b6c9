use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while interpreting a raw passenger row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PassengerError {
    #[error("passenger class must be 1, 2 or 3, got {0}")]
    InvalidClass(String),

    #[error("unknown sex value: {0:?}")]
    InvalidSex(String),

    #[error("survived must be 0 or 1, got {0:?}")]
    InvalidSurvived(String),
}

//
// ─── CLASS ─────────────────────────────────────────────────────────────────────
//

/// Ordinal ticket class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pclass {
    First,
    Second,
    Third,
}

impl Pclass {
    pub const ALL: [Pclass; 3] = [Pclass::First, Pclass::Second, Pclass::Third];

    /// Converts a numeric class (1-3) to a `Pclass`.
    ///
    /// # Errors
    ///
    /// Returns `PassengerError::InvalidClass` for any other value.
    pub fn from_u8(value: u8) -> Result<Self, PassengerError> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            _ => Err(PassengerError::InvalidClass(value.to_string())),
        }
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Pclass::First => 1,
            Pclass::Second => 2,
            Pclass::Third => 3,
        }
    }

    /// Zero-based position used for table and chart layout.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.as_u8() - 1)
    }
}

impl FromStr for Pclass {
    type Err = PassengerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let invalid = || PassengerError::InvalidClass(trimmed.to_string());
        // Spreadsheet exports sometimes turn integer columns into floats ("1.0").
        let value = match trimmed.parse::<u8>() {
            Ok(value) => value,
            Err(_) => match trimmed.parse::<f64>() {
                Ok(v) if v == 1.0 => 1,
                Ok(v) if v == 2.0 => 2,
                Ok(v) if v == 3.0 => 3,
                _ => return Err(invalid()),
            },
        };
        Self::from_u8(value).map_err(|_| invalid())
    }
}

impl fmt::Display for Pclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

//
// ─── SEX ───────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Sex::Female => 0,
            Sex::Male => 1,
        }
    }
}

impl FromStr for Sex {
    type Err = PassengerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("female") {
            Ok(Self::Female)
        } else if trimmed.eq_ignore_ascii_case("male") {
            Ok(Self::Male)
        } else {
            Err(PassengerError::InvalidSex(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a binary survival flag.
///
/// Accepts `0`/`1`, their float spellings and `true`/`false`.
///
/// # Errors
///
/// Returns `PassengerError::InvalidSurvived` for anything else.
pub fn parse_survived(raw: &str) -> Result<bool, PassengerError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        other => Err(PassengerError::InvalidSurvived(other.to_string())),
    }
}

//
// ─── PASSENGER ─────────────────────────────────────────────────────────────────
//

/// One row of the dataset: the only three columns the charts consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub pclass: Pclass,
    pub sex: Sex,
    pub survived: bool,
}

impl Passenger {
    #[must_use]
    pub fn new(pclass: Pclass, sex: Sex, survived: bool) -> Self {
        Self {
            pclass,
            sex,
            survived,
        }
    }

    /// Builds a passenger from raw column text.
    ///
    /// # Errors
    ///
    /// Returns `PassengerError` if any column fails to parse.
    pub fn parse(pclass: &str, sex: &str, survived: &str) -> Result<Self, PassengerError> {
        Ok(Self::new(pclass.parse()?, sex.parse()?, parse_survived(survived)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_spreadsheet_spellings() {
        let p = Passenger::parse(" 1.0 ", "Female", "1.0").unwrap();
        assert_eq!(p, Passenger::new(Pclass::First, Sex::Female, true));

        let p = Passenger::parse("3", "male", "false").unwrap();
        assert_eq!(p, Passenger::new(Pclass::Third, Sex::Male, false));
    }

    #[test]
    fn parse_rejects_out_of_range_values() {
        assert_eq!(
            Passenger::parse("4", "male", "0").unwrap_err(),
            PassengerError::InvalidClass("4".into())
        );
        assert_eq!(
            Passenger::parse("2.5", "male", "0").unwrap_err(),
            PassengerError::InvalidClass("2.5".into())
        );
        assert!(matches!(
            Passenger::parse("2", "child", "0"),
            Err(PassengerError::InvalidSex(_))
        ));
        assert!(matches!(
            Passenger::parse("2", "male", "2"),
            Err(PassengerError::InvalidSurvived(_))
        ));
    }

    #[test]
    fn class_index_is_zero_based() {
        assert_eq!(Pclass::First.index(), 0);
        assert_eq!(Pclass::Third.index(), 2);
        assert_eq!(Pclass::Second.to_string(), "2");
    }
}
