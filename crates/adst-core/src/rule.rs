//! Recurring DST rules.
//!
//! A [`DstRule`] names a transition by month, weekday, week-of-month and hour
//! ("second Sunday in March at 02:00") so it resolves to a different date every
//! year. A [`DstRules`] pairs the start and end rules with the offset in hours.
//!
//! Rules persist as 9 bytes: four per rule (month, weekday, week, hour) for start
//! and end, followed by the offset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::weekday_name;
use crate::error::{AdstError, Result};

/// Week value meaning "last occurrence in the month".
pub const LAST_WEEK: u8 = 5;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One recurring transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DstRule {
    /// Month, 1-12.
    pub month: u8,
    /// Day of the week, 0-6 (Sunday = 0).
    pub dotw: u8,
    /// Occurrence within the month, 1-5. 5 means the last occurrence.
    pub week: u8,
    /// Hour of day in local standard time, 0-23.
    pub hour: u8,
}

impl DstRule {
    /// Build a rule, validating every field.
    ///
    /// # Errors
    /// Returns `AdstError::InvalidRule` naming the first out-of-range field.
    pub fn new(month: u8, dotw: u8, week: u8, hour: u8) -> Result<Self> {
        let rule = Self {
            month,
            dotw,
            week,
            hour,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Check that all fields are in their nominal ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.month) {
            return Err(AdstError::InvalidRule {
                field: "month",
                value: self.month,
            });
        }
        if self.dotw > 6 {
            return Err(AdstError::InvalidRule {
                field: "dotw",
                value: self.dotw,
            });
        }
        if !(1..=LAST_WEEK).contains(&self.week) {
            return Err(AdstError::InvalidRule {
                field: "week",
                value: self.week,
            });
        }
        if self.hour > 23 {
            return Err(AdstError::InvalidRule {
                field: "hour",
                value: self.hour,
            });
        }
        Ok(())
    }

    pub fn is_last_week(&self) -> bool {
        self.week >= LAST_WEEK
    }

    fn to_bytes(self) -> [u8; 4] {
        [self.month, self.dotw, self.week, self.hour]
    }

    fn from_bytes(bytes: [u8; 4]) -> Result<Self> {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl fmt::Display for DstRule {
    // "2nd Sun Mar 02:00", "last Sun Oct 01:00"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let week = match self.week {
            1 => "1st",
            2 => "2nd",
            3 => "3rd",
            4 => "4th",
            _ => "last",
        };
        let month = MONTH_NAMES[usize::from(self.month.clamp(1, 12) - 1)];
        write!(
            f,
            "{} {} {} {:02}:00",
            week,
            weekday_name(self.dotw),
            month,
            self.hour
        )
    }
}

/// A start rule, an end rule and the offset applied between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DstRules {
    pub start: DstRule,
    pub end: DstRule,
    /// Hours added while DST is in effect.
    pub offset: u8,
}

impl DstRules {
    /// Size of the packed representation.
    pub const PACKED_LEN: usize = 9;

    /// Build a rule set, validating both rules.
    ///
    /// # Errors
    /// Returns `AdstError::InvalidRule` if either rule has an out-of-range field.
    pub fn new(start: DstRule, end: DstRule, offset: u8) -> Result<Self> {
        let rules = Self { start, end, offset };
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<()> {
        self.start.validate()?;
        self.end.validate()
    }

    /// Pack into the 9-byte storage layout.
    pub fn to_bytes(&self) -> [u8; Self::PACKED_LEN] {
        let mut out = [0u8; Self::PACKED_LEN];
        out[..4].copy_from_slice(&self.start.to_bytes());
        out[4..8].copy_from_slice(&self.end.to_bytes());
        out[8] = self.offset;
        out
    }

    /// Unpack from the 9-byte storage layout.
    ///
    /// # Errors
    /// Returns `AdstError::InvalidEncoding` if `bytes` is not exactly 9 bytes long.
    /// Returns `AdstError::InvalidRule` if a decoded rule field is out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let packed: &[u8; Self::PACKED_LEN] = bytes.try_into().map_err(|_| {
            AdstError::InvalidEncoding(format!(
                "expected {} bytes, got {}",
                Self::PACKED_LEN,
                bytes.len()
            ))
        })?;

        let start = DstRule::from_bytes([packed[0], packed[1], packed[2], packed[3]])?;
        let end = DstRule::from_bytes([packed[4], packed[5], packed[6], packed[7]])?;

        Ok(Self {
            start,
            end,
            offset: packed[8],
        })
    }
}

impl fmt::Display for DstRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}, +{}h", self.start, self.end, self.offset)
    }
}
