//! Built-in rule sets for common regions.
//!
//! Transition hours are local standard time, so an "end at 02:00 daylight time"
//! rule is written as 01:00.

use crate::rule::{DstRule, DstRules, LAST_WEEK};

const SUNDAY: u8 = 0;

/// A named rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstPreset {
    /// Lookup key, lower case.
    pub name: &'static str,
    pub description: &'static str,
    pub rules: DstRules,
}

const fn sunday(month: u8, week: u8, hour: u8) -> DstRule {
    DstRule {
        month,
        dotw: SUNDAY,
        week,
        hour,
    }
}

pub const PRESETS: &[DstPreset] = &[
    DstPreset {
        name: "us",
        description: "United States and Canada",
        rules: DstRules {
            start: sunday(3, 2, 2),
            end: sunday(11, 1, 1),
            offset: 1,
        },
    },
    DstPreset {
        name: "eu",
        description: "Central European Time (CET/CEST)",
        rules: DstRules {
            start: sunday(3, LAST_WEEK, 2),
            end: sunday(10, LAST_WEEK, 2),
            offset: 1,
        },
    },
    DstPreset {
        name: "uk",
        description: "United Kingdom, Ireland and Portugal (GMT/BST)",
        rules: DstRules {
            start: sunday(3, LAST_WEEK, 1),
            end: sunday(10, LAST_WEEK, 1),
            offset: 1,
        },
    },
    DstPreset {
        name: "au",
        description: "South-east Australia (AEST/AEDT)",
        rules: DstRules {
            start: sunday(10, 1, 2),
            end: sunday(4, 1, 2),
            offset: 1,
        },
    },
    DstPreset {
        name: "nz",
        description: "New Zealand (NZST/NZDT)",
        rules: DstRules {
            start: sunday(9, LAST_WEEK, 2),
            end: sunday(4, 1, 2),
            offset: 1,
        },
    },
];

/// Look up a preset by name, ignoring ASCII case.
pub fn preset(name: &str) -> Option<DstRules> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| p.rules)
}
