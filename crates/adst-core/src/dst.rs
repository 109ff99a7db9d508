//! DST rule evaluation -- resolves recurring rules for a year and decides the offset.
//!
//! Both the rule hours and the evaluated records are local standard time. DST is in
//! effect on the half-open interval `[start, end)`; when the start falls later in the
//! year than the end (southern hemisphere) the interval wraps around New Year.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    break_time, days_in_month, dotw, make_time, CalendarRecord, SECS_PER_HOUR,
};
use crate::error::{AdstError, Result};
use crate::rule::{DstRule, DstRules};

/// Start and end of DST resolved for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstTransitions {
    pub year: u16,
    pub start: CalendarRecord,
    pub end: CalendarRecord,
    /// `start` as elapsed seconds.
    pub start_time: u32,
    /// `end` as elapsed seconds.
    pub end_time: u32,
}

impl DstTransitions {
    /// Whether `elapsed` (standard time) falls inside the DST period.
    pub fn contains(&self, elapsed: u32) -> bool {
        match self.start_time.cmp(&self.end_time) {
            Ordering::Less => self.start_time <= elapsed && elapsed < self.end_time,
            Ordering::Greater => elapsed >= self.start_time || elapsed < self.end_time,
            // Start and end coincide: empty period.
            Ordering::Equal => false,
        }
    }

    /// True when the DST period spans New Year (start after end in calendar order).
    pub fn wraps_year(&self) -> bool {
        self.start_time > self.end_time
    }
}

/// Resolve one rule to a concrete date and hour in `year`.
///
/// Week 5 selects the last matching weekday, found by scanning back from the last
/// day of the month. Out-of-range fields are clamped, never rejected.
pub fn resolve_rule(year: u16, rule: &DstRule) -> CalendarRecord {
    let month = rule.month.clamp(1, 12);
    let target = rule.dotw % 7;

    let day = if rule.is_last_week() {
        let mut day = days_in_month(year, month);
        while dotw(year, month, day) != target {
            day -= 1;
        }
        day
    } else {
        let first = 1 + (target + 7 - dotw(year, month, 1)) % 7;
        first + 7 * (rule.week.max(1) - 1)
    };

    CalendarRecord::at_hour(year, month, day, rule.hour)
}

/// Resolve the start and end rules for the year of `record`.
pub fn dst_init(record: &CalendarRecord, rules: &DstRules) -> DstTransitions {
    let year = record.year;
    let start = resolve_rule(year, &rules.start);
    let end = resolve_rule(year, &rules.end);

    let transitions = DstTransitions {
        year,
        start,
        end,
        start_time: make_time(&start),
        end_time: make_time(&end),
    };
    debug!(
        "resolved DST for {}: start {} ({}), end {} ({})",
        year, start, transitions.start_time, end, transitions.end_time
    );
    transitions
}

/// Offset in hours that applies at `record` under `rules`: `rules.offset` inside the
/// DST period, 0 outside it.
pub fn get_dst_offset(record: &CalendarRecord, rules: &DstRules) -> u8 {
    offset_within(&dst_init(record, rules), record, rules)
}

fn offset_within(transitions: &DstTransitions, record: &CalendarRecord, rules: &DstRules) -> u8 {
    let now = make_time(record);
    let offset = if transitions.contains(now) {
        rules.offset
    } else {
        0
    };
    trace!("DST offset at {} ({}): {}", record, now, offset);
    offset
}

/// Caller-owned memo of the last resolved year.
///
/// Produces the same answers as [`get_dst_offset`] but only re-resolves the rules
/// when the year or the rules change.
#[derive(Debug, Clone, Default)]
pub struct DstCache {
    entry: Option<(DstRules, DstTransitions)>,
}

impl DstCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions for the year of `record`, resolving them on a miss.
    pub fn transitions(&mut self, record: &CalendarRecord, rules: &DstRules) -> DstTransitions {
        match self.entry {
            Some((cached_rules, transitions))
                if cached_rules == *rules && transitions.year == record.year =>
            {
                transitions
            }
            _ => {
                let transitions = dst_init(record, rules);
                self.entry = Some((*rules, transitions));
                transitions
            }
        }
    }

    pub fn offset(&mut self, record: &CalendarRecord, rules: &DstRules) -> u8 {
        let transitions = self.transitions(record, rules);
        offset_within(&transitions, record, rules)
    }

    /// Year currently held, if any.
    pub fn cached_year(&self) -> Option<u16> {
        self.entry.map(|(_, t)| t.year)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

/// The clock's DST setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DstMode {
    /// Never apply the offset.
    Off,
    /// Always apply the offset.
    On,
    /// Apply the offset when the rules say DST is in effect.
    #[default]
    Auto,
}

impl DstMode {
    pub const ALL: [DstMode; 3] = [DstMode::Off, DstMode::On, DstMode::Auto];

    /// Menu label for the setting.
    pub fn name(self) -> &'static str {
        match self {
            DstMode::Off => "Off",
            DstMode::On => "On",
            DstMode::Auto => "Auto",
        }
    }

    /// Offset in hours this mode applies at `record`.
    pub fn offset(self, record: &CalendarRecord, rules: &DstRules) -> u8 {
        match self {
            DstMode::Off => 0,
            DstMode::On => rules.offset,
            DstMode::Auto => get_dst_offset(record, rules),
        }
    }
}

impl fmt::Display for DstMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<DstMode> for u8 {
    fn from(mode: DstMode) -> u8 {
        match mode {
            DstMode::Off => 0,
            DstMode::On => 1,
            DstMode::Auto => 2,
        }
    }
}

impl TryFrom<u8> for DstMode {
    type Error = AdstError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(DstMode::Off),
            1 => Ok(DstMode::On),
            2 => Ok(DstMode::Auto),
            other => Err(AdstError::UnknownName(format!("DST mode {}", other))),
        }
    }
}

impl FromStr for DstMode {
    type Err = AdstError;

    fn from_str(s: &str) -> Result<Self> {
        DstMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AdstError::UnknownName(format!("DST mode '{}'", s)))
    }
}

/// Display time for a standard-time counter: the counter plus the offset `mode`
/// applies, broken down.
pub fn local_time(standard: u32, rules: &DstRules, mode: DstMode) -> CalendarRecord {
    let offset = mode.offset(&break_time(standard), rules);
    break_time(standard.saturating_add(u32::from(offset) * SECS_PER_HOUR))
}
