//! Cross-check of the built-in presets against the IANA time zone database.
//!
//! For every day of several years, the clock's standard-time noon is converted to
//! UTC and the zone's DST component from `chrono-tz` is compared with the offset
//! the preset rules produce.

use adst_core::calendar::{days_in_year, SECS_PER_DAY, SECS_PER_HOUR};
use adst_core::{break_time, get_dst_offset, make_time, preset, CalendarRecord};
use chrono::{DateTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};

fn check_preset(name: &str, zone: Tz, standard_offset_hours: i64) {
    let rules = preset(name).expect("preset exists");

    for year in 2024u16..=2027 {
        let noon = CalendarRecord::new(year, 1, 1, 12, 0, 0).unwrap();
        let first = make_time(&noon);

        for day in 0..days_in_year(year) {
            let standard = first + day * SECS_PER_DAY;
            let record = break_time(standard);

            let utc = i64::from(standard) - standard_offset_hours * i64::from(SECS_PER_HOUR);
            let utc = DateTime::from_timestamp(utc, 0).unwrap().naive_utc();
            let expected = zone.offset_from_utc_datetime(&utc).dst_offset().num_hours();

            assert_eq!(
                i64::from(get_dst_offset(&record, &rules)),
                expected,
                "preset {} disagrees with {} on {}",
                name,
                zone,
                record
            );
        }
    }
}

#[test]
fn us_matches_new_york() {
    check_preset("us", chrono_tz::America::New_York, -5);
}

#[test]
fn us_matches_chicago() {
    check_preset("us", chrono_tz::America::Chicago, -6);
}

#[test]
fn eu_matches_berlin() {
    check_preset("eu", chrono_tz::Europe::Berlin, 1);
}

#[test]
fn uk_matches_london() {
    check_preset("uk", chrono_tz::Europe::London, 0);
}

#[test]
fn au_matches_sydney() {
    check_preset("au", chrono_tz::Australia::Sydney, 10);
}

#[test]
fn nz_matches_auckland() {
    check_preset("nz", chrono_tz::Pacific::Auckland, 12);
}
