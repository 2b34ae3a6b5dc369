// Natural language dates as used by the by/, from/ and to/ fields.
use chrono::{TimeZone, Utc};
use watodo::model::{DateParser, DateTime, NaturalDateParser};

// Monday 2026-10-19 10:00 UTC
fn parser() -> NaturalDateParser {
    NaturalDateParser::with_reference(Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap())
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn test_tomorrow_with_time() {
    let dt = DateTime::parse_with("tomorrow 3pm", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 20, 15, 0));
}

#[test]
fn test_time_before_date() {
    let dt = DateTime::parse_with("5pm on friday", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 23, 17, 0));
}

#[test]
fn test_absolute_dates() {
    let dt = DateTime::parse_with("2026-12-25 9am", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 12, 25, 9, 0));

    let dt = DateTime::parse_with("next week", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 26, 10, 0));
}

#[test]
fn test_tonight_defaults_to_evening_but_takes_a_time() {
    let dt = DateTime::parse_with("tonight", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 19, 20, 0));

    for text in ["tonight 9pm", "tonight at 9pm", "by tonight 9 pm"] {
        assert_eq!(parser().parse(text).len(), 1, "{text}");
        let dt = DateTime::parse_with(text, &parser()).unwrap();
        assert_eq!(dt.instant(), at(2026, 10, 19, 21, 0), "{text}");
    }
}

#[test]
fn test_relative_offset_followed_by_time() {
    let dt = DateTime::parse_with("in 2 hours", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 19, 12, 0));

    let dt = DateTime::parse_with("in 2 days 3pm", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 21, 15, 0));

    let dt = DateTime::parse_with("in 2 hours 3pm", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 19, 15, 0));
}

#[test]
fn test_not_a_date_is_rejected() {
    assert!(DateTime::parse_with("not a date", &parser()).is_err());
    assert!(!DateTime::is_valid("not a date", &parser()));
    assert!(DateTime::parse_with("", &parser()).is_err());
}

#[test]
fn test_range_is_one_group_and_first_date_wins() {
    let groups = parser().parse("tomorrow 2pm to 4pm");
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].dates,
        vec![at(2026, 10, 20, 14, 0), at(2026, 10, 20, 16, 0)]
    );

    let dt = DateTime::parse_with("tomorrow 2pm to 4pm", &parser()).unwrap();
    assert_eq!(dt.instant(), at(2026, 10, 20, 14, 0));
}

#[test]
fn test_several_expressions_are_rejected() {
    assert_eq!(parser().parse("today and tomorrow").len(), 2);
    assert!(DateTime::parse_with("today and tomorrow", &parser()).is_err());
}

#[test]
fn test_input_string_parses_back() {
    let dt = DateTime::parse_with("tomorrow 3pm", &parser()).unwrap();
    let again = DateTime::parse_with(&dt.to_input_string(), &parser()).unwrap();
    assert_eq!(dt, again);
}
