// Built-in natural language date parser.
//
// Recognises relative words (today, tomorrow, next friday, in 2 days), ISO and
// US numeric dates, "25 dec [2026]" style dates and clock times (3pm, 15:30,
// noon). Each contiguous expression becomes one DateGroup; two expressions
// joined by "to", "until" or "-" share a group.
use crate::model::datetime::{DateGroup, DateParser};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};

#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDateParser {
    reference: Option<chrono::DateTime<Utc>>,
}

impl NaturalDateParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative expressions against a fixed instant instead of the clock.
    pub fn with_reference(reference: chrono::DateTime<Utc>) -> Self {
        Self {
            reference: Some(reference),
        }
    }

    fn now(&self) -> chrono::DateTime<Utc> {
        self.reference.unwrap_or_else(Utc::now)
    }
}

impl DateParser for NaturalDateParser {
    fn parse(&self, text: &str) -> Vec<DateGroup> {
        let now = self.now();
        let words = tokenize(text);
        let mut groups = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let Some((first, used)) = parse_moment(&words[i..], now) else {
                i += 1;
                continue;
            };
            let start = i;
            i += used;
            let mut dates = vec![first.resolve(now)];

            if i + 1 < words.len()
                && is_range_connector(&words[i])
                && let Some((second, used)) = parse_moment(&words[i + 1..], now)
            {
                let second = Moment {
                    date: second.date.or(first.date),
                    ..second
                };
                dates.push(second.resolve(now));
                i += 1 + used;
            }

            groups.push(DateGroup {
                dates,
                text: words[start..i].join(" "),
            });
        }
        groups
    }
}

/// Partially specified point in time. Missing parts fall back to the reference.
#[derive(Debug, Clone, Copy, Default)]
struct Moment {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    /// Time implied by a word like "tonight" or "in 2 hours". An explicit
    /// clock time following the date replaces it.
    default_time: Option<NaiveTime>,
}

impl Moment {
    fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    fn resolve(&self, now: chrono::DateTime<Utc>) -> chrono::DateTime<Utc> {
        let date = self.date.unwrap_or_else(|| now.date_naive());
        let time = self
            .time
            .or(self.default_time)
            .unwrap_or_else(|| now.time());
        date.and_time(time).and_utc()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_end_matches([',', ';']).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_range_connector(word: &str) -> bool {
    matches!(word, "to" | "until" | "till" | "through" | "-")
}

fn is_filler(word: &str) -> bool {
    matches!(word, "at" | "on" | "by" | "due")
}

/// Parses one date expression starting at `words[0]`.
/// Returns the moment and the number of words consumed.
fn parse_moment(words: &[String], now: chrono::DateTime<Utc>) -> Option<(Moment, usize)> {
    let mut idx = usize::from(words.len() > 1 && is_filler(&words[0]));

    if let Some((mut moment, used)) = parse_date(&words[idx..], now) {
        idx += used;
        if moment.time.is_none() {
            let skip = usize::from(words.get(idx).is_some_and(|w| w == "at"));
            if let Some((time, used)) = parse_time_words(&words[idx + skip..]) {
                moment.time = Some(time);
                idx += skip + used;
            }
        }
        return Some((moment, idx));
    }

    let (time, used) = parse_time_words(&words[idx..])?;
    idx += used;
    let mut moment = Moment {
        time: Some(time),
        ..Moment::default()
    };

    // "3pm tomorrow", "5pm on friday"
    let skip = usize::from(words.get(idx).is_some_and(|w| w == "on"));
    if let Some((trailing, used)) = parse_date(&words[idx + skip..], now)
        && trailing.time.is_none()
    {
        moment.date = trailing.date;
        idx += skip + used;
    }
    Some((moment, idx))
}

fn parse_date(words: &[String], now: chrono::DateTime<Utc>) -> Option<(Moment, usize)> {
    let first = words.first()?.as_str();
    let today = now.date_naive();

    match first {
        "today" => return Some((Moment::on(today), 1)),
        "now" => {
            return Some((
                Moment {
                    date: Some(today),
                    time: Some(now.time()),
                    ..Moment::default()
                },
                1,
            ));
        }
        "tonight" => {
            return Some((
                Moment {
                    date: Some(today),
                    default_time: NaiveTime::from_hms_opt(20, 0, 0),
                    ..Moment::default()
                },
                1,
            ));
        }
        "tomorrow" | "tmr" => return today.succ_opt().map(|d| (Moment::on(d), 1)),
        "yesterday" => return today.pred_opt().map(|d| (Moment::on(d), 1)),
        "next" => {
            let unit = words.get(1)?;
            return next_date(today, unit).map(|d| (Moment::on(d), 2));
        }
        "in" => {
            let (amount, unit, used) = parse_offset(&words[1..])?;
            return apply_offset(now, amount, unit).map(|m| (m, 1 + used));
        }
        _ => {}
    }

    if let Some((amount, unit, used)) = parse_offset(words) {
        return apply_offset(now, amount, unit).map(|m| (m, used));
    }
    if let Some(day) = parse_weekday(first) {
        return Some((Moment::on(next_weekday(today, day)), 1));
    }
    if let Some(date) = parse_numeric_date(first, today) {
        return Some((Moment::on(date), 1));
    }
    parse_month_day(words, today).map(|(d, used)| (Moment::on(d), used))
}

// --- RELATIVE OFFSETS ---

fn parse_english_number(s: &str) -> Option<u32> {
    match s {
        "one" | "a" | "an" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        _ => s.parse::<u32>().ok(),
    }
}

fn parse_unit(s: &str) -> Option<Unit> {
    match s {
        "min" | "mins" | "minute" | "minutes" => Some(Unit::Minutes),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(Unit::Hours),
        "d" | "day" | "days" => Some(Unit::Days),
        "w" | "wk" | "week" | "weeks" => Some(Unit::Weeks),
        "mo" | "month" | "months" => Some(Unit::Months),
        "y" | "yr" | "year" | "years" => Some(Unit::Years),
        _ => None,
    }
}

/// "2 days", "two weeks", "3 days later", or compact "2d" / "1mo".
fn parse_offset(words: &[String]) -> Option<(u32, Unit, usize)> {
    let first = words.first()?;

    if let Some(next) = words.get(1)
        && let Some(amount) = parse_english_number(first)
        && let Some(unit) = parse_unit(next)
    {
        let used = if words.get(2).is_some_and(|w| w == "later") {
            3
        } else {
            2
        };
        return Some((amount, unit, used));
    }

    let split = first.find(|c: char| !c.is_ascii_digit())?;
    if split == 0 {
        return None;
    }
    let (amount, unit) = first.split_at(split);
    // Only the short forms here, "3pm" and friends belong to the time parser.
    let unit = match unit {
        "m" | "min" => Unit::Minutes,
        "h" => Unit::Hours,
        "d" => Unit::Days,
        "w" => Unit::Weeks,
        "mo" => Unit::Months,
        "y" => Unit::Years,
        _ => return None,
    };
    Some((amount.parse().ok()?, unit, 1))
}

fn apply_offset(now: chrono::DateTime<Utc>, amount: u32, unit: Unit) -> Option<Moment> {
    let today = now.date_naive();
    let n = i64::from(amount);
    let moment = match unit {
        Unit::Minutes | Unit::Hours => {
            let delta = if unit == Unit::Hours {
                Duration::hours(n)
            } else {
                Duration::minutes(n)
            };
            let at = now.checked_add_signed(delta)?;
            Moment {
                date: Some(at.date_naive()),
                default_time: Some(at.time()),
                ..Moment::default()
            }
        }
        Unit::Days => Moment::on(today.checked_add_signed(Duration::days(n))?),
        Unit::Weeks => Moment::on(today.checked_add_signed(Duration::weeks(n))?),
        Unit::Months => Moment::on(today.checked_add_months(Months::new(amount))?),
        Unit::Years => Moment::on(today.checked_add_months(Months::new(amount.checked_mul(12)?))?),
    };
    Some(moment)
}

fn next_date(today: NaiveDate, unit: &str) -> Option<NaiveDate> {
    match unit {
        "day" => today.succ_opt(),
        "week" => today.checked_add_signed(Duration::days(7)),
        "month" => today.checked_add_months(Months::new(1)),
        "year" => today.checked_add_months(Months::new(12)),
        _ => parse_weekday(unit).map(|day| next_weekday(today, day)),
    }
}

// --- CALENDAR DATES ---

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// First date strictly after `from` falling on `target`.
fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let mut d = from + Duration::days(1);
    while d.weekday() != target {
        d += Duration::days(1);
    }
    d
}

fn parse_numeric_date(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(date);
    }
    let (m, d) = s.split_once('/')?;
    NaiveDate::from_ymd_opt(today.year(), m.parse().ok()?, d.parse().ok()?)
}

fn parse_month(s: &str) -> Option<u32> {
    let m = match s {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(m)
}

fn parse_day_of_month(s: &str) -> Option<u32> {
    let digits = s
        .strip_suffix("st")
        .or_else(|| s.strip_suffix("nd"))
        .or_else(|| s.strip_suffix("rd"))
        .or_else(|| s.strip_suffix("th"))
        .unwrap_or(s);
    digits.parse::<u32>().ok().filter(|d| (1..=31).contains(d))
}

fn parse_year(s: Option<&String>) -> Option<i32> {
    let s = s?;
    if s.len() == 4 {
        s.parse().ok()
    } else {
        None
    }
}

/// "25 dec", "dec 25th", optionally followed by a four digit year.
fn parse_month_day(words: &[String], today: NaiveDate) -> Option<(NaiveDate, usize)> {
    let a = words.first()?;
    let b = words.get(1)?;
    let (month, day) = if let Some(month) = parse_month(a) {
        (month, parse_day_of_month(b)?)
    } else {
        (parse_month(b)?, parse_day_of_month(a)?)
    };

    match parse_year(words.get(2)) {
        Some(year) => NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, 3)),
        None => NaiveDate::from_ymd_opt(today.year(), month, day).map(|d| (d, 2)),
    }
}

// --- CLOCK TIMES ---

fn parse_time_string(s: &str) -> Option<NaiveTime> {
    match s {
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    let parse_12h = |s: &str, is_pm: bool| -> Option<NaiveTime> {
        let (h, m) = if let Some((h_str, m_str)) = s.split_once(':') {
            (h_str.parse::<u32>().ok()?, m_str.parse::<u32>().ok()?)
        } else {
            (s.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = match (h, is_pm) {
            (12, true) => 12,
            (12, false) => 0,
            (h, true) => h + 12,
            (h, false) => h,
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = s.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some(stripped) = s.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }

    let (h_str, m_str) = s.split_once(':')?;
    NaiveTime::from_hms_opt(h_str.parse().ok()?, m_str.parse().ok()?, 0)
}

/// A time written as one word ("3pm", "15:30") or two ("3 pm").
fn parse_time_words(words: &[String]) -> Option<(NaiveTime, usize)> {
    let first = words.first()?;
    if let Some(time) = parse_time_string(first) {
        return Some((time, 1));
    }
    let suffix = words.get(1)?;
    if suffix == "am" || suffix == "pm" {
        return parse_time_string(&format!("{first}{suffix}")).map(|t| (t, 2));
    }
    None
}
