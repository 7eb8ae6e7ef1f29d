//! Lenient calendar date parsing for free-text replies.
//!
//! Accepts the phrasings employees actually type: ISO and slash dates,
//! month names with or without a year, ordinal days, and a few relative
//! words. Anything else is simply "no date"; callers re-prompt.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest token run tried when a date is followed by other words.
const MAX_DATE_TOKENS: usize = 4;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").expect("valid regex"));

static US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})$").expect("valid regex"));

static MONTH_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)\.? (\d{1,2})(?: (\d{4}))?$").expect("valid regex"));

static DAY_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}) (?:of )?([a-z]+)\.?(?: (\d{4}))?$").expect("valid regex"));

static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid regex"));

/// Parses date phrases relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct DateParser {
    today: NaiveDate,
}

impl DateParser {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Parses the whole phrase as a date.
    pub fn parse(&self, phrase: &str) -> Option<NaiveDate> {
        let normalized = normalize(phrase);
        if normalized.is_empty() {
            return None;
        }

        self.parse_relative(&normalized)
            .or_else(|| parse_numeric(&normalized))
            .or_else(|| self.parse_named_month(&normalized))
    }

    /// Parses the longest run of leading tokens that forms a date.
    ///
    /// `"2025-09-15 for a family trip"` yields 2025-09-15.
    pub fn parse_leading(&self, text: &str) -> Option<NaiveDate> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let longest = tokens.len().min(MAX_DATE_TOKENS);

        (1..=longest)
            .rev()
            .find_map(|n| self.parse(&tokens[..n].join(" ")))
    }

    fn parse_relative(&self, phrase: &str) -> Option<NaiveDate> {
        match phrase {
            "today" => return Some(self.today),
            "tomorrow" => return self.today.checked_add_signed(Duration::days(1)),
            _ => {}
        }

        let day = phrase
            .strip_prefix("next ")
            .or_else(|| phrase.strip_prefix("this "))
            .unwrap_or(phrase);
        weekday_from_name(day).and_then(|weekday| self.next_weekday(weekday))
    }

    /// The next `weekday` strictly after today.
    fn next_weekday(&self, weekday: Weekday) -> Option<NaiveDate> {
        let current = self.today.weekday().num_days_from_monday() as i64;
        let target = weekday.num_days_from_monday() as i64;
        let mut offset = (target - current).rem_euclid(7);
        if offset == 0 {
            offset = 7;
        }
        self.today.checked_add_signed(Duration::days(offset))
    }

    fn parse_named_month(&self, phrase: &str) -> Option<NaiveDate> {
        let (month, day, year) = if let Some(caps) = MONTH_FIRST.captures(phrase) {
            (
                month_from_name(&caps[1])?,
                caps[2].parse::<u32>().ok()?,
                caps.get(3).map(|m| m.as_str()),
            )
        } else if let Some(caps) = DAY_FIRST.captures(phrase) {
            (
                month_from_name(&caps[2])?,
                caps[1].parse::<u32>().ok()?,
                caps.get(3).map(|m| m.as_str()),
            )
        } else {
            return None;
        };

        match year {
            Some(year) => NaiveDate::from_ymd_opt(year.parse().ok()?, month, day),
            None => self.upcoming(month, day),
        }
    }

    /// A month/day without a year means its next occurrence, today included.
    fn upcoming(&self, month: u32, day: u32) -> Option<NaiveDate> {
        let this_year = NaiveDate::from_ymd_opt(self.today.year(), month, day);
        match this_year {
            Some(date) if date >= self.today => Some(date),
            _ => NaiveDate::from_ymd_opt(self.today.year() + 1, month, day),
        }
    }
}

fn normalize(phrase: &str) -> String {
    let lowered = phrase
        .to_lowercase()
        .replace(',', " ")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '!' | '?' | ';' | ':'))
        .to_string();
    let without_ordinals = ORDINAL.replace_all(&lowered, "$1");
    without_ordinals.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_numeric(phrase: &str) -> Option<NaiveDate> {
    if let Some(caps) = ISO_DATE.captures(phrase) {
        return NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }
    if let Some(caps) = US_DATE.captures(phrase) {
        return NaiveDate::from_ymd_opt(
            caps[3].parse().ok()?,
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
        );
    }
    None
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// True if a word names a month or weekday. Used to spot failed date replies.
pub(crate) fn is_calendar_word(word: &str) -> bool {
    month_from_name(word).is_some()
        || weekday_from_name(word).is_some()
        || matches!(word, "today" | "tomorrow")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Monday, 1 September 2025.
    fn parser() -> DateParser {
        DateParser::new(date(2025, 9, 1))
    }

    mod absolute {
        use super::*;

        #[test]
        fn parses_iso_date() {
            assert_eq!(parser().parse("2025-09-15"), Some(date(2025, 9, 15)));
        }

        #[test]
        fn parses_slashed_iso_date() {
            assert_eq!(parser().parse("2025/9/15"), Some(date(2025, 9, 15)));
        }

        #[test]
        fn parses_us_date() {
            assert_eq!(parser().parse("09/15/2025"), Some(date(2025, 9, 15)));
        }

        #[test]
        fn parses_month_name_with_year() {
            assert_eq!(parser().parse("September 15, 2025"), Some(date(2025, 9, 15)));
            assert_eq!(parser().parse("Sep 15 2025"), Some(date(2025, 9, 15)));
        }

        #[test]
        fn parses_day_first_with_ordinal() {
            assert_eq!(parser().parse("15th of October 2025"), Some(date(2025, 10, 15)));
            assert_eq!(parser().parse("3 Nov 2025."), Some(date(2025, 11, 3)));
        }

        #[test]
        fn rejects_impossible_dates() {
            assert_eq!(parser().parse("2025-02-30"), None);
            assert_eq!(parser().parse("13/40/2025"), None);
        }

        #[test]
        fn rejects_non_dates() {
            assert_eq!(parser().parse("next week sometime"), None);
            assert_eq!(parser().parse("yes"), None);
            assert_eq!(parser().parse(""), None);
        }
    }

    mod relative {
        use super::*;

        #[test]
        fn today_and_tomorrow() {
            assert_eq!(parser().parse("today"), Some(date(2025, 9, 1)));
            assert_eq!(parser().parse("Tomorrow!"), Some(date(2025, 9, 2)));
        }

        #[test]
        fn weekday_is_strictly_after_today() {
            assert_eq!(parser().parse("monday"), Some(date(2025, 9, 8)));
            assert_eq!(parser().parse("next Friday"), Some(date(2025, 9, 5)));
        }

        #[test]
        fn month_day_without_year_rolls_forward() {
            assert_eq!(parser().parse("September 15"), Some(date(2025, 9, 15)));
            assert_eq!(parser().parse("August 15"), Some(date(2026, 8, 15)));
        }
    }

    mod leading {
        use super::*;

        #[test]
        fn ignores_trailing_words() {
            assert_eq!(
                parser().parse_leading("2025-09-15 for a family trip"),
                Some(date(2025, 9, 15))
            );
        }

        #[test]
        fn prefers_longest_date_phrase() {
            assert_eq!(
                parser().parse_leading("September 15, 2026 please"),
                Some(date(2026, 9, 15))
            );
        }

        #[test]
        fn no_date_at_start() {
            assert_eq!(parser().parse_leading("the week after next"), None);
        }
    }

    #[test]
    fn calendar_words() {
        assert!(is_calendar_word("sept"));
        assert!(is_calendar_word("friday"));
        assert!(!is_calendar_word("yes"));
    }
}
