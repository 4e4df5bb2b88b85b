//! Best-effort publication date parsing.
//!
//! Sites disagree on whether they publish machine-readable timestamps and on
//! which calendar format they print, so parsing is an ordered list of
//! strategies where the first success wins. Nothing here fails: a date that
//! cannot be read is simply `None`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use scraper::ElementRef;

/// A single parsing attempt over trimmed text.
pub type DateStrategy = fn(&str) -> Option<DateTime<FixedOffset>>;

/// Attributes that may carry a machine-readable timestamp, in lookup order.
pub const DATETIME_ATTRIBUTES: [&str; 5] =
    ["datetime", "date-time", "data-datetime", "content", "title"];

/// Strategies applied to an element's text content, in priority order.
pub const TEXT_STRATEGIES: [DateStrategy; 2] = [parse_iso8601, parse_calendar];

/// Calendar formats tried after ISO-8601, in order.
pub const CALENDAR_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%b %d, %Y",
    "%Y年%m月%d日",
    "%B %d, %Y",
    "%Y/%m/%d",
    "%d %b %Y",
];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Resolve the publication date of a matched date element.
///
/// Datetime attributes win over text; the text is then tried as ISO-8601 and
/// finally against [`CALENDAR_FORMATS`].
pub fn normalize(element: Option<ElementRef<'_>>) -> Option<DateTime<FixedOffset>> {
    let element = element?;
    from_attributes(element).or_else(|| {
        let text: String = element.text().collect();
        parse_text(&text)
    })
}

/// Parse the first datetime attribute that holds an ISO-8601 timestamp.
pub fn from_attributes(element: ElementRef<'_>) -> Option<DateTime<FixedOffset>> {
    DATETIME_ATTRIBUTES
        .iter()
        .filter_map(|name| element.value().attr(name))
        .find_map(parse_iso8601)
}

/// Run the text strategies over free text.
pub fn parse_text(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    TEXT_STRATEGIES.iter().find_map(|strategy| strategy(text))
}

/// Parse an extended ISO-8601 timestamp.
///
/// A trailing `Z` means `+00:00`. Values without an offset are taken as UTC,
/// and a bare date is midnight UTC.
pub fn parse_iso8601(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt);
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
    {
        return Some(dt);
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
    {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(midnight_utc)
}

/// Parse a plain calendar date using [`CALENDAR_FORMATS`].
pub fn parse_calendar(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    CALENDAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(midnight_utc)
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use scraper::{Html, Selector};

    fn first_date(html: &str) -> Option<DateTime<FixedOffset>> {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse(".date").unwrap();
        normalize(fragment.select(&selector).next())
    }

    fn utc(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_attribute_wins_over_text() {
        let date = first_date(
            r#"<time class="date" datetime="2024-01-05T10:00:00Z">March 3, 2020</time>"#,
        );
        assert_eq!(date, Some(utc("2024-01-05T10:00:00+00:00")));
        assert_eq!(date.unwrap().offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_alternate_attribute_spelling() {
        let date = first_date(r#"<span class="date" date-time="2023-06-01T08:30:00+02:00"></span>"#);
        assert_eq!(date, Some(utc("2023-06-01T08:30:00+02:00")));
    }

    #[test]
    fn test_title_attribute_checked_last() {
        let date = first_date(
            r#"<abbr class="date" title="2022-12-24T18:00:00Z">Christmas Eve</abbr>"#,
        );
        assert_eq!(date, Some(utc("2022-12-24T18:00:00+00:00")));

        let date = first_date(
            r#"<abbr class="date" data-datetime="2021-01-01" title="2022-12-24T18:00:00Z"></abbr>"#,
        );
        assert_eq!(date, Some(utc("2021-01-01T00:00:00+00:00")));
    }

    #[test]
    fn test_bad_attribute_falls_through_to_text() {
        let date = first_date(r#"<time class="date" datetime="soon">2024-02-10</time>"#);
        assert_eq!(date, Some(utc("2024-02-10T00:00:00+00:00")));
    }

    #[test]
    fn test_iso_text() {
        let date = first_date(r#"<p class="date"> 2024-03-01T12:15:00+09:00 </p>"#);
        assert_eq!(date, Some(utc("2024-03-01T12:15:00+09:00")));
    }

    #[test]
    fn test_abbreviated_month_text() {
        let date = first_date(r#"<p class="date">Jan 5, 2024</p>"#).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 5));
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn test_localized_text() {
        let date = first_date(r#"<p class="date">2024年1月5日</p>"#).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 5));
    }

    #[test]
    fn test_unparseable_text_is_none() {
        assert_eq!(first_date(r#"<p class="date">recently</p>"#), None);
        assert_eq!(first_date(r#"<p class="date">   </p>"#), None);
    }

    #[test]
    fn test_no_element_is_none() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_iso_variants() {
        assert_eq!(
            parse_iso8601("2024-01-05T10:00:00.250Z"),
            Some(utc("2024-01-05T10:00:00.250+00:00"))
        );
        assert_eq!(
            parse_iso8601("2024-01-05 10:00:00"),
            Some(utc("2024-01-05T10:00:00+00:00"))
        );
        assert_eq!(
            parse_iso8601("2024-01-05T10:00"),
            Some(utc("2024-01-05T10:00:00+00:00"))
        );
        assert_eq!(parse_iso8601("Jan 5, 2024"), None);
    }

    #[test]
    fn test_calendar_order() {
        assert_eq!(parse_calendar("2024/01/05"), Some(utc("2024-01-05T00:00:00+00:00")));
        assert_eq!(parse_calendar("5 Jan 2024"), Some(utc("2024-01-05T00:00:00+00:00")));
        assert_eq!(parse_calendar("January 5, 2024"), Some(utc("2024-01-05T00:00:00+00:00")));
        assert_eq!(parse_calendar("yesterday"), None);
    }
}
