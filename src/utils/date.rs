use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Formats accepted for entry/exit timestamps without an explicit offset.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local time as an ISO-8601 string (seconds precision).
pub fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Parse an ISO-8601 timestamp into its wall-clock date and time.
///
/// Timestamps carrying an offset (`Z`, `-03:00`, ...) keep the clock time
/// written in the string: `2024-03-05T23:30:00-03:00` lands on 2024-03-05.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in NAIVE_FORMATS {
        if fmt == "%Y-%m-%d" {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return d.and_hms_opt(0, 0, 0);
            }
        } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    None
}

/// A calendar period selected from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Year(i32),
    Month(i32, u32),
    Day(NaiveDate),
}

impl Period {
    /// Parse `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn parse(p: &str) -> Result<Self, String> {
        let p = p.trim();

        // YYYY-MM-DD
        if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
            return Ok(Period::Day(d));
        }

        // YYYY-MM
        if let Ok(dm) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
            return Ok(Period::Month(dm.year(), dm.month()));
        }

        // YYYY
        if p.len() == 4
            && let Ok(year) = p.parse::<i32>()
        {
            return Ok(Period::Year(year));
        }

        Err(format!("Invalid period: {}", p))
    }

    /// Current month, used when no period is given.
    pub fn current_month() -> Self {
        let t = today();
        Period::Month(t.year(), t.month())
    }

    /// Bucket keys (`"YYYY"`, `"MM"`, `"DD"`) for this period.
    pub fn keys(&self) -> (String, Option<String>, Option<String>) {
        match self {
            Period::Year(y) => (year_key(*y), None, None),
            Period::Month(y, m) => (year_key(*y), Some(pad2(*m)), None),
            Period::Day(d) => (
                year_key(d.year()),
                Some(pad2(d.month())),
                Some(pad2(d.day())),
            ),
        }
    }
}

pub fn year_key(year: i32) -> String {
    format!("{:04}", year)
}

pub fn pad2(n: u32) -> String {
    format!("{:02}", n)
}

/// Normalise a month/day key so that `"3"` and `"03"` address the same bucket.
pub fn normalize_key(k: &str) -> String {
    match k.trim().parse::<u32>() {
        Ok(n) => pad2(n),
        Err(_) => k.trim().to_string(),
    }
}

/// Portuguese month name for a 1-based month.
pub fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Janeiro",
        "Fevereiro",
        "Março",
        "Abril",
        "Maio",
        "Junho",
        "Julho",
        "Agosto",
        "Setembro",
        "Outubro",
        "Novembro",
        "Dezembro",
    ];
    match month {
        1..=12 => MONTHS[(month - 1) as usize],
        _ => "",
    }
}

/// Portuguese abbreviated weekday, as shown on the dashboard.
pub fn weekday_short(d: NaiveDate) -> &'static str {
    match d.weekday() {
        chrono::Weekday::Mon => "Seg",
        chrono::Weekday::Tue => "Ter",
        chrono::Weekday::Wed => "Qua",
        chrono::Weekday::Thu => "Qui",
        chrono::Weekday::Fri => "Sex",
        chrono::Weekday::Sat => "Sáb",
        chrono::Weekday::Sun => "Dom",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_common_timestamp_shapes() {
        let a = parse_timestamp("2024-03-05T10:00:00").unwrap();
        assert_eq!(a.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(a.hour(), 10);

        let b = parse_timestamp("2024-03-05T10:00:00.123Z").unwrap();
        assert_eq!(b.hour(), 10);

        let c = parse_timestamp("2024-03-05 22:15").unwrap();
        assert_eq!(c.minute(), 15);

        let d = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(d.hour(), 0);
    }

    #[test]
    fn offset_keeps_wall_clock_date() {
        let dt = parse_timestamp("2024-03-05T23:30:00-03:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-13-01T00:00:00").is_none());
    }

    #[test]
    fn period_parsing() {
        assert_eq!(Period::parse("2024").unwrap(), Period::Year(2024));
        assert_eq!(Period::parse("2024-03").unwrap(), Period::Month(2024, 3));
        assert_eq!(
            Period::parse("2024-03-05").unwrap(),
            Period::Day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
        assert!(Period::parse("24").is_err());
        assert!(Period::parse("2024-14").is_err());
    }

    #[test]
    fn period_keys_are_padded() {
        let (y, m, d) = Period::parse("2024-03-05").unwrap().keys();
        assert_eq!(y, "2024");
        assert_eq!(m.as_deref(), Some("03"));
        assert_eq!(d.as_deref(), Some("05"));
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(3), "Março");
        assert_eq!(month_name(12), "Dezembro");
        assert_eq!(month_name(0), "");
    }
}
