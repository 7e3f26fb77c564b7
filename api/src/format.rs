//! Display helpers shared by the pages.

use chrono::{DateTime, NaiveDate, Utc};

/// `1500.5` -> `R$ 1.500,50`
pub fn brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{:02}", if negative { "-" } else { "" }, grouped, frac)
}

pub fn date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

pub fn date_time(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

pub fn stars(score: u8) -> String {
    let filled = score.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Mean score, one decimal place, or `None` with no ratings.
pub fn average_score(scores: impl IntoIterator<Item = u8>) -> Option<f64> {
    let (sum, count) = scores
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| (sum + s as u32, count + 1));
    if count == 0 {
        None
    } else {
        Some((sum as f64 / count as f64 * 10.0).round() / 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_brl_grouping() {
        assert_eq!(brl(0.0), "R$ 0,00");
        assert_eq!(brl(80.0), "R$ 80,00");
        assert_eq!(brl(1500.5), "R$ 1.500,50");
        assert_eq!(brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(brl(-42.1), "-R$ 42,10");
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(date(d), "03/02/2026");
        let dt = Utc.with_ymd_and_hms(2026, 2, 3, 14, 5, 0).unwrap();
        assert_eq!(date_time(dt), "03/02/2026 14:05");
    }

    #[test]
    fn test_stars_and_average() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(average_score([5, 4, 4]), Some(4.3));
        assert_eq!(average_score(Vec::<u8>::new()), None);
    }
}
