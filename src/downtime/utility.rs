use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC `n` calendar days before the day containing `now`.
pub fn days_ago(now: DateTime<Utc>, n: u32) -> DateTime<Utc> {
    let date = now
        .date_naive()
        .checked_sub_days(Days::new(u64::from(n)))
        .unwrap_or(NaiveDate::MIN);
    start_of_day(date)
}

/// Minutes between two instants, clamped at zero. Keeps millisecond precision.
pub fn minutes_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    let ms = (b - a).num_milliseconds() as f64;
    (ms / 60_000.0).max(0.0)
}
