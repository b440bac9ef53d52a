//! Calendar-week resampling and weekly returns

use chrono::{Datelike, Days, NaiveDate};

/// The Sunday ending the calendar week containing `date`.
fn week_end(date: NaiveDate) -> NaiveDate {
    let to_sunday = 6 - u64::from(date.weekday().num_days_from_monday());
    date.checked_add_days(Days::new(to_sunday)).unwrap_or(date)
}

/// Resample a daily price series to one point per calendar week.
///
/// Each week keeps the last observed trading price and is labelled by its
/// week-ending Sunday. Dates must be strictly increasing; the output order
/// follows the input.
pub fn weekly_prices(dates: &[NaiveDate], prices: &[f64]) -> Vec<(NaiveDate, f64)> {
    let mut weeks: Vec<(NaiveDate, f64)> = Vec::new();
    for (&date, &price) in dates.iter().zip(prices) {
        let label = week_end(date);
        match weeks.last_mut() {
            Some((last_label, last_price)) if *last_label == label => *last_price = price,
            _ => weeks.push((label, price)),
        }
    }
    weeks
}

/// Weekly percentage returns over a resampled price series.
///
/// The first week has no prior price and is dropped, so the result holds one
/// entry per week from the second onward. Fewer than two weeks of data yield
/// an empty vector.
pub fn weekly_returns(dates: &[NaiveDate], prices: &[f64]) -> Vec<(NaiveDate, f64)> {
    let weeks = weekly_prices(dates, prices);
    weeks
        .windows(2)
        .map(|pair| (pair[1].0, pair[1].1 / pair[0].1 - 1.0))
        .collect()
}
