use std::collections::HashSet;

use crate::model::DailyForecastEntry;

/// Number of calendar days kept from the provider's interval forecast.
pub const FORECAST_DAYS: usize = 5;

/// Collapse sub-day forecast intervals into one entry per UTC calendar date.
///
/// Entries are taken in chronological order; the first interval seen for a date
/// represents that date and later intervals of the same date are dropped. Scanning
/// stops once [`FORECAST_DAYS`] dates are collected. Short input yields fewer entries.
///
/// The representative is whatever interval the provider lists first for a date,
/// not a fixed time of day such as noon.
pub fn daily_forecast(mut entries: Vec<DailyForecastEntry>) -> Vec<DailyForecastEntry> {
    // stable: equal timestamps keep provider order
    entries.sort_by_key(|e| e.timestamp);

    let mut seen = HashSet::new();
    let mut daily = Vec::with_capacity(FORECAST_DAYS);

    for entry in entries {
        if seen.insert(entry.date()) {
            daily.push(entry);

            if daily.len() == FORECAST_DAYS {
                break;
            }
        }
    }

    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{entry_at, utc};
    use chrono::{DateTime, Duration, Utc};

    fn timestamps(entries: &[DailyForecastEntry]) -> Vec<DateTime<Utc>> {
        entries.iter().map(|e| e.timestamp).collect()
    }

    #[test]
    fn keeps_first_interval_of_each_day() {
        let input = [
            utc(2024, 1, 1, 0, 0),
            utc(2024, 1, 1, 3, 0),
            utc(2024, 1, 2, 0, 0),
            utc(2024, 1, 2, 3, 0),
            utc(2024, 1, 3, 12, 0),
        ]
        .into_iter()
        .map(entry_at)
        .collect();

        let daily = daily_forecast(input);

        assert_eq!(
            timestamps(&daily),
            vec![utc(2024, 1, 1, 0, 0), utc(2024, 1, 2, 0, 0), utc(2024, 1, 3, 12, 0)]
        );
    }

    #[test]
    fn empty_input_gives_empty_forecast() {
        assert!(daily_forecast(Vec::new()).is_empty());
    }

    #[test]
    fn single_entry_is_kept() {
        let daily = daily_forecast(vec![entry_at(utc(2024, 6, 1, 9, 0))]);
        assert_eq!(timestamps(&daily), vec![utc(2024, 6, 1, 9, 0)]);
    }

    #[test]
    fn stops_after_five_days() {
        // provider shape: 40 intervals, 3 hours apart, starting mid-day
        let start = utc(2024, 3, 10, 15, 0);
        let input = (0..40).map(|i| entry_at(start + Duration::hours(3 * i))).collect();

        let daily = daily_forecast(input);

        assert_eq!(daily.len(), FORECAST_DAYS);
        assert_eq!(daily[0].timestamp, start);
        for day in &daily[1..] {
            assert_eq!(day.timestamp.format("%H:%M").to_string(), "00:00");
        }
    }

    #[test]
    fn returns_min_of_distinct_dates_and_five() {
        for days in 0..8i64 {
            let input = (0..days)
                .flat_map(|d| {
                    let midnight = utc(2024, 2, 1, 0, 0) + Duration::days(d);
                    [midnight + Duration::hours(6), midnight + Duration::hours(18)]
                })
                .map(entry_at)
                .collect();

            let daily = daily_forecast(input);

            assert_eq!(daily.len(), (days as usize).min(FORECAST_DAYS));
            assert!(daily.windows(2).all(|w| w[0].date() < w[1].date()));
            assert!(daily.iter().all(|e| e.timestamp.format("%H").to_string() == "06"));
        }
    }

    #[test]
    fn out_of_order_input_still_picks_earliest_interval() {
        let input = vec![
            entry_at(utc(2024, 1, 2, 9, 0)),
            entry_at(utc(2024, 1, 1, 21, 0)),
            entry_at(utc(2024, 1, 2, 3, 0)),
            entry_at(utc(2024, 1, 1, 18, 0)),
        ];

        let daily = daily_forecast(input);

        assert_eq!(timestamps(&daily), vec![utc(2024, 1, 1, 18, 0), utc(2024, 1, 2, 3, 0)]);
    }
}
