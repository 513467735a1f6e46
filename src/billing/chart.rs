//! Monthly revenue aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueChart {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// One series per currency, ordered by currency code
    pub series: Vec<RevenueSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSeries {
    pub currency: String,
    pub points: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// `YYYY-MM`
    pub month: String,
    /// Net of refunds, minor currency units
    pub amount: i64,
    pub count: u32,
}

/// A settled charge reduced to what the chart needs
#[derive(Debug, Clone)]
pub struct RevenueSample {
    pub created: DateTime<Utc>,
    pub currency: String,
    pub net_amount: i64,
}

/// First instant of the oldest month in a window of `months` ending at `now`
pub fn window_start(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let (year, month) = month_from_index(month_index(now) - (months.max(1) as i64 - 1));
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(now)
}

/// Bucket samples per calendar month (UTC), zero-filling empty months.
///
/// Samples outside the window are dropped.
pub fn build_chart(samples: &[RevenueSample], now: DateTime<Utc>, months: u32) -> RevenueChart {
    let months = months.max(1) as i64;
    let last = month_index(now);
    let first = last - (months - 1);

    let mut by_currency: BTreeMap<String, Vec<RevenuePoint>> = BTreeMap::new();

    for sample in samples {
        let idx = month_index(sample.created);
        if idx < first || idx > last {
            continue;
        }

        let points = by_currency
            .entry(sample.currency.to_ascii_lowercase())
            .or_insert_with(|| empty_points(first, months));

        let point = &mut points[(idx - first) as usize];
        point.amount += sample.net_amount;
        point.count += 1;
    }

    RevenueChart {
        from: window_start(now, months as u32),
        to: now,
        series: by_currency
            .into_iter()
            .map(|(currency, points)| RevenueSeries { currency, points })
            .collect(),
    }
}

fn empty_points(first: i64, months: i64) -> Vec<RevenuePoint> {
    (first..first + months)
        .map(|idx| {
            let (year, month) = month_from_index(idx);
            RevenuePoint {
                month: format!("{:04}-{:02}", year, month),
                amount: 0,
                count: 0,
            }
        })
        .collect()
}

fn month_index(at: DateTime<Utc>) -> i64 {
    at.year() as i64 * 12 + at.month0() as i64
}

fn month_from_index(idx: i64) -> (i32, u32) {
    (idx.div_euclid(12) as i32, idx.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn sample(created: DateTime<Utc>, currency: &str, net_amount: i64) -> RevenueSample {
        RevenueSample {
            created,
            currency: currency.to_string(),
            net_amount,
        }
    }

    #[test]
    fn window_spans_year_boundary() {
        let start = window_start(at(2026, 2, 15), 3);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn buckets_per_month_and_zero_fills() {
        let now = at(2026, 3, 20);
        let chart = build_chart(
            &[
                sample(at(2026, 1, 3), "usd", 1000),
                sample(at(2026, 1, 28), "usd", 500),
                sample(at(2026, 3, 1), "USD", 250),
            ],
            now,
            3,
        );

        assert_eq!(chart.series.len(), 1);
        let series = &chart.series[0];
        assert_eq!(series.currency, "usd");
        let months: Vec<_> = series.points.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, ["2026-01", "2026-02", "2026-03"]);
        let amounts: Vec<_> = series.points.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, [1500, 0, 250]);
        assert_eq!(series.points[0].count, 2);
    }

    #[test]
    fn drops_samples_outside_window() {
        let chart = build_chart(&[sample(at(2025, 1, 1), "usd", 999)], at(2026, 3, 20), 2);
        assert!(chart.series.is_empty());
    }

    #[test]
    fn separates_currencies() {
        let now = at(2026, 3, 20);
        let chart = build_chart(
            &[sample(now, "usd", 100), sample(now, "eur", 200)],
            now,
            1,
        );
        let currencies: Vec<_> = chart.series.iter().map(|s| s.currency.as_str()).collect();
        assert_eq!(currencies, ["eur", "usd"]);
    }
}
