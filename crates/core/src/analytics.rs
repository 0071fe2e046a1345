//! Visit analytics: time windows and the single-pass aggregation behind
//! `GET /api/visits`.
//!
//! Grouping keys are the UTC calendar day, the exact (case-sensitive) country
//! string, and the exact path string.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of entries kept in the top-countries and top-pages lists.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Week => "7d",
            Period::Month => "30d",
            Period::Year => "1y",
            Period::All => "all",
        }
    }

    /// Parse the optional `period` query parameter (default `7d`).
    pub fn from_param(param: Option<&str>) -> Result<Self, CoreError> {
        param.map_or(Ok(Self::default()), str::parse)
    }

    /// Inclusive lower bound of the window, or `None` for `all`.
    pub fn window_start(self, now: Timestamp) -> Option<Timestamp> {
        let days = match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
            Period::All => return None,
        };
        Some(now - Duration::days(days))
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Period::Week),
            "30d" => Ok(Period::Month),
            "1y" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(CoreError::InvalidInput(format!(
                "Invalid period '{other}'. Expected one of: 7d, 30d, 1y, all"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// The fields of a visit row the aggregation reads.
pub trait VisitSample {
    fn ip(&self) -> &str;
    fn path(&self) -> &str;
    fn country(&self) -> Option<&str>;
    fn visited_at(&self) -> Timestamp;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyVisits {
    pub date: NaiveDate,
    pub visits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCount {
    pub path: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStats {
    pub period: &'static str,
    pub total_visits: u64,
    #[serde(rename = "uniqueIPs")]
    pub unique_ips: u64,
    pub unique_countries: u64,
    pub daily_visits: Vec<DailyVisits>,
    pub top_countries: Vec<CountryCount>,
    pub top_pages: Vec<PageCount>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate the visits that fall inside `period` as of `now`.
///
/// Rows older than the window start are ignored. For bounded periods every
/// day from the window start through `now` appears in `daily_visits`, with
/// zero for days without traffic.
pub fn aggregate<V: VisitSample>(period: Period, now: Timestamp, visits: &[V]) -> VisitStats {
    let start = period.window_start(now);

    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    if let Some(start) = start {
        let mut day = start.date_naive();
        let today = now.date_naive();
        while day <= today {
            daily.insert(day, 0);
            day = day + Duration::days(1);
        }
    }

    let mut total = 0u64;
    let mut ips: HashSet<&str> = HashSet::new();
    let mut countries: HashMap<&str, u64> = HashMap::new();
    let mut pages: HashMap<&str, u64> = HashMap::new();

    for visit in visits {
        if start.is_some_and(|s| visit.visited_at() < s) {
            continue;
        }
        total += 1;
        ips.insert(visit.ip());
        *daily.entry(visit.visited_at().date_naive()).or_insert(0) += 1;
        if let Some(country) = visit.country() {
            *countries.entry(country).or_insert(0) += 1;
        }
        *pages.entry(visit.path()).or_insert(0) += 1;
    }

    VisitStats {
        period: period.as_str(),
        total_visits: total,
        unique_ips: ips.len() as u64,
        unique_countries: countries.len() as u64,
        daily_visits: daily
            .into_iter()
            .map(|(date, visits)| DailyVisits { date, visits })
            .collect(),
        top_countries: top_n(countries)
            .into_iter()
            .map(|(country, count)| CountryCount { country, count })
            .collect(),
        top_pages: top_n(pages)
            .into_iter()
            .map(|(path, count)| PageCount { path, count })
            .collect(),
    }
}

/// Highest counts first; ties broken by key ascending so output is stable.
fn top_n(counts: HashMap<&str, u64>) -> Vec<(String, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(TOP_N)
        .map(|(key, count)| (key.to_string(), count))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    struct V {
        ip: &'static str,
        path: &'static str,
        country: Option<&'static str>,
        at: Timestamp,
    }

    impl VisitSample for V {
        fn ip(&self) -> &str {
            self.ip
        }
        fn path(&self) -> &str {
            self.path
        }
        fn country(&self) -> Option<&str> {
            self.country
        }
        fn visited_at(&self) -> Timestamp {
            self.at
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn v(ip: &'static str, path: &'static str, country: Option<&'static str>, days_ago: i64) -> V {
        V {
            ip,
            path,
            country,
            at: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn period_parsing() {
        assert_eq!(Period::from_param(None).unwrap(), Period::Week);
        assert_eq!(Period::from_param(Some("30d")).unwrap(), Period::Month);
        assert_eq!(Period::from_param(Some("1y")).unwrap(), Period::Year);
        assert_eq!(Period::from_param(Some("all")).unwrap(), Period::All);
        assert!(Period::from_param(Some("90d")).is_err());
    }

    #[test]
    fn window_start_offsets() {
        assert_eq!(Period::Week.window_start(now()), Some(now() - Duration::days(7)));
        assert_eq!(Period::Year.window_start(now()), Some(now() - Duration::days(365)));
        assert_eq!(Period::All.window_start(now()), None);
    }

    #[test]
    fn three_visits_to_root_from_distinct_ips() {
        let visits = [
            v("10.0.0.1", "/", None, 0),
            v("10.0.0.2", "/", None, 0),
            v("10.0.0.3", "/", None, 0),
        ];
        let stats = aggregate(Period::All, now(), &visits);
        assert_eq!(stats.total_visits, 3);
        assert_eq!(stats.unique_ips, 3);
        assert_eq!(stats.unique_countries, 0);
        assert_eq!(
            stats.top_pages,
            vec![PageCount {
                path: "/".into(),
                count: 3
            }]
        );
    }

    #[test]
    fn rows_outside_window_are_ignored() {
        let visits = [v("a", "/", None, 1), v("b", "/", None, 8), v("c", "/", None, 400)];
        assert_eq!(aggregate(Period::Week, now(), &visits).total_visits, 1);
        assert_eq!(aggregate(Period::Month, now(), &visits).total_visits, 2);
        assert_eq!(aggregate(Period::All, now(), &visits).total_visits, 3);
    }

    #[test]
    fn daily_series_sums_to_total_and_is_zero_filled() {
        let visits = [
            v("a", "/", Some("DE"), 0),
            v("a", "/gallery", Some("DE"), 0),
            v("b", "/", Some("FR"), 3),
        ];
        let stats = aggregate(Period::Week, now(), &visits);
        let sum: u64 = stats.daily_visits.iter().map(|d| d.visits).sum();
        assert_eq!(sum, stats.total_visits);
        // 2026-10-09 through 2026-10-16 inclusive.
        assert_eq!(stats.daily_visits.len(), 8);
        assert!(stats.daily_visits.windows(2).all(|w| w[0].date < w[1].date));
        let today = stats.daily_visits.last().unwrap();
        assert_eq!(today.date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(today.visits, 2);
    }

    #[test]
    fn all_period_has_only_days_with_traffic() {
        let visits = [v("a", "/", None, 10), v("b", "/", None, 0)];
        let stats = aggregate(Period::All, now(), &visits);
        assert_eq!(stats.daily_visits.len(), 2);
    }

    #[test]
    fn unique_ips_counts_distinct_addresses() {
        let visits = [v("a", "/", None, 0), v("a", "/x", None, 0), v("b", "/", None, 0)];
        assert_eq!(aggregate(Period::All, now(), &visits).unique_ips, 2);
    }

    #[test]
    fn countries_are_case_sensitive_and_skip_null() {
        let visits = [
            v("a", "/", Some("Germany"), 0),
            v("b", "/", Some("germany"), 0),
            v("c", "/", None, 0),
        ];
        let stats = aggregate(Period::All, now(), &visits);
        assert_eq!(stats.unique_countries, 2);
        assert_eq!(stats.top_countries.len(), 2);
    }

    #[test]
    fn top_lists_sort_by_count_then_key_and_truncate() {
        let mut visits = Vec::new();
        let paths = [
            "/a", "/b", "/c", "/d", "/e", "/f", "/g", "/h", "/i", "/j", "/k", "/l",
        ];
        for p in paths {
            visits.push(v("x", p, None, 0));
        }
        visits.push(v("x", "/l", None, 0));
        let stats = aggregate(Period::All, now(), &visits);
        assert_eq!(stats.top_pages.len(), TOP_N);
        assert_eq!(stats.top_pages[0].path, "/l");
        assert_eq!(stats.top_pages[0].count, 2);
        assert_eq!(stats.top_pages[1].path, "/a");
    }

    #[test]
    fn stats_serialize_with_wire_names() {
        let stats = aggregate(Period::All, now(), &[v("a", "/", Some("NL"), 0)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalVisits"], 1);
        assert_eq!(json["uniqueIPs"], 1);
        assert_eq!(json["uniqueCountries"], 1);
        assert_eq!(json["dailyVisits"][0]["date"], "2026-10-16");
        assert_eq!(json["topCountries"][0]["country"], "NL");
        assert_eq!(json["topPages"][0]["path"], "/");
        assert_eq!(json["period"], "all");
    }
}
