use crate::types::{CollectionLog, CollectionRecord, CollectionSummary, GroupShare, ShareRow, TopRow};
use crate::util::{days_diff, format_number};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Total material and date range over records that have both a valid date
/// and a quantity.
pub fn summarize(log: &CollectionLog) -> CollectionSummary {
    let dated: Vec<(NaiveDate, f64)> = log.records.iter().filter_map(CollectionRecord::dated_kg).collect();
    let total_kg: f64 = dated.iter().map(|(_, kg)| kg).sum();
    let first_date = dated.iter().map(|(d, _)| *d).min();
    let last_date = dated.iter().map(|(d, _)| *d).max();
    let span_days = match (first_date, last_date) {
        (Some(a), Some(b)) => Some(days_diff(a, b)),
        _ => None,
    };
    CollectionSummary {
        dataset: log.name.clone(),
        total_kg,
        first_date,
        last_date,
        span_days,
        dated_rows: dated.len(),
        dropped_rows: log.records.len() - dated.len(),
    }
}

/// The `n` dated records with the largest quantity.
///
/// Ties keep their original row order; fewer than `n` candidates returns
/// all of them.
pub fn top_n(records: &[CollectionRecord], n: usize) -> Vec<&CollectionRecord> {
    let mut candidates: Vec<&CollectionRecord> =
        records.iter().filter(|r| r.dated_kg().is_some()).collect();
    // `sort_by` is stable, which is what keeps ties in row order.
    candidates.sort_by(|a, b| {
        let (ka, kb) = (a.kg.unwrap_or(f64::MIN), b.kg.unwrap_or(f64::MIN));
        kb.partial_cmp(&ka).unwrap_or(Ordering::Equal)
    });
    candidates.truncate(n);
    candidates
}

impl From<&CollectionRecord> for TopRow {
    fn from(r: &CollectionRecord) -> Self {
        TopRow {
            date: r.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            site: r.site.clone(),
            kg: format_number(r.kg.unwrap_or_default(), 2),
        }
    }
}

/// Table rows for records already ranked by [`top_n`].
pub fn top_rows(top: &[&CollectionRecord]) -> Vec<TopRow> {
    top.iter().map(|r| TopRow::from(*r)).collect()
}

/// Quantity collected per site or zone, ordered by name.
///
/// Undated records still count here; records without a quantity do not.
/// Groups listed in `excluded` are left out before percentages are taken.
pub fn share_by_site(records: &[CollectionRecord], excluded: &[String]) -> Vec<GroupShare> {
    shares(records.iter(), excluded)
}

/// Like [`share_by_site`], but over records with a valid date only.
pub fn dated_share_by_site(records: &[CollectionRecord], excluded: &[String]) -> Vec<GroupShare> {
    shares(records.iter().filter(|r| r.date.is_some()), excluded)
}

fn shares<'a>(
    records: impl Iterator<Item = &'a CollectionRecord>,
    excluded: &[String],
) -> Vec<GroupShare> {
    let mut by_site: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        let Some(kg) = r.kg else { continue };
        if excluded.iter().any(|e| e == &r.site) {
            continue;
        }
        *by_site.entry(r.site.as_str()).or_insert(0.0) += kg;
    }
    let total: f64 = by_site.values().sum();
    by_site
        .into_iter()
        .map(|(group, kg)| GroupShare {
            group: group.to_string(),
            kg,
            share_pct: if total > 0.0 { kg / total * 100.0 } else { 0.0 },
        })
        .collect()
}

pub fn share_rows(shares: &[GroupShare]) -> Vec<ShareRow> {
    shares
        .iter()
        .map(|s| ShareRow {
            group: s.group.clone(),
            kg: format_number(s.kg, 2),
            share_pct: format_number(s.share_pct, 1),
        })
        .collect()
}

/// Dated records as (date, kg) points in date order, stable on equal dates.
pub fn time_series(records: &[CollectionRecord]) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = records.iter().filter_map(CollectionRecord::dated_kg).collect();
    points.sort_by_key(|(d, _)| *d);
    points
}
