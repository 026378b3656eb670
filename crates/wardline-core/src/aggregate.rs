//! Status aggregator for dashboard header cards.
//!
//! Every function here is pure over its input slice and recomputed on each
//! call. Datasets are tens to low hundreds of records, so nothing is cached.

use wardline_contracts::{
    record::{Record, Status},
    summary::{AggregateSummary, StatusCount},
};

/// Count records per status over `domain`, in domain order.
///
/// Statuses with no records are reported with count 0. Records whose
/// status is not in `domain` contribute to `total_count` only.
pub fn summarize<'a, R, I>(records: I, domain: &[R::Status]) -> AggregateSummary<R::Status>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut by_status: Vec<StatusCount<R::Status>> = domain
        .iter()
        .map(|&status| StatusCount { status, count: 0 })
        .collect();

    let mut total_count = 0;
    for record in records {
        total_count += 1;
        let status = record.status();
        if let Some(entry) = by_status.iter_mut().find(|e| e.status == status) {
            entry.count += 1;
        }
    }

    AggregateSummary {
        total_count,
        by_status,
        derived_percentage: None,
    }
}

/// `summarize` over the full declared domain of the record's status type.
pub fn summarize_all<'a, R, I>(records: I) -> AggregateSummary<R::Status>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    summarize(records, <R::Status as Status>::DOMAIN)
}

/// `summarize`, plus a derived percentage over a numeric progress field:
/// `round(sum(progress) / (len * max_progress) * 100)`.
///
/// The percentage is `None` when `records` is empty or `max_progress` is 0.
pub fn summarize_with_progress<'a, R, I, F>(
    records: I,
    domain: &[R::Status],
    progress: F,
    max_progress: f64,
) -> AggregateSummary<R::Status>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
    I::IntoIter: Clone,
    F: Fn(&R) -> f64,
{
    let records = records.into_iter();
    let mut summary = summarize(records.clone(), domain);
    summary.derived_percentage = progress_percentage(records, progress, max_progress);
    summary
}

/// `round(sum(progress) / (len * max_progress) * 100)`, or `None` for an
/// empty input or a zero maximum.
pub fn progress_percentage<'a, R, I, F>(records: I, progress: F, max_progress: f64) -> Option<u32>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> f64,
{
    let (count, total) = records
        .into_iter()
        .fold((0usize, 0.0f64), |(n, sum), r| (n + 1, sum + progress(r)));

    let denominator = count as f64 * max_progress;
    if count == 0 || denominator <= 0.0 {
        return None;
    }
    Some(rounded_percent(total / denominator))
}

/// Percentage of `eligible` records that are `complete`, rounded.
///
/// Used for parent aggregates such as a patient's consent progress
/// (required forms that are signed). `None` when nothing is eligible.
pub fn completion_percentage<'a, R, I, E, C>(records: I, eligible: E, complete: C) -> Option<u32>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    E: Fn(&R) -> bool,
    C: Fn(&R) -> bool,
{
    let (eligible_count, complete_count) =
        records
            .into_iter()
            .filter(|r| eligible(r))
            .fold((0usize, 0usize), |(n, done), r| {
                (n + 1, if complete(r) { done + 1 } else { done })
            });

    if eligible_count == 0 {
        return None;
    }
    Some(rounded_percent(complete_count as f64 / eligible_count as f64))
}

/// Clamp to 0–100 and round half away from zero.
fn rounded_percent(ratio: f64) -> u32 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u32
}
