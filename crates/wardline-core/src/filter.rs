//! Predicate filter engine.
//!
//! `build_predicate` turns one `FilterCriteria` into a single closure that
//! tests a record against every clause:
//!
//! 1. Text search: case-insensitive substring over the record's designated
//!    search fields. Passes when the search text is empty, when the record
//!    designates no fields, or when ANY field contains the text.
//! 2. Status, category, priority: exact equality, or pass on `All`.
//!
//! Clauses are combined with logical AND.

use wardline_contracts::{
    criteria::{FilterCriteria, Selection},
    record::Record,
};

/// Build the combined predicate for `criteria`.
///
/// The search text is lowercased once here, not per record.
pub fn build_predicate<R: Record>(criteria: &FilterCriteria<R::Status>) -> impl Fn(&R) -> bool {
    let needle = criteria.search_text.to_lowercase();
    let status = criteria.status.clone();
    let category = criteria.category.clone();
    let priority = criteria.priority.clone();

    move |record: &R| {
        lowered_text_matches(&needle, &record.search_fields())
            && status_matches(&status, record.status())
            && category_matches(&category, record.category())
            && selection_matches(&priority, record.priority())
    }
}

/// Apply `criteria` to `records`, keeping their order.
pub fn apply<'a, R, I>(criteria: &FilterCriteria<R::Status>, records: I) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let predicate = build_predicate::<R>(criteria);
    records.into_iter().filter(|r| predicate(r)).collect()
}

/// The text clause on its own, for owners filtering composite rows
/// (e.g. a patient with several consent forms).
pub fn text_matches(search_text: &str, fields: &[&str]) -> bool {
    lowered_text_matches(&search_text.to_lowercase(), fields)
}

/// `needle` must already be lowercase.
fn lowered_text_matches(needle: &str, fields: &[&str]) -> bool {
    if needle.is_empty() || fields.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn status_matches<S: PartialEq>(selection: &Selection<S>, status: S) -> bool {
    match selection {
        Selection::All => true,
        Selection::Only(wanted) => *wanted == status,
    }
}

fn category_matches(selection: &Selection<String>, category: Option<&str>) -> bool {
    match selection {
        Selection::All => true,
        Selection::Only(wanted) => category == Some(wanted.as_str()),
    }
}

fn selection_matches<T: PartialEq>(selection: &Selection<T>, value: Option<T>) -> bool {
    match selection {
        Selection::All => true,
        Selection::Only(wanted) => value.as_ref() == Some(wanted),
    }
}
