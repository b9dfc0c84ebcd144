//! Multi-predicate job search.
//!
//! Matching is literal: case-insensitive substring tests for the text fields
//! and exact equality for the enum fields. Results keep catalog order; there
//! is no scoring.

use crate::types::{JobRecord, QueryState};

/// Lowercased query text, prepared once per filter pass.
struct PreparedQuery<'q> {
    keyword: String,
    location: String,
    query: &'q QueryState,
}

impl<'q> PreparedQuery<'q> {
    fn new(query: &'q QueryState) -> Self {
        Self {
            keyword: query.keyword.to_lowercase(),
            location: query.location.to_lowercase(),
            query,
        }
    }

    fn matches(&self, job: &JobRecord) -> bool {
        let keyword_ok = self.keyword.is_empty()
            || job.title.to_lowercase().contains(&self.keyword)
            || job.company.to_lowercase().contains(&self.keyword);

        let location_ok =
            self.location.is_empty() || job.location.to_lowercase().contains(&self.location);

        // An unclassified record never satisfies a set filter.
        let type_ok = self
            .query
            .job_type
            .is_none_or(|wanted| job.job_type == Some(wanted));
        let experience_ok = self
            .query
            .experience
            .is_none_or(|wanted| job.experience == Some(wanted));

        keyword_ok && location_ok && type_ok && experience_ok
    }
}

/// Returns `true` if `job` satisfies every predicate of `query`.
#[must_use]
pub fn matches(job: &JobRecord, query: &QueryState) -> bool {
    PreparedQuery::new(query).matches(job)
}

/// Returns the catalog indices of every matching job, in catalog order.
#[must_use]
pub fn filter(catalog: &[JobRecord], query: &QueryState) -> Vec<usize> {
    let prepared = PreparedQuery::new(query);
    catalog
        .iter()
        .enumerate()
        .filter(|(_, job)| prepared.matches(job))
        .map(|(idx, _)| idx)
        .collect()
}

/// Like [`filter`], but yields the matching records themselves.
#[must_use]
pub fn filter_jobs<'a>(catalog: &'a [JobRecord], query: &QueryState) -> Vec<&'a JobRecord> {
    let prepared = PreparedQuery::new(query);
    catalog.iter().filter(|job| prepared.matches(job)).collect()
}
