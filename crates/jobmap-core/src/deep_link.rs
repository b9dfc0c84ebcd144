//! `/jobs?search=..&location=..` links used to open the map page with a
//! pre-filled query (from the home page search bar or a trending card).

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::{ExperienceLevel, JobRecord, JobType, QueryState};

/// Characters left unescaped in a query value, matching what browsers'
/// `encodeURIComponent` leaves alone.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub search: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
}

impl DeepLink {
    pub const PATH: &'static str = "/jobs";

    /// Link that opens the map focused on one posting.
    #[must_use]
    pub fn for_job(job: &JobRecord) -> Self {
        Self {
            search: job.title.clone(),
            location: job.location.clone(),
            job_type: None,
            experience: None,
        }
    }

    #[must_use]
    pub fn to_path(&self) -> String {
        let mut path = format!(
            "{}?search={}&location={}",
            Self::PATH,
            utf8_percent_encode(&self.search, QUERY_VALUE),
            utf8_percent_encode(&self.location, QUERY_VALUE),
        );
        if let Some(t) = self.job_type {
            path.push_str("&type=");
            path.push_str(t.as_str());
        }
        if let Some(x) = self.experience {
            path.push_str("&experience=");
            path.push_str(x.as_str());
        }
        path
    }

    /// Parses a link path, a `?query` string, or a bare query string.
    ///
    /// Unknown parameters are ignored; unrecognized `type`/`experience`
    /// values are dropped with a warning rather than rejected.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let query = input.split_once('?').map_or(input, |(_, q)| q);
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let mut link = Self::default();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw_value);
            match key {
                "search" => link.search = value,
                "location" => link.location = value,
                "type" if !value.is_empty() => match value.parse() {
                    Ok(t) => link.job_type = Some(t),
                    Err(e) => tracing::warn!(error = %e, "ignoring deep link parameter"),
                },
                "experience" if !value.is_empty() => match value.parse() {
                    Ok(x) => link.experience = Some(x),
                    Err(e) => tracing::warn!(error = %e, "ignoring deep link parameter"),
                },
                _ => {}
            }
        }
        link
    }

    #[must_use]
    pub fn into_query(self) -> QueryState {
        QueryState {
            keyword: self.search,
            location: self.location,
            job_type: self.job_type,
            experience: self.experience,
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
