//! Domain types shared by the catalog, filter, and view layers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::location::normalize;
use crate::seed::SeedJob;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Phoenix, Arizona. The map opens here before any query moves it.
pub const DEFAULT_MAP_CENTER: LatLng = LatLng::new(33.4484, -112.0740);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Tech,
    Finance,
    Construction,
    Healthcare,
    Marketing,
    Design,
    Sales,
    Operations,
    Legal,
    Support,
}

impl JobType {
    pub const ALL: [JobType; 10] = [
        JobType::Tech,
        JobType::Finance,
        JobType::Construction,
        JobType::Healthcare,
        JobType::Marketing,
        JobType::Design,
        JobType::Sales,
        JobType::Operations,
        JobType::Legal,
        JobType::Support,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Tech => "tech",
            JobType::Finance => "finance",
            JobType::Construction => "construction",
            JobType::Healthcare => "healthcare",
            JobType::Marketing => "marketing",
            JobType::Design => "design",
            JobType::Sales => "sales",
            JobType::Operations => "operations",
            JobType::Legal => "legal",
            JobType::Support => "support",
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownJobType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Junior,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ExperienceLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownExperience(s.to_string()))
    }
}

/// Map zoom requested by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomLevel {
    /// Initial overview.
    Default,
    /// Centered on a geocoded location query with no job match.
    City,
    /// Focused on a single job.
    ZoomedIn,
}

impl ZoomLevel {
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            ZoomLevel::Default => 13,
            ZoomLevel::City => 12,
            ZoomLevel::ZoomedIn => 14,
        }
    }
}

/// A job posting with a normalized location.
///
/// Everything except `position` is fixed at construction. `position` starts
/// absent and is filled at most once, when geocoding of `location` resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    /// Always the output of [`normalize`].
    pub location: String,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
    pub salary: Option<String>,
    pub image: String,
    position: Option<LatLng>,
}

impl JobRecord {
    /// Builds a record from seed data, normalizing the raw location.
    #[must_use]
    pub fn from_seed(seed: SeedJob) -> Self {
        Self {
            location: normalize(&seed.location),
            title: seed.title,
            company: seed.company,
            job_type: seed.job_type,
            experience: seed.experience,
            salary: seed.salary.filter(|s| !s.trim().is_empty()),
            image: seed.image.unwrap_or_default(),
            position: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        self.position
    }

    /// Whether the record can be drawn as a map marker.
    #[must_use]
    pub fn is_plottable(&self) -> bool {
        self.position.is_some()
    }

    /// Records resolved coordinates. Returns `false` and leaves the record
    /// untouched if a position was already set.
    pub fn resolve_position(&mut self, position: LatLng) -> bool {
        if self.position.is_some() {
            return false;
        }
        self.position = Some(position);
        true
    }

    #[must_use]
    pub fn salary_label(&self) -> &str {
        self.salary.as_deref().unwrap_or("Salary not provided")
    }
}

/// The current search. Empty text fields and unset enums match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub keyword: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
}

impl QueryState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty()
            && self.location.is_empty()
            && self.job_type.is_none()
            && self.experience.is_none()
    }
}
