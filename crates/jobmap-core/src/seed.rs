//! Seed job postings: the built-in list and the optional YAML seed file.
//!
//! Seed locations are raw, human-entered strings with no coordinates;
//! normalization and geocoding happen when the catalog is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{ExperienceLevel, JobType};

/// A job posting as entered by a human, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default, rename = "type")]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub jobs: Vec<SeedJob>,
}

/// Load and validate seed postings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedJob>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let seed_file: SeedFile = serde_yaml::from_str(&content)?;
    validate_seed(&seed_file.jobs)?;

    Ok(seed_file.jobs)
}

fn validate_seed(jobs: &[SeedJob]) -> Result<(), ConfigError> {
    if jobs.is_empty() {
        return Err(ConfigError::Validation(
            "seed file must contain at least one job".to_string(),
        ));
    }

    for (idx, job) in jobs.iter().enumerate() {
        for (field, value) in [
            ("title", &job.title),
            ("company", &job.company),
            ("location", &job.location),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "job #{} has an empty {field}",
                    idx + 1
                )));
            }
        }
    }

    Ok(())
}

fn seed(
    title: &str,
    company: &str,
    location: &str,
    salary: &str,
    image: &str,
    job_type: Option<JobType>,
    experience: Option<ExperienceLevel>,
) -> SeedJob {
    SeedJob {
        title: title.to_owned(),
        company: company.to_owned(),
        location: location.to_owned(),
        job_type,
        experience,
        salary: Some(salary.to_owned()),
        image: Some(image.to_owned()),
    }
}

/// The postings shipped with the application, in display order.
#[must_use]
#[rustfmt::skip]
pub fn builtin_seed() -> Vec<SeedJob> {
    use ExperienceLevel::{Junior, Lead, Mid, Senior};
    use JobType::{Design, Finance, Legal, Marketing, Operations, Sales, Support, Tech};

    vec![
        seed("Software Engineer", "Tech Co", "San Francisco, CA", "$120,000/year", "/images/job1.png", Some(Tech), Some(Mid)),
        seed("Data Analyst", "Data Corp", "New York, NY", "$95,000/year", "/images/job2.png", Some(Tech), Some(Junior)),
        seed("Product Manager", "Retail Inc", "Los Angeles, CA", "$130,000/year", "/images/job3.png", Some(Operations), Some(Senior)),
        seed("Graphic Designer", "Design Studio", "Chicago, IL", "$85,000/year", "/images/job4.png", Some(Design), Some(Mid)),
        seed("Sales Associate", "SalesCom", "Miami, FL", "$75,000/year", "/images/job1.png", Some(Sales), Some(Junior)),
        seed("Marketing Manager", "AdWise", "Austin, TX", "$110,000/year", "/images/job2.png", Some(Marketing), Some(Senior)),
        seed("DevOps Engineer", "CloudNet", "Seattle, WA", "$140,000/year", "/images/job3.png", Some(Tech), Some(Senior)),
        seed("HR Specialist", "PeopleFirst", "Boston, MA", "$90,000/year", "/images/job4.png", Some(Operations), Some(Mid)),
        seed("Cybersecurity Analyst", "SecureTech", "Washington, DC", "$125,000/year", "/images/job5.png", Some(Tech), Some(Mid)),
        seed("Operations Manager", "LogisticsPlus", "Houston, TX", "$115,000/year", "/images/job1.png", Some(Operations), Some(Senior)),
        seed("UX/UI Designer", "Creative Labs", "San Diego, CA", "$95,000/year", "/images/job2.png", Some(Design), Some(Mid)),
        seed("Network Engineer", "NetSecure", "Philadelphia, PA", "$130,000/year", "/images/job3.png", Some(Tech), Some(Mid)),
        seed("AI Researcher", "DeepMind", "Mountain View, CA", "$150,000/year", "/images/job4.png", Some(Tech), Some(Lead)),
        seed("Financial Analyst", "MoneyMatters", "Charlotte, NC", "$100,000/year", "/images/job5.png", Some(Finance), Some(Mid)),
        seed("Social Media Manager", "ViralMarketing", "Los Angeles, CA", "$85,000/year", "/images/job1.png", Some(Marketing), Some(Junior)),
        seed("Technical Writer", "DocuTech", "Denver, CO", "$80,000/year", "/images/job2.png", None, Some(Mid)),
        seed("Customer Support Specialist", "HelpDesk Inc.", "Nashville, TN", "$65,000/year", "/images/job3.png", Some(Support), Some(Junior)),
        seed("Account Manager", "SalesForce", "Orlando, FL", "$90,000/year", "/images/job4.png", Some(Sales), Some(Mid)),
        seed("Legal Consultant", "LawMax", "San Francisco, CA", "$150,000/year", "/images/job5.png", Some(Legal), Some(Senior)),
        seed("Content Strategist", "ThinkContent", "Dallas, TX", "$105,000/year", "/images/job1.png", Some(Marketing), None),
        seed("Mobile Developer", "AppWorks", "San Jose, CA", "$130,000/year", "/images/job2.png", Some(Tech), Some(Mid)),
        seed("Cloud Architect", "CloudWiz", "Chicago, IL", "$145,000/year", "/images/job3.png", Some(Tech), Some(Lead)),
        seed("Data Scientist", "DataPros", "Phoenix, AZ", "$135,000/year", "/images/job4.png", Some(Tech), Some(Senior)),
        seed("IT Support Specialist", "TechHelp", "Portland, OR", "$70,000/year", "/images/job5.png", Some(Support), Some(Junior)),
        seed("Business Analyst", "BizPro", "Salt Lake City, UT", "$105,000/year", "/images/job1.png", Some(Finance), Some(Mid)),
    ]
}
