//! Plain-text output for the CLI.

use std::fmt::Display;

use jobmap_core::{DeepLink, JobRecord};
use jobmap_session::ViewModel;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub(crate) fn print_catalog(catalog: &[JobRecord]) {
    let unresolved = catalog.iter().filter(|j| !j.is_plottable()).count();
    println!(
        "{:<30}{:<18}{:<30}{:<13}{:<9}POSITION",
        "TITLE", "COMPANY", "LOCATION", "TYPE", "LEVEL"
    );
    for job in catalog {
        println!(
            "{:<30}{:<18}{:<30}{:<13}{:<9}{}",
            truncate(&job.title, 26),
            truncate(&job.company, 15),
            job.location,
            or_dash(job.job_type),
            or_dash(job.experience),
            or_dash(job.position()),
        );
    }
    println!("{} jobs, {unresolved} without coordinates", catalog.len());
}

pub(crate) fn print_listing(jobs: &[&JobRecord]) {
    if jobs.is_empty() {
        println!("{}", jobmap_session::view::EMPTY_MESSAGE);
        return;
    }
    for job in jobs {
        println!(
            "{} at {} ({}) {}",
            job.title,
            job.company,
            job.location,
            job.salary_label()
        );
    }
}

pub(crate) fn print_trending(cards: &[(&JobRecord, DeepLink)]) {
    if cards.is_empty() {
        println!("{}", jobmap_session::view::EMPTY_MESSAGE);
        return;
    }
    for (job, link) in cards {
        println!("{} at {} ({})", job.title, job.company, job.location);
        println!("    {}", link.to_path());
    }
}

/// Prints the listing numbered for `click <n>`, then the map and detail pane.
pub(crate) fn print_view(model: &ViewModel<'_>) {
    match model.empty_message() {
        Some(message) => println!("{message}"),
        None => {
            for (n, item) in model.listings.iter().enumerate() {
                let cursor = if item.selected { '>' } else { ' ' };
                let pin = if item.job.is_plottable() { "" } else { " [no map pin]" };
                println!(
                    "{cursor}{:>3}. {} at {} ({}){pin}",
                    n + 1,
                    item.job.title,
                    item.job.company,
                    item.job.location
                );
            }
        }
    }

    println!(
        "map: center {} zoom {} ({} markers)",
        model.map_center,
        model.zoom,
        model.markers.len()
    );

    if let Some(job) = model.selected {
        println!("--- {} ---", job.title);
        println!("company:    {}", job.company);
        println!("location:   {}", job.location);
        println!("type:       {}", or_dash(job.job_type));
        println!("experience: {}", or_dash(job.experience));
        println!("salary:     {}", job.salary_label());
    }
}
