//! Canonical display form for free-text "City, ST" location strings.
//!
//! The normalized string doubles as the geocode cache key, so every location
//! is run through [`normalize`] before it is stored or compared.

/// Two-letter US region abbreviations and their lowercase full names.
const US_REGIONS: &[(&str, &str)] = &[
    ("al", "alabama"),
    ("ak", "alaska"),
    ("az", "arizona"),
    ("ar", "arkansas"),
    ("ca", "california"),
    ("co", "colorado"),
    ("ct", "connecticut"),
    ("de", "delaware"),
    ("fl", "florida"),
    ("ga", "georgia"),
    ("hi", "hawaii"),
    ("id", "idaho"),
    ("il", "illinois"),
    ("in", "indiana"),
    ("ia", "iowa"),
    ("ks", "kansas"),
    ("ky", "kentucky"),
    ("la", "louisiana"),
    ("me", "maine"),
    ("md", "maryland"),
    ("ma", "massachusetts"),
    ("mi", "michigan"),
    ("mn", "minnesota"),
    ("ms", "mississippi"),
    ("mo", "missouri"),
    ("mt", "montana"),
    ("ne", "nebraska"),
    ("nv", "nevada"),
    ("nh", "new hampshire"),
    ("nj", "new jersey"),
    ("nm", "new mexico"),
    ("ny", "new york"),
    ("nc", "north carolina"),
    ("nd", "north dakota"),
    ("oh", "ohio"),
    ("ok", "oklahoma"),
    ("or", "oregon"),
    ("pa", "pennsylvania"),
    ("ri", "rhode island"),
    ("sc", "south carolina"),
    ("sd", "south dakota"),
    ("tn", "tennessee"),
    ("tx", "texas"),
    ("ut", "utah"),
    ("vt", "vermont"),
    ("va", "virginia"),
    ("wa", "washington"),
    ("wv", "west virginia"),
    ("wi", "wisconsin"),
    ("wy", "wyoming"),
    ("dc", "district of columbia"),
];

/// Looks up the lowercase full region name for a two-letter abbreviation.
///
/// Matching ignores case and surrounding whitespace.
#[must_use]
pub fn region_name(abbrev: &str) -> Option<&'static str> {
    let key = abbrev.trim().to_lowercase();
    US_REGIONS
        .iter()
        .find(|(short, _)| *short == key)
        .map(|(_, full)| *full)
}

/// Normalizes a raw location into `"City, Region"` display form.
///
/// Splits on the first comma, expands a known region abbreviation, and
/// capitalizes every word. Input without a region yields just the city;
/// input without a city yields just the region. Never fails, and
/// `normalize(&normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let (city, region) = raw.split_once(',').unwrap_or((raw, ""));
    // With no city, the output has no leading comma, so a second pass would
    // split the remainder. Normalize the remainder as the whole input.
    if city.trim().is_empty() && region.contains(',') {
        return normalize(region);
    }
    let city = city.trim().to_lowercase();
    let region = region.trim().to_lowercase();
    let region = region_name(&region).map_or(region, str::to_owned);

    let city = capitalize_words(&city);
    let region = capitalize_words(&region);

    match (city.is_empty(), region.is_empty()) {
        (_, true) => city,
        (true, false) => region,
        (false, false) => format!("{city}, {region}"),
    }
}

fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            let Some(first) = chars.next() else {
                return String::new();
            };
            let mut upper = first.to_uppercase();
            // Multi-char uppercase forms (e.g. 'ß' -> "SS") would not survive
            // a second lowercase pass unchanged.
            let head = match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => first,
            };
            std::iter::once(head).chain(chars).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
