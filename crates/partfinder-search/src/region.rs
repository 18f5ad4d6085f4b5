/// Location name to Google country code (`gl`). Matching is case-insensitive.
const REGIONS: [(&str, &str); 4] = [
    ("Sri Lanka", "lk"),
    ("India", "in"),
    ("USA", "us"),
    ("UK", "gb"),
];

/// Maps a location to its region code, falling back to `default_region`.
#[must_use]
pub fn region_code<'a>(location: &str, default_region: &'a str) -> &'a str {
    let location = location.trim();
    REGIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(location))
        .map_or(default_region, |(_, code)| *code)
}
