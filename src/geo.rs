// src/geo.rs
//
// Country name -> approximate centroid, for placing markers on the world
// map canvas. Lookup is case-insensitive and knows the short forms that
// show up in news source names ("UK", "US", ...). Names the table does not
// recognize return None and are simply not drawn.

/// Canonical lowercase country name -> (latitude, longitude).
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("argentina", -34.6, -64.0),
    ("australia", -25.3, 133.8),
    ("austria", 47.5, 14.6),
    ("bangladesh", 23.7, 90.4),
    ("belgium", 50.6, 4.7),
    ("brazil", -10.8, -53.1),
    ("canada", 56.1, -106.3),
    ("chile", -35.7, -71.5),
    ("china", 35.9, 104.2),
    ("colombia", 4.6, -74.1),
    ("czechia", 49.8, 15.5),
    ("denmark", 56.0, 10.0),
    ("egypt", 26.8, 30.8),
    ("finland", 64.0, 26.0),
    ("france", 46.6, 2.5),
    ("germany", 51.2, 10.4),
    ("greece", 39.1, 22.9),
    ("hungary", 47.2, 19.4),
    ("india", 21.1, 78.0),
    ("indonesia", -2.5, 118.0),
    ("iran", 32.4, 53.7),
    ("iraq", 33.2, 43.7),
    ("ireland", 53.4, -8.2),
    ("israel", 31.0, 34.9),
    ("italy", 42.8, 12.8),
    ("japan", 36.2, 138.3),
    ("kenya", -0.0, 37.9),
    ("malaysia", 4.2, 102.0),
    ("mexico", 23.6, -102.6),
    ("netherlands", 52.1, 5.3),
    ("new zealand", -41.8, 172.8),
    ("nigeria", 9.1, 8.7),
    ("north korea", 40.3, 127.4),
    ("norway", 61.2, 9.1),
    ("pakistan", 30.4, 69.4),
    ("peru", -9.2, -75.0),
    ("philippines", 12.9, 121.8),
    ("poland", 52.1, 19.4),
    ("portugal", 39.6, -8.0),
    ("qatar", 25.3, 51.2),
    ("romania", 45.9, 24.9),
    ("russia", 61.5, 105.3),
    ("saudi arabia", 24.0, 45.1),
    ("singapore", 1.35, 103.8),
    ("south africa", -30.6, 22.9),
    ("south korea", 35.9, 127.8),
    ("spain", 40.5, -3.7),
    ("sweden", 62.2, 17.6),
    ("switzerland", 46.8, 8.2),
    ("taiwan", 23.7, 121.0),
    ("thailand", 15.1, 101.0),
    ("turkey", 38.9, 35.2),
    ("ukraine", 48.4, 31.2),
    ("united arab emirates", 23.4, 53.8),
    ("united kingdom", 54.0, -2.9),
    ("united states", 39.8, -98.6),
    ("vietnam", 14.1, 108.3),
];

/// Short and informal names seen in source names, mapped to canonical ones.
const ALIASES: &[(&str, &str)] = &[
    ("america", "united states"),
    ("britain", "united kingdom"),
    ("england", "united kingdom"),
    ("great britain", "united kingdom"),
    ("holland", "netherlands"),
    ("korea", "south korea"),
    ("u.k.", "united kingdom"),
    ("u.s.", "united states"),
    ("u.s.a.", "united states"),
    ("uae", "united arab emirates"),
    ("uk", "united kingdom"),
    ("us", "united states"),
    ("usa", "united states"),
];

/// Look a country name up; returns `(latitude, longitude)` when recognized.
pub fn centroid(name: &str) -> Option<(f64, f64)> {
    let key = name.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(&key);

    CENTROIDS
        .iter()
        .find(|(country, _, _)| *country == canonical)
        .map(|(_, lat, lon)| (*lat, *lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries_resolve() {
        assert!(centroid("India").is_some());
        assert!(centroid("united states").is_some());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(centroid("JAPAN"), centroid("japan"));
    }

    #[test]
    fn short_forms_resolve_to_the_same_place() {
        assert_eq!(centroid("UK"), centroid("United Kingdom"));
        assert_eq!(centroid("US"), centroid("United States"));
    }

    #[test]
    fn unrecognized_names_are_omitted() {
        // heuristic "countries" that are really source-name fragments
        assert_eq!(centroid("Reuters"), None);
        assert_eq!(centroid("Verge"), None);
        assert_eq!(centroid(""), None);
    }
}
