/// Cities offered while typing a search.
pub const POPULAR_CITIES: &[&str] = &[
    "New York",
    "London",
    "Tokyo",
    "Paris",
    "Sydney",
    "Dubai",
    "Singapore",
    "Rome",
    "Berlin",
    "Mumbai",
];

pub const MAX_SUGGESTIONS: usize = 5;

/// Popular cities containing `query`, case-insensitive, at most [`MAX_SUGGESTIONS`].
pub fn suggest(query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();

    POPULAR_CITIES
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_suggests_nothing() {
        assert!(suggest("").is_empty());
    }

    #[test]
    fn matches_substrings_ignoring_case() {
        assert_eq!(suggest("LON"), vec!["London"]);
        assert_eq!(suggest("ney"), vec!["Sydney"]);
    }

    #[test]
    fn keeps_list_order() {
        assert_eq!(suggest("o"), vec!["New York", "London", "Tokyo", "Singapore", "Rome"]);
        assert!(suggest("xyz").is_empty());
    }
}
