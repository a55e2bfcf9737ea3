use crate::types::{Profile, SortKey};

/// Strip everything that is not alphanumeric, a space, or a hyphen, then
/// trim the ends. Interior whitespace is filtered, never collapsed.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// URL path segment for a sanitized name: spaces become hyphens,
/// lower-cased.
pub fn search_slug(sanitized: &str) -> String {
    sanitized.replace(' ', "-").to_lowercase()
}

/// Stable sort; `None` keeps the order the profiles arrived in. Worth
/// comparisons use the parsed figure, name comparisons the raw string.
pub fn sort_profiles(
    mut profiles: Vec<Profile>,
    sort_by: Option<SortKey>,
    ascending: bool,
) -> Vec<Profile> {
    let Some(key) = sort_by else {
        return profiles;
    };
    log::info!(
        "Sorting profiles by {} ({})",
        key,
        if ascending { "ascending" } else { "descending" }
    );
    profiles.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::Worth => a.net_worth().cmp(&b.net_worth()),
        };
        if ascending { ordering } else { ordering.reverse() }
    });
    profiles
}

pub(crate) fn format_dollars(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[derive(Debug)]
pub struct ProfileStats {
    pub count: usize,
    pub combined_worth: i64,
}

impl ProfileStats {
    pub fn from_profiles(profiles: &[Profile]) -> ProfileStats {
        ProfileStats {
            count: profiles.len(),
            combined_worth: profiles.iter().map(|p| p.net_worth()).sum(),
        }
    }
}

impl std::fmt::Display for ProfileStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Profiles collected: {}", self.count)?;
        writeln!(
            f,
            "  Combined net worth: {}",
            format_dollars(self.combined_worth)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, worth: &str) -> Profile {
        Profile::new(
            vec![
                (Profile::NAME.to_string(), name.to_string()),
                (Profile::NET_WORTH.to_string(), worth.to_string()),
            ],
            String::new(),
        )
    }

    #[test]
    fn test_sanitize_name_strips_symbols() {
        assert_eq!(
            sanitize_name("Dwayne \"The Rock\" Johnson"),
            "Dwayne The Rock Johnson"
        );
        assert_eq!(sanitize_name("P!nk"), "Pnk");
        assert_eq!(sanitize_name("Jay-Z"), "Jay-Z");
    }

    #[test]
    fn test_sanitize_name_trims_without_collapsing() {
        assert_eq!(sanitize_name("  Oprah  "), "Oprah");
        // Interior runs survive: filtering only, no collapsing.
        assert_eq!(sanitize_name("A.B.  C"), "AB  C");
    }

    #[test]
    fn test_search_slug() {
        assert_eq!(search_slug("Elon Musk"), "elon-musk");
        assert_eq!(search_slug("DEADMAU5"), "deadmau5");
        assert_eq!(search_slug("Jay-Z"), "jay-z");
    }

    #[test]
    fn test_sort_by_worth() {
        let profiles = vec![
            profile("B", "300"),
            profile("A", "100"),
            profile("C", "200"),
        ];

        let ascending = sort_profiles(profiles.clone(), Some(SortKey::Worth), true);
        let names: Vec<_> = ascending.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);

        let descending = sort_profiles(profiles, Some(SortKey::Worth), false);
        let names: Vec<_> = descending.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_descending_is_reversed_ascending_for_distinct_worths() {
        let profiles = vec![
            profile("A", "5"),
            profile("B", "1"),
            profile("C", "9"),
            profile("D", "3"),
        ];

        let mut ascending = sort_profiles(profiles.clone(), Some(SortKey::Worth), true);
        ascending.reverse();
        let descending = sort_profiles(profiles, Some(SortKey::Worth), false);
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_worth_ties_keep_input_order() {
        let profiles = vec![
            profile("first", "100"),
            profile("second", "100"),
            profile("third", "100"),
        ];

        for ascending in [true, false] {
            let sorted = sort_profiles(profiles.clone(), Some(SortKey::Worth), ascending);
            let names: Vec<_> = sorted.iter().map(|p| p.name()).collect();
            assert_eq!(names, vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn test_sort_by_name_is_case_sensitive() {
        let profiles = vec![profile("apple", "1"), profile("Banana", "2")];
        let sorted = sort_profiles(profiles, Some(SortKey::Name), true);
        let names: Vec<_> = sorted.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Banana", "apple"]);
    }

    #[test]
    fn test_no_sort_key_preserves_order() {
        let profiles = vec![
            profile("z", "1"),
            profile("a", "3"),
            profile("m", "2"),
        ];
        let sorted = sort_profiles(profiles.clone(), None, true);
        assert_eq!(sorted, profiles);
    }

    #[test]
    fn test_unparseable_worth_sorts_as_zero() {
        let profiles = vec![profile("A", "garbage"), profile("B", "5")];
        let sorted = sort_profiles(profiles, Some(SortKey::Worth), true);
        let names: Vec<_> = sorted.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0), "$0");
        assert_eq!(format_dollars(950), "$950");
        assert_eq!(format_dollars(1_234_567), "$1,234,567");
        assert_eq!(format_dollars(250_000_000_000), "$250,000,000,000");
        assert_eq!(format_dollars(-5_000), "-$5,000");
    }

    #[test]
    fn test_profile_stats() {
        let profiles = vec![profile("A", "100"), profile("B", "250")];
        let stats = ProfileStats::from_profiles(&profiles);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.combined_worth, 350);
        assert!(stats.to_string().contains("$350"));
    }
}
