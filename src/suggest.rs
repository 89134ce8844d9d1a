//! "Did you mean" support based on Levenshtein distance.

/// Maximum edit distance for a candidate to be offered as a suggestion.
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Levenshtein distance between two strings, counted in chars.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

/// The candidate closest to `input`, compared case-insensitively, if it is
/// within `max_distance`. Ties go to the earlier candidate.
pub fn closest_match<'a>(input: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    let input = input.to_lowercase();
    let mut best: Option<(&'a str, usize)> = None;
    for &candidate in candidates {
        let d = distance(&input, &candidate.to_lowercase());
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((candidate, d));
        }
    }
    best.filter(|(_, d)| *d <= max_distance).map(|(c, _)| c)
}

/// [`closest_match`] with [`DEFAULT_MAX_DISTANCE`].
pub fn suggest<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    closest_match(input, candidates, DEFAULT_MAX_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("kitten", "sitting", 3)]
    #[case("json", "jsn", 1)]
    #[case("x", "x", 0)]
    #[case("", "abc", 3)]
    #[case("abc", "", 3)]
    #[case("flat", "falt", 2)]
    fn distances(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        assert_eq!(distance(a, b), expected);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance("compile", "runtime"), distance("runtime", "compile"));
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(distance("café", "cafe"), 1);
    }

    #[test]
    fn closest_within_threshold() {
        assert_eq!(closest_match("jsn", &["json", "yaml", "html"], 3), Some("json"));
    }

    #[test]
    fn nothing_within_threshold() {
        assert_eq!(closest_match("zzz", &["json", "yaml", "html"], 1), None);
    }

    #[test]
    fn empty_candidates() {
        assert_eq!(closest_match("json", &[], 3), None);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(closest_match("JSN", &["json", "yaml"], 3), Some("json"));
        assert_eq!(closest_match("alwyas", &["auto", "always", "never"], 3), Some("always"));
    }

    #[test]
    fn tie_goes_to_first_declared_candidate() {
        assert_eq!(closest_match("ab", &["ax", "xb"], 3), Some("ax"));
        assert_eq!(closest_match("ab", &["xb", "ax"], 3), Some("xb"));
    }

    #[test]
    fn default_threshold() {
        assert_eq!(suggest("htm", &["json", "yaml", "html", "xml"]), Some("html"));
        assert_eq!(suggest("markdown", &["json", "yaml", "html", "xml"]), None);
    }
}
