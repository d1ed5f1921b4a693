//! Company-name normalization for registry matching.

/// Normalize a free-text company name for matching.
///
/// Lowercases, maps `&` to "and", turns commas/periods/hyphens into
/// whitespace, trims legal-entity suffix tokens from both ends, and
/// collapses whitespace. A name made entirely of suffix tokens keeps them
/// rather than normalizing to nothing.
#[must_use]
pub fn normalize_company_name(raw: &str, legal_suffixes: &[String]) -> String {
    let lowered = raw.to_lowercase().replace('&', " and ");
    let cleaned: String = lowered
        .chars()
        .map(|c| match c {
            ',' | '.' | '-' => ' ',
            _ => c,
        })
        .collect();

    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let is_suffix = |t: &str| legal_suffixes.iter().any(|s| s == t);

    let mut start = 0;
    let mut end = tokens.len();
    while start < end && is_suffix(tokens[start]) {
        start += 1;
    }
    while end > start && is_suffix(tokens[end - 1]) {
        end -= 1;
    }

    let kept = if start < end {
        &tokens[start..end]
    } else {
        &tokens[..]
    };
    kept.join(" ")
}

/// True when `needle` appears in `haystack` as a whole, contiguous token
/// sequence.
///
/// This is the containment test for matching: "amazon" is contained in
/// "amazon studios", but "acme" is not contained in "acmeoid".
#[must_use]
pub fn contains_token_sequence(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() || haystack.is_empty() {
        return false;
    }
    let hay: Vec<&str> = haystack.split(' ').collect();
    let ndl: Vec<&str> = needle.split(' ').collect();
    if ndl.len() > hay.len() {
        return false;
    }
    hay.windows(ndl.len()).any(|w| w == ndl.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes() -> Vec<String> {
        leadscore_core::RulesConfig::default()
            .resolver
            .legal_suffixes
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(
            normalize_company_name("  Blue   Harbor  Media ", &suffixes()),
            "blue harbor media"
        );
    }

    #[test]
    fn ampersand_becomes_and() {
        assert_eq!(
            normalize_company_name("Procter & Gamble", &suffixes()),
            "procter and gamble"
        );
    }

    #[test]
    fn commas_and_periods_are_stripped() {
        assert_eq!(
            normalize_company_name("Acme, Inc.", &suffixes()),
            "acme"
        );
    }

    #[test]
    fn hyphens_become_spaces() {
        assert_eq!(
            normalize_company_name("Coca-Cola", &suffixes()),
            "coca cola"
        );
    }

    #[test]
    fn leading_and_trailing_suffixes_are_trimmed() {
        assert_eq!(
            normalize_company_name("The Coca-Cola Company", &suffixes()),
            "coca cola"
        );
        assert_eq!(
            normalize_company_name("Acme Corporation", &suffixes()),
            "acme"
        );
    }

    #[test]
    fn suffix_tokens_in_the_middle_are_kept() {
        assert_eq!(
            normalize_company_name("Bank of The West Ltd", &suffixes()),
            "bank of the west"
        );
    }

    #[test]
    fn all_suffix_name_is_left_intact() {
        assert_eq!(
            normalize_company_name("The Company", &suffixes()),
            "the company"
        );
    }

    #[test]
    fn empty_input_normalizes_to_empty() {
        assert_eq!(normalize_company_name("", &suffixes()), "");
        assert_eq!(normalize_company_name("  ,.  ", &suffixes()), "");
    }

    #[test]
    fn token_sequence_containment_matches_whole_tokens() {
        assert!(contains_token_sequence("amazon studios", "amazon"));
        assert!(contains_token_sequence("metro by t mobile", "t mobile"));
    }

    #[test]
    fn token_sequence_containment_rejects_mid_word_overlap() {
        assert!(!contains_token_sequence("acmeoid", "acme"));
        assert!(!contains_token_sequence("scandinavian", "and"));
    }

    #[test]
    fn token_sequence_containment_rejects_non_contiguous() {
        assert!(!contains_token_sequence("amazon web services", "amazon services"));
    }

    #[test]
    fn token_sequence_containment_empty_needle_is_false() {
        assert!(!contains_token_sequence("amazon", ""));
    }
}
