//! Compound selector expansion.
//!
//! The upstream search and alert endpoints accept only a flat AND of
//! equality filters per request, expressed as repeated query parameters.
//! A compound selector with OR-branches therefore has to be expanded into
//! one request per branch; callers issue the expanded requests and merge
//! the results, so per-request mechanics never leak out of this module.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::query::is_single_word;

/// OR separator between selector branches: `|`, `,`, or the word `or`.
static OR_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+or\s+|\s*\|\s*|\s*,\s*").unwrap_or_else(|_| unreachable!()));

/// AND separator within a branch: `&` or the word `and`.
static AND_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+and\s+|\s*&\s*").unwrap_or_else(|_| unreachable!()));

/// Split a selector into its OR-branches.
///
/// Empty fragments (e.g. from a leading separator) are dropped.
#[must_use]
pub fn split_disjuncts(selector: &str) -> Vec<&str> {
    OR_SEPARATOR
        .split(selector.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split one OR-branch into its AND-conjuncts.
#[must_use]
pub fn split_conjuncts(disjunct: &str) -> Vec<&str> {
    AND_SEPARATOR
        .split(disjunct.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// True if `selector` is built purely from single-word tags and OR/AND
/// separators.
///
/// Such selectors can be realized entirely through the server-side tag
/// filter via [`expand_uris`]; anything else needs the client-side
/// filter grammar.
#[must_use]
pub fn is_tag_selector(selector: &str) -> bool {
    let disjuncts = split_disjuncts(selector);
    if disjuncts.is_empty() {
        return false;
    }
    disjuncts.iter().all(|disjunct| {
        let conjuncts = split_conjuncts(disjunct);
        !conjuncts.is_empty() && conjuncts.iter().all(|c| is_single_word(c))
    })
}

/// Expand a compound selector into one upstream URI per OR-branch.
///
/// Each URI carries `base_params` plus one `param_name=value` instance per
/// conjunct of the branch; the upstream API ANDs repeated same-named
/// parameters. An empty parameter list yields the bare `base_uri` with no
/// query string.
#[must_use]
pub fn expand_uris(
    base_uri: &str,
    base_params: &[&str],
    param_name: &str,
    selector: &str,
) -> Vec<String> {
    let mut disjuncts = split_disjuncts(selector);
    if disjuncts.is_empty() {
        // No usable selector at all; still issue one request carrying
        // whatever base parameters are present.
        disjuncts.push("");
    }

    disjuncts
        .into_iter()
        .map(|disjunct| {
            let mut params: Vec<String> = base_params.iter().map(ToString::to_string).collect();
            for conjunct in split_conjuncts(disjunct) {
                params.push(format!("{param_name}={conjunct}"));
            }
            if params.is_empty() {
                base_uri.to_string()
            } else {
                format!("{base_uri}?{}", params.join("&"))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn pipe_separator_splits_in_two() {
        let result = split_disjuncts("agreement|A0008_STATIC_ANALYSIS_1_0_0");
        assert_eq!(result, vec!["agreement", "A0008_STATIC_ANALYSIS_1_0_0"]);
    }

    #[test]
    fn builds_two_dashboard_queries() {
        let result = expand_uris(
            "/api/search",
            &["type=dash-db"],
            "tag",
            "agreement|A0008_STATIC_ANALYSIS_1_0_0",
        );
        assert_eq!(
            result,
            vec![
                "/api/search?type=dash-db&tag=agreement",
                "/api/search?type=dash-db&tag=A0008_STATIC_ANALYSIS_1_0_0",
            ]
        );
    }

    #[test_case("a|b" ; "pipe")]
    #[test_case("a, b" ; "comma with space")]
    #[test_case("a or b" ; "word or")]
    #[test_case("a , b" ; "comma padded")]
    #[test_case("a | b" ; "pipe padded")]
    fn or_spellings_are_equivalent(selector: &str) {
        assert_eq!(split_disjuncts(selector), vec!["a", "b"]);
    }

    #[test_case("a&b" ; "ampersand")]
    #[test_case("a & b" ; "ampersand padded")]
    #[test_case("a and b" ; "word and")]
    fn and_spellings_are_equivalent(disjunct: &str) {
        assert_eq!(split_conjuncts(disjunct), vec!["a", "b"]);
    }

    #[test]
    fn single_tag_yields_one_uri() {
        let result = expand_uris("/api/search", &["type=dash-db"], "tag", "payments");
        assert_eq!(result, vec!["/api/search?type=dash-db&tag=payments"]);
    }

    #[test]
    fn conjuncts_repeat_the_parameter_on_one_uri() {
        let result = expand_uris("/api/alerts", &[], "dashboardTag", "a&b or c");
        assert_eq!(
            result,
            vec!["/api/alerts?dashboardTag=a&dashboardTag=b", "/api/alerts?dashboardTag=c"]
        );
    }

    #[test]
    fn empty_selector_and_params_yield_bare_uri() {
        let result = expand_uris("/api/search", &[], "tag", "");
        assert_eq!(result, vec!["/api/search"]);
    }

    #[test]
    fn empty_selector_keeps_base_params() {
        let result = expand_uris("/api/search", &["type=dash-db"], "tag", "  ");
        assert_eq!(result, vec!["/api/search?type=dash-db"]);
    }

    #[test_case("payments", true ; "single word")]
    #[test_case("agreement|A0008_STATIC_ANALYSIS_1_0_0", true ; "two tag branches")]
    #[test_case("a&b or c", true ; "mixed combinators")]
    #[test_case("tag:foo", false ; "grammar atom")]
    #[test_case("(a or b) and c", false ; "parenthesized expression")]
    #[test_case("", false ; "empty")]
    fn tag_selector_detection(selector: &str, expected: bool) {
        assert_eq!(is_tag_selector(selector), expected);
    }
}
