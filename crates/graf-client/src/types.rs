//! Caller-facing dashboard type.

use serde::Serialize;

use graf_query::QueryTarget;

use crate::decode::SearchHit;

/// A dashboard as returned to callers.
///
/// URLs are always absolute: the source's display domain is prepended
/// before the value leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Dashboard title.
    pub title: String,
    /// Absolute dashboard URL.
    pub url: String,
    /// Containing folder title, if any.
    pub folder_title: Option<String>,
    /// Absolute folder URL, if any.
    pub folder_url: Option<String>,
    /// Dashboard tags.
    pub tags: Vec<String>,
}

impl Dashboard {
    /// Qualify a search hit's relative URLs with the display domain.
    #[must_use]
    pub fn from_hit(hit: SearchHit, domain: &str) -> Self {
        Self {
            title: hit.title,
            url: format!("{domain}{}", hit.url),
            folder_title: hit.folder_title,
            folder_url: hit.folder_url.map(|url| format!("{domain}{url}")),
            tags: hit.tags,
        }
    }
}

impl QueryTarget for Dashboard {
    fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .folder_title
                .as_ref()
                .is_some_and(|folder| folder.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graf_query::ParsedQuery;

    fn hit() -> SearchHit {
        serde_json::from_str(
            r#"{
                "title": "Payments Overview",
                "url": "/d/abc/payments-overview",
                "folderTitle": "Team Payments",
                "folderUrl": "/dashboards/f/xyz/team-payments",
                "tags": ["payments", "team-a"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn urls_are_qualified_with_the_domain() {
        let dashboard = Dashboard::from_hit(hit(), "http://localhost");
        assert_eq!(dashboard.url, "http://localhost/d/abc/payments-overview");
        assert_eq!(
            dashboard.folder_url.as_deref(),
            Some("http://localhost/dashboards/f/xyz/team-payments")
        );
    }

    #[test]
    fn missing_folder_url_stays_absent() {
        let hit: SearchHit =
            serde_json::from_str(r#"{"title": "T", "url": "/d/x"}"#).unwrap();
        let dashboard = Dashboard::from_hit(hit, "http://localhost");
        assert!(dashboard.folder_url.is_none());
    }

    #[test]
    fn queries_evaluate_against_dashboards() {
        let dashboard = Dashboard::from_hit(hit(), "http://localhost");

        assert!(ParsedQuery::parse("tag:payments").unwrap().evaluate(&dashboard));
        assert!(!ParsedQuery::parse("tag:billing").unwrap().evaluate(&dashboard));
        assert!(ParsedQuery::parse("overview").unwrap().evaluate(&dashboard));
        assert!(
            ParsedQuery::parse("(tag:team-a or tag:team-b) and team")
                .unwrap()
                .evaluate(&dashboard)
        );
    }
}
