//! Route descriptors and alternate links.

use serde::Serialize;

/// A same-content page's path in another language.
///
/// Every route carries one alternate link per configured language,
/// including its own language pointing at its own path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    /// Concrete path in the alternate language.
    pub path: String,
    /// Language code of the alternate path.
    pub lang: String,
}

/// Context object handed to the rendering framework with each route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteContext {
    /// Language this route renders in.
    pub lang: String,
    /// Translation namespaces required by the page.
    pub namespaces: Vec<String>,
    /// Cross-language equivalents of this route.
    #[serde(rename = "alternateLinks")]
    pub alternate_links: Vec<AlternateLink>,
    /// Robots directive; omitted from the serialized context when absent.
    #[serde(rename = "metaRobots", skip_serializing_if = "Option::is_none")]
    pub meta_robots: Option<String>,
}

/// One concrete routable page (language × tree node).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// Concrete URL path (e.g. `/de/ueber-uns/mannschaft`).
    pub path: String,
    /// Renderable component reference.
    pub component: String,
    /// Router wildcard pattern; attached only in preview builds, omitted
    /// from serialized output otherwise.
    #[serde(rename = "matchPath", skip_serializing_if = "Option::is_none")]
    pub match_path: Option<String>,
    /// Context passed to the rendering framework.
    pub context: RouteContext,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn route(meta_robots: Option<&str>, match_path: Option<&str>) -> RouteDescriptor {
        RouteDescriptor {
            path: "/en/about-us".to_owned(),
            component: "src/pages/About.tsx".to_owned(),
            match_path: match_path.map(str::to_owned),
            context: RouteContext {
                lang: "en".to_owned(),
                namespaces: vec!["common".to_owned(), "about".to_owned()],
                alternate_links: vec![
                    AlternateLink {
                        path: "/en/about-us".to_owned(),
                        lang: "en".to_owned(),
                    },
                    AlternateLink {
                        path: "/de/ueber-uns".to_owned(),
                        lang: "de".to_owned(),
                    },
                ],
                meta_robots: meta_robots.map(str::to_owned),
            },
        }
    }

    #[test]
    fn test_serialized_context_omits_absent_properties() {
        let json = serde_json::to_value(route(None, None)).unwrap();

        assert!(json.get("matchPath").is_none());
        assert!(json["context"].get("metaRobots").is_none());
    }

    #[test]
    fn test_serialized_context_keeps_present_properties() {
        let json = serde_json::to_value(route(Some("noindex"), Some("/*"))).unwrap();

        assert_eq!(json["matchPath"], "/*");
        assert_eq!(json["context"]["metaRobots"], "noindex");
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(route(None, None)).unwrap();

        assert_eq!(json["context"]["lang"], "en");
        assert_eq!(
            json["context"]["alternateLinks"][1],
            serde_json::json!({"path": "/de/ueber-uns", "lang": "de"})
        );
    }
}
