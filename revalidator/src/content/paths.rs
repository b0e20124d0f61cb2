//! Mapping from content entries to the site paths that render them.

use std::fmt;

/// The home page. Always invalidated alongside any other path.
pub const HOME_PATH: &str = "/";

/// Content types the site knows how to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    /// Standalone page served at `/{slug}`
    DynamicPage,
    /// The landing page at `/`
    LandingPage,
    /// Blog article served at `/blog/{slug}`
    BlogPost,
    /// Anything else; only the home page is refreshed
    Other(String),
}

impl ContentType {
    pub fn from_id(id: &str) -> Self {
        match id {
            "dynamicPage" => ContentType::DynamicPage,
            "landingPage" => ContentType::LandingPage,
            "blogPost" => ContentType::BlogPost,
            other => ContentType::Other(other.to_string()),
        }
    }

    /// Site path displaying an entry of this type.
    pub fn path_for(&self, slug: Option<&str>) -> String {
        match (self, slug) {
            (ContentType::DynamicPage, Some(slug)) => format!("/{}", slug),
            (ContentType::BlogPost, Some(slug)) => format!("/blog/{}", slug),
            (ContentType::BlogPost, None) => "/blog".to_string(),
            _ => HOME_PATH.to_string(),
        }
    }
}

/// Resolve the path to invalidate for a changed entry.
///
/// Total: unknown content types fall back to the home page.
pub fn resolve_path(content_type: &str, slug: Option<&str>) -> String {
    ContentType::from_id(content_type).path_for(slug)
}

/// A resolved path, produced and consumed within one webhook request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevalidationTarget {
    pub path: String,
}

impl RevalidationTarget {
    pub fn resolve(content_type: Option<&str>, slug: Option<&str>) -> Self {
        Self {
            path: resolve_path(content_type.unwrap_or_default(), slug),
        }
    }

    /// Paths to invalidate, in order: the target itself, then the home page.
    pub fn paths(&self) -> Vec<&str> {
        if self.path == HOME_PATH {
            vec![HOME_PATH]
        } else {
            vec![self.path.as_str(), HOME_PATH]
        }
    }
}

impl fmt::Display for RevalidationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_page() {
        assert_eq!(resolve_path("dynamicPage", Some("pricing")), "/pricing");
        assert_eq!(resolve_path("dynamicPage", None), "/");
    }

    #[test]
    fn test_landing_page_ignores_slug() {
        assert_eq!(resolve_path("landingPage", Some("anything")), "/");
        assert_eq!(resolve_path("landingPage", None), "/");
    }

    #[test]
    fn test_blog_post() {
        assert_eq!(resolve_path("blogPost", Some("my-post")), "/blog/my-post");
        assert_eq!(resolve_path("blogPost", None), "/blog");
    }

    #[test]
    fn test_unknown_content_type_falls_back_home() {
        assert_eq!(resolve_path("legalPage", Some("privacy")), "/");
        assert_eq!(resolve_path("", None), "/");
    }

    #[test]
    fn test_content_type_ids_are_case_sensitive() {
        assert_eq!(
            ContentType::from_id("BlogPost"),
            ContentType::Other("BlogPost".to_string())
        );
    }

    #[test]
    fn test_target_without_content_type() {
        let target = RevalidationTarget::resolve(None, Some("ignored"));
        assert_eq!(target.path, "/");
    }

    #[test]
    fn test_target_paths_include_home() {
        let target = RevalidationTarget::resolve(Some("blogPost"), Some("hello"));
        assert_eq!(target.paths(), vec!["/blog/hello", "/"]);

        let home = RevalidationTarget::resolve(Some("landingPage"), None);
        assert_eq!(home.paths(), vec!["/"]);
    }
}
