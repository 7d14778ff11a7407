use std::fmt;

use serde::Serialize;

use super::NavigationError;

/// A parsed navigation target: `path?query#fragment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Location {
    /// The root location `/`.
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
            fragment: None,
        }
    }

    /// Parse a target string. The path must be absolute and free of
    /// whitespace or control characters.
    pub fn parse(target: &str) -> Result<Self, NavigationError> {
        let (rest, fragment) = match target.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (target, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        if !path.starts_with('/') {
            return Err(NavigationError::InvalidPath {
                path: target.to_string(),
                reason: "path must start with '/'",
            });
        }
        if target.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(NavigationError::InvalidPath {
                path: target.to_string(),
                reason: "path contains whitespace or control characters",
            });
        }

        Ok(Self {
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()),
            fragment: fragment.filter(|f| !f.is_empty()),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_path() {
        let loc = Location::parse("/data_once").unwrap();
        assert_eq!(loc.path, "/data_once");
        assert_eq!(loc.query, None);
        assert_eq!(loc.fragment, None);
    }

    #[test]
    fn parses_query_and_fragment() {
        let loc = Location::parse("/items?page=2#top").unwrap();
        assert_eq!(loc.path, "/items");
        assert_eq!(loc.query.as_deref(), Some("page=2"));
        assert_eq!(loc.fragment.as_deref(), Some("top"));
        assert_eq!(loc.to_string(), "/items?page=2#top");
    }

    #[test]
    fn fragment_may_contain_question_mark() {
        let loc = Location::parse("/a#b?c").unwrap();
        assert_eq!(loc.path, "/a");
        assert_eq!(loc.query, None);
        assert_eq!(loc.fragment.as_deref(), Some("b?c"));
    }

    #[test]
    fn empty_query_is_dropped() {
        let loc = Location::parse("/a?").unwrap();
        assert_eq!(loc, Location::parse("/a").unwrap());
    }

    #[test]
    fn rejects_relative_path() {
        assert!(matches!(
            Location::parse("data_once"),
            Err(NavigationError::InvalidPath { .. })
        ));
    }

    #[test]
    fn rejects_whitespace() {
        assert!(Location::parse("/data once").is_err());
        assert!(Location::parse("/data\n").is_err());
    }
}
