//! The page address the session keeps in sync with the plan.

use std::fmt;

use url::Url;

use crate::error::{PlannerError, Result};

/// Current URL plus a count of navigation-history entries.
///
/// [`Location::replace_param`] rewrites the query in place, like a history
/// replace; [`Location::navigate`] adds a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
    history_len: usize,
}

impl Location {
    /// Parses an absolute URL as the initial location.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| {
            PlannerError::invalid_input("location").with_reason(format!("'{input}': {e}"))
        })?;
        Ok(Self {
            url,
            history_len: 1,
        })
    }

    /// The festival page under `base`, e.g. `https://festplan.app/festivals/<id>`.
    pub fn for_festival(base: &str, festival_id: &str) -> Result<Self> {
        let mut location = Self::parse(base)?;
        location
            .url
            .path_segments_mut()
            .map_err(|_| {
                PlannerError::invalid_input("location")
                    .with_reason(format!("'{base}' cannot be a base URL"))
            })?
            .pop_if_empty()
            .extend(["festivals", festival_id]);
        Ok(location)
    }

    /// Decoded value of the first query parameter called `name`.
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Sets (`Some`) or removes (`None`) a query parameter without adding a
    /// history entry. An existing parameter keeps its position; duplicates
    /// of it are dropped.
    pub fn replace_param(&mut self, name: &str, value: Option<&str>) {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut replaced = false;
        for (key, existing) in self.url.query_pairs() {
            if key != name {
                pairs.push((key.into_owned(), existing.into_owned()));
            } else if !replaced {
                replaced = true;
                if let Some(value) = value {
                    pairs.push((name.to_string(), value.to_string()));
                }
            }
        }
        if !replaced {
            if let Some(value) = value {
                pairs.push((name.to_string(), value.to_string()));
            }
        }

        if pairs.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }

    /// Moves to a new URL, adding a history entry.
    pub fn navigate(&mut self, to: Location) {
        self.url = to.url;
        self.history_len += 1;
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_festival_builds_route() {
        let location = Location::for_festival("https://festplan.app", "doom-valley-2026").unwrap();
        assert_eq!(location.as_str(), "https://festplan.app/festivals/doom-valley-2026");

        let location = Location::for_festival("https://example.com/app/", "x").unwrap();
        assert_eq!(location.as_str(), "https://example.com/app/festivals/x");
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(Location::parse("/festivals/x?plan=a").is_err());
    }

    #[test]
    fn test_param_is_decoded() {
        let location = Location::parse("https://festplan.app/f?view=list&plan=s1%2Cs2").unwrap();
        assert_eq!(location.param("plan").as_deref(), Some("s1,s2"));
        assert_eq!(location.param("view").as_deref(), Some("list"));
        assert!(location.param("missing").is_none());
    }

    #[test]
    fn test_replace_param_keeps_other_params_and_history() {
        let mut location = Location::parse("https://festplan.app/f?view=list&plan=b&day=sat").unwrap();
        location.replace_param("plan", Some("a,b"));
        assert_eq!(location.param("plan").as_deref(), Some("a,b"));
        assert_eq!(location.param("view").as_deref(), Some("list"));
        assert_eq!(location.param("day").as_deref(), Some("sat"));
        assert_eq!(location.history_len(), 1);
    }

    #[test]
    fn test_replace_param_appends_and_removes() {
        let mut location = Location::parse("https://festplan.app/f").unwrap();
        location.replace_param("plan", Some("a"));
        assert_eq!(location.param("plan").as_deref(), Some("a"));

        location.replace_param("plan", None);
        assert!(location.param("plan").is_none());
        assert_eq!(location.as_str(), "https://festplan.app/f");
    }

    #[test]
    fn test_navigate_adds_history() {
        let mut location = Location::parse("https://festplan.app/f").unwrap();
        location.navigate(Location::parse("https://festplan.app/f?plan=x").unwrap());
        assert_eq!(location.history_len(), 2);
        assert_eq!(location.param("plan").as_deref(), Some("x"));
    }
}
