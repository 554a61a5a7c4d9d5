//! Path filter predicates.
//!
//! Each filter is a pure function of a path (and the graph it came from).
//! A [`FilterSet`] combines filters with logical AND; an empty set keeps
//! every path.
//!
//! Note that `sink-end` is an exclusion: it rejects paths that end at a
//! Postgres RDS node.

use crate::domain::Node;
use crate::error::{Error, Result};
use crate::store::Graph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A boolean test over a whole path.
pub trait PathPredicate {
    /// Whether `path` should be kept.
    fn matches(&self, path: &[&Node], graph: &Graph) -> bool;
}

/// The built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathFilter {
    /// Path starts at a publicly exposed node
    PublicStart,
    /// Path does not end at a Postgres RDS sink
    SinkEnd,
    /// No node on the path has known vulnerabilities
    NoVulnerability,
}

impl PathFilter {
    /// Every registered filter, in listing order.
    pub const ALL: [PathFilter; 3] = [Self::PublicStart, Self::SinkEnd, Self::NoVulnerability];

    /// Canonical identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::PublicStart => "public-start",
            Self::SinkEnd => "sink-end",
            Self::NoVulnerability => "no-vulnerability",
        }
    }

    /// Short identifier accepted for compatibility with older clients.
    pub fn alias(self) -> &'static str {
        match self {
            Self::PublicStart => "public",
            Self::SinkEnd => "sink",
            Self::NoVulnerability => "vulnerability",
        }
    }

    /// Human-readable description for discovery.
    pub fn description(self) -> &'static str {
        match self {
            Self::PublicStart => "Routes starting at a publicly exposed service",
            Self::SinkEnd => "Routes that do not end at a Postgres RDS sink",
            Self::NoVulnerability => "Routes where no node has known vulnerabilities",
        }
    }

    /// Comma-separated list of canonical identifiers.
    pub fn available_ids() -> String {
        Self::ALL.map(Self::id).join(", ")
    }
}

impl PathPredicate for PathFilter {
    fn matches(&self, path: &[&Node], _graph: &Graph) -> bool {
        match self {
            Self::PublicStart => path.first().is_some_and(|n| n.is_public()),
            Self::SinkEnd => !path.last().is_some_and(|n| n.is_postgres_sink()),
            Self::NoVulnerability => !path.iter().any(|n| n.has_vulnerabilities()),
        }
    }
}

impl fmt::Display for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PathFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.id() == s || f.alias() == s)
            .ok_or_else(|| Error::UnknownFilter {
                name: s.to_string(),
                available: Self::available_ids(),
            })
    }
}

/// Registry entry for filter discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterInfo {
    /// Canonical identifier
    pub id: &'static str,
    /// What the filter keeps
    pub description: &'static str,
}

/// List the registered filters with their descriptions.
pub fn available_filters() -> Vec<FilterInfo> {
    PathFilter::ALL
        .into_iter()
        .map(|f| FilterInfo {
            id: f.id(),
            description: f.description(),
        })
        .collect()
}

/// An AND-combination of filters.
///
/// Stored as a set, so selection order and repetition do not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet(BTreeSet<PathFilter>);

impl FilterSet {
    /// An empty set that keeps every path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct filters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no filter is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected filters in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = PathFilter> + '_ {
        self.0.iter().copied()
    }

    /// Keep only the paths every filter accepts.
    pub fn apply<'n, P>(&self, paths: Vec<P>, graph: &Graph) -> Vec<P>
    where
        P: AsRef<[&'n Node]>,
    {
        if self.is_empty() {
            return paths;
        }
        paths
            .into_iter()
            .filter(|p| self.matches(p.as_ref(), graph))
            .collect()
    }
}

impl PathPredicate for FilterSet {
    fn matches(&self, path: &[&Node], graph: &Graph) -> bool {
        self.0.iter().all(|f| f.matches(path, graph))
    }
}

impl FromIterator<PathFilter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = PathFilter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.iter().map(PathFilter::id).collect();
        write!(f, "{}", ids.join(","))
    }
}

/// Parse a comma-separated filter list.
///
/// Entries are trimmed and empty entries are ignored.
///
/// # Errors
///
/// Returns [`Error::UnknownFilter`] for the first unrecognized entry.
pub fn parse_filter_list(s: &str) -> Result<FilterSet> {
    s.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(PathFilter::from_str)
        .collect()
}
