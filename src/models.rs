use crate::error::{Result, TrendingError};
use crate::types::{Commit, Contributor, Event, Issue, Label, Repository};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An `owner/name` repository identifier as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId(String);

impl RepositoryId {
    /// Only emptiness is rejected; anything else is left for the API to judge.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TrendingError::InvalidRepoId(raw.to_string()));
        }
        Ok(RepositoryId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five resources fetched after the primary repository record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentResource {
    Events,
    Contributors,
    Issues,
    Labels,
    Commits,
}

impl DependentResource {
    pub const ALL: [DependentResource; 5] = [
        DependentResource::Events,
        DependentResource::Contributors,
        DependentResource::Issues,
        DependentResource::Labels,
        DependentResource::Commits,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependentResource::Events => "events",
            DependentResource::Contributors => "contributors",
            DependentResource::Issues => "issues",
            DependentResource::Labels => "labels",
            DependentResource::Commits => "commits",
        }
    }

    /// Resolve this resource's URL from the primary record.
    ///
    /// Events and contributors come straight from the record; the rest are
    /// sub-paths of its canonical `url`.
    pub fn url_for(&self, repo: &Repository) -> String {
        match self {
            DependentResource::Events => repo.events_url.clone(),
            DependentResource::Contributors => repo.contributors_url.clone(),
            DependentResource::Issues
            | DependentResource::Labels
            | DependentResource::Commits => format!("{}/{}", repo.url, self.as_str()),
        }
    }
}

impl fmt::Display for DependentResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded dependent response, tagged with the role it fills.
#[derive(Debug, Clone)]
pub enum DependentPayload {
    Events(Vec<Event>),
    Contributors(Vec<Contributor>),
    Issues(Vec<Issue>),
    Labels(Vec<Label>),
    Commits(Vec<Commit>),
}

/// Primary record plus every dependent resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryDetail {
    pub detail: Repository,
    pub events: Vec<Event>,
    pub contributors: Vec<Contributor>,
    pub issues: Vec<Issue>,
    pub labels: Vec<Label>,
    pub commits: Vec<Commit>,
}

impl RepositoryDetail {
    /// Merge payloads by role. Arrival order is irrelevant, but every role
    /// must be present or no composite is built.
    pub fn compose(
        detail: Repository,
        payloads: impl IntoIterator<Item = DependentPayload>,
    ) -> Result<Self> {
        let mut events = None;
        let mut contributors = None;
        let mut issues = None;
        let mut labels = None;
        let mut commits = None;

        for payload in payloads {
            match payload {
                DependentPayload::Events(v) => events = Some(v),
                DependentPayload::Contributors(v) => contributors = Some(v),
                DependentPayload::Issues(v) => issues = Some(v),
                DependentPayload::Labels(v) => labels = Some(v),
                DependentPayload::Commits(v) => commits = Some(v),
            }
        }

        Ok(RepositoryDetail {
            detail,
            events: events.ok_or(TrendingError::MissingDependent(DependentResource::Events))?,
            contributors: contributors
                .ok_or(TrendingError::MissingDependent(DependentResource::Contributors))?,
            issues: issues.ok_or(TrendingError::MissingDependent(DependentResource::Issues))?,
            labels: labels.ok_or(TrendingError::MissingDependent(DependentResource::Labels))?,
            commits: commits.ok_or(TrendingError::MissingDependent(DependentResource::Commits))?,
        })
    }
}

/// Trailing creation-date window used by the trending search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub cutoff: NaiveDate,
}

impl SearchWindow {
    pub const DAYS: u64 = 7;

    pub fn ending_on(today: NaiveDate) -> Self {
        // Only fails at the very start of the calendar range chrono supports
        let cutoff = today.checked_sub_days(Days::new(Self::DAYS)).unwrap_or(NaiveDate::MIN);
        SearchWindow { cutoff }
    }

    /// `YYYY-MM-DD`, zero padded.
    pub fn cutoff_string(&self) -> String {
        self.cutoff.format("%Y-%m-%d").to_string()
    }

    /// Search qualifier selecting repositories created after the cutoff.
    pub fn query(&self) -> String {
        format!("created:>{}", self.cutoff_string())
    }
}

/// Rate limit budget reported by the last response
#[derive(Debug, Clone)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}
