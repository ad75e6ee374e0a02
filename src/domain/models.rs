use crate::domain::constants::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Approver,
    Reviewer,
    Maintainer,
    Lead,
    Unknown,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Approver => "approver",
            Role::Reviewer => "reviewer",
            Role::Maintainer => "maintainer",
            Role::Lead => "lead",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (person, role, context) tuple destined for a report row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleAssignment {
    pub login: String,
    pub role: Role,
    pub group: String,
    pub subproject: String,
    pub source_url: String,
}

/// OWNERS-style descriptor. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct OwnersFile {
    #[serde(default)]
    pub approvers: Option<Vec<String>>,
    #[serde(default)]
    pub reviewers: Option<Vec<String>>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// ALIASES-style descriptor: alias name -> member logins.
/// Empty aliases (`sig-foo-leads:` with no list) decode as `None`.
#[derive(Debug, Default, Deserialize)]
pub struct AliasesFile {
    #[serde(default)]
    pub aliases: BTreeMap<String, Option<Vec<String>>>,
}

/// Governance registry (`sigs.yaml`).
#[derive(Debug, Default, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub sigs: Vec<Group>,
    #[serde(default)]
    pub workinggroups: Vec<Group>,
    #[serde(default)]
    pub committees: Vec<Group>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Group {
    pub dir: String,
    pub name: String,
    #[serde(default)]
    pub leadership: Leadership,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub subprojects: Vec<Subproject>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Leadership {
    #[serde(default)]
    pub chairs: Vec<Leader>,
    #[serde(default)]
    pub tech_leads: Vec<Leader>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Leader {
    pub github: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Meeting {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub tz: String,
    #[serde(default)]
    pub frequency: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Subproject {
    pub name: String,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

/// Istio `org/teams.yaml`: teams nest arbitrarily deep under `teams:`.
#[derive(Debug, Default, Deserialize)]
pub struct TeamsFile {
    #[serde(default)]
    pub teams: BTreeMap<String, Team>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub teams: BTreeMap<String, Team>,
}

/// Election roster (`voters.yaml`).
#[derive(Debug, Default, Deserialize)]
pub struct VotersFile {
    #[serde(default)]
    pub eligible_voters: Vec<String>,
}

/// One record of the affiliation dataset.
#[derive(Debug, Deserialize)]
pub struct AffiliationRecord {
    pub login: String,
    #[serde(default)]
    pub affiliation: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEmail {
    pub email: String,
    /// RFC 3339 timestamp as returned by the API; sorts lexically.
    pub date: String,
    pub repo: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CodeSearchPage {
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub items: Vec<CodeSearchItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CodeSearchItem {
    pub path: String,
    pub repository: SearchRepository,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchRepository {
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct OwnersRow<'a> {
    pub company: &'a str,
    pub username: &'a str,
    pub status: &'a str,
    pub sig_name: &'a str,
    pub subproject: &'a str,
    pub owners_file: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TeamRow<'a> {
    pub company: &'a str,
    pub username: &'a str,
    pub team: &'a str,
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct RunSummary {
    pub output: String,
    pub rows_written: usize,
    pub rows_excluded: usize,
    pub descriptors_read: usize,
    pub descriptors_failed: usize,
}

#[derive(Debug, Serialize)]
pub struct EmailSummary {
    pub output: String,
    pub voters: usize,
    pub found: usize,
}

#[derive(Debug, Serialize)]
pub struct FoundFiles {
    pub query: String,
    pub total_count: usize,
    pub output: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CaseMismatch {
    pub canonical: String,
    pub listed: String,
}

#[derive(Debug, Serialize)]
pub struct GroupName {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GroupLeaders {
    pub kind: String,
    pub name: String,
    pub chairs: Vec<Leader>,
}

#[derive(Debug, Serialize)]
pub struct GroupMeetings {
    pub kind: String,
    pub name: String,
    pub meetings: Vec<Meeting>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub token_file: String,
    pub output_dir: String,
    pub api_base: String,
    pub live_lookup: bool,
    pub http_timeout_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            token_file: "gh_key".to_string(),
            output_dir: "output".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            live_lookup: true,
            http_timeout_ms: 20_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub affiliations: String,
    pub sigs: String,
    pub community_aliases: String,
    /// Empty string disables the core-aliases step.
    pub core_aliases: String,
    pub istio_teams: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            affiliations: DEFAULT_AFFILIATIONS_SOURCE.to_string(),
            sigs: DEFAULT_SIGS_SOURCE.to_string(),
            community_aliases: DEFAULT_COMMUNITY_ALIASES_SOURCE.to_string(),
            core_aliases: DEFAULT_CORE_ALIASES_SOURCE.to_string(),
            istio_teams: DEFAULT_ISTIO_TEAMS_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FilterConfig {
    /// Replaces the built-in exclusion list when set.
    #[serde(default)]
    pub excluded_substrings: Option<Vec<String>>,
    #[serde(default)]
    pub extra_excluded_substrings: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub item_delay_ms: u64,
    pub page_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            item_delay_ms: 1000,
            page_delay_ms: 10_000,
        }
    }
}
