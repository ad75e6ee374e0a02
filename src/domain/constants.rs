pub const DEFAULT_AFFILIATIONS_SOURCE: &str =
    "https://raw.githubusercontent.com/cncf/devstats/master/github_users.json";
pub const DEFAULT_SIGS_SOURCE: &str =
    "https://raw.githubusercontent.com/kubernetes/community/master/sigs.yaml";
pub const DEFAULT_COMMUNITY_ALIASES_SOURCE: &str =
    "https://raw.githubusercontent.com/kubernetes/community/master/OWNERS_ALIASES";
pub const DEFAULT_CORE_ALIASES_SOURCE: &str =
    "https://raw.githubusercontent.com/kubernetes/kubernetes/master/OWNERS_ALIASES";
pub const DEFAULT_ISTIO_TEAMS_SOURCE: &str =
    "https://raw.githubusercontent.com/istio/community/master/org/teams.yaml";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

pub const DEFAULT_ORG: &str = "kubernetes";

/// Affiliation emitted when neither the dataset nor the live profile knows.
pub const NOT_FOUND: &str = "NotFound";
/// Placeholder the dataset uses for "affiliation unknown".
pub const UNKNOWN_PLACEHOLDER: &str = "?";
/// Group/subproject value for "not known".
pub const NA: &str = "NA";
/// Affiliation history entries carrying this marker are bot accounts.
pub const ROBOT_MARKER: &str = "(Robots)";

/// Governance groups are recognised by these key prefixes in alias rosters.
pub const GROUP_PREFIXES: &[&str] = &["sig-", "wg-"];

/// Substrings that mark a roster entry as a team or role alias rather than a
/// person. Matched case-insensitively anywhere in the login.
///
/// Some report variants also excluded `provider` and `github-admin-team`;
/// those are opt-in through `[filter] extra_excluded_substrings`.
pub const DEFAULT_EXCLUDED_SUBSTRINGS: &[&str] = &[
    "approvers",
    "reviewers",
    "maintainers",
    "leads",
    "admins",
    "sig-",
    "wg-",
    "owners",
    "committee",
    "steering",
    "release",
];

pub const OWNERS_HEADER: &[&str] = &[
    "company",
    "username",
    "status",
    "sig_name",
    "subproject",
    "owners_file",
];
pub const ISTIO_HEADER: &[&str] = &["company", "username", "team"];

/// Hard cap of the code search API, regardless of pagination.
pub const SEARCH_RESULT_CAP: usize = 1000;
pub const SEARCH_PAGE_SIZE: u32 = 100;
