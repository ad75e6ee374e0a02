use crate::domain::constants::{GROUP_PREFIXES, NA};
use crate::domain::models::{AliasesFile, OwnersFile, Role, RoleAssignment};
use crate::fetch::Fetcher;
use crate::services::classify::IdentifierClassifier;

pub struct OwnersFileReader<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> OwnersFileReader<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    pub fn read(&self, url: &str) -> anyhow::Result<OwnersFile> {
        self.fetcher.yaml(url)
    }

    pub fn read_aliases(&self, url: &str) -> anyhow::Result<AliasesFile> {
        self.fetcher.yaml(url)
    }
}

/// Approver and reviewer assignments of one OWNERS file.
///
/// `group`/`subproject` come from the caller when known; `None` or `NA`
/// lets `sig/<name>` and `area/<name>` labels fill them (first match wins).
pub fn owners_assignments(
    owners: &OwnersFile,
    url: &str,
    group: Option<&str>,
    subproject: Option<&str>,
) -> Vec<RoleAssignment> {
    let labels = owners.labels.as_deref().unwrap_or_default();
    let group = known(group)
        .map(str::to_string)
        .or_else(|| label_value(labels, "sig/").map(|s| format!("sig-{}", s)))
        .unwrap_or_else(|| NA.to_string());
    let subproject = known(subproject)
        .map(str::to_string)
        .or_else(|| label_value(labels, "area/").map(str::to_string))
        .unwrap_or_else(|| NA.to_string());

    let sections = [
        (Role::Approver, owners.approvers.as_deref()),
        (Role::Reviewer, owners.reviewers.as_deref()),
    ];
    let mut out = Vec::new();
    for (role, logins) in sections {
        for login in logins.unwrap_or_default() {
            out.push(RoleAssignment {
                login: login.trim().to_string(),
                role,
                group: group.clone(),
                subproject: subproject.clone(),
                source_url: url.to_string(),
            });
        }
    }
    out
}

/// Leadership roster from an aliases file: keys `<group><suffix>` (e.g.
/// `sig-auth-leads`) for SIG/WG groups only. Other aliases are ignored.
pub fn alias_roster(
    aliases: &AliasesFile,
    url: &str,
    role: Role,
    suffix: &str,
) -> Vec<RoleAssignment> {
    let mut out = Vec::new();
    for (key, logins) in &aliases.aliases {
        if !GROUP_PREFIXES.iter().any(|p| key.starts_with(*p)) {
            continue;
        }
        let Some(group) = key.strip_suffix(suffix) else {
            continue;
        };
        for login in logins.as_deref().unwrap_or_default() {
            out.push(RoleAssignment {
                login: login.trim().to_string(),
                role,
                group: group.to_string(),
                subproject: NA.to_string(),
                source_url: url.to_string(),
            });
        }
    }
    out
}

/// Every alias whose name classifies into a known group, with group,
/// subproject and role recovered from the alias name.
pub fn classified_aliases(
    aliases: &AliasesFile,
    url: &str,
    classifier: &IdentifierClassifier,
) -> Vec<RoleAssignment> {
    let mut out = Vec::new();
    for (key, logins) in &aliases.aliases {
        let class = classifier.classify(key);
        if !class.is_governance() {
            continue;
        }
        for login in logins.as_deref().unwrap_or_default() {
            out.push(RoleAssignment {
                login: login.trim().to_string(),
                role: class.role,
                group: class.group.clone(),
                subproject: class.subproject.clone(),
                source_url: url.to_string(),
            });
        }
    }
    out
}

fn known(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != NA)
}

fn label_value<'l>(labels: &'l [String], prefix: &str) -> Option<&'l str> {
    labels
        .iter()
        .find_map(|l| l.trim().strip_prefix(prefix))
        .filter(|v| !v.is_empty())
}
