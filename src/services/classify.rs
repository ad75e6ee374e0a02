use crate::domain::constants::NA;
use crate::domain::models::Role;

/// Suffix -> role, longest suffix first.
const ROLE_SUFFIXES: &[(&str, Role)] = &[
    ("maintainers", Role::Maintainer),
    ("approvers", Role::Approver),
    ("reviewers", Role::Reviewer),
    ("maintainer", Role::Maintainer),
];

/// Aliases that do not follow `<group>-<subproject>-<role>`.
const SPECIAL_PREFIXES: &[(&str, &str, &str)] =
    &[("release-engineering", "sig-release", "release-engineering")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub group: String,
    pub subproject: String,
    pub role: Role,
}

impl Classification {
    /// Aliases without a known group are not governance entries.
    pub fn is_governance(&self) -> bool {
        self.group != NA
    }
}

/// Splits composite alias names such as `sig-auth-audit-approvers` into
/// group, subproject and role.
pub struct IdentifierClassifier {
    groups: Vec<String>,
}

impl IdentifierClassifier {
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: Vec<String> = groups.into_iter().map(Into::into).collect();
        // stable: equal lengths keep list order
        groups.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { groups }
    }

    pub fn classify(&self, alias: &str) -> Classification {
        let alias = alias.trim();
        let (role, suffix_len) = match_role(alias);
        let body_end = alias.len() - suffix_len;

        for (prefix, group, subproject) in SPECIAL_PREFIXES {
            if alias.starts_with(*prefix) {
                return Classification {
                    group: group.to_string(),
                    subproject: subproject.to_string(),
                    role,
                };
            }
        }

        let Some(group) = self.match_group(alias) else {
            return Classification {
                group: NA.to_string(),
                subproject: NA.to_string(),
                role,
            };
        };

        let subproject = if group.len() < body_end {
            alias[group.len()..body_end].trim_matches('-')
        } else {
            ""
        };
        Classification {
            group: group.to_string(),
            subproject: if subproject.is_empty() {
                NA.to_string()
            } else {
                subproject.to_string()
            },
            role,
        }
    }

    fn match_group(&self, alias: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| {
                alias
                    .strip_prefix(g.as_str())
                    .map(|rest| rest.is_empty() || rest.starts_with('-'))
                    .unwrap_or(false)
            })
            .map(String::as_str)
    }
}

fn match_role(alias: &str) -> (Role, usize) {
    ROLE_SUFFIXES
        .iter()
        .find(|(suffix, _)| alias.ends_with(*suffix))
        .map(|(suffix, role)| (*role, suffix.len()))
        .unwrap_or((Role::Unknown, 0))
}
