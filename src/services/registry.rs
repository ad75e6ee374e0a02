use crate::domain::models::{Group, GroupLeaders, GroupMeetings, Registry};

/// (kind, groups) in listing order: SIGs, then working groups.
fn kinds(registry: &Registry) -> [(&'static str, &[Group]); 2] {
    [
        ("sig", registry.sigs.as_slice()),
        ("wg", registry.workinggroups.as_slice()),
    ]
}

/// Directory names (`sig-auth`, `wg-batch`) used as group prefixes when
/// classifying alias names.
pub fn known_groups(registry: &Registry) -> Vec<String> {
    kinds(registry)
        .iter()
        .flat_map(|(_, groups)| groups.iter().map(|g| g.dir.clone()))
        .filter(|d| !d.is_empty())
        .collect()
}

pub fn group_names(registry: &Registry) -> Vec<(String, String)> {
    kinds(registry)
        .iter()
        .flat_map(|(kind, groups)| groups.iter().map(move |g| (kind.to_string(), g.name.clone())))
        .collect()
}

pub fn leaders(registry: &Registry) -> Vec<GroupLeaders> {
    kinds(registry)
        .iter()
        .flat_map(|(kind, groups)| {
            groups.iter().map(move |g| GroupLeaders {
                kind: kind.to_string(),
                name: g.name.clone(),
                chairs: g.leadership.chairs.clone(),
            })
        })
        .collect()
}

/// Group-level meetings followed by those of each subproject.
pub fn meetings(registry: &Registry) -> Vec<GroupMeetings> {
    kinds(registry)
        .iter()
        .flat_map(|(kind, groups)| {
            groups.iter().map(move |g| GroupMeetings {
                kind: kind.to_string(),
                name: g.name.clone(),
                meetings: g
                    .meetings
                    .iter()
                    .chain(g.subprojects.iter().flat_map(|s| s.meetings.iter()))
                    .cloned()
                    .collect(),
            })
        })
        .collect()
}
