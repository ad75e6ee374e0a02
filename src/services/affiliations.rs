use crate::domain::constants::ROBOT_MARKER;
use crate::domain::models::AffiliationRecord;
use crate::error::ReportError;
use crate::fetch::Fetcher;
use std::collections::HashMap;
use tracing::info;

/// Lowercased login -> current affiliation, built from the static dataset.
#[derive(Debug, Default)]
pub struct AffiliationTable {
    entries: HashMap<String, String>,
}

impl AffiliationTable {
    /// Loads the dataset. Any failure here aborts the run.
    pub fn load(fetcher: &Fetcher, source: &str) -> anyhow::Result<Self> {
        info!(source, "loading affiliation dataset");
        let records: Vec<AffiliationRecord> =
            fetcher.json(source).map_err(|e| ReportError::Dataset {
                source_ref: source.to_string(),
                reason: e.to_string(),
            })?;
        let table = Self::from_records(records);
        info!(entries = table.len(), "affiliation dataset loaded");
        Ok(table)
    }

    pub fn from_records(records: impl IntoIterator<Item = AffiliationRecord>) -> Self {
        let mut entries = HashMap::new();
        for record in records {
            let Some(affiliation) = record.affiliation else {
                continue;
            };
            if affiliation.contains(ROBOT_MARKER) {
                continue;
            }
            entries.insert(record.login.to_lowercase(), current_affiliation(&affiliation));
        }
        Self { entries }
    }

    pub fn get(&self, login: &str) -> Option<&str> {
        self.entries.get(&login.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Histories are comma separated, oldest first; the last segment is current.
fn current_affiliation(history: &str) -> String {
    match history.rsplit_once(',') {
        Some((_, last)) => last.trim().to_string(),
        None => history.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::AffiliationTable;
    use crate::domain::models::AffiliationRecord;

    fn record(login: &str, affiliation: Option<&str>) -> AffiliationRecord {
        AffiliationRecord {
            login: login.to_string(),
            affiliation: affiliation.map(str::to_string),
        }
    }

    #[test]
    fn keeps_only_current_affiliation_from_history() {
        let table = AffiliationTable::from_records(vec![
            record("alice", Some("CompanyA, CompanyB")),
            record("bob", Some("Acme < 2019-03-01, Initech < 2021-01-01, Globex")),
        ]);
        assert_eq!(table.get("alice"), Some("CompanyB"));
        assert_eq!(table.get("bob"), Some("Globex"));
    }

    #[test]
    fn logins_are_case_insensitive() {
        let table = AffiliationTable::from_records(vec![record("MixedCase", Some("Acme"))]);
        assert_eq!(table.get("mixedcase"), Some("Acme"));
        assert_eq!(table.get("MIXEDCASE"), Some("Acme"));
    }

    #[test]
    fn robots_and_records_without_affiliation_are_omitted() {
        let table = AffiliationTable::from_records(vec![
            record("k8s-ci-robot", Some("(Robots)")),
            record("ghost", None),
            record("carol", Some("?")),
        ]);
        assert_eq!(table.get("k8s-ci-robot"), None);
        assert_eq!(table.get("ghost"), None);
        assert_eq!(table.get("carol"), Some("?"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn dataset_json_decodes_with_optional_affiliation() {
        let raw = r#"[{"login":"a","affiliation":"X"},{"login":"b","email":"b@example.com"}]"#;
        let records: Vec<AffiliationRecord> = serde_json::from_str(raw).expect("decode");
        let table = AffiliationTable::from_records(records);
        assert_eq!(table.get("a"), Some("X"));
        assert_eq!(table.get("b"), None);
    }
}
