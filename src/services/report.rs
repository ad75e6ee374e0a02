use crate::domain::constants::{DEFAULT_EXCLUDED_SUBSTRINGS, ISTIO_HEADER, OWNERS_HEADER};
use crate::domain::models::{FilterConfig, OwnersRow, RoleAssignment, TeamRow};
use crate::error::ReportError;
use crate::services::resolver::AffiliationResolver;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Rejects roster entries that name a team or role alias instead of a
/// person. Substring match on the lowercased login, so false positives
/// (real people whose login contains e.g. `release`) are dropped too.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    substrings: Vec<String>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_SUBSTRINGS.iter().copied())
    }
}

impl ExclusionFilter {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            substrings: substrings
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn from_config(cfg: &FilterConfig) -> Self {
        let mut filter = match &cfg.excluded_substrings {
            Some(list) => Self::new(list),
            None => Self::default(),
        };
        filter
            .substrings
            .extend(Self::new(&cfg.extra_excluded_substrings).substrings);
        filter
    }

    pub fn excludes(&self, login: &str) -> bool {
        let login = login.to_lowercase();
        login.is_empty() || self.substrings.iter().any(|s| login.contains(s.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Owners,
    Teams,
}

impl ReportKind {
    pub fn header(self) -> &'static [&'static str] {
        match self {
            ReportKind::Owners => OWNERS_HEADER,
            ReportKind::Teams => ISTIO_HEADER,
        }
    }
}

/// CSV sink for one report run. Every row passes the exclusion filter
/// before its affiliation is resolved.
pub struct ReportWriter<W: Write> {
    csv: csv::Writer<W>,
    kind: ReportKind,
    filter: ExclusionFilter,
    pub rows_written: usize,
    pub rows_excluded: usize,
}

impl ReportWriter<File> {
    /// Creates (truncates) `path` and writes the header.
    pub fn create(path: &Path, kind: ReportKind, filter: ExclusionFilter) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| output_error(path, e))?;
        }
        let file = File::create(path).map_err(|e| output_error(path, e))?;
        let mut writer = Self::from_writer(file, kind, filter);
        writer.csv.write_record(kind.header())?;
        Ok(writer)
    }

    /// Opens an existing report for appending; no header is written.
    pub fn append_to(
        path: &Path,
        kind: ReportKind,
        filter: ExclusionFilter,
    ) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| output_error(path, e))?;
        Ok(Self::from_writer(file, kind, filter))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn from_writer(inner: W, kind: ReportKind, filter: ExclusionFilter) -> Self {
        Self {
            csv: csv::WriterBuilder::new().has_headers(false).from_writer(inner),
            kind,
            filter,
            rows_written: 0,
            rows_excluded: 0,
        }
    }

    /// A report holds one row shape; mixing them corrupts the file.
    fn expect_kind(&self, kind: ReportKind) -> anyhow::Result<()> {
        if self.kind != kind {
            anyhow::bail!("cannot write a {:?} row to a {:?} report", kind, self.kind);
        }
        Ok(())
    }

    fn admit(&mut self, login: &str) -> bool {
        if self.filter.excludes(login) {
            debug!(login, "excluded non-person roster entry");
            self.rows_excluded += 1;
            return false;
        }
        true
    }

    /// `company,username,status,sig_name,subproject,owners_file`
    pub fn append_assignment(
        &mut self,
        a: &RoleAssignment,
        resolver: &mut AffiliationResolver<'_>,
    ) -> anyhow::Result<bool> {
        self.expect_kind(ReportKind::Owners)?;
        if !self.admit(&a.login) {
            return Ok(false);
        }
        let company = resolver.resolve(&a.login);
        self.csv.serialize(OwnersRow {
            company: &company,
            username: &a.login,
            status: a.role.as_str(),
            sig_name: &a.group,
            subproject: &a.subproject,
            owners_file: &a.source_url,
        })?;
        self.rows_written += 1;
        Ok(true)
    }

    /// `company,username,team`
    pub fn append_team_member(
        &mut self,
        login: &str,
        team: &str,
        resolver: &mut AffiliationResolver<'_>,
    ) -> anyhow::Result<bool> {
        self.expect_kind(ReportKind::Teams)?;
        let login = login.trim();
        if !self.admit(login) {
            return Ok(false);
        }
        let company = resolver.resolve(login);
        self.csv.serialize(TeamRow {
            company: &company,
            username: login,
            team,
        })?;
        self.rows_written += 1;
        Ok(true)
    }

    /// Flushes and hands back the sink.
    pub fn finish(self) -> anyhow::Result<W> {
        self.csv
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flush report: {}", e.error()))
    }
}

fn output_error(path: &Path, err: std::io::Error) -> anyhow::Error {
    ReportError::Output {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::{ExclusionFilter, ReportKind, ReportWriter};
    use crate::domain::models::{AffiliationRecord, FilterConfig, Role, RoleAssignment};
    use crate::services::affiliations::AffiliationTable;
    use crate::services::resolver::AffiliationResolver;

    fn assignment(login: &str, subproject: &str) -> RoleAssignment {
        RoleAssignment {
            login: login.to_string(),
            role: Role::Approver,
            group: "sig-auth".to_string(),
            subproject: subproject.to_string(),
            source_url: "https://example.com/OWNERS".to_string(),
        }
    }

    fn table() -> AffiliationTable {
        AffiliationTable::from_records(vec![AffiliationRecord {
            login: "alice".into(),
            affiliation: Some("Acme".into()),
        }])
    }

    #[test]
    fn alias_like_logins_are_excluded() {
        let f = ExclusionFilter::default();
        assert!(f.excludes("sig-auth-admins"));
        assert!(f.excludes("SIG-Node-Reviewers"));
        assert!(f.excludes("release-managers"));
        assert!(f.excludes("steering-committee"));
        assert!(f.excludes(""));
        assert!(!f.excludes("alice"));
        assert!(!f.excludes("provider-bob"));
    }

    #[test]
    fn config_can_replace_or_extend_the_list() {
        let extended = ExclusionFilter::from_config(&FilterConfig {
            excluded_substrings: None,
            extra_excluded_substrings: vec!["Provider".into(), "github-admin-team".into()],
        });
        assert!(extended.excludes("provider-bob"));
        assert!(extended.excludes("sig-auth-admins"));

        let replaced = ExclusionFilter::from_config(&FilterConfig {
            excluded_substrings: Some(vec!["bot".into()]),
            extra_excluded_substrings: vec![],
        });
        assert!(replaced.excludes("renovate-bot"));
        assert!(!replaced.excludes("sig-auth-admins"));
    }

    #[test]
    fn excluded_logins_are_never_written() {
        let t = table();
        let mut resolver = AffiliationResolver::new(&t, None);
        let mut w = writer(ReportKind::Owners);
        assert!(!w
            .append_assignment(&assignment("sig-auth-admins", "NA"), &mut resolver)
            .expect("append"));
        assert!(w
            .append_assignment(&assignment("alice", "NA"), &mut resolver)
            .expect("append"));
        assert_eq!((w.rows_written, w.rows_excluded), (1, 1));

        let out = String::from_utf8(w.finish().expect("finish")).expect("utf8");
        assert_eq!(out, "Acme,alice,approver,sig-auth,NA,https://example.com/OWNERS\n");
    }

    fn writer(kind: ReportKind) -> ReportWriter<Vec<u8>> {
        ReportWriter::from_writer(Vec::new(), kind, ExclusionFilter::default())
    }

    #[test]
    fn owners_fields_with_commas_are_quoted() {
        let t = table();
        let mut resolver = AffiliationResolver::new(&t, None);
        let mut w = writer(ReportKind::Owners);
        w.append_assignment(&assignment("alice", "audit, logging"), &mut resolver)
            .expect("append");
        let out = String::from_utf8(w.finish().expect("finish")).expect("utf8");
        assert_eq!(
            out,
            "Acme,alice,approver,sig-auth,\"audit, logging\",https://example.com/OWNERS\n"
        );
    }

    #[test]
    fn team_fields_with_commas_are_quoted() {
        let t = table();
        let mut resolver = AffiliationResolver::new(&t, None);
        let mut w = writer(ReportKind::Teams);
        w.append_team_member("nobody", "Test and Release", &mut resolver)
            .expect("append");
        w.append_team_member(" alice ", "Docs, Website", &mut resolver)
            .expect("append");
        let out = String::from_utf8(w.finish().expect("finish")).expect("utf8");
        assert_eq!(
            out,
            "NotFound,nobody,Test and Release\nAcme,alice,\"Docs, Website\"\n"
        );
    }

    #[test]
    fn rows_of_the_other_report_kind_are_rejected() {
        let t = table();
        let mut resolver = AffiliationResolver::new(&t, None);

        let mut teams = writer(ReportKind::Teams);
        assert!(teams
            .append_assignment(&assignment("alice", "NA"), &mut resolver)
            .is_err());

        let mut owners = writer(ReportKind::Owners);
        assert!(owners
            .append_team_member("alice", "Maintainers", &mut resolver)
            .is_err());
        owners
            .append_assignment(&assignment("alice", "NA"), &mut resolver)
            .expect("append");
        assert_eq!(owners.rows_written, 1);
    }

    #[test]
    fn create_writes_header_and_makes_parent_dirs() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("output/report.csv");
        let w = ReportWriter::create(&path, ReportKind::Teams, ExclusionFilter::default())
            .expect("create");
        w.finish().expect("finish");
        let raw = std::fs::read_to_string(&path).expect("read");
        assert_eq!(raw, "company,username,team\n");
    }
}
