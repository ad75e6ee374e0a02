//! Report orchestration: descriptor -> role assignments -> affiliation -> CSV.
//!
//! Fatal: credentials, the affiliation dataset, the primary descriptor of a
//! run, and the output file. Everything per item (one OWNERS file, one alias
//! file, one profile) is logged and skipped.

use crate::domain::constants::NA;
use crate::domain::models::{
    AliasesFile, Config, EmailSummary, Registry, Role, RoleAssignment, RunSummary, Team,
    TeamsFile, VotersFile,
};
use crate::error::ReportError;
use crate::fetch::Fetcher;
use crate::github::{GitHubApi, GitHubClient};
use crate::services::affiliations::AffiliationTable;
use crate::services::classify::IdentifierClassifier;
use crate::services::credentials::read_token;
use crate::services::emails::EmailFinder;
use crate::services::owners::{
    alias_roster, classified_aliases, owners_assignments, OwnersFileReader,
};
use crate::services::reconcile::{parse_candidate_list, CompletedFileSet};
use crate::services::registry::known_groups;
use crate::services::report::{ExclusionFilter, ReportKind, ReportWriter};
use crate::services::resolver::AffiliationResolver;
use crate::services::storage::dated_output_path;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Whether a command talks to the GitHub API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiUse {
    /// Always (search, voter lookups).
    Required,
    /// Only when `live_lookup` is on (affiliation reports).
    LiveLookup,
    None,
}

/// Explicit run context: configuration, clients, credentials, filter.
pub struct ReportContext {
    pub config: Config,
    pub fetcher: Fetcher,
    pub github: Option<GitHubClient>,
    pub filter: ExclusionFilter,
}

impl ReportContext {
    pub fn new(config: Config, api: ApiUse) -> anyhow::Result<Self> {
        let timeout = config.general.http_timeout_ms;
        let wants_api = match api {
            ApiUse::Required => true,
            ApiUse::LiveLookup => config.general.live_lookup,
            ApiUse::None => false,
        };
        let github = if wants_api {
            let token = read_token(Path::new(&config.general.token_file))?;
            Some(GitHubClient::new(&config.general.api_base, Some(token), timeout)?)
        } else {
            None
        };
        Ok(Self {
            fetcher: Fetcher::new(timeout)?,
            filter: ExclusionFilter::from_config(&config.filter),
            github,
            config,
        })
    }

    pub fn api(&self) -> anyhow::Result<&dyn GitHubApi> {
        self.github
            .as_ref()
            .map(|g| g as &dyn GitHubApi)
            .ok_or_else(|| anyhow::anyhow!("GitHub API client not configured"))
    }

    fn profiles(&self) -> Option<&dyn GitHubApi> {
        if !self.config.general.live_lookup {
            return None;
        }
        self.github.as_ref().map(|g| g as &dyn GitHubApi)
    }

    fn load_table(&self) -> anyhow::Result<AffiliationTable> {
        AffiliationTable::load(&self.fetcher, &self.config.sources.affiliations)
    }

    fn load_registry(&self) -> anyhow::Result<Registry> {
        info!(source = %self.config.sources.sigs, "loading governance registry");
        self.fetcher.yaml(&self.config.sources.sigs)
    }

    pub fn output_path(&self, stem: &str, label: &str) -> PathBuf {
        dated_output_path(&self.config.general.output_dir, stem, label, "csv")
    }
}

/// One open report plus its tallies.
struct ReportRun<'a> {
    reader: OwnersFileReader<'a>,
    resolver: AffiliationResolver<'a>,
    writer: ReportWriter<File>,
    output: PathBuf,
    read: usize,
    failed: usize,
}

impl<'a> ReportRun<'a> {
    fn new(
        ctx: &'a ReportContext,
        table: &'a AffiliationTable,
        writer: ReportWriter<File>,
        output: PathBuf,
    ) -> Self {
        Self {
            reader: OwnersFileReader::new(&ctx.fetcher),
            resolver: AffiliationResolver::new(table, ctx.profiles()),
            writer,
            output,
            read: 0,
            failed: 0,
        }
    }

    fn write_all(&mut self, assignments: &[RoleAssignment]) -> anyhow::Result<()> {
        for a in assignments {
            self.writer.append_assignment(a, &mut self.resolver)?;
        }
        Ok(())
    }

    fn owners_file(&mut self, url: &str, group: &str, subproject: &str) -> anyhow::Result<()> {
        match self.reader.read(url) {
            Ok(owners) => {
                self.read += 1;
                let rows = owners_assignments(&owners, url, Some(group), Some(subproject));
                self.write_all(&rows)
            }
            Err(e) => {
                warn!(group, url, error = %e, "skipping unreadable OWNERS file");
                self.failed += 1;
                Ok(())
            }
        }
    }

    fn aliases_file(
        &mut self,
        url: &str,
        extract: impl FnOnce(&AliasesFile) -> Vec<RoleAssignment>,
    ) -> anyhow::Result<()> {
        match self.reader.read_aliases(url) {
            Ok(aliases) => {
                self.read += 1;
                let rows = extract(&aliases);
                self.write_all(&rows)
            }
            Err(e) => {
                warn!(url, error = %e, "skipping unreadable aliases file");
                self.failed += 1;
                Ok(())
            }
        }
    }

    fn finish(self) -> anyhow::Result<RunSummary> {
        let summary = RunSummary {
            output: self.output.display().to_string(),
            rows_written: self.writer.rows_written,
            rows_excluded: self.writer.rows_excluded,
            descriptors_read: self.read,
            descriptors_failed: self.failed,
        };
        self.writer.finish()?;
        info!(
            output = %summary.output,
            rows = summary.rows_written,
            failed = summary.descriptors_failed,
            "report complete"
        );
        Ok(summary)
    }
}

/// Which parts of the OWNERS report to produce.
#[derive(Debug, Clone, Copy)]
pub struct OwnersParts {
    pub leads: bool,
    pub owners_files: bool,
    pub core_aliases: bool,
}

impl OwnersParts {
    pub const ALL: OwnersParts = OwnersParts {
        leads: true,
        owners_files: true,
        core_aliases: true,
    };
    pub const CORE_ALIASES_ONLY: OwnersParts = OwnersParts {
        leads: false,
        owners_files: false,
        core_aliases: true,
    };
}

pub fn run_owners_report(
    ctx: &ReportContext,
    stem: &str,
    org: &str,
    parts: OwnersParts,
) -> anyhow::Result<RunSummary> {
    let table = ctx.load_table()?;
    let registry = ctx.load_registry()?;
    let output = ctx.output_path(stem, org);
    let writer = ReportWriter::create(&output, ReportKind::Owners, ctx.filter.clone())?;
    let mut run = ReportRun::new(ctx, &table, writer, output);

    if parts.leads {
        let url = ctx.config.sources.community_aliases.clone();
        run.aliases_file(&url, |a| alias_roster(a, &url, Role::Lead, "-leads"))?;
    }

    if parts.owners_files {
        for sig in &registry.sigs {
            for sub in &sig.subprojects {
                for url in &sub.owners {
                    run.owners_file(url, &sig.dir, &sub.name)?;
                }
            }
        }
    }

    let core = ctx.config.sources.core_aliases.trim().to_string();
    if parts.core_aliases && !core.is_empty() {
        let classifier = IdentifierClassifier::new(known_groups(&registry));
        run.aliases_file(&core, |a| classified_aliases(a, &core, &classifier))?;
    }

    run.finish()
}

/// Appends rows for auxiliary OWNERS locations not yet present in `prior`.
/// Re-running with the same list adds nothing.
pub fn run_merge(ctx: &ReportContext, prior: &Path, aux_list: &Path) -> anyhow::Result<RunSummary> {
    let mut completed = CompletedFileSet::from_report(prior)?;
    let aux = std::fs::read_to_string(aux_list).map_err(|e| {
        ReportError::Input(format!("cannot read {}: {}", aux_list.display(), e))
    })?;
    let pending = completed.pending(parse_candidate_list(&aux));
    info!(
        completed = completed.len(),
        pending = pending.len(),
        "reconciled auxiliary OWNERS list"
    );

    let table = if pending.is_empty() {
        AffiliationTable::default()
    } else {
        ctx.load_table()?
    };
    let writer = ReportWriter::append_to(prior, ReportKind::Owners, ctx.filter.clone())?;
    let mut run = ReportRun::new(ctx, &table, writer, prior.to_path_buf());
    for url in &pending {
        run.owners_file(url, NA, NA)?;
    }
    run.finish()
}

pub fn run_teams_report(ctx: &ReportContext) -> anyhow::Result<RunSummary> {
    let table = ctx.load_table()?;
    let source = ctx.config.sources.istio_teams.clone();
    info!(source = %source, "loading teams");
    let teams: TeamsFile = ctx.fetcher.yaml(&source)?;

    let output = ctx.output_path("owners_data_istio", "");
    let writer = ReportWriter::create(&output, ReportKind::Teams, ctx.filter.clone())?;
    let mut run = ReportRun::new(ctx, &table, writer, output);
    run.read += 1;

    let mut members = Vec::new();
    flatten_teams(&teams.teams, &mut members);
    for (team, login) in members {
        run.writer.append_team_member(&login, &team, &mut run.resolver)?;
    }
    run.finish()
}

/// (team, member) pairs. Each level is visited in alphabetical team order,
/// and all members of a level come before any nested team.
fn flatten_teams(teams: &BTreeMap<String, Team>, out: &mut Vec<(String, String)>) {
    for (name, team) in teams {
        for member in &team.members {
            out.push((name.clone(), member.clone()));
        }
    }
    for team in teams.values() {
        flatten_teams(&team.teams, out);
    }
}

pub fn load_voters(ctx: &ReportContext, source: &str) -> anyhow::Result<Vec<String>> {
    let voters: VotersFile = ctx.fetcher.yaml(source).map_err(|e| {
        ReportError::Input(format!(
            "cannot load voters file {} (is it the raw link?): {}",
            source, e
        ))
    })?;
    Ok(voters.eligible_voters)
}

pub fn run_voter_emails(
    ctx: &ReportContext,
    org: &str,
    voters_source: &str,
    on_voter: impl FnMut(&str, Option<&str>),
) -> anyhow::Result<EmailSummary> {
    let voters = load_voters(ctx, voters_source)?;
    let output = ctx.output_path("elekto_emails", org);
    let emails = voter_emails(ctx.api()?, org, &voters, on_voter);
    write_email_row(&output, &emails)?;
    Ok(EmailSummary {
        output: output.display().to_string(),
        voters: voters.len(),
        found: emails.len(),
    })
}

/// Found addresses in voter order; voters without one are left out.
pub fn voter_emails(
    api: &dyn GitHubApi,
    org: &str,
    voters: &[String],
    mut on_voter: impl FnMut(&str, Option<&str>),
) -> Vec<String> {
    let mut finder = EmailFinder::new(api, org);
    let mut emails = Vec::new();
    for login in voters {
        let email = finder.find(login);
        on_voter(login, email.as_deref());
        if let Some(e) = email {
            emails.push(e);
        }
    }
    emails
}

/// The whole list as one CSV record, ready to paste into a mail client.
pub fn write_email_row(output: &Path, emails: &[String]) -> anyhow::Result<()> {
    let fail = |reason: String| ReportError::Output {
        path: output.display().to_string(),
        reason,
    };
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
    }
    let mut csv = csv::Writer::from_path(output).map_err(|e| fail(e.to_string()))?;
    csv.write_record(emails)?;
    csv.flush()?;
    Ok(())
}

/// `(canonical, listed)` for voters whose listed login differs in case from
/// the canonical one. Failed lookups are logged and skipped.
pub fn voter_case_mismatches(api: &dyn GitHubApi, voters: &[String]) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for listed in voters {
        match api.user(listed) {
            Ok(profile) if profile.login != *listed => out.push((profile.login, listed.clone())),
            Ok(_) => {}
            Err(e) => warn!(login = %listed, error = %e, "profile lookup failed"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{flatten_teams, voter_case_mismatches, voter_emails, write_email_row};
    use crate::domain::models::{TeamsFile, UserProfile};
    use crate::services::resolver::tests::FakeGitHub;

    fn voters(logins: &[&str]) -> Vec<String> {
        logins.iter().map(|l| l.to_string()).collect()
    }

    fn profile(login: &str, email: Option<&str>) -> UserProfile {
        UserProfile {
            login: login.to_string(),
            company: None,
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn case_mismatches_report_canonical_login() {
        let mut gh = FakeGitHub::default().with_company("bob", None);
        gh.profiles.insert("alice".into(), profile("Alice", None));
        let found = voter_case_mismatches(&gh, &voters(&["alice", "bob", "ghost"]));
        assert_eq!(found, vec![("Alice".to_string(), "alice".to_string())]);
        assert_eq!(gh.user_calls.get(), 3);
    }

    #[test]
    fn email_report_is_one_row_of_found_addresses() {
        let mut gh = FakeGitHub::default().with_company("bob", None);
        gh.profiles
            .insert("alice".into(), profile("alice", Some("alice@example.com")));
        gh.profiles
            .insert("carol".into(), profile("carol", Some("carol@example.com")));

        let mut seen = Vec::new();
        let emails = voter_emails(&gh, "org", &voters(&["alice", "bob", "carol"]), |l, e| {
            seen.push((l.to_string(), e.is_some()))
        });
        assert_eq!(emails, vec!["alice@example.com", "carol@example.com"]);
        assert_eq!(seen.len(), 3);
        assert!(!seen[1].1);

        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("output/elekto_emails.csv");
        write_email_row(&path, &emails).expect("write");
        let raw = std::fs::read_to_string(&path).expect("read");
        assert_eq!(raw, "alice@example.com,carol@example.com\n");
    }

    #[test]
    fn nested_teams_are_flattened_recursively() {
        let teams: TeamsFile = serde_yaml::from_str(
            r#"
teams:
  Maintainers:
    members: [alice]
    teams:
      Networking:
        members: [bob, carol]
        teams:
          Ambient:
            members: [dan]
  TOC:
    members: [erin]
"#,
        )
        .expect("teams yaml");
        let mut out = Vec::new();
        flatten_teams(&teams.teams, &mut out);
        let pairs: Vec<(&str, &str)> = out.iter().map(|(t, m)| (t.as_str(), m.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Maintainers", "alice"),
                ("TOC", "erin"),
                ("Networking", "bob"),
                ("Networking", "carol"),
                ("Ambient", "dan"),
            ]
        );
    }
}
