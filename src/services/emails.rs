use crate::domain::models::CommitEmail;
use crate::github::GitHubApi;
use tracing::debug;

/// Finds a contact email per login: the profile email first, else the
/// author email of the newest commit by that login across the org.
/// `noreply` addresses count as none.
pub struct EmailFinder<'a> {
    api: &'a dyn GitHubApi,
    org: String,
    repos: Option<Vec<String>>,
}

impl<'a> EmailFinder<'a> {
    pub fn new(api: &'a dyn GitHubApi, org: &str) -> Self {
        Self {
            api,
            org: org.to_string(),
            repos: None,
        }
    }

    pub fn find(&mut self, login: &str) -> Option<String> {
        let profile_email = match self.api.user(login) {
            Ok(p) => p.email.filter(|e| !e.trim().is_empty()),
            Err(e) => {
                debug!(login, error = %e, "profile lookup failed");
                return None;
            }
        };
        let email = profile_email.or_else(|| self.newest_commit_email(login))?;
        if email.contains("noreply") {
            return None;
        }
        Some(email.trim().to_string())
    }

    fn newest_commit_email(&mut self, login: &str) -> Option<String> {
        let mut found: Vec<CommitEmail> = Vec::new();
        for repo in self.repos() {
            match self.api.latest_commit_by(&repo, login) {
                Ok(Some(c)) => found.push(c),
                Ok(None) => {}
                // empty repositories answer 409; treat like "no commits"
                Err(e) => debug!(repo = %repo, login, error = %e, "commit lookup failed"),
            }
        }
        newest(found).map(|c| c.email)
    }

    fn repos(&mut self) -> Vec<String> {
        if self.repos.is_none() {
            let repos = self.api.org_repos(&self.org).unwrap_or_else(|e| {
                debug!(org = %self.org, error = %e, "repository listing failed");
                Vec::new()
            });
            self.repos = Some(repos);
        }
        self.repos.clone().unwrap_or_default()
    }
}

fn newest(mut found: Vec<CommitEmail>) -> Option<CommitEmail> {
    found.sort_by(|a, b| b.date.cmp(&a.date));
    found.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::EmailFinder;
    use crate::domain::models::{CommitEmail, UserProfile};
    use crate::services::resolver::tests::FakeGitHub;

    fn commit(email: &str, date: &str, repo: &str) -> CommitEmail {
        CommitEmail {
            email: email.to_string(),
            date: date.to_string(),
            repo: repo.to_string(),
        }
    }

    fn fake() -> FakeGitHub {
        let mut gh = FakeGitHub::default()
            .with_company("nomail", None)
            .with_company("private", None)
            .with_company("bot", None);
        gh.profiles.insert(
            "public".into(),
            UserProfile {
                login: "public".into(),
                company: None,
                email: Some("public@example.com".into()),
            },
        );
        gh.repos = vec!["org/a".into(), "org/b".into()];
        gh.commits.insert(
            ("org/a".into(), "nomail".into()),
            commit("old@example.com", "2020-01-01T00:00:00Z", "org/a"),
        );
        gh.commits.insert(
            ("org/b".into(), "nomail".into()),
            commit("new@example.com", "2023-06-01T00:00:00Z", "org/b"),
        );
        gh.commits.insert(
            ("org/a".into(), "bot".into()),
            commit("1+bot@users.noreply.github.com", "2023-01-01T00:00:00Z", "org/a"),
        );
        gh
    }

    #[test]
    fn profile_email_wins() {
        let gh = fake();
        let mut f = EmailFinder::new(&gh, "org");
        assert_eq!(f.find("public").as_deref(), Some("public@example.com"));
    }

    #[test]
    fn newest_commit_email_is_the_fallback() {
        let gh = fake();
        let mut f = EmailFinder::new(&gh, "org");
        assert_eq!(f.find("nomail").as_deref(), Some("new@example.com"));
    }

    #[test]
    fn noreply_missing_and_unknown_users_have_no_email() {
        let gh = fake();
        let mut f = EmailFinder::new(&gh, "org");
        assert_eq!(f.find("bot"), None);
        assert_eq!(f.find("private"), None);
        assert_eq!(f.find("deleted-account"), None);
    }
}
