use crate::domain::constants::{NOT_FOUND, UNKNOWN_PLACEHOLDER};
use crate::github::GitHubApi;
use crate::services::affiliations::AffiliationTable;
use std::collections::HashMap;
use tracing::debug;

/// Resolves a login to a company string.
///
/// Precedence: for logins known to the dataset the live profile wins and the
/// dataset value is the fallback; the dataset's `?` counts as unknown; unknown
/// logins get a live lookup; whatever is still unknown becomes `NotFound`.
/// Commas are stripped from the result. Results are memoised per login for
/// the lifetime of the resolver, so one run asks the API once per person.
pub struct AffiliationResolver<'a> {
    table: &'a AffiliationTable,
    profiles: Option<&'a dyn GitHubApi>,
    resolved: HashMap<String, String>,
}

impl<'a> AffiliationResolver<'a> {
    /// `profiles = None` disables live lookups entirely.
    pub fn new(table: &'a AffiliationTable, profiles: Option<&'a dyn GitHubApi>) -> Self {
        Self {
            table,
            profiles,
            resolved: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, login: &str) -> String {
        let key = login.to_lowercase();
        if let Some(hit) = self.resolved.get(&key) {
            return hit.clone();
        }

        // Outer None: live lookup not attempted yet.
        let mut live: Option<Option<String>> = None;
        let mut company = match self.table.get(&key) {
            Some(cached) => {
                let fresh = self.live_company(login);
                live = Some(fresh.clone());
                fresh.or_else(|| Some(cached.to_string()))
            }
            None => None,
        };
        if company.as_deref() == Some(UNKNOWN_PLACEHOLDER) {
            company = None;
        }
        if company.is_none() {
            company = match live {
                Some(previous) => previous,
                None => self.live_company(login),
            };
        }

        let value = company
            .map(|c| c.replace(',', "").trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NOT_FOUND.to_string());
        self.resolved.insert(key, value.clone());
        value
    }

    fn live_company(&self, login: &str) -> Option<String> {
        let api = self.profiles?;
        match api.user(login) {
            Ok(profile) => profile
                .company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            Err(e) => {
                debug!(login, error = %e, "profile lookup failed");
                None
            }
        }
    }
}
