use crate::error::ReportError;
use std::fmt;
use std::path::Path;

/// GitHub access token. Never printed.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Reads the token from the first line of `path`.
pub fn read_token(path: &Path) -> anyhow::Result<Credential> {
    let fail = |reason: &str| ReportError::Credentials {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };
    let raw = std::fs::read_to_string(path).map_err(|e| fail(&e.to_string()))?;
    let token = raw.lines().next().unwrap_or("").trim();
    if token.is_empty() {
        return Err(fail("first line is empty").into());
    }
    Ok(Credential(token.to_string()))
}
