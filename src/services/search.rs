use crate::domain::constants::{SEARCH_PAGE_SIZE, SEARCH_RESULT_CAP};
use crate::domain::models::PacingConfig;
use crate::github::GitHubApi;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed sleeps that keep code search under the remote rate limit.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub item: Duration,
    pub page: Duration,
}

impl From<&PacingConfig> for Pacing {
    fn from(cfg: &PacingConfig) -> Self {
        Self {
            item: Duration::from_millis(cfg.item_delay_ms),
            page: Duration::from_millis(cfg.page_delay_ms),
        }
    }
}

pub fn search_query(org: &str, filename: &str) -> String {
    format!("org:{} filename:{}", org.trim(), filename.trim())
}

/// Every `owner/repo/path` matching `query`, in API order. The API stops
/// at 1000 results, so very large orgs come back incomplete.
pub fn find_files(
    api: &dyn GitHubApi,
    query: &str,
    pacing: Pacing,
    mut on_item: impl FnMut(&str),
) -> anyhow::Result<(usize, Vec<String>)> {
    let mut paths = Vec::new();
    let mut total = 0usize;
    let mut page = 1u32;
    loop {
        let result = match api.search_code(query, page) {
            Ok(r) => r,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                warn!(page, error = %e, "code search page failed; keeping partial results");
                break;
            }
        };
        if page == 1 {
            total = result.total_count;
            info!(query, total, "code search");
        }
        let n = result.items.len();
        for item in result.items {
            let full = format!("{}/{}", item.repository.full_name, item.path);
            on_item(&full);
            paths.push(full);
            std::thread::sleep(pacing.item);
        }
        let limit = total.min(SEARCH_RESULT_CAP);
        if n < SEARCH_PAGE_SIZE as usize || paths.len() >= limit {
            break;
        }
        std::thread::sleep(pacing.page);
        page += 1;
    }
    Ok((total, paths))
}
