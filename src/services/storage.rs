use crate::error::ReportError;
use std::path::{Path, PathBuf};

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// `<output_dir>/<stem>_<label>_<YYYY-MM-DD>.<ext>`
pub fn dated_output_path(output_dir: &str, stem: &str, label: &str, ext: &str) -> PathBuf {
    let name = if label.is_empty() {
        format!("{}_{}.{}", stem, today(), ext)
    } else {
        format!("{}_{}_{}.{}", stem, sanitize(label), today(), ext)
    };
    PathBuf::from(output_dir).join(name)
}

fn sanitize(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

pub fn write_lines(path: &Path, lines: &[String]) -> anyhow::Result<()> {
    let fail = |e: std::io::Error| ReportError::Output {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(fail)?;
    }
    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    std::fs::write(path, body).map_err(fail)?;
    Ok(())
}
