use crate::error::ReportError;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "govroles",
    version,
    about = "Governance role and affiliation reports for open source communities"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (default: ~/.config/govroles/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Leads, subproject OWNERS files and core aliases with affiliations
    Owners {
        /// Organization label used in the output file name
        org: Option<String>,
    },
    /// Core OWNERS_ALIASES classified into group/subproject/role
    KkAliases {
        org: Option<String>,
    },
    /// Istio team membership with affiliations
    Istio,
    /// Append rows for auxiliary OWNERS files missing from a prior report
    MergeOwners {
        prior_csv: Option<PathBuf>,
        aux_list: Option<PathBuf>,
    },
    /// Find files of a given name across an organization via code search
    FindFiles {
        org: Option<String>,
        filename: Option<String>,
    },
    /// Contact emails for eligible voters of an election
    VoterEmails {
        org: Option<String>,
        voters: Option<String>,
    },
    /// Voters whose login case differs from their GitHub login
    VoterCase {
        voters: Option<String>,
    },
    /// Governance registry listings
    Sigs {
        #[command(subcommand)]
        command: SigsCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SigsCommands {
    List,
    Leaders,
    Meetings,
}

/// Positional value, or a line read from stdin after printing `question`.
pub fn arg_or_prompt(value: Option<&str>, question: &str) -> anyhow::Result<String> {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(v.to_string());
    }
    let stdin = std::io::stdin();
    prompt_from(&mut stdin.lock(), &mut std::io::stderr(), question)
}

fn prompt_from(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
) -> anyhow::Result<String> {
    write!(out, "{}: ", question)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Err(ReportError::Input(format!("no answer for: {}", question)).into());
    }
    Ok(answer.to_string())
}
