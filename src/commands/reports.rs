use crate::*;

pub fn handle_report_commands(cli: &Cli) -> anyhow::Result<bool> {
    let api = match &cli.command {
        Commands::Owners { .. }
        | Commands::KkAliases { .. }
        | Commands::Istio
        | Commands::MergeOwners { .. } => ApiUse::LiveLookup,
        _ => return Ok(false),
    };

    // prompts come before any network access
    let merge_inputs = match &cli.command {
        Commands::MergeOwners {
            prior_csv,
            aux_list,
        } => {
            let prior = arg_or_prompt(
                prior_csv.as_ref().and_then(|p| p.to_str()),
                "Enter the path of the completed owners report (csv)",
            )?;
            let aux = arg_or_prompt(
                aux_list.as_ref().and_then(|p| p.to_str()),
                "Enter the path of the additional OWNERS list",
            )?;
            Some((PathBuf::from(prior), PathBuf::from(aux)))
        }
        _ => None,
    };

    let config = load_config(cli.config.as_deref())?;
    let ctx = ReportContext::new(config, api)?;

    let summary = match &cli.command {
        Commands::Owners { org } => {
            let org = org.as_deref().unwrap_or(DEFAULT_ORG);
            run_owners_report(&ctx, "owners_data", org, OwnersParts::ALL)?
        }
        Commands::KkAliases { org } => {
            let org = org.as_deref().unwrap_or(DEFAULT_ORG);
            run_owners_report(&ctx, "kk_aliases", org, OwnersParts::CORE_ALIASES_ONLY)?
        }
        Commands::Istio => run_teams_report(&ctx)?,
        Commands::MergeOwners { .. } => {
            let Some((prior, aux)) = merge_inputs else {
                return Ok(false);
            };
            run_merge(&ctx, &prior, &aux)?
        }
        _ => return Ok(false),
    };

    print_one(cli.json, summary, |s| {
        format!(
            "wrote {} rows to {} ({} excluded, {} descriptors read, {} failed)",
            s.rows_written, s.output, s.rows_excluded, s.descriptors_read, s.descriptors_failed
        )
    })?;
    Ok(true)
}
