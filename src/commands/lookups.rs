use crate::*;

pub fn handle_lookup_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::FindFiles { org, filename } => {
            let org = arg_or_prompt(org.as_deref(), "Enter a GitHub org name (like kubernetes)")?;
            let filename =
                arg_or_prompt(filename.as_deref(), "Enter a file name (like OWNERS)")?;
            let ctx = ReportContext::new(load_config(cli.config.as_deref())?, ApiUse::Required)?;

            let query = search_query(&org, &filename);
            let pacing = Pacing::from(&ctx.config.pacing);
            let json = cli.json;
            let (total_count, paths) = find_files(ctx.api()?, &query, pacing, |p| {
                if !json {
                    println!("{}", p);
                }
            })?;
            let output = dated_output_path(
                &ctx.config.general.output_dir,
                &format!("{}_files", filename.to_lowercase()),
                &org,
                "txt",
            );
            write_lines(&output, &paths)?;

            let found = FoundFiles {
                query,
                total_count,
                output: output.display().to_string(),
                paths,
            };
            print_one(json, found, |f| {
                format!(
                    "found {} of {} (list written to {})",
                    f.paths.len(),
                    f.total_count,
                    f.output
                )
            })?;
        }
        Commands::VoterEmails { org, voters } => {
            let org = arg_or_prompt(org.as_deref(), "Enter a GitHub org name (like kubernetes)")?;
            let voters = arg_or_prompt(
                voters.as_deref(),
                "Enter the voters.yaml location (raw link or local path)",
            )?;
            let ctx = ReportContext::new(load_config(cli.config.as_deref())?, ApiUse::Required)?;
            let json = cli.json;
            let summary = run_voter_emails(&ctx, &org, &voters, |login, email| {
                if !json {
                    println!("{} {}", login, email.unwrap_or("None"));
                }
            })?;
            print_one(json, summary, |s| {
                format!(
                    "Found emails for {} out of {} voters ({})",
                    s.found, s.voters, s.output
                )
            })?;
        }
        Commands::VoterCase { voters } => {
            let voters = arg_or_prompt(voters.as_deref(), "Enter the voters.yaml location")?;
            let ctx = ReportContext::new(load_config(cli.config.as_deref())?, ApiUse::Required)?;
            let listed = load_voters(&ctx, &voters)?;
            let mismatches: Vec<CaseMismatch> = voter_case_mismatches(ctx.api()?, &listed)
                .into_iter()
                .map(|(canonical, listed)| CaseMismatch { canonical, listed })
                .collect();
            print_out(cli.json, &mismatches, |m| {
                format!("{} {}", m.canonical, m.listed)
            })?;
        }
        Commands::Sigs { command } => {
            let ctx = ReportContext::new(load_config(cli.config.as_deref())?, ApiUse::None)?;
            let registry: Registry = ctx.fetcher.yaml(&ctx.config.sources.sigs)?;
            match command {
                SigsCommands::List => {
                    let names: Vec<GroupName> = group_names(&registry)
                        .into_iter()
                        .map(|(kind, name)| GroupName { kind, name })
                        .collect();
                    print_out(cli.json, &names, |g| {
                        format!("{}\t{}", g.kind.to_uppercase(), g.name)
                    })?;
                }
                SigsCommands::Leaders => {
                    let groups = leaders(&registry);
                    print_out(cli.json, &groups, |g| {
                        let mut lines = vec![format!("{} {}:", g.kind.to_uppercase(), g.name)];
                        for c in &g.chairs {
                            lines.push(format!(
                                "{}, {}, {}",
                                c.name,
                                c.github,
                                c.company.as_deref().unwrap_or("")
                            ));
                        }
                        lines.join("\n")
                    })?;
                }
                SigsCommands::Meetings => {
                    let groups = meetings(&registry);
                    print_out(cli.json, &groups, |g| {
                        let mut lines = vec![format!("{} {}:", g.kind.to_uppercase(), g.name)];
                        for m in &g.meetings {
                            lines.push(format!(
                                "{} {} {} {} {}",
                                m.description, m.day, m.time, m.tz, m.frequency
                            ));
                        }
                        lines.join("\n")
                    })?;
                }
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
