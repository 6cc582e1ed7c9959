// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dryad CLI entrypoint.
//!
//! Loads a JSON document of label paths and prints the assembled taxonomy as
//! an outline (or as a JSON snapshot with `--json`). `--usage <id>` instead
//! asks the remote label service how many collection entries use a label;
//! endpoints and the auth token come from `DRYAD_LABEL_ENDPOINT`,
//! `DRYAD_CASE_COUNT_ENDPOINT`, and `DRYAD_AUTH_TOKEN`.

use std::error::Error;

use dryad::format::paths::parse_label_paths;
use dryad::model::{subtree_ids, LabelId};
use dryad::render::render_outline;
use dryad::store::TreeState;
use dryad::sync::{LabelSyncClient, SyncConfig};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <paths.json> [--select <id>] [--expand <id>]... [--expand-all] [--json]\n  {program} --usage <label-id>\n\nThe paths document is a JSON array of label paths; each path is an array of\n{{\"id\", \"name\"}} records ordered leaf-first.\n\n--usage queries the remote label service configured via DRYAD_LABEL_ENDPOINT,\nDRYAD_CASE_COUNT_ENDPOINT and DRYAD_AUTH_TOKEN.\n\nSet DRYAD_LOG to control diagnostics (e.g. DRYAD_LOG=dryad=debug)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    paths_file: Option<String>,
    select: Option<String>,
    expand: Vec<String>,
    expand_all: bool,
    json: bool,
    usage: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--select" => {
                if options.select.is_some() {
                    return Err(());
                }
                options.select = Some(args.next().ok_or(())?);
            }
            "--expand" => {
                options.expand.push(args.next().ok_or(())?);
            }
            "--expand-all" => {
                if options.expand_all {
                    return Err(());
                }
                options.expand_all = true;
            }
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            "--usage" => {
                if options.usage.is_some() {
                    return Err(());
                }
                options.usage = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.paths_file.is_some() {
                    return Err(());
                }
                options.paths_file = Some(arg);
            }
        }
    }

    if options.expand_all && !options.expand.is_empty() {
        return Err(());
    }

    match (&options.paths_file, &options.usage) {
        (Some(_), Some(_)) | (None, None) => Err(()),
        _ => Ok(options),
    }
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    if let Some(raw_id) = options.usage {
        let config = SyncConfig::from_env()?;
        let client = LabelSyncClient::new(config);
        let id = LabelId::new(raw_id)?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let count = runtime.block_on(client.usage_count(&id))?;
        println!("{count}");
        return Ok(());
    }

    let paths_file = options.paths_file.expect("validated by parse_options");
    let text = std::fs::read_to_string(&paths_file)?;
    let paths = parse_label_paths(&text)?;
    let mut state = TreeState::from_paths(&paths);

    if options.expand_all {
        let all: std::collections::BTreeSet<LabelId> =
            state.roots().iter().flat_map(subtree_ids).collect();
        state.set_expanded(all);
    }
    for raw_id in &options.expand {
        state.toggle_expanded(&LabelId::new(raw_id)?);
    }
    if let Some(raw_id) = &options.select {
        state.select(Some(&LabelId::new(raw_id)?));
    }

    let snapshot = state.snapshot();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_outline(&snapshot));
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DRYAD_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "dryad".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        eprintln!("dryad: {err}");
        std::process::exit(1);
    }
}
