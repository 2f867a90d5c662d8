// Update command for rewriting pack.mcmeta across a batch of archives

use crate::cli::UpdateArgs;
use crate::commands::versions;
use crate::config;
use crate::constants;
use crate::pack::pipeline::unreadable;
use crate::pack::report::Summary;
use crate::pack::{
    BatchReport, ProcessResult, Rejection, RewriteOptions, UpdateSession, UploadedArchive,
    has_archive_extension,
};
use crate::pack_type::PackType;
use crate::ui;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// How many versions to suggest when the requested one is unknown
const SUGGESTIONS: usize = 5;

#[derive(Debug, Serialize)]
struct Target {
    pack_type: PackType,
    format_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateOutput<'a> {
    schema_version: u32,
    target: Target,
    summary: String,
    counts: Summary,
    out_dir: String,
    results: &'a [ProcessResult],
}

pub async fn update(args: UpdateArgs, offline: bool) -> anyhow::Result<i32> {
    let session = select_archives(&args.files, args.pack_type)?;

    let target = resolve_target(&args, offline).await?;
    let options = RewriteOptions {
        pack_type: args.pack_type,
        format_id: target.format_id,
        clear_description: args.clear_description,
    };

    let mut report = run_batch(session, &options, args.json);

    let out_dir = args.out_dir.clone().unwrap_or_else(config::out_dir);
    refuse_overwriting_inputs(&args.files, &out_dir, &report)?;
    let written = report.save_all(&out_dir);
    debug!("Wrote {} archives to {}", written.len(), out_dir.display());

    let counts = report.counts();
    let exit_code = if counts.failed == 0 {
        0
    } else if counts.succeeded == 0 {
        2
    } else {
        1
    };

    if args.json {
        let output = UpdateOutput {
            schema_version: constants::SCHEMA_VERSION,
            target,
            summary: report.summary(),
            counts,
            out_dir: out_dir.display().to_string(),
            results: report.results(),
        };
        ui::raw(&serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report, &target);
        if !written.is_empty() {
            ui::action(&format!(
                "Wrote {} archive{} to {}",
                written.len(),
                if written.len() == 1 { "" } else { "s" },
                out_dir.display()
            ));
        }
        ui::status("Summary", &report.summary());
    }

    Ok(exit_code)
}

/// Filter and read the inputs; files that cannot be read stay selected as failures
fn select_archives(files: &[PathBuf], pack_type: PackType) -> anyhow::Result<UpdateSession> {
    let mut session = UpdateSession::new();

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if !has_archive_extension(&file_name) {
            ui::warning(&format!("Skipping {}: not a .zip file", file_name));
            continue;
        }

        let archive = match UploadedArchive::from_path(path) {
            Ok(archive) => archive,
            Err(e) => {
                session.add_unreadable(unreadable(&file_name, pack_type, &e));
                continue;
            }
        };

        match session.add(archive) {
            Ok(()) => {}
            Err(Rejection::Duplicate(name)) => debug!("Ignoring duplicate {}", name),
            Err(Rejection::NotAnArchive(name)) => {
                ui::warning(&format!("Skipping {}: not a .zip file", name))
            }
        }
    }

    if session.is_empty() {
        anyhow::bail!("Please select one or more .zip files");
    }

    Ok(session)
}

/// Fail before writing anything if an output would land on one of the inputs
fn refuse_overwriting_inputs(
    files: &[PathBuf],
    out_dir: &Path,
    report: &BatchReport,
) -> anyhow::Result<()> {
    let inputs: HashSet<PathBuf> = files
        .iter()
        .filter_map(|path| fs::canonicalize(path).ok())
        .collect();

    for output in report.outputs() {
        if let Ok(target) = fs::canonicalize(out_dir.join(&output.file_name))
            && inputs.contains(&target)
        {
            anyhow::bail!(
                "Refusing to overwrite input file {}. Choose a different --out-dir",
                target.display()
            );
        }
    }

    Ok(())
}

/// Work out the pack_format to write
async fn resolve_target(args: &UpdateArgs, offline: bool) -> anyhow::Result<Target> {
    if let Some(format_id) = args.format {
        return Ok(Target {
            pack_type: args.pack_type,
            format_id,
            version: None,
        });
    }

    let catalog = versions::load(args.pack_type, offline, args.json).await;

    let option = match &args.version {
        Some(version) => catalog.find(version).ok_or_else(|| {
            let newest: Vec<&str> = catalog
                .options()
                .iter()
                .take(SUGGESTIONS)
                .map(|o| o.text.as_str())
                .collect();
            anyhow::anyhow!(
                "Unknown {} version '{}'. Newest available: {}",
                args.pack_type,
                version,
                newest.join(", ")
            )
        })?,
        None => catalog
            .newest()
            .ok_or_else(|| anyhow::anyhow!("No {} versions available", args.pack_type))?,
    };

    debug!(
        "Target {} {} -> pack_format {}",
        args.pack_type, option.text, option.format_id
    );

    Ok(Target {
        pack_type: args.pack_type,
        format_id: option.format_id,
        version: Some(option.text.clone()),
    })
}

fn run_batch(
    mut session: UpdateSession,
    options: &RewriteOptions,
    json: bool,
) -> BatchReport {
    let pb = (!json).then(|| ui::batch_bar(session.selected().len()));
    if let Some(pb) = &pb {
        pb.set_message("Updating");
    }

    let report = session
        .run(options, |result| {
            if let Some(pb) = &pb {
                pb.set_message(result.file_name.clone());
                pb.inc(1);
            }
        })
        .clone();

    if let Some(pb) = &pb {
        ui::clear_bar(pb);
    }

    report
}

fn print_report(report: &BatchReport, target: &Target) {
    let to = match &target.version {
        Some(version) => format!("{} (pack_format {})", version, target.format_id),
        None => format!("pack_format {}", target.format_id),
    };
    ui::header(&format!("Updating {} to {}", target.pack_type, to));

    for result in report.results() {
        if result.success {
            let from = result
                .original_format
                .map(|f| f.to_string())
                .unwrap_or_else(|| "?".to_string());
            ui::success(&format!(
                "{} {}",
                result.file_name,
                console::style(format!("{} -> {}", from, target.format_id)).dim()
            ));
            if let Some(saved_as) = &result.output_name
                && *saved_as != result.file_name
            {
                ui::dim(&format!("    saved as {}", saved_as));
            }
            if let Some(description) = &result.original_description {
                ui::dim(&format!("    {}", description));
            }
        } else {
            ui::failure(&format!(
                "{}: {}",
                result.file_name,
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }
}
