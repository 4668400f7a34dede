//! Subcommand implementations.
//!
//! Each command works against a [`ReportStore`] and writes its output to a
//! caller-supplied writer, so the same code serves the binary and tests.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use esg_model::{AnswerSet, QuestionnaireId, ReportId, ReportStatus, ReportUpdate};
use esg_session::{AnswerBinding, CurrentReportSession};
use esg_store::{
    FileMedium, ReportDirectory, ReportStore, StorageMedium, export_to_file, import_from_file,
};
use tracing::info;

use crate::cli::UpdateArgs;
use crate::config::Settings;

/// Open the file-backed store described by `settings`.
///
/// `data_dir` overrides the settings' data directory.
pub fn open_store(settings: &Settings, data_dir: Option<&Path>) -> Result<ReportStore<FileMedium>> {
    let dir = data_dir.map_or_else(|| settings.data_dir(), Path::to_path_buf);
    let medium = FileMedium::open(&dir)
        .with_context(|| format!("open data directory {}", dir.display()))?;
    let registry = settings.registry()?;
    info!(data_dir = %dir.display(), reports = registry.len(), "opened report store");
    Ok(ReportStore::new(medium, registry).with_key_prefix(settings.storage.key_prefix.clone()))
}

pub fn run_list<M: StorageMedium>(
    store: &ReportStore<M>,
    orphans: bool,
    out: &mut impl Write,
) -> Result<()> {
    let directory = ReportDirectory::new(store);
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Period", "Status", "Created"]);
    apply_table_style(&mut table);
    for report in directory.list() {
        table.add_row(vec![
            report.id.into_inner(),
            report.name,
            report.period,
            report.status.label().to_string(),
            report.date_created,
        ]);
    }
    writeln!(out, "{table}")?;

    if orphans {
        let orphaned = directory.orphaned_ids().context("list stored reports")?;
        if orphaned.is_empty() {
            writeln!(out, "No unregistered stored reports.")?;
        } else {
            writeln!(out, "Stored but not registered:")?;
            for id in orphaned {
                writeln!(out, "  {id}")?;
            }
        }
    }
    Ok(())
}

pub fn run_show<M: StorageMedium>(
    store: &ReportStore<M>,
    report: &str,
    out: &mut impl Write,
) -> Result<()> {
    let text = store.export_report_data(&ReportId::new(report))?;
    writeln!(out, "{text}")?;
    Ok(())
}

pub fn run_answers<M: StorageMedium>(
    store: &ReportStore<M>,
    report: &str,
    questionnaire: &str,
    out: &mut impl Write,
) -> Result<()> {
    let answers = store.get_questionnaire_answers(
        &ReportId::new(report),
        &QuestionnaireId::new(questionnaire),
    );
    let text = serde_json::to_string_pretty(&answers.into_json()).context("serialize answers")?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// Parse a JSON object into an answer set.
pub fn parse_answer_set(text: &str) -> Result<AnswerSet> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse answers JSON")?;
    match AnswerSet::from_json(value) {
        Some(answers) => Ok(answers),
        None => bail!("answers must be a JSON object"),
    }
}

/// Save answers the way a questionnaire page does: activate the report,
/// then write a full snapshot.
pub fn run_save_answers<M: StorageMedium>(
    store: &ReportStore<M>,
    report: &str,
    questionnaire: &str,
    input: &Path,
) -> Result<()> {
    let text = if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("read answers from stdin")?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?
    };
    let answers = parse_answer_set(&text)?;

    let mut session = CurrentReportSession::new(store);
    let mut binding = AnswerBinding::new(questionnaire);
    binding.activate(&mut session, &ReportId::new(report));
    binding
        .save(&session, answers)
        .with_context(|| format!("save answers for {report}/{questionnaire}"))?;
    Ok(())
}

pub fn run_update<M: StorageMedium>(store: &ReportStore<M>, args: &UpdateArgs) -> Result<()> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<ReportStatus>)
        .transpose()?;
    let update = ReportUpdate {
        name: args.name.clone(),
        date_created: args.date_created.clone(),
        period: args.period.clone(),
        status,
    };
    if update.is_empty() {
        bail!("nothing to update: pass at least one of --name, --period, --status, --date-created");
    }

    let id = ReportId::new(args.report.as_str());
    let mut session = CurrentReportSession::new(store);
    session.set_current_report(&id);
    session
        .update_report(&id, &update)
        .with_context(|| format!("update report {id}"))?;
    Ok(())
}

pub fn run_reset<M: StorageMedium>(store: &ReportStore<M>, report: &str) -> Result<()> {
    let id = ReportId::new(report);
    store
        .reset_report_data(&id)
        .with_context(|| format!("reset report {id}"))?;
    Ok(())
}

pub fn run_export<M: StorageMedium>(
    store: &ReportStore<M>,
    report: &str,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let id = ReportId::new(report);
    match output {
        Some(path) => export_to_file(store, &id, path)?,
        None => writeln!(out, "{}", store.export_report_data(&id)?)?,
    }
    Ok(())
}

/// Returns `false` if the backup was rejected.
pub fn run_import<M: StorageMedium>(
    store: &ReportStore<M>,
    report: &str,
    input: &Path,
) -> Result<bool> {
    Ok(import_from_file(store, &ReportId::new(report), input)?)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
