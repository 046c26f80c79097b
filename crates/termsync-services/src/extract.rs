use crate::{store, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;
use termsync_config::Settings;
use termsync_domain::{
    ExtractSummary, ExtractedMessages, Term, TermMap, TermRegistry, TermStatus, SCHEMA_VERSION,
};

/// Classify every id in the union of `registry` and `extracted`.
///
/// Only the message text is compared; a description change alone keeps the
/// term `unchanged` but still carries the new description.
pub fn diff_against_registry(registry: &TermRegistry, extracted: &ExtractedMessages) -> TermMap {
    let ids: BTreeSet<&String> = registry.terms.keys().chain(extracted.keys()).collect();
    let mut out = TermMap::new();
    for id in ids {
        let term = match (registry.terms.get(id), extracted.get(id)) {
            (None, Some(new)) => Term::added(new.message.clone(), new.description.clone()),
            (Some(old), None) => Term::removed(old.message.clone(), old.description.clone()),
            (Some(old), Some(new)) if old.message != new.message => Term::updated(
                new.message.clone(),
                old.message.clone(),
                new.description.clone(),
            ),
            (Some(_), Some(new)) => Term::unchanged(new.message.clone(), new.description.clone()),
            (None, None) => continue,
        };
        out.insert(id.clone(), term);
    }
    out
}

/// Next registry version: previous + 1, with absent or unparseable input read as 0.
pub fn bump_version(previous: Option<&str>) -> String {
    let prev = previous
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);
    prev.saturating_add(1).to_string()
}

/// New registry snapshot for `extracted`. The version is bumped on every run,
/// whether or not any term changed.
pub fn build_registry(previous: &TermRegistry, extracted: &ExtractedMessages) -> TermRegistry {
    TermRegistry {
        version: bump_version(Some(previous.version.as_str())),
        terms: diff_against_registry(previous, extracted),
    }
}

#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub files: Vec<PathBuf>,
    pub extracted: ExtractedMessages,
    pub registry: TermRegistry,
    pub summary: ExtractSummary,
}

pub fn summarize(
    files: usize,
    extracted: &ExtractedMessages,
    registry: &TermRegistry,
    registry_path: &std::path::Path,
) -> ExtractSummary {
    ExtractSummary {
        schema_version: SCHEMA_VERSION,
        files,
        extracted: extracted.len(),
        added: registry.count(TermStatus::Added),
        updated: registry.count(TermStatus::Updated),
        removed: registry.count(TermStatus::Removed),
        unchanged: registry.count(TermStatus::Unchanged),
        version: registry.version.clone(),
        registry: registry_path.display().to_string(),
    }
}

/// Scan declarations, diff against the persisted registry and overwrite it.
/// Nothing is written if any declaration fails to load.
pub fn run_extract(settings: &Settings) -> Result<ExtractReport> {
    let files = termsync_parsers::discover_declaration_files(
        &settings.source_root,
        &settings.messages_pattern,
    )?;
    let extracted = termsync_parsers::merge_all_declarations(&files)?;

    let previous = store::load_registry_or_default(&settings.registry_path);
    let registry = build_registry(&previous.registry, &extracted);
    store::save_registry(&settings.registry_path, &registry)?;

    let summary = summarize(files.len(), &extracted, &registry, &settings.registry_path);
    tracing::info!(
        event = "extract_done",
        files = summary.files,
        extracted = summary.extracted,
        added = summary.added,
        updated = summary.updated,
        removed = summary.removed,
        unchanged = summary.unchanged,
        version = %summary.version
    );
    Ok(ExtractReport {
        files,
        extracted,
        registry,
        summary,
    })
}
