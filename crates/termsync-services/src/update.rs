use crate::{store, Result};
use indexmap::IndexMap;
use termsync_config::Settings;
use termsync_core::TermsyncError;
use termsync_domain::{
    LanguageSummary, TermRegistry, TermStatus, UpdateOutcome, UpdateSummary, SCHEMA_VERSION,
};

/// Reserved translation-file key holding the registry version last reconciled.
pub const VERSION_KEY: &str = "[VERSION]";
pub const NEW_PREFIX: &str = "[NEW]";
pub const UPDATED_PREFIX: &str = "[UPDATED]";
pub const REMOVED_PREFIX: &str = "[REMOVED]";

/// Flat, order-preserving id -> text mapping as stored in `<lang>.json`.
pub type Translations = IndexMap<String, String>;

/// Reconciled entries split by the status that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedTranslations {
    pub added: Translations,
    pub updated: Translations,
    pub unchanged: Translations,
    pub removed: Translations,
}

/// Operator consent capability; the CLI asks on the terminal, tests script it.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Consents to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Sort every registry term into exactly one bucket.
///
/// In `auto_mode` new and updated entries take the source text directly.
/// Otherwise they are flagged (`[NEW]id`, `[UPDATED]id`) for a translator.
/// Removed terms are always flagged; a removed term without an existing
/// translation renders as `[undefined]`.
pub fn reconcile_language(
    registry: &TermRegistry,
    existing: &Translations,
    auto_mode: bool,
) -> SortedTranslations {
    let mut sorted = SortedTranslations::default();
    for (id, term) in &registry.terms {
        let current = existing.get(id);
        match (term.status, current) {
            (TermStatus::Removed, _) => {
                let shown = current.map(String::as_str).unwrap_or("undefined");
                sorted
                    .removed
                    .insert(format!("{REMOVED_PREFIX}{id}"), format!("[{shown}]"));
            }
            (TermStatus::Added, _) | (_, None) => {
                if auto_mode {
                    sorted.added.insert(id.clone(), term.message.clone());
                } else {
                    sorted
                        .added
                        .insert(format!("{NEW_PREFIX}{id}"), format!("[{}]", term.message));
                }
            }
            (TermStatus::Updated, Some(current)) => {
                if auto_mode {
                    sorted.updated.insert(id.clone(), term.message.clone());
                } else {
                    sorted.updated.insert(
                        format!("{UPDATED_PREFIX}{id}"),
                        format!("{current} [{}]", term.message),
                    );
                }
            }
            (TermStatus::Unchanged, Some(current)) => {
                sorted.unchanged.insert(id.clone(), current.clone());
            }
        }
    }
    sorted
}

/// True when the file was already reconciled against `registry_version`.
pub fn check_staleness(registry_version: &str, translations: &Translations) -> bool {
    translations.get(VERSION_KEY).map(String::as_str) == Some(registry_version)
}

/// Ask before re-reconciling an up-to-date file; declining is a cancellation.
pub fn confirm_overwrite(confirm: &mut dyn Confirm, language: &str, version: &str) -> Result<()> {
    let prompt = format!(
        "The {language} translations are already at version {version}. \
         Updating again may discard manual translations. Continue?"
    );
    if confirm.confirm(&prompt) {
        Ok(())
    } else {
        Err(TermsyncError::Cancelled {
            language: language.to_string(),
        }
        .into())
    }
}

/// File body: version first, then added, updated and unchanged entries.
/// Removed entries are reported but never written back.
pub fn merge_translations(sorted: &SortedTranslations, version: &str) -> Translations {
    let mut merged = Translations::with_capacity(
        1 + sorted.added.len() + sorted.updated.len() + sorted.unchanged.len(),
    );
    merged.insert(VERSION_KEY.to_string(), version.to_string());
    for bucket in [&sorted.added, &sorted.updated, &sorted.unchanged] {
        for (k, v) in bucket {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged
}

/// Load, check staleness, maybe confirm, reconcile and persist one language.
pub fn update_language(
    settings: &Settings,
    registry: &TermRegistry,
    language: &str,
    confirm: &mut dyn Confirm,
) -> Result<LanguageSummary> {
    let path = settings.translation_file(language);
    let auto_mode = settings.is_default_language(language);
    let existing = store::load_translations(&path)?;

    if check_staleness(&registry.version, &existing) && !auto_mode {
        tracing::debug!(event = "translations_current", language = language, version = %registry.version);
        confirm_overwrite(confirm, language, &registry.version)?;
    }

    let sorted = reconcile_language(registry, &existing, auto_mode);
    let merged = merge_translations(&sorted, &registry.version);
    store::save_translations(&path, &merged)?;

    tracing::info!(
        event = "language_updated",
        language = language,
        auto = auto_mode,
        added = sorted.added.len(),
        updated = sorted.updated.len(),
        unchanged = sorted.unchanged.len(),
        removed = sorted.removed.len()
    );
    Ok(LanguageSummary {
        language: language.to_string(),
        auto: auto_mode,
        added: sorted.added.len(),
        updated: sorted.updated.len(),
        unchanged: sorted.unchanged.len(),
        removed: sorted.removed.len(),
        outcome: UpdateOutcome::Updated,
        path: path.display().to_string(),
        error: None,
    })
}

#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub summary: UpdateSummary,
}

impl UpdateReport {
    pub fn has_failures(&self) -> bool {
        self.summary
            .languages
            .iter()
            .any(|l| l.outcome == UpdateOutcome::Failed)
    }
}

/// Update every requested language (all configured ones when `only` is empty).
/// Failures and cancellations are recorded per language; the loop carries on.
pub fn run_update(
    settings: &Settings,
    only: &[String],
    confirm: &mut dyn Confirm,
) -> Result<UpdateReport> {
    for lang in only {
        if !settings.languages.contains(lang) {
            return Err(TermsyncError::Invalid(format!(
                "language '{lang}' is not configured (known: {})",
                settings.languages.join(", ")
            ))
            .into());
        }
    }
    let registry = store::load_registry(&settings.registry_path)?;

    let mut languages = Vec::new();
    for lang in settings
        .languages
        .iter()
        .filter(|l| only.is_empty() || only.contains(l))
    {
        let summary = match update_language(settings, &registry, lang, confirm) {
            Ok(s) => s,
            Err(err) => {
                let outcome = if crate::is_cancelled(&err) {
                    tracing::warn!(event = "language_cancelled", language = %lang);
                    UpdateOutcome::Cancelled
                } else {
                    tracing::error!(event = "language_failed", language = %lang, error = ?err);
                    UpdateOutcome::Failed
                };
                LanguageSummary {
                    language: lang.clone(),
                    auto: settings.is_default_language(lang),
                    added: 0,
                    updated: 0,
                    unchanged: 0,
                    removed: 0,
                    outcome,
                    path: settings.translation_file(lang).display().to_string(),
                    error: Some(err.to_string()),
                }
            }
        };
        languages.push(summary);
    }

    Ok(UpdateReport {
        summary: UpdateSummary {
            schema_version: SCHEMA_VERSION,
            version: registry.version,
            languages,
        },
    })
}
