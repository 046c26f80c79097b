use super::OutputFormat;
use crate::confirm::PromptConfirm;
use crate::ui::{paint, RULE};
use color_eyre::eyre::eyre;
use owo_colors::OwoColorize;
use termsync_config::Settings;
use termsync_domain::{LanguageSummary, UpdateOutcome};
use termsync_services::{AssumeYes, Confirm};

pub fn run_update(
    settings: &Settings,
    languages: Vec<String>,
    assume_yes: bool,
    format: OutputFormat,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(
        event = "update_args",
        registry = %settings.registry_path.display(),
        translations_dir = %settings.translations_dir.display(),
        languages = ?languages,
        assume_yes = assume_yes
    );

    let mut confirm: Box<dyn Confirm> = if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::stdin())
    };
    let report = termsync_services::run_update(settings, &languages, confirm.as_mut())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&report.summary)?),
        OutputFormat::Text => {
            for lang in &report.summary.languages {
                print_language(lang, use_color);
            }
        }
    }

    let failed: Vec<&str> = report
        .summary
        .languages
        .iter()
        .filter(|l| l.outcome == UpdateOutcome::Failed)
        .map(|l| l.language.as_str())
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(eyre!("update failed for: {}", failed.join(", ")))
    }
}

fn print_language(l: &LanguageSummary, use_color: bool) {
    let name = paint(use_color, &l.language, |s| s.bold().to_string());
    match l.outcome {
        UpdateOutcome::Cancelled => {
            crate::ui_warn!(">> Update cancelled for {name}.");
            return;
        }
        UpdateOutcome::Failed => {
            crate::ui_err!(
                "Update failed for {name}: {}",
                l.error.as_deref().unwrap_or("unknown error")
            );
            return;
        }
        UpdateOutcome::Updated => {}
    }

    crate::ui_out!("\n{RULE}\n");
    crate::ui_out!(
        "Finished {}updating {name} translations\n",
        if l.auto { "auto " } else { "" }
    );
    crate::ui_out!(
        "{}",
        paint(use_color, format!("{} translations were added", l.added), |s| s
            .green()
            .to_string())
    );
    crate::ui_out!(
        "{}",
        paint(use_color, format!("{} translations were updated", l.updated), |s| s
            .yellow()
            .to_string())
    );
    crate::ui_out!(
        "{}",
        paint(use_color, format!("{} translations were removed", l.removed), |s| s
            .red()
            .to_string())
    );
    crate::ui_out!("{} translations were not changed", l.unchanged);
    if !l.auto && (l.added > 0 || l.updated > 0) {
        crate::ui_out!(
            "\n>> Be sure to check the new version of the {}.json file and update the translations",
            l.language
        );
    }
    crate::ui_out!("\n{RULE}\n");
}
