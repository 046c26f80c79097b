use super::OutputFormat;
use crate::ui::{paint, RULE};
use owo_colors::OwoColorize;
use termsync_config::Settings;
use termsync_domain::{descriptive_term, ExtractSummary, TermRegistry, TermStatus};

pub fn run_extract(
    settings: &Settings,
    format: OutputFormat,
    list: bool,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(
        event = "extract_args",
        source_root = %settings.source_root.display(),
        registry = %settings.registry_path.display(),
        pattern = %settings.messages_pattern.as_str()
    );

    let report = termsync_services::run_extract(settings)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&report.summary)?);
        }
        OutputFormat::Text => {
            if list {
                print_changes(&report.registry, use_color);
            }
            print_summary(&report.summary, use_color);
        }
    }
    Ok(())
}

fn print_changes(registry: &TermRegistry, use_color: bool) {
    for (id, term) in &registry.terms {
        let shown = descriptive_term(&term.message, term.description.as_deref());
        match term.status {
            TermStatus::Added => crate::ui_out!(
                "{} {id}: {shown}",
                paint(use_color, "+", |s| s.green().to_string())
            ),
            TermStatus::Removed => crate::ui_out!(
                "{} {id}: {shown}",
                paint(use_color, "-", |s| s.red().to_string())
            ),
            TermStatus::Updated => crate::ui_out!(
                "{} {id}: {shown} (was: {})",
                paint(use_color, "~", |s| s.yellow().to_string()),
                term.previous_message.as_deref().unwrap_or_default()
            ),
            TermStatus::Unchanged => {}
        }
    }
}

fn print_summary(s: &ExtractSummary, use_color: bool) {
    crate::ui_out!("\n{RULE}\n");
    crate::ui_out!(
        "{} terms extracted from {} file(s)\n",
        paint(use_color, s.extracted, |t| t.bold().to_string()),
        s.files
    );
    crate::ui_out!(
        "{}",
        paint(use_color, format!("{} terms added", s.added), |t| t.green().to_string())
    );
    crate::ui_out!(
        "{}",
        paint(use_color, format!("{} terms removed", s.removed), |t| t.red().to_string())
    );
    crate::ui_out!(
        "{}",
        paint(use_color, format!("{} terms changed", s.updated), |t| t.yellow().to_string())
    );
    crate::ui_out!("{} terms unchanged", s.unchanged);
    crate::ui_out!(
        "\n>> Generated file version {}",
        paint(use_color, &s.version, |t| t.underline().to_string())
    );
    crate::ui_out!("\n{RULE}\n");
    crate::ui_ok!("Terms saved to {}", s.registry);
}
