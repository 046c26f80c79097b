pub mod extract;
pub mod schema;
pub mod update;

/// Output flavour for run summaries.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
