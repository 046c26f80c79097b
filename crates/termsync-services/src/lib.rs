//! The two batch pipelines over the term registry.
//! Reconciliation functions are pure; file access lives in `store` and in the
//! `run_*` entrypoints used by the CLI.

pub mod extract;
pub mod store;
pub mod update;

pub use extract::{
    build_registry, bump_version, diff_against_registry, run_extract, ExtractReport,
};
pub use termsync_core::{is_cancelled, Result, TermsyncError};
pub use update::{
    check_staleness, confirm_overwrite, merge_translations, reconcile_language, run_update,
    update_language, AssumeYes, Confirm, SortedTranslations, Translations, UpdateReport,
    VERSION_KEY,
};
