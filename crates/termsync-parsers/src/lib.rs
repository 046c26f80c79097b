//! Discovery and loading of message declaration files.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use termsync_core::{Result, TermsyncError};
use termsync_domain::{
    ExtractedMessage, ExtractedMessages, MessageDeclaration, MessageText, NamespacedDeclarations,
};
use walkdir::WalkDir;

/// Walk `root` and return every file whose name matches `pattern`, sorted.
pub fn discover_declaration_files(root: &Path, pattern: &Regex) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(TermsyncError::load(root, "source root is not a directory").into());
    }
    let mut out: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| pattern.is_match(name))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();
    out.sort();
    tracing::debug!(event = "declarations_discovered", root = %root.display(), count = out.len());
    Ok(out)
}

/// Parse one declaration file and flatten it into extracted messages.
pub fn load_declarations(path: &Path) -> Result<ExtractedMessages> {
    let text = std::fs::read_to_string(path).map_err(|e| TermsyncError::load(path, e))?;
    let value = parse_document(path, &text)?;
    let (namespace, table) = split_table(path, value)?;

    let mut out = ExtractedMessages::new();
    for decl in table.into_values() {
        let id = match namespace.as_deref() {
            Some(ns) => format!("{ns}.{}", decl.id),
            None => decl.id.clone(),
        };
        flatten_into(&mut out, &id, decl);
    }
    Ok(out)
}

fn parse_document(path: &Path, text: &str) -> Result<Value> {
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    let parsed = if is_toml {
        toml::from_str::<Value>(text).map_err(|e| TermsyncError::load(path, e))
    } else {
        serde_json::from_str::<Value>(text).map_err(|e| TermsyncError::load(path, e))
    };
    Ok(parsed?)
}

type DeclarationTable = BTreeMap<String, MessageDeclaration>;

fn split_table(path: &Path, value: Value) -> Result<(Option<String>, DeclarationTable)> {
    let Value::Object(obj) = &value else {
        return Err(TermsyncError::load(path, "declaration file must contain a table").into());
    };
    if obj.contains_key("namespace") {
        let ns: NamespacedDeclarations =
            serde_json::from_value(value).map_err(|e| TermsyncError::load(path, e))?;
        Ok((Some(ns.namespace), ns.messages))
    } else {
        let table: DeclarationTable =
            serde_json::from_value(value).map_err(|e| TermsyncError::load(path, e))?;
        Ok((None, table))
    }
}

/// Lift one declaration into flat entries; plural variants become `<id>_<category>`.
pub fn flatten_into(out: &mut ExtractedMessages, id: &str, decl: MessageDeclaration) {
    match decl.message {
        MessageText::Plain(text) => {
            out.insert(id.to_string(), ExtractedMessage::new(text, decl.description));
        }
        MessageText::Plural(forms) => {
            for (category, text) in forms.iter() {
                out.insert(
                    format!("{id}_{}", category.as_str()),
                    ExtractedMessage::new(text, decl.description.clone()),
                );
            }
        }
    }
}

/// Load every file and union the results. Later files win on id collision.
pub fn merge_all_declarations(paths: &[PathBuf]) -> Result<ExtractedMessages> {
    let mut merged = ExtractedMessages::new();
    for path in paths {
        let messages = load_declarations(path)?;
        tracing::debug!(event = "declarations_loaded", path = %path.display(), count = messages.len());
        for (id, msg) in messages {
            if merged.contains_key(&id) {
                tracing::warn!(event = "declaration_id_collision", id = %id, path = %path.display());
            }
            merged.insert(id, msg);
        }
    }
    Ok(merged)
}
