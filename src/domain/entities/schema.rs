//! Settings schema derivation
//!
//! The schema template carries `@app_id@` and `@prefix@` placeholders. They
//! are substituted literally; nothing else in the template is interpreted.

use std::path::{Path, PathBuf};

/// Placeholder replaced with the application id
pub const APP_ID_TOKEN: &str = "@app_id@";

/// Placeholder replaced with the resource prefix
pub const PREFIX_TOKEN: &str = "@prefix@";

/// Replace every occurrence of each token, returning the text and the number
/// of replacements made.
///
/// Runs in a single pass over `text`: substituted values are never scanned
/// again. When tokens start at the same offset the earlier pair wins.
pub fn substitute(text: &str, pairs: &[(&str, &str)]) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut rest = text;
    loop {
        let next = pairs
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .filter_map(|(token, value)| rest.find(token).map(|at| (at, *token, *value)))
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, token, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + token.len()..];
                count += 1;
            }
            None => {
                out.push_str(rest);
                return (out, count);
            }
        }
    }
}

/// A derived schema, ready to be written and compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSchema {
    content: String,
    substitutions: usize,
}

impl DerivedSchema {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn substitutions(&self) -> usize {
        self.substitutions
    }

    /// The template had nothing to substitute.
    pub fn is_verbatim(&self) -> bool {
        self.substitutions == 0
    }
}

/// Substitute the app id and resource prefix into a schema template.
pub fn derive_schema(template: &str, app_id: &str, prefix: &str) -> DerivedSchema {
    let (content, substitutions) =
        substitute(template, &[(APP_ID_TOKEN, app_id), (PREFIX_TOKEN, prefix)]);
    DerivedSchema {
        content,
        substitutions,
    }
}

/// Schema file name: the template name with a trailing `.in` removed.
pub fn schema_file_name(template: &Path) -> String {
    let name = template
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".in") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name,
    }
}

/// The schema written and compiled under the build dir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaArtifact {
    /// Derived schema file
    pub path: PathBuf,
    /// Directory handed to the schema compiler
    pub dir: PathBuf,
    pub substitutions: usize,
}
