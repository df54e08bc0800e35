//! Resource manifest
//!
//! The manifest lists every file that goes into the resource archive, under a
//! single namespace prefix. It is derived from the source groups and their
//! compiled assets, followed by static stylesheets, so there is no second
//! hand-maintained catalog to drift out of sync.

use std::fmt::Write as _;

use super::source_group::CompiledAsset;

/// Preprocessing applied by the bundler to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preprocess {
    /// Strip insignificant whitespace from XML
    XmlStripBlanks,
}

impl Preprocess {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preprocess::XmlStripBlanks => "xml-stripblanks",
        }
    }
}

/// One file in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceManifestEntry {
    logical_path: String,
    file: String,
    compressed: bool,
    preprocess: Option<Preprocess>,
}

impl ResourceManifestEntry {
    /// A compiled UI definition: compressed, whitespace-stripped.
    pub fn compiled(logical_path: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            logical_path: logical_path.into(),
            file: file.into(),
            compressed: true,
            preprocess: Some(Preprocess::XmlStripBlanks),
        }
    }

    /// A static file stored as-is.
    pub fn raw(logical_path: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            logical_path: logical_path.into(),
            file: file.into(),
            compressed: false,
            preprocess: None,
        }
    }

    /// Path inside the resource namespace, relative to the prefix
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    /// File path relative to the bundler's source dir
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn preprocess(&self) -> Option<Preprocess> {
        self.preprocess
    }

    /// Alias is needed when the logical path is not the file path.
    pub fn alias(&self) -> Option<&str> {
        (self.logical_path != self.file).then_some(self.logical_path.as_str())
    }
}

/// Ordered manifest under one namespace prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceManifest {
    prefix: String,
    entries: Vec<ResourceManifestEntry>,
}

impl ResourceManifest {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: Vec::new(),
        }
    }

    /// Build the manifest: compiled assets first (group order, then source
    /// order), then stylesheets.
    ///
    /// `relative` maps an on-disk path to its path relative to the build dir.
    /// Stylesheets are `(logical name, relative file)` pairs.
    pub fn from_assets(
        prefix: impl Into<String>,
        assets: &[CompiledAsset],
        styles: &[(String, String)],
        relative: impl Fn(&CompiledAsset) -> String,
    ) -> Self {
        let mut manifest = Self::new(prefix);
        for asset in assets {
            manifest.push(ResourceManifestEntry::compiled(
                asset.logical_path(),
                relative(asset),
            ));
        }
        for (logical, file) in styles {
            manifest.push(ResourceManifestEntry::raw(logical.clone(), file.clone()));
        }
        manifest
    }

    pub fn push(&mut self, entry: ResourceManifestEntry) {
        self.entries.push(entry);
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn entries(&self) -> &[ResourceManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the bundler's XML descriptor format.
    ///
    /// Output is a pure function of the manifest so repeated builds produce
    /// identical descriptors.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str("<gresources>\n");
        let _ = writeln!(
            out,
            "  <gresource prefix=\"{}\">",
            escape_xml(&self.prefix)
        );
        for entry in &self.entries {
            out.push_str("    <file");
            if let Some(alias) = entry.alias() {
                let _ = write!(out, " alias=\"{}\"", escape_xml(alias));
            }
            if entry.compressed {
                out.push_str(" compressed=\"true\"");
            }
            if let Some(pre) = entry.preprocess {
                let _ = write!(out, " preprocess=\"{}\"", pre.as_str());
            }
            let _ = writeln!(out, ">{}</file>", escape_xml(&entry.file));
        }
        out.push_str("  </gresource>\n");
        out.push_str("</gresources>\n");
        out
    }
}

/// Escape text for XML attribute values and character data.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_xml_handles_all_specials() {
        assert_eq!(escape_xml(r#"a&b<c>"d"'e'"#), "a&amp;b&lt;c&gt;&quot;d&quot;&apos;e&apos;");
    }

    #[test]
    fn raw_entry_aliases_when_paths_differ() {
        let e = ResourceManifestEntry::raw("style.css", "css/style.css");
        assert_eq!(e.alias(), Some("style.css"));

        let e = ResourceManifestEntry::compiled("ui/a/b.ui", "ui/a/b.ui");
        assert_eq!(e.alias(), None);
    }

    #[test]
    fn xml_contains_prefix_and_flags() {
        let mut m = ResourceManifest::new("/org/example/App");
        m.push(ResourceManifestEntry::compiled("ui/w/a.ui", "ui/w/a.ui"));
        m.push(ResourceManifestEntry::raw("style.css", "css/style.css"));

        let xml = m.to_xml();
        assert!(xml.contains(r#"<gresource prefix="/org/example/App">"#));
        assert!(xml.contains(
            r#"<file compressed="true" preprocess="xml-stripblanks">ui/w/a.ui</file>"#
        ));
        assert!(xml.contains(r#"<file alias="style.css">css/style.css</file>"#));
    }
}
