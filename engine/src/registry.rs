//! Template registry: which template renders to which output file.
//!
//! The registry is a declarative document (INI or TOML) whose top-level
//! sections each describe one template:
//!
//! ```ini
//! [kitty]
//! template_path = ~/.config/tincture/templates/kitty.conf
//! output_path = ~/.config/kitty/colors.conf
//! ```
//!
//! Sections that lack a field are skipped and reported; everything else in
//! the document still loads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{File, FileFormat, Map, Source, Value};

use crate::errors::RegistryError;
use crate::events::{Event, EventSink};

const TEMPLATE_PATH: &str = "template_path";
const OUTPUT_PATH: &str = "output_path";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
}

impl TemplateEntry {
    /// Build an entry, expanding `~` in both paths.
    pub fn new(
        name: impl Into<String>,
        template_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            name: name.into(),
            template_path: expand_home(template_path.as_ref()),
            output_path: expand_home(output_path.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    source: Option<PathBuf>,
    entries: Vec<TemplateEntry>,
    rejected: Vec<RegistryError>,
}

impl TemplateRegistry {
    pub fn from_entries(entries: Vec<TemplateEntry>) -> Self {
        Self {
            source: None,
            entries,
            rejected: Vec::new(),
        }
    }

    /// Load the registry at `path`.
    ///
    /// A missing or unreadable file and a document that cannot be parsed are
    /// fatal. Individual invalid sections are skipped, reported through
    /// `sink` and kept in [`TemplateRegistry::rejected`].
    ///
    /// Section names are taken verbatim, dots included. Field names match
    /// regardless of case. A section name that appears twice keeps its first
    /// position and the fields of its last definition.
    pub fn load(path: impl AsRef<Path>, sink: &dyn EventSink) -> Result<Self, RegistryError> {
        let path = expand_home(path.as_ref());

        if !path.is_file() || std::fs::File::open(&path).is_err() {
            return Err(RegistryError::ConfigNotFound { path });
        }

        // Collect the file source directly; building a `Config` would read
        // `[waybar.css]` as a nested `waybar.css` path.
        let format = registry_format(&path)?;
        let sections = File::new(&path.to_string_lossy(), format)
            .required(true)
            .collect()
            .map_err(|e| RegistryError::MalformedConfig {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let mut entries = Vec::with_capacity(sections.len());
        let mut rejected = Vec::new();

        for (section, value) in sections {
            match parse_section(&section, value) {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    let reason = match &error {
                        RegistryError::InvalidEntry { reason, .. } => reason.clone(),
                        other => other.to_string(),
                    };
                    sink.emit(Event::EntryRejected {
                        section: section.clone(),
                        reason,
                    });
                    rejected.push(error);
                }
            }
        }

        sink.emit(Event::RegistryLoaded {
            source: path.clone(),
            count: entries.len(),
        });

        Ok(Self {
            source: Some(path),
            entries,
            rejected,
        })
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn rejected(&self) -> &[RegistryError] {
        &self.rejected
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Output paths claimed by more than one entry, with the entry names.
    pub fn duplicate_outputs(&self) -> Vec<(PathBuf, Vec<String>)> {
        let mut by_output: BTreeMap<&Path, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            by_output
                .entry(entry.output_path.as_path())
                .or_default()
                .push(entry.name.clone());
        }

        by_output
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(path, names)| (path.to_path_buf(), names))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TemplateRegistry {
    type Item = &'a TemplateEntry;
    type IntoIter = std::slice::Iter<'a, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn registry_format(path: &Path) -> Result<FileFormat, RegistryError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ini") => Ok(FileFormat::Ini),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(RegistryError::MalformedConfig {
            path: path.to_path_buf(),
            reason: format!(
                "unsupported extension {:?}, expected 'ini' or 'toml'",
                other.unwrap_or("")
            ),
        }),
    }
}

fn parse_section(section: &str, value: Value) -> Result<TemplateEntry, RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidEntry {
        section: section.to_string(),
        reason,
    };

    let table = value
        .into_table()
        .map_err(|_| invalid("expected a section with template_path and output_path".into()))?;

    let template_path = required_string(&table, TEMPLATE_PATH).map_err(invalid)?;
    let output_path = required_string(&table, OUTPUT_PATH).map_err(invalid)?;

    Ok(TemplateEntry::new(section, template_path, output_path))
}

fn required_string(table: &Map<String, Value>, key: &str) -> Result<String, String> {
    let value = table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
        .ok_or_else(|| format!("missing required field '{key}'"))?;

    let text = value
        .clone()
        .into_string()
        .map_err(|_| format!("field '{key}' must be a string"))?;

    if text.trim().is_empty() {
        return Err(format!("field '{key}' is empty"));
    }
    Ok(text)
}

/// Replace a leading `~` with the user's home directory.
///
/// `~user` forms are left alone, as is everything when the home directory is
/// unknown.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use claims::{assert_matches, assert_ok};
    use std::io::Write;

    fn write_registry(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_ini_sections_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_registry(
            dir.path(),
            "config.ini",
            "[waybar]\n\
             template_path = /tmp/templates/waybar.css\n\
             output_path = /tmp/out/waybar.css\n\
             \n\
             [kitty]\n\
             template_path = /tmp/templates/kitty.conf\n\
             output_path = /tmp/out/kitty.conf\n",
        );

        let sink = RecordingSink::new();
        let registry = assert_ok!(TemplateRegistry::load(&path, &sink));

        let names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["waybar", "kitty"]);
        assert_eq!(
            registry.get("kitty").unwrap().output_path,
            PathBuf::from("/tmp/out/kitty.conf")
        );
        assert_eq!(registry.source(), Some(path.as_path()));
        assert_eq!(
            sink.events().last(),
            Some(&Event::RegistryLoaded {
                source: path.clone(),
                count: 2
            })
        );
    }

    #[test]
    fn test_load_toml_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_registry(
            dir.path(),
            "config.toml",
            "[gtk]\n\
             template_path = \"/tmp/gtk.css\"\n\
             output_path = \"/tmp/out/gtk.css\"\n",
        );

        let registry = assert_ok!(TemplateRegistry::load(&path, &crate::events::NullSink));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries()[0].template_path, PathBuf::from("/tmp/gtk.css"));
    }

    #[test]
    fn test_invalid_section_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_registry(
            dir.path(),
            "config.ini",
            "[broken]\n\
             template_path = /tmp/a\n\
             \n\
             [ok]\n\
             template_path = /tmp/b\n\
             output_path = /tmp/c\n",
        );

        let sink = RecordingSink::new();
        let registry = assert_ok!(TemplateRegistry::load(&path, &sink));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries()[0].name, "ok");
        assert_eq!(registry.rejected().len(), 1);
        assert!(matches!(
            &registry.rejected()[0],
            RegistryError::InvalidEntry { section, reason }
                if section == "broken" && reason.contains("output_path")
        ));
        assert!(sink.events().iter().any(|event| matches!(
            event,
            Event::EntryRejected { section, .. } if section == "broken"
        )));
    }

    #[test]
    fn test_dotted_ini_sections_stay_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_registry(
            dir.path(),
            "config.ini",
            "[kitty.conf]\n\
             template_path = /tmp/a1\n\
             output_path = /tmp/o1\n\
             \n\
             [kitty.theme]\n\
             template_path = /tmp/a2\n\
             output_path = /tmp/o2\n",
        );

        let sink = RecordingSink::new();
        let registry = assert_ok!(TemplateRegistry::load(&path, &sink));

        let names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["kitty.conf", "kitty.theme"]);
        assert!(registry.rejected().is_empty());
        assert_eq!(
            registry.get("kitty.theme").unwrap().output_path,
            PathBuf::from("/tmp/o2")
        );
    }

    #[test]
    fn test_field_names_ignore_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_registry(
            dir.path(),
            "config.ini",
            "[Kitty]\n\
             Template_Path = /tmp/a\n\
             OUTPUT_PATH = /tmp/o\n",
        );

        let registry = assert_ok!(TemplateRegistry::load(&path, &crate::events::NullSink));
        assert!(registry.rejected().is_empty());
        let entry = registry.get("Kitty").unwrap();
        assert_eq!(entry.template_path, PathBuf::from("/tmp/a"));
        assert_eq!(entry.output_path, PathBuf::from("/tmp/o"));
    }

    #[test]
    fn test_missing_registry_is_config_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.ini");

        let err = TemplateRegistry::load(&path, &crate::events::NullSink).unwrap_err();
        assert_eq!(err, RegistryError::ConfigNotFound { path });
    }

    #[test]
    fn test_unsupported_extension_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_registry(dir.path(), "config.yaml", "a: b\n");

        assert_matches!(
            TemplateRegistry::load(&path, &crate::events::NullSink),
            Err(RegistryError::MalformedConfig { .. })
        );
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home(Path::new("~")), home);
        assert_eq!(expand_home(Path::new("~/a/b")), home.join("a/b"));
        assert_eq!(expand_home(Path::new("/etc/x")), PathBuf::from("/etc/x"));
        assert_eq!(expand_home(Path::new("~other/x")), PathBuf::from("~other/x"));
    }

    #[test]
    fn test_duplicate_outputs() {
        let registry = TemplateRegistry::from_entries(vec![
            TemplateEntry::new("a", "/t/a", "/out/shared"),
            TemplateEntry::new("b", "/t/b", "/out/b"),
            TemplateEntry::new("c", "/t/c", "/out/shared"),
        ]);

        assert_eq!(
            registry.duplicate_outputs(),
            vec![(
                PathBuf::from("/out/shared"),
                vec!["a".to_string(), "c".to_string()]
            )]
        );
    }
}
