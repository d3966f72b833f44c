//! INI-style configuration files
//!
//! Used for the repository's `.git/config` and, read-only, for the global
//! `~/.gitconfig` when looking up the author identity. Sections and keys keep
//! their file order so that a parse/serialize cycle preserves entries we do not
//! understand.

use crate::{Error, Result};
use derive_new::new;
use std::path::{Path, PathBuf};

/// `[section]` or `[section "subsection"]`
const SECTION_REGEX: &str = r#"^\[\s*([^\]]+?)\s*\]$"#;

/// `key = value`, the value running to the end of the line
const ENTRY_REGEX: &str = r"^([A-Za-z][A-Za-z0-9-]*)\s*(?:=\s*(.*))?$";

const DEFAULT_NAME: &str = "Unknown User";
const DEFAULT_EMAIL: &str = "unknown@example.com";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniFile {
    pub fn parse(content: &str) -> Result<Self> {
        let section_regex = regex::Regex::new(SECTION_REGEX)?;
        let entry_regex = regex::Regex::new(ENTRY_REGEX)?;

        let mut ini = IniFile::default();
        let mut current: Option<String> = None;

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(caps) = section_regex.captures(line) {
                let name = caps[1].to_string();
                ini.section_mut(&name);
                current = Some(name);
                continue;
            }

            let section = current
                .as_deref()
                .ok_or_else(|| Error::Config(format!("line {}: entry outside of a section", number + 1)))?;
            let caps = entry_regex
                .captures(line)
                .ok_or_else(|| Error::Config(format!("line {}: cannot parse {line:?}", number + 1)))?;

            // a bare key is a boolean switch
            let value = caps
                .get(2)
                .map(|value| value.as_str().trim().to_string())
                .unwrap_or_else(|| "true".to_string());
            ini.set(section, &caps[1].to_ascii_lowercase(), value);
        }

        Ok(ini)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .and_then(|(_, entries)| entries.iter().find(|(k, _)| k == key))
            .map(|(_, value)| value.as_str())
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        self.get(section, key)
            .map(|value| match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" | "" => Ok(false),
                other => Err(Error::Config(format!(
                    "{section}.{key}: expected a boolean, found {other:?}"
                ))),
            })
            .transpose()
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let value = value.into();
        let entries = self.section_mut(section);

        match entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => entries.push((key.to_string(), value)),
        }
    }

    fn section_mut(&mut self, section: &str) -> &mut Vec<(String, String)> {
        let position = match self.sections.iter().position(|(name, _)| name == section) {
            Some(position) => position,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                self.sections.len() - 1
            }
        };

        &mut self.sections[position].1
    }

    pub fn serialize(&self) -> String {
        let mut content = String::new();

        for (section, entries) in &self.sections {
            content.push_str(&format!("[{section}]\n"));
            for (key, value) in entries {
                content.push_str(&format!("\t{key} = {value}\n"));
            }
        }

        content
    }
}

/// The `[core]` settings this implementation understands, on top of the raw
/// file they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub repository_format_version: u32,
    pub file_mode: bool,
    pub bare: bool,
    raw: IniFile,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        let mut raw = IniFile::default();
        raw.set("core", "repositoryformatversion", "0");
        raw.set("core", "filemode", "false");
        raw.set("core", "bare", "false");

        RepositoryConfig {
            repository_format_version: 0,
            file_mode: false,
            bare: false,
            raw,
        }
    }
}

impl RepositoryConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let raw = IniFile::parse(content)?;

        let repository_format_version = match raw.get("core", "repositoryformatversion") {
            Some(version) => version.parse::<u32>().map_err(|_| {
                Error::Config(format!("core.repositoryformatversion: {version:?} is not a number"))
            })?,
            None => 0,
        };
        let file_mode = raw.get_bool("core", "filemode")?.unwrap_or(false);
        let bare = raw.get_bool("core", "bare")?.unwrap_or(false);

        Ok(RepositoryConfig {
            repository_format_version,
            file_mode,
            bare,
            raw,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn serialize(&self) -> String {
        let mut raw = self.raw.clone();
        raw.set(
            "core",
            "repositoryformatversion",
            self.repository_format_version.to_string(),
        );
        raw.set("core", "filemode", self.file_mode.to_string());
        raw.set("core", "bare", self.bare.to_string());

        raw.serialize()
    }

    pub fn raw(&self) -> &IniFile {
        &self.raw
    }
}

/// `Name <email>` as written in author, committer and tagger lines.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Identity {
    name: String,
    email: String,
}

impl Identity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Environment first, then the `[user]` section of the global config
    /// files, then a placeholder.
    pub fn load() -> Self {
        let from_env = |key: &str| std::env::var(key).ok().filter(|value| !value.is_empty());
        let global = global_config_paths()
            .into_iter()
            .filter(|path| path.is_file())
            .find_map(|path| match IniFile::parse(&std::fs::read_to_string(&path).ok()?) {
                Ok(ini) => Some(ini),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "ignoring unreadable config");
                    None
                }
            })
            .unwrap_or_default();

        let name = from_env("GIT_AUTHOR_NAME")
            .or_else(|| global.get("user", "name").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let email = from_env("GIT_AUTHOR_EMAIL")
            .or_else(|| global.get("user", "email").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_EMAIL.to_string());

        Identity { name, email }
    }
}

fn global_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => paths.push(PathBuf::from(xdg).join("git").join("config")),
        _ => {
            if let Some(home) = std::env::var_os("HOME") {
                paths.push(PathBuf::from(home).join(".config").join("git").join("config"));
            }
        }
    }
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".gitconfig"));
    }

    paths
}

impl TryFrom<&str> for Identity {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let invalid = || Error::MalformedObject(format!("invalid identity {value:?}"));

        let (name, rest) = value.split_once('<').ok_or_else(invalid)?;
        let email = rest.strip_suffix('>').ok_or_else(invalid)?;

        Ok(Identity {
            name: name.trim().to_string(),
            email: email.to_string(),
        })
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
