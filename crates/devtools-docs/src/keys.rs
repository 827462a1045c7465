//! # Recognized Configuration Keys
//!
//! The eight Doxygen settings the build driver reads, prompts for, and
//! rewrites. Every other key in a configuration file is passed through
//! untouched.

use std::fmt;

/// One of the recognized Doxygen configuration keys.
///
/// Variants are declared in key-name order so the derived `Ord` matches
/// lexicographic order of [`ConfigKey::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigKey {
    GenerateHtml,
    GenerateLatex,
    GenerateRtf,
    Input,
    OutputDirectory,
    ProjectName,
    ProjectNumber,
    StripFromPath,
}

impl ConfigKey {
    /// All recognized keys, in key-name order.
    pub const ALL: [ConfigKey; 8] = [
        ConfigKey::GenerateHtml,
        ConfigKey::GenerateLatex,
        ConfigKey::GenerateRtf,
        ConfigKey::Input,
        ConfigKey::OutputDirectory,
        ConfigKey::ProjectName,
        ConfigKey::ProjectNumber,
        ConfigKey::StripFromPath,
    ];

    /// Name as written in a Doxygen configuration file.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::GenerateHtml => "GENERATE_HTML",
            ConfigKey::GenerateLatex => "GENERATE_LATEX",
            ConfigKey::GenerateRtf => "GENERATE_RTF",
            ConfigKey::Input => "INPUT",
            ConfigKey::OutputDirectory => "OUTPUT_DIRECTORY",
            ConfigKey::ProjectName => "PROJECT_NAME",
            ConfigKey::ProjectNumber => "PROJECT_NUMBER",
            ConfigKey::StripFromPath => "STRIP_FROM_PATH",
        }
    }

    /// Look up a key by its configuration-file name. Matching is exact.
    pub fn from_name(name: &str) -> Option<ConfigKey> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Whether the user is asked for this key on a fresh run.
    ///
    /// `STRIP_FROM_PATH` is always derived from `OUTPUT_DIRECTORY`.
    pub fn is_prompted(self) -> bool {
        self != ConfigKey::StripFromPath
    }

    /// Keys asked for on a fresh run, in descending key-name order.
    pub fn prompt_order() -> impl Iterator<Item = ConfigKey> {
        Self::ALL.into_iter().rev().filter(|key| key.is_prompted())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
