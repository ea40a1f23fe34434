use serde::{Deserialize, Serialize};

/// Standard used when neither config, options nor a ruleset file name one.
pub const DEFAULT_STANDARD: &str = "WordPress-Core";

/// What to do when `lint` is invoked without a target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTarget {
    /// Stop with a usage error.
    Error,
    /// Lint the current working directory.
    CurrentDir,
}

/// Knobs that differ between the two supported lint behaviours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintPolicy {
    /// Ruleset filenames tried inside each candidate directory, in order.
    pub ruleset_files: Vec<String>,
    /// `lint.<key>` entry holding an explicit checker binary.
    pub binary_key: String,
    pub missing_target: MissingTarget,
    pub default_standard: String,
    /// Passed to the checker as `--extensions=<a,b>`.
    pub extensions: Vec<String>,
}

impl LintPolicy {
    /// Dotfile ruleset first, `lint.bin` for the binary, a target is required.
    pub fn classic() -> Self {
        Self {
            ruleset_files: vec![
                ".phpcs.ruleset.xml".into(),
                "phpcs.ruleset.xml".into(),
                "ruleset.xml".into(),
            ],
            binary_key: "bin".into(),
            missing_target: MissingTarget::Error,
            default_standard: DEFAULT_STANDARD.into(),
            extensions: vec!["php".into()],
        }
    }

    /// `phpcs.xml` first, `lint.phpcs` for the binary, no target means the cwd.
    pub fn modern() -> Self {
        Self {
            ruleset_files: vec![
                "phpcs.xml".into(),
                "phpcs.ruleset.xml".into(),
                "ruleset.xml".into(),
            ],
            binary_key: "phpcs".into(),
            missing_target: MissingTarget::CurrentDir,
            ..Self::classic()
        }
    }
}

impl Default for LintPolicy {
    fn default() -> Self {
        Self::classic()
    }
}
