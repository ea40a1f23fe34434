use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::{error::LintError, policy::LintPolicy, settings::ConfigProvider};

pub mod search;

pub use search::{project_base, ResolutionRequest, SearchContext};

/// Bare checker name, looked up on `PATH` when nothing else matches.
pub const CHECKER_NAME: &str = "phpcs";

/// Composer install location of the checker, relative to a candidate directory.
const VENDOR_BINARY: &str = "vendor/bin/phpcs";

/// Where a resolved value came from, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Config,
    Invocation,
    File,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "lint config",
            Self::Invocation => "command option",
            Self::File => "file on disk",
            Self::Default => "built-in default",
        };
        f.write_str(label)
    }
}

/// A resolved binary path or standard together with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub value: String,
    pub source: Source,
}

impl Resolution {
    fn new(value: impl Into<String>, source: Source) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}

/// Pick the coding standard handed to the checker.
///
/// Precedence: `lint.standard` config, then `requested` (the `--standard`
/// option), then the first ruleset file found on disk, then the policy default.
pub fn resolve_standard(
    config: &dyn ConfigProvider,
    requested: Option<&str>,
    context: &SearchContext,
    policy: &LintPolicy,
) -> Result<Resolution, LintError> {
    if let Some(value) = non_blank(config.lint_value("standard")?) {
        debug!(standard = %value, "standard taken from lint config");
        return Ok(Resolution::new(value, Source::Config));
    }

    if let Some(value) = requested.filter(|v| !v.trim().is_empty()) {
        debug!(standard = %value, "standard taken from command option");
        return Ok(Resolution::new(value, Source::Invocation));
    }

    let request = ResolutionRequest::new(context.standard_dirs(), &policy.ruleset_files);
    if let Some(path) = request.first_existing() {
        debug!(standard = %path.display(), "standard taken from ruleset file");
        return Ok(Resolution::new(path.to_string_lossy(), Source::File));
    }

    debug!(standard = %policy.default_standard, "falling back to default standard");
    Ok(Resolution::new(policy.default_standard.clone(), Source::Default))
}

/// Pick the checker executable.
///
/// Precedence: `lint.<policy.binary_key>` config, then the first
/// `vendor/bin/phpcs` under the candidate directories, then bare `phpcs`.
pub fn resolve_binary(
    config: &dyn ConfigProvider,
    context: &SearchContext,
    policy: &LintPolicy,
) -> Result<Resolution, LintError> {
    if let Some(value) = non_blank(config.lint_value(&policy.binary_key)?) {
        debug!(binary = %value, key = %policy.binary_key, "checker taken from lint config");
        return Ok(Resolution::new(value, Source::Config));
    }

    let vendor = [VENDOR_BINARY.to_string()];
    let request = ResolutionRequest::new(context.binary_dirs(), &vendor);
    if let Some(path) = request.first_existing() {
        debug!(binary = %path.display(), "checker found in vendor directory");
        return Ok(Resolution::new(path.to_string_lossy(), Source::File));
    }

    debug!("no vendored checker found, relying on PATH");
    Ok(Resolution::new(CHECKER_NAME, Source::Default))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
