use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    checker::{CheckerRunner, ResolvedCommand},
    error::LintError,
    policy::{LintPolicy, MissingTarget},
    report::{interpret, Reporter, Verdict, SUCCESS_MESSAGE},
    resolver::{resolve_binary, resolve_standard, Resolution, SearchContext},
    settings::ConfigProvider,
};

/// Per-invocation options supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Overrides on-disk rulesets and the default, but not `lint.standard`.
    pub standard: Option<String>,
    /// Echo the composed command before running it.
    pub debug: bool,
}

/// Binary and standard picked for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub binary: Resolution,
    pub standard: Resolution,
}

/// Returned when the checker accepted the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSummary {
    pub command: ResolvedCommand,
    pub relayed: usize,
}

/// Resolves the checker setup and runs it once against a target.
pub struct Linter<'a> {
    config: &'a dyn ConfigProvider,
    runner: &'a dyn CheckerRunner,
    policy: LintPolicy,
    context: SearchContext,
}

impl<'a> Linter<'a> {
    pub fn new(
        config: &'a dyn ConfigProvider,
        runner: &'a dyn CheckerRunner,
        policy: LintPolicy,
        context: SearchContext,
    ) -> Self {
        Self {
            config,
            runner,
            policy,
            context,
        }
    }

    pub fn policy(&self) -> &LintPolicy {
        &self.policy
    }

    /// Resolve binary and standard without running anything.
    pub fn plan(&self, options: &LintOptions) -> Result<Plan, LintError> {
        let binary = resolve_binary(self.config, &self.context, &self.policy)?;
        let standard = resolve_standard(
            self.config,
            options.standard.as_deref(),
            &self.context,
            &self.policy,
        )?;
        if standard.value.trim().is_empty() {
            return Err(LintError::ConfigurationMissing);
        }
        debug!(
            binary = %binary.value,
            binary_source = %binary.source,
            standard = %standard.value,
            standard_source = %standard.source,
            "resolved checker setup"
        );
        Ok(Plan { binary, standard })
    }

    /// Lint the first of `targets`.
    ///
    /// Checker output lines go to `reporter.info` before the outcome is known;
    /// a clean run ends with `reporter.success`, everything else with `Err`.
    pub async fn run(
        &self,
        targets: &[PathBuf],
        options: &LintOptions,
        reporter: &mut dyn Reporter,
    ) -> Result<LintSummary, LintError> {
        let target = self.target(targets)?;
        if !target.exists() {
            return Err(LintError::NotFound { path: target });
        }

        let plan = self.plan(options)?;
        let command = ResolvedCommand::new(
            plan.binary.value,
            plan.standard.value,
            self.policy.extensions.clone(),
            target,
        );
        if options.debug {
            reporter.info(&format!("Running command: {command}"));
        }

        let output = self.runner.run(&command).await?;
        match interpret(&output) {
            Verdict::ToolError { messages } => Err(LintError::ExternalTool { messages }),
            Verdict::Violations { relay } => {
                relay.iter().for_each(|line| reporter.info(line));
                info!(code = ?output.code, "checker reported violations");
                Err(LintError::StyleViolation)
            }
            Verdict::Clean { relay } => {
                relay.iter().for_each(|line| reporter.info(line));
                reporter.success(SUCCESS_MESSAGE);
                Ok(LintSummary {
                    command,
                    relayed: relay.len(),
                })
            }
        }
    }

    fn target(&self, targets: &[PathBuf]) -> Result<PathBuf, LintError> {
        if let Some(first) = targets.first() {
            return Ok(first.clone());
        }
        match self.policy.missing_target {
            MissingTarget::Error => Err(LintError::Usage),
            MissingTarget::CurrentDir => self.context.cwd.clone().ok_or(LintError::Usage),
        }
    }
}
