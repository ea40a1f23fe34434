pub mod checker;
pub mod error;
pub mod lint;
pub mod policy;
pub mod report;
pub mod resolver;
pub mod settings;

pub use checker::{CheckerOutput, CheckerRunner, ProcessRunner, ResolvedCommand};
pub use error::LintError;
pub use lint::{LintOptions, LintSummary, Linter, Plan};
pub use policy::{LintPolicy, MissingTarget, DEFAULT_STANDARD};
pub use report::{
    interpret, RecordingReporter, Reporter, Verdict, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use resolver::{
    resolve_binary, resolve_standard, Resolution, ResolutionRequest, SearchContext, Source,
};
pub use settings::{ConfigProvider, MapConfig, WpCliConfig};
