use crate::checker::CheckerOutput;

/// Marker the checker prints when it failed to run at all (bad standard, broken install).
pub const ERROR_MARKER: &str = "ERROR";

const ERROR_PREFIX: &str = "ERROR: ";

/// Printed when the checker exits cleanly.
pub const SUCCESS_MESSAGE: &str = "Good job! Your code follows the code style.";

/// Printed when the checker exits non-zero without reporting an `ERROR` line.
pub const FAILURE_MESSAGE: &str =
    "Sorry, but your code does not follow the code style. Please fix before commit.";

/// How a finished checker run should be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Exit status zero: `relay` holds lines to print before the success message.
    Clean { relay: Vec<String> },
    /// Non-zero exit: `relay` holds the violation report.
    Violations { relay: Vec<String> },
    /// The checker itself failed; each message is fatal.
    ToolError { messages: Vec<String> },
}

/// Classify checker output.
///
/// A lone line without `ERROR` is treated as noise and dropped. If the first
/// remaining line contains `ERROR` the whole output is an error report; the
/// decision is made on that first line alone, so a violation message that
/// happens to mention `ERROR` on line one flips every line to fatal.
pub fn interpret(output: &CheckerOutput) -> Verdict {
    let lines: &[String] = match output.lines.as_slice() {
        [only] if !only.contains(ERROR_MARKER) => &[],
        all => all,
    };

    if lines.first().is_some_and(|first| first.contains(ERROR_MARKER)) {
        let messages = lines
            .iter()
            .map(|line| line.replace(ERROR_PREFIX, ""))
            .collect();
        return Verdict::ToolError { messages };
    }

    let relay = lines.to_vec();
    if output.succeeded() {
        Verdict::Clean { relay }
    } else {
        Verdict::Violations { relay }
    }
}

/// Sink for the user-facing lines of a lint run. Fatal errors travel as `Err`.
pub trait Reporter {
    /// A plain informational line, relayed as-is.
    fn info(&mut self, line: &str);
    fn success(&mut self, message: &str);
}

/// Kept in memory; used by tests and callers that render output themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingReporter {
    pub lines: Vec<String>,
    pub success: Option<String>,
}

impl Reporter for RecordingReporter {
    fn info(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn success(&mut self, message: &str) {
        self.success = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(code: i32, lines: &[&str]) -> CheckerOutput {
        CheckerOutput::new(Some(code), lines.iter().map(|s| s.to_string()).collect())
    }

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_informational_line_is_suppressed() {
        let verdict = interpret(&output(0, &["No errors found"]));
        assert_eq!(verdict, Verdict::Clean { relay: vec![] });
    }

    #[test]
    fn single_line_is_suppressed_even_on_failure() {
        let verdict = interpret(&output(1, &["Time: 25ms; Memory: 6MB"]));
        assert_eq!(verdict, Verdict::Violations { relay: vec![] });
    }

    #[test]
    fn single_error_line_is_fatal_with_prefix_stripped() {
        for code in [0, 3] {
            let verdict = interpret(&output(code, &["ERROR: bad config"]));
            assert_eq!(
                verdict,
                Verdict::ToolError {
                    messages: owned(&["bad config"])
                }
            );
        }
    }

    #[test]
    fn multi_line_violations_are_relayed() {
        let lines = [
            "FILE: /srv/site/plugin.php",
            "----------------------------------------",
            " 12 | WARNING | Missing doc comment (Squiz.Commenting.FunctionComment.Missing)",
        ];
        let verdict = interpret(&output(2, &lines));
        assert_eq!(
            verdict,
            Verdict::Violations {
                relay: owned(&lines)
            }
        );
    }

    #[test]
    fn first_line_decides_error_mode_for_every_line() {
        let verdict = interpret(&output(
            3,
            &[
                "ERROR: Referenced sniff \"Foo\" does not exist",
                "Run \"phpcs --help\" for usage information",
            ],
        ));
        assert_eq!(
            verdict,
            Verdict::ToolError {
                messages: owned(&[
                    "Referenced sniff \"Foo\" does not exist",
                    "Run \"phpcs --help\" for usage information",
                ])
            }
        );
    }

    #[test]
    fn error_text_after_the_first_line_is_relayed() {
        let lines = ["FILE: a.php", " 3 | ERROR | Missing file doc comment"];
        let verdict = interpret(&output(2, &lines));
        assert_eq!(
            verdict,
            Verdict::Violations {
                relay: owned(&lines)
            }
        );
    }

    #[test]
    fn empty_output_with_success_is_clean() {
        assert_eq!(interpret(&output(0, &[])), Verdict::Clean { relay: vec![] });
    }

    #[test]
    fn recording_reporter_keeps_lines_in_order() {
        let mut reporter = RecordingReporter::default();
        reporter.info("one");
        reporter.info("two");
        reporter.success("done");
        assert_eq!(reporter.lines, owned(&["one", "two"]));
        assert_eq!(reporter.success.as_deref(), Some("done"));
    }
}
