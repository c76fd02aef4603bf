//! Execution engine shared by the interactive REPL and script replay.
//!
//! Both front ends funnel through the same tokenize -> record -> dispatch
//! path, so a typed session and a replayed script behave identically per
//! line. The modes differ only in their [`ErrorPolicy`].

use crate::builtins::Registry;
use crate::error::VshError;
use crate::lexer;
use crate::output::Output;
use crate::session::Session;

/// Error-continuation policy of a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Interactive mode: a dispatched `exit` terminates the loop.
    StopOnTerminate,
    /// Script mode: failures are warned about and replay continues;
    /// `exit` is dispatched like any command but does not end replay.
    ContinueOnError,
}

/// Result of dispatching one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line; nothing recorded or dispatched.
    Skipped,
    /// Line dispatched; 0 is success.
    Done(i32),
    /// `exit` was dispatched; the session is in a terminal state.
    Terminated(i32),
}

/// Owns the session and the command registry for the lifetime of one run.
pub struct Engine {
    session: Session,
    registry: Registry,
}

impl Engine {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            registry: Registry::default(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// Tokenize, record, and dispatch one raw input line.
    ///
    /// Blank lines are skipped without recording; every other line lands
    /// in the history before dispatch, including lines that fail to parse
    /// or execute. Every failure path writes at least one sink line.
    pub fn eval_line(&mut self, line: &str, out: &mut Output) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Skipped;
        }
        self.session.record(line);

        let words = match lexer::split_line(line) {
            Ok(words) => words,
            Err(err) => {
                let _ = out.writeln(&err.to_string());
                return LineOutcome::Done(1);
            }
        };
        let Some((name, args)) = words.split_first() else {
            return LineOutcome::Done(0);
        };

        match self.registry.get(name) {
            Some(handler) => match handler(&mut self.session, args, out) {
                Ok(code) => LineOutcome::Done(code),
                Err(VshError::Exit(code)) => {
                    tracing::debug!(code, "exit requested");
                    LineOutcome::Terminated(code)
                }
                Err(err) => {
                    let _ = out.writeln(&format!("vsh: {err}"));
                    LineOutcome::Done(1)
                }
            },
            None => {
                let _ = out.writeln(&format!("{name}: command not found"));
                LineOutcome::Done(1)
            }
        }
    }

    /// Replay a script's lines in order.
    ///
    /// Blank lines and lines whose first non-space character is `#` are
    /// skipped without recording. Every other line is echoed behind the
    /// prompt and dispatched; a failing line is warned about with its
    /// 1-based number and replay continues. Only `StopOnTerminate` lets a
    /// dispatched `exit` end the replay early.
    pub fn run_script(&mut self, text: &str, out: &mut Output, policy: ErrorPolicy) -> LineOutcome {
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let _ = out.writeln(&format!("{}{line}", self.session.prompt()));
            match self.eval_line(line, out) {
                LineOutcome::Skipped | LineOutcome::Done(0) => {}
                LineOutcome::Done(code) => {
                    tracing::warn!(line = line_no, code, "script command failed, continuing");
                    let _ = out.writeln(&format!(
                        "Warning: Command failed at line {line_no}, continuing..."
                    ));
                }
                LineOutcome::Terminated(code) => match policy {
                    ErrorPolicy::StopOnTerminate => return LineOutcome::Terminated(code),
                    ErrorPolicy::ContinueOnError => {
                        tracing::debug!(line = line_no, "exit ignored during script replay");
                    }
                },
            }
        }
        LineOutcome::Done(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;

    const IMAGE: &str = r#"
        <vfs name="test_vfs">
            <directory name="docs">
                <file name="readme.txt">hi</file>
            </directory>
        </vfs>
    "#;

    fn engine() -> Engine {
        let mut session = Session::new(SessionConfig::default());
        session.store.load_str(IMAGE, "tester").unwrap();
        Engine::new(session)
    }

    #[test]
    fn blank_lines_are_skipped_unrecorded() {
        let mut engine = engine();
        let mut out = Output::buffer();
        assert_eq!(engine.eval_line("   ", &mut out), LineOutcome::Skipped);
        assert!(engine.session().history.is_empty());
    }

    #[test]
    fn failed_lines_are_still_recorded() {
        let mut engine = engine();
        let mut out = Output::buffer();
        assert_eq!(engine.eval_line("badcmd", &mut out), LineOutcome::Done(1));
        assert_eq!(engine.eval_line("ls 'oops", &mut out), LineOutcome::Done(1));
        assert_eq!(engine.session().history, ["badcmd", "ls 'oops"]);
        let captured = out.captured();
        assert!(captured.contains("badcmd: command not found"));
        assert!(captured.contains("parse error"));
    }

    #[test]
    fn exit_is_a_terminal_outcome() {
        let mut engine = engine();
        let mut out = Output::buffer();
        assert_eq!(engine.eval_line("exit", &mut out), LineOutcome::Terminated(0));
        assert_eq!(engine.session().history, ["exit"]);
    }

    #[test]
    fn script_skips_comments_and_continues_past_failures() {
        let mut engine = engine();
        let mut out = Output::buffer();
        let script = "# comment\n\nls /\nbadcmd\nls /";

        let outcome = engine.run_script(script, &mut out, ErrorPolicy::ContinueOnError);
        assert_eq!(outcome, LineOutcome::Done(0));
        assert_eq!(engine.session().history, ["ls /", "badcmd", "ls /"]);

        let captured = out.captured();
        assert_eq!(captured.matches("docs\n").count(), 2, "{captured}");
        assert!(captured.contains("Warning: Command failed at line 4, continuing..."));
    }

    #[test]
    fn script_exit_is_ignored_under_continue_on_error() {
        let mut engine = engine();
        let mut out = Output::buffer();
        let script = "exit\nls /";

        let outcome = engine.run_script(script, &mut out, ErrorPolicy::ContinueOnError);
        assert_eq!(outcome, LineOutcome::Done(0));
        assert!(out.captured().contains("docs"));
    }

    #[test]
    fn script_exit_terminates_under_stop_on_terminate() {
        let mut engine = engine();
        let mut out = Output::buffer();
        let script = "exit\nls /";

        let outcome = engine.run_script(script, &mut out, ErrorPolicy::StopOnTerminate);
        assert_eq!(outcome, LineOutcome::Terminated(0));
        assert!(!out.captured().contains("docs"));
    }

    #[test]
    fn script_lines_are_echoed_behind_the_prompt() {
        let mut engine = engine();
        let prompt = engine.prompt();
        let mut out = Output::buffer();
        engine.run_script("ls /", &mut out, ErrorPolicy::ContinueOnError);
        assert!(out.captured().starts_with(&format!("{prompt}ls /\n")));
    }
}
