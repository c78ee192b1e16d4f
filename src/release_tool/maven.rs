use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::release_tool::{Invocation, ReleaseTool};
use crate::ui;

/// Drives the Maven release plugin non-interactively.
///
/// `prepare` would normally stop and ask for the release version on the
/// terminal; the answer is supplied as a single line on the child's stdin
/// instead.
pub struct MavenReleaseTool {
    root_dir: PathBuf,
    program: String,
    skip_tests: bool,
}

impl MavenReleaseTool {
    pub fn new(root_dir: impl AsRef<Path>, program: impl Into<String>, skip_tests: bool) -> Self {
        MavenReleaseTool {
            root_dir: root_dir.as_ref().to_path_buf(),
            program: program.into(),
            skip_tests,
        }
    }

    /// Spawn the tool, optionally feed it one line of input, and drain its
    /// output synchronously before waiting for exit.
    ///
    /// stdout is piped and streamed line by line; stderr is inherited so it
    /// reaches the console directly without a second reader competing for
    /// pipe buffers.
    fn run(&self, args: &[String], stdin_line: Option<&str>) -> Invocation {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.root_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        if stdin_line.is_some() {
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }

        ui::display_status(&format!("Running: {} {}", self.program, args.join(" ")));

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                ui::display_error(&format!("Failed to launch '{}': {}", self.program, e));
                return Invocation::launch_failure();
            }
        };

        if let Some(line) = stdin_line {
            // Write the answer and drop the handle so the child sees EOF
            // instead of waiting for further prompts.
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(e) = writeln!(stdin, "{}", line) {
                    ui::display_error(&format!(
                        "Failed to write to '{}' stdin: {}",
                        self.program, e
                    ));
                }
            }
        }

        let mut output_lines = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                match line {
                    Ok(line) => {
                        ui::display_tool_line(&line);
                        output_lines.push(line);
                    }
                    Err(e) => {
                        ui::display_error(&format!(
                            "Error reading '{}' output: {}",
                            self.program, e
                        ));
                        break;
                    }
                }
            }
        }

        match child.wait() {
            Ok(status) => Invocation {
                exit_code: status.code(),
                output_lines,
            },
            Err(e) => {
                ui::display_error(&format!("Failed to wait for '{}': {}", self.program, e));
                Invocation {
                    exit_code: None,
                    output_lines,
                }
            }
        }
    }
}

impl ReleaseTool for MavenReleaseTool {
    fn clean(&self) -> Invocation {
        self.run(&["release:clean".to_string()], None)
    }

    fn prepare(&self, release_version: &str, next_dev_version: &str) -> Invocation {
        let mut args = vec!["release:prepare".to_string()];
        if self.skip_tests {
            args.push("-Darguments=-DskipTests".to_string());
        }
        args.push(format!("-DdevelopmentVersion={}", next_dev_version));

        self.run(&args, Some(release_version))
    }
}
