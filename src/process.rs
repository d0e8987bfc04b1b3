//! Subprocess execution and file tailing.
//!
//! [`run_command`] is the low-level primitive: it runs a command line to
//! completion and hands back the exit code and both captured streams,
//! propagating any launch failure. [`tail_file`] builds on it to fetch the
//! last lines of a job output file for inclusion in a notification email;
//! because a missing fragment must never abort email generation, it
//! degrades every failure into a descriptive message string instead.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, error};

/// Captured result of a completed child process: the command-result
/// triple of exit code, decoded stdout, and decoded stderr.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The child's exit code; -1 when it was killed by a signal and has
    /// no exit code.
    pub code: i32,

    /// Captured standard output, decoded as UTF-8.
    pub stdout: String,

    /// Captured standard error, decoded as UTF-8.
    pub stderr: String,
}

/// Run the given command line to completion and capture its output.
///
/// The line is split with shell-word rules (quoted arguments are
/// respected), then launched directly without a shell. The call blocks
/// until the child exits and both streams are fully drained.
///
/// # Errors
///
/// Returns an error when the line has unbalanced quotes or no words, when
/// the child cannot be launched (e.g. executable not found), or when a
/// captured stream is not valid UTF-8.
pub fn run_command(command_line: &str) -> Result<CommandOutput> {
    debug!("Running \"{command_line}\"");

    let Some(words) = shlex::split(command_line) else {
        bail!("Command line has unbalanced quotes: {command_line}");
    };
    let Some((program, args)) = words.split_first() else {
        bail!("Command line is empty");
    };

    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run {program}"))?;

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8(output.stdout)
        .with_context(|| format!("stdout of {program} was not valid UTF-8"))?;
    let stderr = String::from_utf8(output.stderr)
        .with_context(|| format!("stderr of {program} was not valid UTF-8"))?;

    Ok(CommandOutput {
        code,
        stdout,
        stderr,
    })
}

/// Return the last `num_lines` lines of the file at `path` by invoking
/// the line-tailing executable at `tail_exe`.
///
/// This function never fails: every failure mode (zero lines requested,
/// missing file, tail exiting non-zero, launch or decode errors) is
/// logged and degraded into a descriptive message string, which the mail
/// tool embeds in the email body in place of the job output.
#[must_use]
pub fn tail_file(path: &Path, num_lines: u32, tail_exe: &Path) -> String {
    if num_lines < 1 {
        let err_msg = format!("sched-mail: invalid number of lines to tail: {num_lines}");
        error!("{err_msg}");
        return err_msg;
    }

    if !path.exists() {
        let err_msg = format!("sched-mail: file {} does not exist", path.display());
        error!("{err_msg}");
        return err_msg;
    }

    let command_line = format!("{} -{num_lines} '{}'", tail_exe.display(), path.display());
    match run_command(&command_line) {
        Ok(output) if output.code == 0 => output.stdout,
        Ok(_) => {
            let err_msg = format!(
                "sched-mail: error trying to read the last {num_lines} lines of {}",
                path.display()
            );
            error!("{err_msg}");
            err_msg
        }
        Err(e) => format!("Unable to return contents of file: {e}"),
    }
}
