//! # sched-mail
//!
//! Helper utilities for a mail-notification tool for batch job schedulers.
//!
//! Scheduler mail hooks hand this crate raw job metadata (elapsed-time
//! strings, memory-usage strings, spool file paths) and it provides the
//! plumbing around them: filesystem sanity checks, duration and size unit
//! conversions, subprocess invocation, and tailing the last lines of job
//! output files for inclusion in notification emails.
//!
//! ## Error-handling modes
//!
//! Three policies coexist deliberately; see the individual modules:
//!
//! - **Hard-fail**: [`check_dir`], [`check_file`], and [`usec_from_str`]
//!   return [`FatalError`] for conditions the program cannot proceed from.
//!   The caller decides where to stop, typically via [`FatalError::exit`].
//! - **Soft-fail**: [`kbytes_from_str`] and [`tail_file`] never fail; they
//!   log and return a sentinel (`0`) or a descriptive message string, so a
//!   missing fragment cannot abort email generation.
//! - **Propagate**: [`run_command`], [`delete_spool_file`], and
//!   [`get_file_contents`] surface the underlying I/O error to the caller.
//!
//! ## Logging
//!
//! All helpers log through the [`tracing`] facade. Installing a subscriber
//! is the caller's job; this crate never touches subscriber setup.

pub mod fatal;
pub mod guards;
pub mod process;
pub mod units;

pub use fatal::{FatalError, die};
pub use guards::{check_dir, check_file, delete_spool_file, get_file_contents};
pub use process::{CommandOutput, run_command, tail_file};
pub use units::{kbytes_from_str, str_from_kbytes, usec_from_str};
