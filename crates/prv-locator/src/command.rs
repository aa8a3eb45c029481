//! Subprocess locator
//!
//! Asks the external `prv` tool where content lives:
//!
//! ```text
//! prv locate --checksum=<checksum> --checksum1000=<prefix> --size=<size> --local-only
//! prv locate --checksum=<checksum> --checksum1000=<prefix> --size=<size> --server=<name>
//! ```
//!
//! The call blocks until the program exits. There is no timeout: a hung
//! program hangs the caller.

use crate::LocatorError;
use prv_domain::traits::Locator;
use prv_domain::{LocateQuery, Scope};
use std::process::{Command, Stdio};
use tracing::debug;

/// Default program name
pub const DEFAULT_PROGRAM: &str = "prv";

/// Locator backed by the `prv locate` command
///
/// # Examples
///
/// ```no_run
/// use prv_domain::traits::Locator;
/// use prv_domain::{LocateQuery, ProvenanceRecord, Scope};
/// use prv_locator::CommandLocator;
///
/// let locator = CommandLocator::default();
/// let record = ProvenanceRecord::new("raw", "1a2b3c", 4096);
/// let path = locator.locate(&LocateQuery::for_record(&record, Scope::Local)).unwrap();
/// println!("local copy: {}", path.trim());
/// ```
#[derive(Debug, Clone)]
pub struct CommandLocator {
    program: String,
}

impl CommandLocator {
    /// Create a locator that runs `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program this locator runs
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command-line arguments for `query`
    pub fn args_for(&self, query: &LocateQuery) -> Vec<String> {
        let mut args = vec![
            "locate".to_string(),
            format!("--checksum={}", query.checksum),
            format!("--checksum1000={}", query.checksum_prefix),
            format!("--size={}", query.size),
        ];
        match &query.scope {
            Scope::Local => args.push("--local-only".to_string()),
            Scope::Server(name) => args.push(format!("--server={}", name)),
        }
        args
    }
}

impl Default for CommandLocator {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Locator for CommandLocator {
    type Error = LocatorError;

    fn locate(&self, query: &LocateQuery) -> Result<String, Self::Error> {
        let args = self.args_for(query);
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LocatorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(LocatorError::ExitStatus {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        decode_answer(output.stdout)
    }
}

/// Paths and URLs must come back intact; undecodable output is a failed lookup
fn decode_answer(stdout: Vec<u8>) -> Result<String, LocatorError> {
    String::from_utf8(stdout).map_err(|e| LocatorError::Other(format!("locator output is not valid UTF-8: {}", e)))
}
