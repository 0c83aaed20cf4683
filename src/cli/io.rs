//! JSON I/O for one-shot commands
//!
//! - Input: one JSON document via stdin
//! - Output: one pretty-printed JSON document via stdout

use std::io::{self, Read, Write};

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Reads one JSON document from `reader`.
pub fn read_payload<R: Read>(reader: R) -> CliResult<Value> {
    let value: Value = serde_json::from_reader(reader)?;
    if value.is_null() {
        return Err(CliError::io_error("Payload cannot be null"));
    }
    Ok(value)
}

/// Reads one JSON document from stdin.
pub fn read_stdin_payload() -> CliResult<Value> {
    read_payload(io::stdin().lock())
}

/// Writes `value` to stdout as pretty JSON.
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
