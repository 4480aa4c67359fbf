//! JSON-lines event log.
//!
//! Enabled with `BLOCKFALL_EVENT_LOG=<path>`. One JSON object per line,
//! appended, tagged by `"event"`. Useful for replaying a seed or checking
//! scoring offline.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::LockEvent;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Start {
        at_ms: u64,
        seed: u32,
        episode: u32,
        start_level: u32,
    },
    Lock {
        at_ms: u64,
        #[serde(flatten)]
        lock: LockEvent,
    },
    GameOver {
        at_ms: u64,
        episode: u32,
        score: u32,
        level: u32,
        lines: u32,
    },
    Reset {
        at_ms: u64,
        episode: u32,
    },
}

/// Append-only event sink. A disabled log swallows every record.
pub struct EventLog {
    out: Option<BufWriter<File>>,
    written: u64,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self {
            out: None,
            written: 0,
        }
    }

    /// Open `path` for appending, or return a disabled log for `None`.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::disabled());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {path}"))?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
            written: 0,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Records written since the log was opened.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn record(&mut self, record: &EventRecord) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
        out.flush()?;
        self.written += 1;
        Ok(())
    }
}
