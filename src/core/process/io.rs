// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child_with_cancellation()
//!   stdout/stderr reader tasks --> JoinHandle<String>
//!   select: wait | token.cancelled() --> kill, wait
//!   --> ProcessOutput { stdout, stderr, exit_code, interrupted }
//!
//! read_stream()
//!   BufReader::read_line (keeps line endings)
//!   FORWARD_TO_LOG --> trace!
//!   KEEP_IN_STRING --> appended to the returned String
//! ```

use crate::error::Result;
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

/// Spawns a reader task for a piped stream if its output is wanted.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    stream.map(|stream| {
        let name = process_name.to_string();
        tokio::spawn(async move { read_stream(stream, flags, &name, stream_name).await })
    })
}

/// Waits for a reader task and returns what it kept.
async fn collect_output(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Runs the child process with cancellation support.
    pub(super) async fn run_child_with_cancellation(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        let stdout_handle = spawn_reader(child.stdout.take(), self.stdout_config(), name, "stdout");
        let stderr_handle = spawn_reader(child.stderr.take(), self.stderr_config(), name, "stderr");

        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "cancellation requested, terminating process");
                child.kill().await.ok();
                let status = child.wait().await
                    .with_context(|| format!("failed waiting for process {name} to exit"))?;
                (status, true)
            }
        };

        let stdout = collect_output(stdout_handle).await;
        let stderr = collect_output(stderr_handle).await;

        Ok(ProcessOutput::new(
            exit_status.code(),
            stdout,
            stderr,
            interrupted,
        ))
    }
}

/// Reads a stream line by line until EOF.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut kept = String::new();
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = %stream_name, line = %line.trim_end(), "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    kept.push_str(&line);
                }
            }
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }

    kept
}
