// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reload notifications.
//!
//! ```text
//! SIGHUP --> listener task --> mpsc(1) --> ReloadSignal::recv()
//!                                            (controller select!)
//! ```
//!
//! A closed channel means no reload can ever arrive.

use tokio::sync::mpsc;

/// Sending half, used by signal listeners and tests.
#[derive(Debug, Clone)]
pub struct ReloadTrigger {
    tx: mpsc::Sender<()>,
}

impl ReloadTrigger {
    /// Requests a reload. Extra requests while one is pending are dropped.
    pub fn trigger(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiving half consumed by the execution controller.
#[derive(Debug)]
pub struct ReloadSignal {
    rx: mpsc::Receiver<()>,
}

impl ReloadSignal {
    /// Creates a connected trigger and signal.
    #[must_use]
    pub fn channel() -> (ReloadTrigger, Self) {
        let (tx, rx) = mpsc::channel(1);
        (ReloadTrigger { tx }, Self { rx })
    }

    /// A signal that never fires.
    #[must_use]
    pub fn inert() -> Self {
        Self::channel().1
    }

    /// Forwards `SIGHUP` to a new signal.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(unix)]
    #[must_use]
    pub fn listen() -> Self {
        use tokio::signal::unix::{SignalKind, signal};

        let (trigger, reload) = Self::channel();
        match signal(SignalKind::hangup()) {
            Ok(mut hangup) => {
                tokio::spawn(async move {
                    while hangup.recv().await.is_some() {
                        tracing::info!("received SIGHUP");
                        if trigger.tx.is_closed() {
                            break;
                        }
                        trigger.trigger();
                    }
                });
            }
            Err(e) => tracing::warn!(error = %e, "cannot listen for SIGHUP, reload disabled"),
        }
        reload
    }

    /// No reload signal exists on this platform.
    #[cfg(not(unix))]
    #[must_use]
    pub fn listen() -> Self {
        Self::inert()
    }

    /// Waits for the next reload request; `None` once no sender remains.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}
