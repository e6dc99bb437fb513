//! Scoped timers for the splash gate and refresh clocks.
//!
//! Every timer is owned by a guard. Dropping the guard cancels any callback
//! that has not run yet, so a page that goes away never sees a late tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

fn runtime() -> Result<Handle> {
    Handle::try_current().map_err(|_| Error::NoRuntime)
}

/// A one-shot callback, cancelled when dropped.
#[derive(Debug)]
pub struct ScopedTimer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ScopedTimer {
    /// Run `f` once after `delay` on the current tokio runtime.
    pub fn after<F>(delay: Duration, f: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = runtime()?.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => f(),
            }
        });
        Ok(Self { cancel, handle })
    }

    /// Cancel the callback if it has not run.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the timer task has ended, by firing or by cancellation.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// A repeating callback, cancelled when dropped.
///
/// The first call happens one full period after creation.
#[derive(Debug)]
pub struct Ticker {
    cancel: CancellationToken,
    period: Duration,
}

impl Ticker {
    pub fn every<F>(period: Duration, mut f: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(Error::Config("tick period must be non-zero".to_string()));
        }
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        runtime()?.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => f(),
                }
            }
        });
        Ok(Self { cancel, period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Splash gate: reports "loading" until the delay elapses.
#[derive(Debug)]
pub struct LoadingGate {
    rx: watch::Receiver<bool>,
    _timer: ScopedTimer,
}

impl LoadingGate {
    pub fn start(delay: Duration) -> Result<Self> {
        let (tx, rx) = watch::channel(true);
        let timer = ScopedTimer::after(delay, move || {
            tracing::info!(delay_ms = delay.as_millis() as u64, "Loading gate opened");
            let _ = tx.send(false);
        })?;
        Ok(Self { rx, _timer: timer })
    }

    pub fn is_loading(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until loading is over.
    pub async fn ready(&self) -> Result<()> {
        let mut rx = self.rx.clone();
        rx.wait_for(|loading| !*loading).await?;
        Ok(())
    }

    /// Observe the loading flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }
}

/// Snapshot of a [`RefreshClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshState {
    pub last_updated: DateTime<Utc>,
    /// A manual refresh is pending.
    pub loading: bool,
    /// Completed refreshes, auto and manual.
    pub refreshes: u64,
}

impl RefreshState {
    fn stamp(&mut self) {
        self.last_updated = Utc::now();
        self.refreshes += 1;
    }
}

/// "Last updated" timestamp advanced by an auto-refresh ticker or by a
/// manual refresh that completes after a fixed delay.
#[derive(Debug)]
pub struct RefreshClock {
    state: Arc<RwLock<RefreshState>>,
    manual_delay: Duration,
    auto: Option<Ticker>,
    manual: Option<ScopedTimer>,
}

impl RefreshClock {
    pub fn new(manual_delay: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(RefreshState {
                last_updated: Utc::now(),
                loading: false,
                refreshes: 0,
            })),
            manual_delay,
            auto: None,
            manual: None,
        }
    }

    pub fn state(&self) -> RefreshState {
        *self.state.read()
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.state.read().last_updated
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Start (or restart) automatic refresh every `period`.
    pub fn start_auto(&mut self, period: Duration) -> Result<()> {
        let state = Arc::clone(&self.state);
        self.auto = Some(Ticker::every(period, move || {
            state.write().stamp();
            tracing::debug!("Auto refresh");
        })?);
        tracing::info!(period_secs = period.as_secs(), "Auto refresh enabled");
        Ok(())
    }

    pub fn stop_auto(&mut self) {
        if self.auto.take().is_some() {
            tracing::info!("Auto refresh disabled");
        }
    }

    pub fn is_auto(&self) -> bool {
        self.auto.is_some()
    }

    /// Begin a manual refresh. A refresh already pending is superseded.
    pub fn refresh(&mut self) -> Result<()> {
        self.state.write().loading = true;
        let state = Arc::clone(&self.state);
        let timer = ScopedTimer::after(self.manual_delay, move || {
            let mut state = state.write();
            state.stamp();
            state.loading = false;
            tracing::info!("Manual refresh complete");
        });
        match timer {
            Ok(timer) => {
                self.manual = Some(timer);
                Ok(())
            }
            Err(e) => {
                self.state.write().loading = false;
                Err(e)
            }
        }
    }
}
