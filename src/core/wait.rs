//! Polling synchronization primitive.
//!
//! The surface offers no completion events, so every "wait for the environment" in the
//! crate funnels through [`poll_until`]: probe, and if nothing is there yet, sleep one
//! interval and probe again until the budget is spent. Time is read from
//! `tokio::time::Instant`, so paused-clock tests elapse timeouts instantly.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::core::surface::{ElementHandle, InteractiveSurface, Locator, Scope};
use crate::core::PublishError;

/// Interval between probes when waiting for an element.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);
/// Default wait budget for a single element.
pub const DEFAULT_ELEMENT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Probe until `probe` yields `Some` or `timeout` has elapsed.
///
/// The first probe runs immediately, so a zero timeout still checks once.
/// Returns `Ok(None)` when the budget ran out.
///
/// # Errors
///
/// Any error returned by `probe` aborts the wait and is propagated.
pub async fn poll_until<T, F, Fut>(
    interval: Duration,
    timeout: Duration,
    mut probe: F,
) -> Result<Option<T>, PublishError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, PublishError>>,
{
    let started = Instant::now();
    loop {
        if let Some(found) = probe().await? {
            return Ok(Some(found));
        }
        if started.elapsed() >= timeout {
            return Ok(None);
        }
        sleep(interval).await;
    }
}

/// Probe at most `attempts` times, sleeping `interval` between misses.
///
/// # Errors
///
/// Any error returned by `probe` aborts the wait and is propagated.
pub async fn poll_attempts<T, F, Fut>(
    attempts: u32,
    interval: Duration,
    mut probe: F,
) -> Result<Option<T>, PublishError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, PublishError>>,
{
    for attempt in 0..attempts {
        if let Some(found) = probe().await? {
            return Ok(Some(found));
        }
        trace!(attempt, "probe missed");
        if attempt + 1 < attempts {
            sleep(interval).await;
        }
    }
    Ok(None)
}

/// Element waiter bound to one surface and polling policy.
pub struct Waiter<'a, S: ?Sized> {
    surface: &'a S,
    interval: Duration,
    default_timeout: Duration,
}

impl<'a, S> Waiter<'a, S>
where
    S: InteractiveSurface + ?Sized,
{
    /// Create a waiter with an explicit polling policy.
    pub const fn new(surface: &'a S, interval: Duration, default_timeout: Duration) -> Self {
        Self {
            surface,
            interval,
            default_timeout,
        }
    }

    /// Surface this waiter probes.
    pub const fn surface(&self) -> &'a S {
        self.surface
    }

    /// Wait for `target` to appear under `scope`, returning the first match.
    ///
    /// `timeout` of `None` uses the waiter's default budget.
    ///
    /// # Errors
    ///
    /// - `PublishError::NotFound` when the budget elapses with no match
    /// - `PublishError::InvalidScope` when `scope` is gone before or during polling
    pub async fn await_ready(
        &self,
        target: &Locator,
        scope: Scope,
        timeout: Option<Duration>,
    ) -> Result<ElementHandle, PublishError> {
        self.await_nth(target, scope, 0, timeout).await
    }

    /// Wait until at least `position + 1` elements match `target` under `scope` and
    /// return the one at `position` (document order).
    ///
    /// # Errors
    ///
    /// - `PublishError::NotFound` when the budget elapses first
    /// - `PublishError::InvalidScope` when `scope` is gone before or during polling
    pub async fn await_nth(
        &self,
        target: &Locator,
        scope: Scope,
        position: usize,
        timeout: Option<Duration>,
    ) -> Result<ElementHandle, PublishError> {
        let budget = timeout.unwrap_or(self.default_timeout);
        let found = poll_until(self.interval, budget, || async move {
            if let Scope::Within(root) = scope {
                if !self.surface.is_present(root).await {
                    return Err(PublishError::InvalidScope(format!(
                        "scope element {} vanished while waiting for `{target}`",
                        root.0
                    )));
                }
            }
            let matches = self.surface.locate_all(target, scope).await?;
            Ok(matches.get(position).copied())
        })
        .await?;

        match found {
            Some(element) => {
                debug!(locator = %target, position, element = element.0, "element ready");
                Ok(element)
            }
            None if position == 0 => Err(PublishError::not_found(target.as_str(), budget)),
            None => Err(PublishError::not_found(
                format!("{target} [{position}]"),
                budget,
            )),
        }
    }
}
