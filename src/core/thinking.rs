/// Background "thinking" delay for computer-controlled actors
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::runtime::RuntimeFlavor;
use tracing::{debug, info, warn};

use crate::core::error::TurnError;

/// Inclusive range of whole seconds a computer actor spends thinking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkTime {
    min_secs: u64,
    max_secs: u64,
}

impl ThinkTime {
    pub const DEFAULT_MIN_SECS: u64 = 3;
    pub const DEFAULT_MAX_SECS: u64 = 6;

    /// Longest accepted think time; keeps every deadline representable
    pub const MAX_SECS: u64 = 60 * 60;

    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self, TurnError> {
        if min_secs > max_secs {
            return Err(TurnError::InvalidThinkTime { min_secs, max_secs });
        }
        if max_secs > Self::MAX_SECS {
            return Err(TurnError::ThinkTimeTooLong { max_secs, limit_secs: Self::MAX_SECS });
        }
        Ok(Self { min_secs, max_secs })
    }

    /// Always think for exactly `secs` seconds, clamped to [`Self::MAX_SECS`]
    pub fn fixed(secs: u64) -> Self {
        let secs = secs.min(Self::MAX_SECS);
        Self { min_secs: secs, max_secs: secs }
    }

    pub fn min_secs(&self) -> u64 {
        self.min_secs
    }

    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    /// Draw a duration uniformly from the range
    pub fn draw(&self) -> Duration {
        let secs = rand::rng().random_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }
}

impl Default for ThinkTime {
    fn default() -> Self {
        Self {
            min_secs: Self::DEFAULT_MIN_SECS,
            max_secs: Self::DEFAULT_MAX_SECS,
        }
    }
}

/// Where thinking delays run
#[derive(Debug, Clone, Default)]
pub enum ThinkDriver {
    /// The ambient tokio runtime if it is multi-threaded, otherwise a
    /// detached OS thread. A current-thread runtime is skipped because a
    /// host that paces frames without yielding would starve the timer.
    #[default]
    Auto,
    /// Always this runtime. The host must keep yielding to it.
    Runtime(tokio::runtime::Handle),
}

impl ThinkDriver {
    /// Pin delays to the runtime the caller is running on
    pub fn current_runtime() -> Self {
        Self::Runtime(tokio::runtime::Handle::current())
    }

    fn runtime(&self) -> Option<tokio::runtime::Handle> {
        match self {
            Self::Runtime(handle) => Some(handle.clone()),
            Self::Auto => tokio::runtime::Handle::try_current()
                .ok()
                .filter(|h| h.runtime_flavor() == RuntimeFlavor::MultiThread),
        }
    }
}

/// A fire-and-forget delay with a completion flag.
///
/// The background unit sleeps and then flips its own flag; it touches
/// nothing else. Dropping the task orphans the background unit, which
/// still runs to completion but is never consulted again.
#[derive(Debug)]
pub struct ThinkingTask {
    duration: Duration,
    done: Arc<AtomicBool>,
}

impl ThinkingTask {
    /// Start the delay with [`ThinkDriver::Auto`]. Never blocks the caller.
    pub fn begin(duration: Duration) -> Self {
        Self::begin_on(&ThinkDriver::Auto, duration)
    }

    pub fn begin_on(driver: &ThinkDriver, duration: Duration) -> Self {
        let done = Arc::new(AtomicBool::new(false));
        info!(seconds = duration.as_secs(), "thinking for {} seconds", duration.as_secs());

        let spawned_on_runtime = driver.runtime().and_then(|handle| {
            let deadline = tokio::time::Instant::now().checked_add(duration)?;
            let flag = done.clone();
            handle.spawn(async move {
                tokio::time::sleep_until(deadline).await;
                flag.store(true, Ordering::Release);
                debug!("thinking finished");
            });
            Some(())
        });

        if spawned_on_runtime.is_none() {
            let flag = done.clone();
            let spawned = std::thread::Builder::new()
                .name("turnloop-thinking".to_string())
                .spawn(move || {
                    std::thread::sleep(duration);
                    flag.store(true, Ordering::Release);
                    debug!("thinking finished");
                });
            if let Err(e) = spawned {
                // No background unit means nothing would ever finish; don't gate forever.
                warn!(error = %e, "failed to spawn thinking thread, skipping delay");
                done.store(true, Ordering::Release);
            }
        }

        Self { duration, done }
    }

    /// Non-blocking poll, safe from any thread
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
