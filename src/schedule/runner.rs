use std::any::Any;
use std::cell::RefCell;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use tokio::sync::watch;

use crate::config::settings::SchedulerSettings;
use crate::foundation::error::RadarResult;
use crate::pipeline::cycle::{CycleReport, RadarPipeline};

/// One unit of scheduled work.
pub trait Cycle {
    fn run_cycle(&mut self) -> RadarResult<CycleReport>;
}

impl Cycle for RadarPipeline<'_> {
    fn run_cycle(&mut self) -> RadarResult<CycleReport> {
        self.process_cycle()
    }
}

/// Source of the inter-cycle delay.
pub trait Clock {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()>;
}

/// Wall-clock sleeps on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(delay)
    }
}

/// Zero-delay clock that remembers every requested delay.
#[derive(Debug, Default)]
pub struct RecordingClock {
    delays: RefCell<Vec<Duration>>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

impl Clock for RecordingClock {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> {
        self.delays.borrow_mut().push(delay);
        std::future::ready(())
    }
}

/// Sending half of a shutdown signal.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// Receiving half of a shutdown signal; cheap to clone.
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once triggered. Never resolves if the trigger is dropped untriggered.
    pub async fn wait(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

/// What the loop does after a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStep {
    Sleep(Duration),
    Stop,
}

/// Retry policy.
///
/// | mode        | outcome | retry_on_error | stop_on_failure | next             |
/// |-------------|---------|----------------|-----------------|------------------|
/// | single shot | any     | any            | any             | stop             |
/// | continuous  | ok      | any            | any             | update_interval  |
/// | continuous  | failed  | true           | any             | retry_interval   |
/// | continuous  | failed  | false          | true            | stop             |
/// | continuous  | failed  | false          | false           | update_interval  |
pub fn next_step(succeeded: bool, settings: &SchedulerSettings) -> NextStep {
    if !settings.enabled {
        return NextStep::Stop;
    }
    if succeeded {
        return NextStep::Sleep(settings.update_delay());
    }
    if settings.retry_on_error {
        NextStep::Sleep(settings.retry_delay())
    } else if settings.stop_on_failure {
        NextStep::Stop
    } else {
        NextStep::Sleep(settings.update_delay())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub runs: u64,
    pub failures: u64,
}

pub struct Scheduler<C> {
    settings: SchedulerSettings,
    clock: C,
    shutdown: Shutdown,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(settings: SchedulerSettings, clock: C, shutdown: Shutdown) -> Self {
        Self {
            settings,
            clock,
            shutdown,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run cycles until the policy says stop or shutdown is signalled.
    ///
    /// Cycle errors and panics are logged and counted, never propagated.
    pub async fn run(&mut self, cycle: &mut dyn Cycle) -> RunSummary {
        let mut summary = RunSummary::default();
        if self.settings.enabled {
            tracing::info!(
                update_interval = self.settings.update_interval,
                retry_on_error = self.settings.retry_on_error,
                retry_interval = self.settings.retry_interval,
                "starting scheduler"
            );
        } else {
            tracing::info!("scheduler disabled; running a single cycle");
        }

        loop {
            if self.shutdown.is_triggered() {
                tracing::info!("shutdown requested; not starting another run");
                break;
            }
            summary.runs += 1;
            tracing::info!(run = summary.runs, "starting radar processing run");
            let succeeded = run_guarded(cycle);
            if !succeeded {
                summary.failures += 1;
            }

            match next_step(succeeded, &self.settings) {
                NextStep::Stop => break,
                NextStep::Sleep(delay) => {
                    tracing::info!(seconds = delay.as_secs(), "waiting before next run");
                    tokio::select! {
                        biased;
                        _ = self.shutdown.wait() => {
                            tracing::info!("shutdown requested during wait");
                            break;
                        }
                        _ = self.clock.sleep(delay) => {}
                    }
                }
            }
        }

        tracing::info!(runs = summary.runs, failures = summary.failures, "scheduler stopped");
        summary
    }
}

fn run_guarded(cycle: &mut dyn Cycle) -> bool {
    match std::panic::catch_unwind(AssertUnwindSafe(|| cycle.run_cycle())) {
        Ok(Ok(report)) => {
            tracing::info!(frames = report.frames, "radar processing run completed");
            true
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "radar processing run failed");
            false
        }
        Err(payload) => {
            tracing::error!(panic = panic_message(payload.as_ref()), "radar processing run panicked");
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/runner.rs"]
mod tests;
