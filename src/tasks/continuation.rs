//! Continuation controller background task
//!
//! Each controller instance runs as one task draining a single mailbox,
//! so progress samples, user events and countdown ticks are serialized:
//! a cancel observed before a pending tick always wins. The tick
//! interval is acquired only while a countdown is running and dropped on
//! every exit from the armed state, including task teardown.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, Interval};
use tracing::{debug, info};

use crate::state::controller::{ContinuationController, ControllerView, SampleContext};
use crate::state::progress::ProgressSample;

/// Events delivered to a controller's mailbox
#[derive(Debug)]
pub enum ControllerEvent<T> {
    /// A playback progress sample plus its resolved context
    Sample {
        sample: ProgressSample,
        ctx: SampleContext<T>,
    },
    /// User toggled the countdown (cancel / resume)
    Toggle,
    /// User dismissed the affordance
    Dismiss,
    /// Arm immediately for `target` (request-armed controllers)
    Arm { target: T },
    /// A new playback session was loaded
    Reset,
}

/// Callback invoked with the continuation target when a countdown completes
pub type FireHook<T> = Box<dyn FnMut(T) + Send>;

/// Run one continuation controller until its mailbox closes or the last
/// view subscriber goes away.
pub async fn continuation_task<T>(
    name: &'static str,
    mut controller: ContinuationController<T>,
    mut events: mpsc::Receiver<ControllerEvent<T>>,
    view_tx: watch::Sender<ControllerView>,
    mut on_fire: FireHook<T>,
    tick_period: Duration,
) where
    T: Clone + PartialEq + Send + 'static,
{
    info!(controller = name, "starting continuation task");

    let mut ticker: Option<Interval> = None;

    loop {
        tokio::select! {
            maybe_event = events.recv() => {
                let Some(event) = maybe_event else {
                    debug!(controller = name, "mailbox closed, stopping");
                    break;
                };
                match event {
                    ControllerEvent::Sample { sample, ctx } => controller.observe(&sample, ctx),
                    ControllerEvent::Toggle => controller.toggle(),
                    ControllerEvent::Dismiss => controller.dismiss(),
                    ControllerEvent::Arm { target } => controller.arm_request(target),
                    ControllerEvent::Reset => controller.reset(),
                }
            }
            _ = next_tick(&mut ticker) => {
                if let Some(target) = controller.tick() {
                    info!(controller = name, "countdown complete, dispatching continuation");
                    on_fire(target);
                }
            }
        }

        // hold the tick interval only while a countdown is running
        if controller.is_counting() {
            if ticker.is_none() {
                ticker = Some(interval_at(Instant::now() + tick_period, tick_period));
            }
        } else {
            ticker = None;
        }

        if view_tx.send(controller.view()).is_err() {
            debug!(controller = name, "no view subscribers remain, stopping");
            break;
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker.as_mut() {
        Some(interval) => {
            interval.tick().await;
        }
        None => futures::future::pending::<()>().await,
    }
}
