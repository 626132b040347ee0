//! Sync triggers and the re-sync scheduler.
//!
//! Nothing pushes invalidations to the client, so staleness is beaten back
//! by re-fetching on a handful of events: returning from the payment
//! collector, the page becoming visible or focused again, back/forward-cache
//! navigation, and a fixed best-effort delayed re-sync after load. The
//! scheduler keeps its timers cancellable so pending re-syncs can be
//! suspended when the page goes away.

use std::time::Duration;

use goal_tickets_core::SessionId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::Url;

/// Delayed re-syncs fired after initial load.
pub const INITIAL_RESYNC_DELAYS: [Duration; 2] =
    [Duration::from_secs(2), Duration::from_secs(5)];

/// Debounce applied to visibility-regained re-syncs.
pub const VISIBILITY_RESYNC_DELAY: Duration = Duration::from_millis(100);

/// Events that force a re-fetch from the cart store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// Same-page navigation restored from the back/forward cache.
    PageShow,
    /// The window regained focus.
    WindowFocus,
    /// The page became visible again.
    VisibilityRegained,
    /// A scheduled best-effort re-sync fired.
    Scheduled,
}

/// Outcome flag carried back from the payment collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Failed,
    Back,
}

impl PaymentOutcome {
    fn from_param(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            "back" => Some(Self::Back),
            _ => None,
        }
    }
}

/// A detected return from the payment collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReturn {
    pub outcome: PaymentOutcome,
    /// Session identifier to adopt, when the collector echoed one back.
    pub session_id: Option<SessionId>,
}

/// Parse the returning-payment query parameters, if present.
#[must_use]
pub fn parse_payment_return(location: &Url) -> Option<PaymentReturn> {
    let mut outcome = None;
    let mut session_id = None;

    for (key, value) in location.query_pairs() {
        match key.as_ref() {
            "payment_return" => outcome = PaymentOutcome::from_param(value.as_ref()),
            "session_id" => session_id = Some(SessionId::new(value.into_owned())),
            _ => {}
        }
    }

    outcome.map(|outcome| PaymentReturn {
        outcome,
        session_id,
    })
}

/// The visible URL with the transient query (and fragment) removed.
#[must_use]
pub fn strip_payment_params(location: &Url) -> Url {
    let mut cleaned = location.clone();
    cleaned.set_query(None);
    cleaned.set_fragment(None);
    cleaned
}

/// Cancellable scheduler delivering [`SyncTrigger`]s over a channel.
///
/// The owner of the cart state drains the receiver and re-fetches per
/// trigger. Outstanding timers are aborted by [`ResyncScheduler::cancel_all`]
/// or by dropping the scheduler.
pub struct ResyncScheduler {
    tx: mpsc::UnboundedSender<SyncTrigger>,
    tasks: Vec<JoinHandle<()>>,
}

impl ResyncScheduler {
    /// Create a scheduler and the receiving end of its trigger channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SyncTrigger>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: Vec::new(),
            },
            rx,
        )
    }

    /// Deliver a trigger immediately (focus, pageshow).
    pub fn notify(&self, trigger: SyncTrigger) {
        let _ = self.tx.send(trigger);
    }

    /// Deliver a trigger after `delay`; cancellable until it fires.
    pub fn schedule(&mut self, trigger: SyncTrigger, delay: Duration) {
        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(trigger);
        }));
        self.tasks.retain(|task| !task.is_finished());
    }

    /// Queue the fixed post-load re-syncs.
    pub fn schedule_initial(&mut self) {
        for delay in INITIAL_RESYNC_DELAYS {
            self.schedule(SyncTrigger::Scheduled, delay);
        }
    }

    /// Abort every pending timer.
    pub fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for ResyncScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
