use std::{
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, mpsc},
    time::Duration,
};

use encore_state::{Preferences, Roster};
use tokio::sync::oneshot;

use crate::{
    selection::{Selection, Strategy, StrategyKind},
    tokio_thread::TokioThread,
};

/// Identifies one selection request. Later requests have larger IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);
impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the result screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing requested yet, or the last request was cancelled.
    #[default]
    Idle,
    Computing {
        request: RequestId,
    },
    Ready {
        request: RequestId,
        selection: Selection,
    },
    /// The request failed; there is deliberately no song or singers.
    Failed {
        request: RequestId,
        error: String,
    },
}
impl SelectionState {
    pub fn request(&self) -> Option<RequestId> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Computing { request }
            | SelectionState::Ready { request, .. }
            | SelectionState::Failed { request, .. } => Some(*request),
        }
    }

    pub fn is_computing(&self) -> bool {
        matches!(self, SelectionState::Computing { .. })
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionState::Ready { selection, .. } => Some(selection),
            _ => None,
        }
    }
}

pub struct LogicArgs {
    pub strategy: Strategy,
    /// No selection resolves sooner than this.
    pub min_latency: Duration,
    /// Receives every `Ready`/`Failed` state that becomes current.
    pub selection_tx: mpsc::Sender<SelectionState>,
}

/// Runs selection requests in the background and tracks the current one.
///
/// Only one request is live at a time: starting another, or calling
/// [`Logic::cancel`], cancels whatever is in flight, and a cancelled
/// request never publishes a result.
pub struct Logic {
    tokio: TokioThread,
    strategy: Strategy,
    min_latency: Duration,
    state: Arc<RwLock<SelectionState>>,
    selection_tx: mpsc::Sender<SelectionState>,
    last_request: u64,
    cancel_in_flight: Option<oneshot::Sender<()>>,
}
impl Logic {
    pub fn new(args: LogicArgs) -> std::io::Result<Self> {
        tracing::info!(
            "using {} strategy with a minimum latency of {:?}",
            args.strategy.kind(),
            args.min_latency
        );
        Ok(Self {
            tokio: TokioThread::new()?,
            strategy: args.strategy,
            min_latency: args.min_latency,
            state: Arc::new(RwLock::new(SelectionState::Idle)),
            selection_tx: args.selection_tx,
            last_request: 0,
            cancel_in_flight: None,
        })
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn min_latency(&self) -> Duration {
        self.min_latency
    }

    pub fn selection_state(&self) -> SelectionState {
        self.read_state().clone()
    }

    /// Start a fresh selection for `roster` and `preferences`, cancelling
    /// any request still in flight. Used both for the first proposal and
    /// for "propose again".
    pub fn request_selection(&mut self, roster: Roster, preferences: Preferences) -> RequestId {
        self.cancel_in_flight();

        self.last_request += 1;
        let request = RequestId(self.last_request);
        *self.write_state() = SelectionState::Computing { request };

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        self.cancel_in_flight = Some(cancel_tx);

        tracing::debug!(
            members = roster.len(),
            mics = %preferences.mic_count,
            mood = ?preferences.mood,
            situation = ?preferences.situation,
            "selection {request} requested"
        );

        let strategy = self.strategy.clone();
        let state = self.state.clone();
        let selection_tx = self.selection_tx.clone();
        let min_latency = self.min_latency;
        self.tokio.spawn(async move {
            let work = async {
                let (result, ()) = tokio::join!(
                    strategy.select(&roster, &preferences),
                    tokio::time::sleep(min_latency)
                );
                result
            };

            let result = tokio::select! {
                biased;
                _ = &mut cancel_rx => {
                    tracing::debug!("selection {request} cancelled");
                    return;
                }
                result = work => result,
            };

            let outcome = match result {
                Ok(selection) => {
                    tracing::info!(
                        "selection {request}: \"{}\" by {} for {} singer(s)",
                        selection.song.title,
                        selection.song.artist,
                        selection.singers.len()
                    );
                    SelectionState::Ready { request, selection }
                }
                Err(e) => {
                    tracing::warn!("selection {request} failed: {e}");
                    SelectionState::Failed {
                        request,
                        error: e.to_string(),
                    }
                }
            };

            {
                let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
                if state.request() != Some(request) {
                    tracing::debug!("selection {request} is stale, dropping");
                    return;
                }
                *state = outcome.clone();
            }
            // The receiver going away just means nobody is listening any more.
            let _ = selection_tx.send(outcome);
        });

        request
    }

    /// Cancel any in-flight request and go back to [`SelectionState::Idle`].
    pub fn cancel(&mut self) {
        self.cancel_in_flight();
        *self.write_state() = SelectionState::Idle;
    }
}
impl Logic {
    fn cancel_in_flight(&mut self) {
        if let Some(cancel) = self.cancel_in_flight.take() {
            // Fails only if the task already finished.
            let _ = cancel.send(());
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SelectionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SelectionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}
