//! Background prediction worker.
//!
//! The HTTP exchange blocks until the service answers, so it runs on its
//! own thread and the main loop polls for the outcome between frames.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::PredictionRequest;
use crate::ports::{PredictionClient, PredictionOutcome, TransportError};

/// What the worker reports back: the one and only message it sends.
pub type WorkerOutcome = Result<PredictionOutcome, TransportError>;

/// State of a request as seen from the UI loop.
#[derive(Debug)]
pub enum WorkerPoll {
    /// Still waiting on the service
    Pending,
    Done(WorkerOutcome),
    /// The thread ended without reporting (it panicked)
    Terminated,
}

/// Handle to a running prediction request.
///
/// Dropping the handle abandons the request: the thread runs to
/// completion but its outcome is discarded.
pub struct PredictionWorkerHandle {
    outcome_rx: Receiver<WorkerOutcome>,
    _handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Check for the outcome without blocking.
    #[must_use]
    pub fn poll(&self) -> WorkerPoll {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => WorkerPoll::Done(outcome),
            Err(TryRecvError::Empty) => WorkerPoll::Pending,
            Err(TryRecvError::Disconnected) => WorkerPoll::Terminated,
        }
    }
}

pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a thread that submits `request` through `client`.
    pub fn spawn<C>(client: Arc<C>, request: PredictionRequest) -> PredictionWorkerHandle
    where
        C: PredictionClient + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let outcome = client.predict(&request);
            if tx.send(outcome).is_err() {
                tracing::debug!("Prediction outcome dropped: request was abandoned");
            }
        });

        PredictionWorkerHandle {
            outcome_rx: rx,
            _handle: handle,
        }
    }
}
