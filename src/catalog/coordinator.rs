//! Single-flight coordination between the UI loop and fetch tasks.
//!
//! Listing, detail, and store fetches run as tokio tasks while the UI loop
//! keeps drawing. Only the most recently issued request may touch visible
//! state: every issue bumps a sequence number, aborts the prior task, and a
//! commit is applied only when its sequence still matches. Abort alone is
//! not enough (a finished task may already sit in the channel), so the
//! sequence check at commit time is the invariant; abort is an optimization.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::Result;

/// A settled fetch, tagged with the sequence it was issued under.
#[derive(Debug)]
pub struct Commit<T> {
    /// Sequence returned by [`RequestCoordinator::issue`].
    pub seq: u64,
    /// The fetch outcome. Aborted tasks never produce a commit.
    pub outcome: Result<T>,
}

/// Issues fetches for one logical resource and filters their results.
///
/// The UI loop drains the paired receiver with `try_recv` between frames and
/// passes each commit through [`RequestCoordinator::try_commit`]; stale
/// commits come back as `None` and must be dropped without side effects.
#[derive(Debug)]
pub struct RequestCoordinator<T> {
    handle: Handle,
    tx: Sender<Commit<T>>,
    seq: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl<T> RequestCoordinator<T> {
    /// Creates a coordinator spawning onto `handle`, plus the receiver the
    /// UI loop drains.
    #[must_use]
    pub fn new(handle: Handle) -> (Self, Receiver<Commit<T>>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                handle,
                tx,
                seq: 0,
                in_flight: None,
            },
            rx,
        )
    }

    /// Sequence of the most recently issued request.
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.seq
    }

    /// Whether `seq` identifies the most recently issued request.
    #[must_use]
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    /// Whether a request is still outstanding.
    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Applies the single-flight rule to a drained commit.
    ///
    /// Returns the outcome only when the commit belongs to the latest issue;
    /// anything older is dropped silently.
    pub fn try_commit(&mut self, commit: Commit<T>) -> Option<Result<T>> {
        if commit.seq != self.seq {
            debug!(seq = commit.seq, latest = self.seq, "dropping stale response");
            return None;
        }
        self.in_flight = None;
        Some(commit.outcome)
    }

    /// Aborts the in-flight request, if any. The aborted task's settlement
    /// is swallowed; cancellation is never surfaced as an error.
    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

impl<T: Send + 'static> RequestCoordinator<T> {
    /// Supersedes any in-flight request and spawns `fetch`.
    ///
    /// Returns the new sequence. The task sends its commit over the paired
    /// channel when it settles; a send after the UI loop is gone is ignored.
    pub fn issue<F>(&mut self, fetch: F) -> u64
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        self.cancel();
        self.seq += 1;
        let seq = self.seq;
        let tx = self.tx.clone();
        self.in_flight = Some(self.handle.spawn(async move {
            let outcome = fetch.await;
            let _ = tx.send(Commit { seq, outcome });
        }));
        debug!(seq, "request issued");
        seq
    }
}

impl<T> Drop for RequestCoordinator<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn only_the_latest_sequence_commits() {
        let rt = runtime();
        let (mut coord, _rx) = RequestCoordinator::<u32>::new(rt.handle().clone());

        let first = coord.issue(async { Ok(1) });
        let second = coord.issue(async { Ok(2) });
        assert!(!coord.is_current(first));
        assert!(coord.is_current(second));

        assert!(coord
            .try_commit(Commit {
                seq: first,
                outcome: Ok(1),
            })
            .is_none());
        let outcome = coord
            .try_commit(Commit {
                seq: second,
                outcome: Ok(2),
            })
            .unwrap();
        assert_eq!(outcome.unwrap(), 2);
        assert!(!coord.has_in_flight());
    }

    #[test]
    fn completed_fetch_delivers_over_the_channel() {
        let rt = runtime();
        let (mut coord, rx) = RequestCoordinator::new(rt.handle().clone());

        let seq = coord.issue(async { Ok(7u32) });
        let commit = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(commit.seq, seq);
        assert_eq!(coord.try_commit(commit).unwrap().unwrap(), 7);
    }

    #[test]
    fn superseding_aborts_the_prior_task() {
        let rt = runtime();
        let (mut coord, rx) = RequestCoordinator::new(rt.handle().clone());

        let (gate_tx, gate_rx) = tokio::sync::oneshot::channel::<()>();
        coord.issue(async move {
            gate_rx.await.ok();
            Ok(1u32)
        });
        let seq = coord.issue(async { Ok(2u32) });

        let commit = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(commit.seq, seq);

        drop(gate_tx);
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn cancel_swallows_the_settlement() {
        let rt = runtime();
        let (mut coord, rx) = RequestCoordinator::new(rt.handle().clone());

        let (gate_tx, gate_rx) = tokio::sync::oneshot::channel::<()>();
        coord.issue(async move {
            gate_rx.await.ok();
            Ok(1u32)
        });
        assert!(coord.has_in_flight());
        coord.cancel();
        assert!(!coord.has_in_flight());

        drop(gate_tx);
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
