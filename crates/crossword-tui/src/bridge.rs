//! Hand-off of state mutations from worker threads to the interactive thread.
//!
//! Workers never touch interface state directly. They [`Poster::post`]
//! closures, and the event loop applies them with [`UiBridge::pump`] in the
//! order they were posted.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// A deferred mutation of interface state
pub type Work<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Receiving side, owned by the interactive thread
pub struct UiBridge<S> {
    sender: Sender<Work<S>>,
    receiver: Receiver<Work<S>>,
}

/// Sending side, cheap to clone and safe to move into a worker
pub struct Poster<S> {
    sender: Sender<Work<S>>,
}

impl<S> Clone for Poster<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S> Default for UiBridge<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> UiBridge<S> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn poster(&self) -> Poster<S> {
        Poster {
            sender: self.sender.clone(),
        }
    }

    /// Apply every queued mutation to `state`, oldest first.
    /// Never blocks; returns how many were applied.
    pub fn pump(&self, state: &mut S) -> usize {
        let mut applied = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(work) => {
                    work(state);
                    applied += 1;
                }
                // The bridge holds a sender itself, so Disconnected cannot
                // happen while it is alive.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }
}

impl<S> Poster<S> {
    /// Queue `work` for the interactive thread. Returns `false` when the
    /// interactive side has gone away and the work was discarded.
    pub fn post<F>(&self, work: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.sender.send(Box::new(work)).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_pump_preserves_order() {
        let bridge: UiBridge<Vec<u32>> = UiBridge::new();
        let poster = bridge.poster();
        for i in 0..5 {
            poster.post(move |log| log.push(i));
        }

        let mut log = Vec::new();
        assert_eq!(bridge.pump(&mut log), 5);
        assert_eq!(log, vec![0, 1, 2, 3, 4]);
        assert_eq!(bridge.pump(&mut log), 0);
    }

    #[test]
    fn test_worker_posts_applied_on_pump() {
        let bridge: UiBridge<Vec<u32>> = UiBridge::new();
        let poster = bridge.poster();

        let mut log = Vec::new();
        poster.post(|log| log.push(0));

        thread::spawn(move || {
            for i in 1..=100 {
                poster.post(move |log| log.push(i));
            }
        })
        .join()
        .unwrap();

        // Nothing is applied until the owning thread pumps
        assert!(log.is_empty());
        bridge.pump(&mut log);
        assert_eq!(log, (0..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_post_after_bridge_dropped() {
        let bridge: UiBridge<()> = UiBridge::new();
        let poster = bridge.poster();
        drop(bridge);
        assert!(!poster.post(|_| {}));
    }
}
