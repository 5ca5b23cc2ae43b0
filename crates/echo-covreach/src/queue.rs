//! The work queue (§4.4): a shared FIFO or LIFO of pending node handles with
//! an integrated in-flight counter, enabling multi-producer/multi-consumer
//! termination detection without a condition variable.

use std::collections::VecDeque;
use std::time::Duration;

use crate::config::QueueOrder;
use crate::cover_graph::NodeHandle;
use crate::spinlock::SpinLock;

const POLL_BACKOFF: Duration = Duration::from_micros(5);

struct QueueState {
    items: VecDeque<NodeHandle>,
    order: QueueOrder,
    in_flight: u64,
}

/// Outcome of [`WorkQueue::pop`].
pub(crate) enum Popped {
    /// A node handle was dequeued; `in_flight` has been incremented.
    Node(NodeHandle),
    /// The queue is empty and no worker has anything in flight: all
    /// reachable work is complete.
    Done,
}

pub(crate) struct WorkQueue {
    state: SpinLock<QueueState>,
}

impl WorkQueue {
    pub(crate) fn new(order: QueueOrder) -> Self {
        Self {
            state: SpinLock::new(QueueState {
                items: VecDeque::new(),
                order,
                in_flight: 0,
            }),
        }
    }

    /// Seeds the queue with the initial frontier. Does not touch
    /// `in_flight`: no worker is yet processing these nodes.
    pub(crate) fn seed(&self, handles: impl IntoIterator<Item = NodeHandle>) {
        self.state.lock().items.extend(handles);
    }

    /// Blocks until a node is available or the queue is provably exhausted.
    pub(crate) fn pop(&self) -> Popped {
        loop {
            {
                let mut state = self.state.lock();
                let next = match state.order {
                    QueueOrder::Bfs => state.items.pop_front(),
                    QueueOrder::Dfs => state.items.pop_back(),
                };
                if let Some(handle) = next {
                    state.in_flight += 1;
                    return Popped::Node(handle);
                }
                if state.in_flight == 0 {
                    return Popped::Done;
                }
            }
            tracing::debug!("queue empty with work in flight, retrying");
            std::thread::sleep(POLL_BACKOFF);
        }
    }

    /// Moves every handle out of `batch` into the queue, then — if
    /// `decrement` is set — decrements `in_flight` by one (the worker that
    /// produced `batch` has finished processing the node it popped).
    pub(crate) fn push_and_release(&self, batch: &mut Vec<NodeHandle>, decrement: bool) {
        let mut state = self.state.lock();
        state.items.extend(batch.drain(..));
        if decrement {
            state.in_flight -= 1;
        }
    }
}
