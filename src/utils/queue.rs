use concurrent_queue::{
    ConcurrentQueue,
    PopError,
    PushError
};

use crate::utils::errors::ScanError;

/// Multi producer / multi consumer queue shared between the dispatcher, the
/// worker threads and the collector.
pub struct QueueManager<T> {
    memory_queue: ConcurrentQueue<T>
}

impl<T> QueueManager<T> {
    /// Queue that holds exactly `capacity` items, so a producer that knows its
    /// item count up front never waits.
    pub fn with_capacity(capacity: usize) -> QueueManager<T> {
        // concurrent-queue refuses a zero sized bounded queue
        let memory_queue = match capacity {
            0 => ConcurrentQueue::unbounded(),
            _ => ConcurrentQueue::bounded(capacity),
        };
        QueueManager {
            memory_queue
        }
    }

    pub fn push(&self,item: T) -> Result<(),ScanError> {
        match self.memory_queue.push(item) {
            Ok(_) => Ok(()),
            Err(PushError::Full(_)) => Err(ScanError::QueueRejected(format!("queue is full at {} items",self.memory_queue.len()))),
            Err(PushError::Closed(_)) => Err(ScanError::QueueRejected(String::from("queue is already closed"))),
        }
    }

    pub fn pop(&self) -> Result<T,PopError> {
        self.memory_queue.pop()
    }

    /// Signals consumers that no more items will come. Items already in the
    /// queue can still be popped.
    pub fn close(&self) {
        self.memory_queue.close();
    }

    pub fn len(&self) -> usize {
        self.memory_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory_queue.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.memory_queue.is_closed()
    }
}
