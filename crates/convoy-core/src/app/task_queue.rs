//! TaskQueue - 有界・クローズ可能な FIFO
//!
//! # 学習ポイント
//! - Mutex + Notify による待機（lease 相当の `recv`）
//! - `Notified::enable` で「状態チェック前に待機登録」して通知の取りこぼしを防ぐ
//! - close はキャンセルではない: 投入済みのタスクを全て配ってから `None` を返す

use std::collections::VecDeque;
use std::pin::pin;

use tokio::sync::{Mutex, Notify};

use crate::domain::{QueueError, Task};

struct QueueState {
    ready: VecDeque<Task>,
    closed: bool,
}

/// Bounded, closable task queue shared by the coordinator and its workers.
///
/// Each submitted task is handed to exactly one `recv` caller.
pub struct TaskQueue {
    state: Mutex<QueueState>,
    notify: Notify,
    capacity: usize,
}

impl TaskQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                ready: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            notify: Notify::new(),
            capacity,
        }
    }

    /// Enqueue a task. Never waits.
    pub async fn submit(&self, task: Task) -> Result<(), QueueError> {
        {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(QueueError::Closed);
            }
            if state.ready.len() >= self.capacity {
                return Err(QueueError::Full(self.capacity));
            }
            state.ready.push_back(task);
        }
        self.notify.notify_one();
        Ok(())
    }

    /// Signal "no more tasks". Calling it twice is a contract violation.
    pub async fn close(&self) -> Result<(), QueueError> {
        {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(QueueError::AlreadyClosed);
            }
            state.closed = true;
        }
        self.notify.notify_waiters();
        Ok(())
    }

    /// Take the next task, waiting while the queue is open and empty.
    ///
    /// Returns `None` once the queue is closed and drained.
    pub async fn recv(&self) -> Option<Task> {
        loop {
            let mut notified = pin!(self.notify.notified());
            notified.as_mut().enable();

            {
                let mut state = self.state.lock().await;
                if let Some(task) = state.ready.pop_front() {
                    // 残りがあれば別のワーカーも起こす
                    if !state.ready.is_empty() {
                        self.notify.notify_one();
                    }
                    return Some(task);
                }
                if state.closed {
                    return None;
                }
            }

            notified.await;
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.ready.len()
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }
}
