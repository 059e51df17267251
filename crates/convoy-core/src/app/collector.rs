//! ResultCollector - Outcome の受け皿
//!
//! 容量 = 投入タスク数の bounded mpsc。ワーカーの数は有限なので、
//! 正しくサイズ設定されていれば `report` が待たされることはない。

use tokio::sync::mpsc;

use crate::domain::Outcome;
use crate::error::FleetError;

/// Cloneable handle the workers write outcomes through.
#[derive(Clone)]
pub struct OutcomeReporter {
    tx: mpsc::Sender<Outcome>,
}

impl OutcomeReporter {
    /// Report one outcome.
    ///
    /// Fails only if the collector was already drained, which the coordinator
    /// never does while workers are alive.
    pub async fn report(&self, outcome: Outcome) -> Result<(), Outcome> {
        self.tx.send(outcome).await.map_err(|e| e.0)
    }
}

pub struct ResultCollector {
    tx: mpsc::Sender<Outcome>,
    rx: mpsc::Receiver<Outcome>,
}

impl ResultCollector {
    pub fn new(capacity: usize) -> Self {
        // mpsc::channel(0) は panic するので最低 1
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self { tx, rx }
    }

    pub fn reporter(&self) -> OutcomeReporter {
        OutcomeReporter {
            tx: self.tx.clone(),
        }
    }

    /// Drain every reported outcome. Call once, after all workers are joined.
    ///
    /// Every reporter must be dropped by then, otherwise this would wait for
    /// a sender that never reports.
    pub async fn drain(self, expected: usize) -> Result<Vec<Outcome>, FleetError> {
        let Self { tx, mut rx } = self;
        drop(tx);

        let mut outcomes = Vec::with_capacity(expected);
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        if outcomes.len() != expected {
            return Err(FleetError::OutcomeCountMismatch {
                expected,
                actual: outcomes.len(),
            });
        }
        Ok(outcomes)
    }
}
