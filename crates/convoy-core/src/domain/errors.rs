//! Errors - エラー型と分類
//!
//! # 学習ポイント
//! - グローバルなセンチネルエラーではなく、閉じた enum で分類する
//! - 分類 (ErrorKind) は Outcome の中に運ばれ、ワーカーの外へは panic も伝播もしない

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ErrorKind は失敗の分類
///
/// - Configuration: 実行前に検出される設定エラー（致命的）
/// - TaskExecution: unit of work 自身の失敗（Outcome に畳み込む）
/// - DeadlineExceeded: タスクの期限切れ（Outcome に畳み込む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Configuration,
    TaskExecution,
    DeadlineExceeded,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::TaskExecution => "task execution",
            ErrorKind::DeadlineExceeded => "deadline exceeded",
        };
        f.write_str(s)
    }
}

/// WorkError is what a unit of work returns when its own operation fails.
///
/// Domain code wraps its typed errors with [`WorkError::with_source`] so the
/// chain survives into logs; the engine only ever looks at the message.
#[derive(Debug)]
pub struct WorkError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl WorkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// `error loading cargo: truck not found` のような文脈付きエラーを作る
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for WorkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.message, source),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for WorkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// QueueError はタスクキューの契約違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("task queue is closed")]
    Closed,

    #[error("task queue is already closed")]
    AlreadyClosed,

    #[error("task queue is full (capacity={0})")]
    Full(usize),
}
