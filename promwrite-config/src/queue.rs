//! Remote write queue configuration.
//!
//! The queue decouples sample production from network transmission. When it
//! is disabled every export request is sent synchronously.

use serde::{Deserialize, Serialize};

/// Queue settings for outgoing remote write requests.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteWriteQueue {
    /// If false the queue is bypassed and requests are sent synchronously.
    pub enabled: bool,

    /// Maximum number of metric batches buffered at a given time.
    /// Ignored when the queue is disabled.
    pub queue_size: i64,

    /// Number of workers fanning out remote write requests.
    pub num_consumers: i64,
}

impl RemoteWriteQueue {
    /// An enabled queue with the given capacity and worker count.
    pub fn enabled(queue_size: i64, num_consumers: i64) -> Self {
        Self {
            enabled: true,
            queue_size,
            num_consumers,
        }
    }
}
