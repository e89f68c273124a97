// promwrite-config/src/validation.rs
//! Validation rules for exporter configuration.
//!
//! Rules run in a fixed order and the first failure is returned. Callers rely
//! on getting exactly one reason, so the rules must not be turned into an
//! aggregating check.

use crate::error::InvalidConfig;
use crate::queue::RemoteWriteQueue;
use crate::tenancy::MultiTenancy;

/// Validate queue sizing.
pub fn validate_queue(queue: &RemoteWriteQueue) -> Result<(), InvalidConfig> {
    if queue.queue_size < 0 {
        return Err(InvalidConfig::NegativeQueueSize);
    }

    if queue.enabled && queue.queue_size == 0 {
        return Err(InvalidConfig::ZeroSizeQueue);
    }

    if queue.num_consumers < 0 {
        return Err(InvalidConfig::NegativeConsumers);
    }

    Ok(())
}

/// Validate that an enabled multi-tenancy block can actually route tenants.
pub fn validate_multi_tenancy(tenancy: &MultiTenancy) -> Result<(), InvalidConfig> {
    if !tenancy.enabled {
        return Ok(());
    }

    if !tenancy.has_carrier() {
        return Err(InvalidConfig::MissingTenantCarrier);
    }

    if tenancy.from_label.is_empty() {
        return Err(InvalidConfig::MissingFromLabel);
    }

    Ok(())
}
