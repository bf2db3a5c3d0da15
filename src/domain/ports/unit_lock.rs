//! Unit Lock Port
//!
//! A unit's pipeline is not re-entrant. The executor holds a lease on the
//! unit name from validation until verification.

use crate::error::AppDeployResult;

/// Held for the duration of one unit's pipeline; dropping it releases the lock
pub trait UnitLease: Send {}

pub trait UnitLocker: Send + Sync {
    /// Take the lock for `unit`, failing with `UnitLocked` when another
    /// pipeline holds it
    fn acquire(&self, unit: &str) -> AppDeployResult<Box<dyn UnitLease>>;
}

/// Locker for single-process use where nothing else can contend
pub struct NoopLocker;

struct NoopLease;

impl UnitLease for NoopLease {}

impl UnitLocker for NoopLocker {
    fn acquire(&self, _unit: &str) -> AppDeployResult<Box<dyn UnitLease>> {
        Ok(Box::new(NoopLease))
    }
}
