//! Synchronization utilities for robust mutex handling
//!
//! Converts mutex poison errors into application-specific errors so lock
//! failures flow through the same error taxonomy as everything else instead
//! of panicking.

use std::sync::LockResult;

/// Handle poisoned mutex cases with consistent error handling
///
/// A mutex poisons when a thread panics while holding it. The log keeps all
/// real state on disk, so a poisoned lock is reported through the provided
/// error constructor rather than propagated as a panic.
///
/// # Arguments
/// * `result` - The result from a mutex lock operation
/// * `error_constructor` - Function to create the appropriate error type
///
/// # Returns
/// The mutex guard on success, or an application error on poison
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "mutex poisoned, a panic occurred while the lock was held: {:?}",
            poison_err
        ))
    })
}
