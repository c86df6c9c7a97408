//! Best-effort page locking for secret buffers.
//!
//! Locks are per page and do not nest: unlocking one buffer may unlock a
//! neighbour that shares its page. Callers wipe buffers themselves and never
//! rely on locking for erasure.

use tracing::debug;

/// Try to keep `bytes` out of swap. Returns whether the lock was taken.
pub(crate) fn lock(bytes: &mut [u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    // SAFETY: pointer and length come from a live, exclusively borrowed slice.
    let locked = unsafe { memsec::mlock(bytes.as_mut_ptr(), bytes.len()) };
    if !locked {
        debug!(len = bytes.len(), "could not lock secret buffer in memory");
    }
    locked
}

/// Release a lock taken by [`lock`].
pub(crate) fn unlock(bytes: &mut [u8]) {
    if bytes.is_empty() {
        return;
    }

    // SAFETY: same slice that was passed to `lock`, still alive.
    unsafe {
        memsec::munlock(bytes.as_mut_ptr(), bytes.len());
    }
}
