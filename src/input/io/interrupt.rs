//! SIGINT capture scoped to a single read attempt.
//!
//! While captured, SIGINT only raises a flag and interrupts the blocking
//! `poll(2)` (the handler is installed without `SA_RESTART`). The previous
//! disposition is saved on install and put back on restore or drop.

use std::io;
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Whether a captured SIGINT is waiting to be consumed
pub fn is_pending() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Consume a pending interrupt, returning whether one was pending
pub fn take_pending() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

/// Installed SIGINT handler that remembers what it replaced
pub struct InterruptCapture {
    previous: Option<libc::sigaction>,
}

impl InterruptCapture {
    /// Install the flag-setting handler, saving the current disposition
    pub fn install() -> io::Result<Self> {
        INTERRUPTED.store(false, Ordering::SeqCst);

        // SAFETY: both sigaction structs are fully initialised (zeroed, then
        // the handler and mask set) and outlive the call. The handler only
        // touches an atomic, which is async-signal-safe.
        let previous = unsafe {
            let mut action: libc::sigaction = mem::zeroed();
            action.sa_sigaction = on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t;
            action.sa_flags = 0;
            libc::sigemptyset(&mut action.sa_mask);

            let mut previous: libc::sigaction = mem::zeroed();
            if libc::sigaction(libc::SIGINT, &action, &mut previous) != 0 {
                return Err(io::Error::last_os_error());
            }
            previous
        };

        tracing::trace!("SIGINT capture installed");
        Ok(Self {
            previous: Some(previous),
        })
    }

    /// Put the saved disposition back. Idempotent.
    pub fn restore(&mut self) -> io::Result<()> {
        let Some(previous) = self.previous.take() else {
            return Ok(());
        };

        // SAFETY: `previous` was filled in by the kernel in `install`.
        let rc = unsafe { libc::sigaction(libc::SIGINT, &previous, ptr::null_mut()) };
        INTERRUPTED.store(false, Ordering::SeqCst);
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }

        tracing::trace!("SIGINT disposition restored");
        Ok(())
    }
}

impl Drop for InterruptCapture {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("Failed to restore SIGINT disposition: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_handler() -> libc::sighandler_t {
        unsafe {
            let mut current: libc::sigaction = mem::zeroed();
            libc::sigaction(libc::SIGINT, ptr::null(), &mut current);
            current.sa_sigaction
        }
    }

    // Single test: the SIGINT disposition is process-wide state.
    #[test]
    fn capture_should_flag_sigint_and_restore_previous_handler() {
        let before = current_handler();

        let mut capture = InterruptCapture::install().unwrap();
        assert_ne!(current_handler(), before);
        assert!(!is_pending());

        unsafe {
            libc::raise(libc::SIGINT);
        }
        assert!(is_pending());
        assert!(take_pending());
        assert!(!is_pending());

        capture.restore().unwrap();
        assert_eq!(current_handler(), before);

        // second restore is a no-op
        capture.restore().unwrap();
        assert_eq!(current_handler(), before);

        // dropping an unrestored capture restores too
        {
            let _capture = InterruptCapture::install().unwrap();
            assert_ne!(current_handler(), before);
        }
        assert_eq!(current_handler(), before);
    }
}
