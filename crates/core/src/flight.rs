use std::sync::atomic::{AtomicBool, Ordering};

/// Allows at most one submission in flight.
#[derive(Debug, Default)]
pub(crate) struct Flight {
    pending: AtomicBool,
}

impl Flight {
    /// Marks a submission as started, or returns `None` if one already is.
    #[inline]
    pub fn try_begin(&self) -> Option<FlightGuard<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard {
                pending: &self.pending,
            })
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Ends the submission when dropped, including when the submitting
/// future is dropped mid-way.
#[derive(Debug)]
pub(crate) struct FlightGuard<'a> {
    pending: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.pending.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flight() {
        let flight = Flight::default();
        assert!(!flight.is_pending());

        let guard = flight.try_begin().unwrap();
        assert!(flight.is_pending());
        assert!(flight.try_begin().is_none());

        drop(guard);
        assert!(!flight.is_pending());
        assert!(flight.try_begin().is_some());
    }
}
