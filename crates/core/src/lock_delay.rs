//! Lock delay handle
//!
//! A single-shot, cancellable deferred lock. The controller arms it when a
//! piece fails to move down, cancels it on any successful move, rotation or
//! hold, and advances it from `tick` with active (unpaused) time only.

/// Outstanding lock deadline, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockDelay {
    remaining_ms: Option<u32>,
}

impl LockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer unless it is already armed.
    ///
    /// Returns true if this call armed it.
    pub fn arm(&mut self, delay_ms: u32) -> bool {
        if self.remaining_ms.is_some() {
            return false;
        }
        self.remaining_ms = Some(delay_ms);
        true
    }

    /// Drop any outstanding deadline. Returns true if one was armed.
    pub fn cancel(&mut self) -> bool {
        self.remaining_ms.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Let `elapsed_ms` pass. Returns true exactly once, when the deadline is reached.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        match self.remaining_ms {
            Some(remaining) if elapsed_ms >= remaining => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - elapsed_ms);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_is_idempotent() {
        let mut delay = LockDelay::new();
        assert!(delay.arm(500));
        delay.advance(200);
        assert!(!delay.arm(500));
        assert_eq!(delay.remaining_ms(), Some(300));
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let mut delay = LockDelay::new();
        delay.arm(500);
        assert!(!delay.advance(499));
        assert!(delay.advance(1));
        assert!(!delay.is_armed());
        assert!(!delay.advance(1000));
    }

    #[test]
    fn test_cancel_disarms() {
        let mut delay = LockDelay::new();
        assert!(!delay.cancel());
        delay.arm(500);
        assert!(delay.cancel());
        assert!(!delay.advance(500));
    }
}
