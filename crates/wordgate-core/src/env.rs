//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples the gate driver from system resources
//! (time, timers, randomness). The browser binding backs it with
//! `performance.now()` and `setTimeout`, the terminal front end with tokio,
//! and the harness with a paused clock and a seeded RNG.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Determinism: Given the same seed, `random_bytes()` produces the same
//!   sequence
//! - Isolation: Implementations must not share global state
//!
//! Unlike a server environment this trait is not `Send + Sync`: everything
//! runs on the page's single event loop.

use std::{future::Future, ops::Sub, time::Duration};

/// Abstract environment providing time, timers and randomness.
pub trait Environment: Clone + 'static {
    /// Point-in-time type. Browsers cannot use `std::time::Instant`.
    type Instant: Copy + Ord + Sub<Output = Duration>;

    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: Subsequent calls must return times >= previous calls.
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver code awaits this (delayed notice resets); the gate itself
    /// never sleeps.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;

    /// Fills the provided buffer with random bytes.
    ///
    /// Used for decorative randomness only; no security property is
    /// required.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Generates a uniformly distributed `f64` in `[0, 1)`.
    #[allow(clippy::cast_precision_loss)]
    fn random_unit(&self) -> f64 {
        // 53 high bits fill an f64 mantissa exactly.
        (self.random_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[derive(Clone)]
    struct CountingEnv {
        next: Rc<Cell<u8>>,
    }

    impl Environment for CountingEnv {
        type Instant = Duration;

        fn now(&self) -> Duration {
            Duration::ZERO
        }

        fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> {
            std::future::ready(())
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            for byte in buffer {
                *byte = self.next.get();
                self.next.set(self.next.get().wrapping_add(1));
            }
        }
    }

    #[test]
    fn random_u64_is_big_endian_of_bytes() {
        let env = CountingEnv { next: Rc::new(Cell::new(0)) };
        assert_eq!(env.random_u64(), 0x0001_0203_0405_0607);
    }

    #[test]
    fn random_unit_stays_in_range() {
        let env = CountingEnv { next: Rc::new(Cell::new(0xF0)) };
        for _ in 0..64 {
            let x = env.random_unit();
            assert!((0.0..1.0).contains(&x), "{x} out of range");
        }
    }
}
