//! Simulated environment.

use std::{cell::RefCell, future::Future, rc::Rc, time::Duration};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wordgate_core::Environment;

/// Environment on tokio's clock with a seeded RNG.
///
/// Tests run with `#[tokio::test(start_paused = true)]`, so sleeping costs
/// no wall-clock time and `tokio::time::advance` moves the clock
/// explicitly.
#[derive(Clone)]
pub struct SimEnv {
    rng: Rc<RefCell<ChaCha8Rng>>,
}

impl SimEnv {
    /// Create an environment whose randomness is fixed by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Rc::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed))) }
    }
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Environment for SimEnv {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.borrow_mut().fill_bytes(buffer);
    }
}

/// Let spawned local tasks run until they block on a timer or a channel.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_bytes() {
        let a = SimEnv::with_seed(7);
        let b = SimEnv::with_seed(7);

        let mut bytes_a = [0u8; 32];
        let mut bytes_b = [0u8; 32];
        a.random_bytes(&mut bytes_a);
        b.random_bytes(&mut bytes_b);

        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn clones_share_the_stream() {
        let env = SimEnv::with_seed(7);
        let clone = env.clone();

        let first = env.random_u64();
        let second = clone.random_u64();
        assert_ne!(first, second, "clone must continue the sequence, not restart it");
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_advances_virtual_time() {
        let env = SimEnv::default();

        let start = env.now();
        env.sleep(Duration::from_millis(800)).await;

        assert!(env.now() - start >= Duration::from_millis(800));
    }
}
