//! Production environment using system time and OS randomness.

use std::time::Duration;

use wordgate_core::Environment;

/// Environment on the wall clock and tokio timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> std::time::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> {
        tokio::time::sleep(duration)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).unwrap_or_else(|e| {
            // Only used for confetti placement.
            tracing::error!("getrandom failed: {}", e);
            buffer.fill(0);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_advances() {
        let env = SystemEnv;

        let t1 = env.now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = env.now();

        assert!(t2 > t1, "Time should advance");
    }

    #[test]
    fn random_bytes_are_random() {
        let env = SystemEnv;

        let mut bytes1 = [0u8; 32];
        let mut bytes2 = [0u8; 32];

        env.random_bytes(&mut bytes1);
        env.random_bytes(&mut bytes2);

        assert_ne!(bytes1, bytes2, "Random bytes should differ");
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_uses_tokio_clock() {
        let start = tokio::time::Instant::now();
        SystemEnv.sleep(Duration::from_millis(800)).await;
        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
