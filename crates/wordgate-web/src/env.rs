//! Browser environment.

use std::{future::Future, ops::Sub, time::Duration};

use wordgate_core::Environment;

/// Point on the page's `performance.now()` clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DomInstant(Duration);

impl Sub for DomInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

/// Environment backed by the window's clock, timers and `Math.random()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomEnv;

impl Environment for DomEnv {
    type Instant = DomInstant;

    fn now(&self) -> DomInstant {
        let millis = web_sys::window()
            .and_then(|window| window.performance())
            .map_or(0.0, |performance| performance.now());
        DomInstant(Duration::from_secs_f64(millis.max(0.0) / 1000.0))
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        for byte in buffer {
            *byte = (js_sys::Math::random() * 256.0) as u8;
        }
    }
}
