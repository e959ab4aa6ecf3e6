//! Celebration particles.
//!
//! Pure planning: the renderer turns each [`Particle`] into a fixed-position
//! element with a two-keyframe fall animation and removes it when the
//! animation finishes.

use crate::{config::ConfettiConfig, env::Environment};

/// One falling particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position in `vw`, `[0, 100)`.
    pub left_vw: f64,
    /// Font size in px.
    pub font_size_px: f64,
    /// Fall duration in ms.
    pub duration_ms: f64,
    /// Rotation at the end of the fall, in degrees.
    pub end_rotation_deg: f64,
}

impl Particle {
    /// CSS transform of the first keyframe.
    pub fn start_transform() -> &'static str {
        "translateY(0) rotate(0deg)"
    }

    /// CSS transform of the last keyframe.
    pub fn end_transform(&self) -> String {
        format!("translateY(100vh) rotate({}deg)", self.end_rotation_deg)
    }
}

/// A full celebration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPlan {
    /// Particles in creation order.
    pub particles: Vec<Particle>,
}

impl ConfettiPlan {
    /// Draw `config.count` particles from the environment's RNG.
    pub fn generate<E: Environment>(env: &E, config: &ConfettiConfig) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle {
                left_vw: env.random_unit() * 100.0,
                font_size_px: env.random_unit().mul_add(config.size_spread_px, config.min_size_px),
                duration_ms: env
                    .random_unit()
                    .mul_add(config.duration_spread_ms, config.min_duration_ms),
                end_rotation_deg: env.random_unit() * config.max_rotation_deg,
            })
            .collect();

        Self { particles }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, future::Future, rc::Rc, time::Duration};

    use super::*;

    /// xorshift, enough to spread values over the range.
    #[derive(Clone)]
    struct XorEnv(Rc<Cell<u64>>);

    impl Environment for XorEnv {
        type Instant = Duration;

        fn now(&self) -> Duration {
            Duration::ZERO
        }

        fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> {
            std::future::ready(())
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            for chunk in buffer.chunks_mut(8) {
                let mut x = self.0.get();
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                self.0.set(x);
                chunk.copy_from_slice(&x.to_be_bytes()[..chunk.len()]);
            }
        }
    }

    #[test]
    fn default_plan_has_fifty_particles_in_range() {
        let env = XorEnv(Rc::new(Cell::new(0x9E37_79B9_7F4A_7C15)));
        let plan = ConfettiPlan::generate(&env, &ConfettiConfig::default());

        assert_eq!(plan.particles.len(), 50);
        for p in &plan.particles {
            assert!((0.0..100.0).contains(&p.left_vw));
            assert!((10.0..30.0).contains(&p.font_size_px));
            assert!((2000.0..5000.0).contains(&p.duration_ms));
            assert!((0.0..360.0).contains(&p.end_rotation_deg));
        }
    }

    #[test]
    fn particles_are_randomized_individually() {
        let env = XorEnv(Rc::new(Cell::new(42)));
        let plan = ConfettiPlan::generate(&env, &ConfettiConfig::default());

        let first = &plan.particles[0];
        assert!(plan.particles.iter().skip(1).any(|p| p.left_vw != first.left_vw));
    }

    #[test]
    fn end_transform_includes_rotation() {
        let p = Particle { left_vw: 0.0, font_size_px: 10.0, duration_ms: 2000.0, end_rotation_deg: 90.0 };
        assert_eq!(p.end_transform(), "translateY(100vh) rotate(90deg)");
    }
}
