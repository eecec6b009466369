//! Damped spring easing shared by the progress bar and reveal transitions.

/// Longest integration step used by [`SpringValue::advance`], in seconds.
const MAX_STEP_SECS: f64 = 1.0 / 240.0;
/// Elapsed time beyond this is treated as this much; keeps a stalled tab from
/// integrating thousands of steps on wake-up.
const MAX_ADVANCE_SECS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from the target under which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    pub const fn with_rest_delta(self, rest_delta: f64) -> Self {
        Self { rest_delta, ..self }
    }

    fn angular_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Fraction of the initial displacement left after `t` seconds, for a
    /// spring released at rest. Starts at 1 and decays toward 0; an
    /// underdamped spring crosses zero (overshoot) on the way.
    pub fn displacement(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        let omega = self.angular_frequency();
        let zeta = self.damping_ratio();
        if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            decay * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else if (zeta - 1.0).abs() < f64::EPSILON {
            (-omega * t).exp() * (1.0 + omega * t)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }

    /// Progress from 0 toward 1 after `t` seconds.
    pub fn progress(&self, t: f64) -> f64 {
        1.0 - self.displacement(t)
    }

    /// True once the released spring can no longer move further than
    /// `rest_delta` from its target.
    pub fn is_settled_at(&self, t: f64) -> bool {
        if t <= 0.0 {
            return false;
        }
        let zeta = self.damping_ratio();
        if zeta < 1.0 {
            let omega = self.angular_frequency();
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let amplitude = (1.0 + (zeta * omega / omega_d).powi(2)).sqrt();
            amplitude * (-zeta * omega * t).exp() <= self.rest_delta
        } else {
            self.displacement(t) <= self.rest_delta
        }
    }
}

/// A value chasing a moving target through a spring.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringValue {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
}

impl SpringValue {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            position: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        (self.position - self.target).abs() <= self.config.rest_delta
            && self.velocity.abs() <= self.config.rest_speed
    }

    /// Integrates the spring forward by `dt_secs`, snapping onto the target
    /// once at rest.
    pub fn advance(&mut self, dt_secs: f64) {
        let mut remaining = dt_secs.clamp(0.0, MAX_ADVANCE_SECS);
        while remaining > 0.0 && !self.is_at_rest() {
            let step = remaining.min(MAX_STEP_SECS);
            let spring_force = -self.config.stiffness * (self.position - self.target);
            let damping_force = -self.config.damping * self.velocity;
            let acceleration = (spring_force + damping_force) / self.config.mass;
            self.velocity += acceleration * step;
            self.position += self.velocity * step;
            remaining -= step;
        }
        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SpringConfig, SpringValue};

    #[test]
    fn displacement_starts_at_one_and_decays() {
        let configs = [
            SpringConfig::new(100.0, 12.0),
            SpringConfig::new(100.0, 30.0),
            SpringConfig::new(100.0, 20.0),
        ];
        for config in configs {
            assert_eq!(config.displacement(0.0), 1.0);
            assert!(config.displacement(3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let config = SpringConfig::new(100.0, 12.0);
        let min = (1..200)
            .map(|i| config.displacement(f64::from(i) * 0.005))
            .fold(f64::INFINITY, f64::min);
        assert!(min < 0.0);
    }

    #[test]
    fn overdamped_spring_is_monotonic() {
        let config = SpringConfig::new(100.0, 30.0);
        let samples: Vec<f64> = (0..200)
            .map(|i| config.displacement(f64::from(i) * 0.01))
            .collect();
        assert!(samples.windows(2).all(|w| w[1] <= w[0]));
        assert!(samples.iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn settled_means_within_rest_delta() {
        let config = SpringConfig::new(100.0, 12.0);
        assert!(!config.is_settled_at(0.1));
        assert!(config.is_settled_at(2.0));
        assert!(config.displacement(2.0).abs() <= config.rest_delta);
    }

    #[test]
    fn value_reaches_target_and_rests() {
        let config = SpringConfig::new(100.0, 30.0).with_rest_delta(0.001);
        let mut value = SpringValue::new(config, 0.0);
        value.set_target(1.0);
        assert!(!value.is_at_rest());
        for _ in 0..180 {
            value.advance(1.0 / 60.0);
        }
        assert!(value.is_at_rest());
        assert_eq!(value.position(), 1.0);
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut value = SpringValue::new(SpringConfig::new(100.0, 30.0), 0.0);
        value.set_target(1.0);
        value.advance(0.0);
        assert_eq!(value.position(), 0.0);
    }
}
