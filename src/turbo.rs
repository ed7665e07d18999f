use crate::config::{GameConfig, Millis};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurboPhase {
    Ready,
    Active,
    Cooldown,
}

/// What the status bar needs: the phase and how full the gauge is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurboGauge {
    pub phase: TurboPhase,
    pub ratio: f64,
}

#[derive(Clone, Debug)]
pub struct Turbo {
    active: bool,
    last_activated: Option<Millis>,
    duration_ms: Millis,
    cooldown_ms: Millis,
    multiplier: f64,
}

impl Turbo {
    pub fn new(config: &GameConfig) -> Self {
        Turbo {
            active: false,
            last_activated: None,
            duration_ms: config.turbo_duration_ms,
            cooldown_ms: config.turbo_cooldown_ms,
            multiplier: config.turbo_multiplier,
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn since_activation(&self, now: Millis) -> Option<Millis> {
        self.last_activated.map(|at| now.saturating_sub(at))
    }

    /// Starts a burst if turbo is idle and off cooldown. Returns whether it did.
    pub fn activate(&mut self, now: Millis) -> bool {
        if self.active {
            return false;
        }
        if let Some(elapsed) = self.since_activation(now) {
            if elapsed < self.cooldown_ms {
                return false;
            }
        }

        self.active = true;
        self.last_activated = Some(now);
        true
    }

    /// Ends the burst once it has lasted `duration_ms`. Returns whether it did.
    pub fn expire(&mut self, now: Millis) -> bool {
        let done = self.active
            && self.since_activation(now).map_or(true, |elapsed| elapsed >= self.duration_ms);

        if done {
            self.active = false;
        }
        done
    }

    /// Scale applied to the tick interval.
    pub fn multiplier(&self) -> f64 {
        if self.active { self.multiplier } else { 1.0 }
    }

    pub fn gauge(&self, now: Millis) -> TurboGauge {
        let elapsed = self.since_activation(now);

        if self.active {
            let used = elapsed.unwrap_or(0) as f64 / self.duration_ms.max(1) as f64;
            return TurboGauge { phase: TurboPhase::Active, ratio: (1.0 - used).max(0.0) };
        }

        let ratio = match elapsed {
            Some(since) => (since as f64 / self.cooldown_ms.max(1) as f64).min(1.0),
            None => 1.0,
        };
        let phase = if ratio >= 1.0 { TurboPhase::Ready } else { TurboPhase::Cooldown };
        TurboGauge { phase, ratio }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_and_cooldown_timeline() {
        let mut turbo = Turbo::new(&GameConfig::default());

        assert!(turbo.activate(0));
        assert!(!turbo.expire(1199));
        assert!(turbo.is_active());

        assert!(turbo.expire(1200));
        assert!(!turbo.is_active());

        assert!(!turbo.activate(5000));
        assert!(!turbo.is_active());

        assert!(turbo.activate(12_000));
        assert!(turbo.is_active());
    }

    #[test]
    fn cannot_stack_while_active() {
        let mut turbo = Turbo::new(&GameConfig::default());
        assert!(turbo.activate(100));
        assert!(!turbo.activate(200));
        assert_eq!(turbo.gauge(100).ratio, 1.0);
    }

    #[test]
    fn multiplier_only_while_active() {
        let mut turbo = Turbo::new(&GameConfig::default());
        assert_eq!(turbo.multiplier(), 1.0);
        turbo.activate(0);
        assert_eq!(turbo.multiplier(), 0.45);
        turbo.expire(1500);
        assert_eq!(turbo.multiplier(), 1.0);
    }

    #[test]
    fn gauge_phases() {
        let mut turbo = Turbo::new(&GameConfig::default());
        assert_eq!(turbo.gauge(0), TurboGauge { phase: TurboPhase::Ready, ratio: 1.0 });

        turbo.activate(1000);
        let active = turbo.gauge(1600);
        assert_eq!(active.phase, TurboPhase::Active);
        assert!((active.ratio - 0.5).abs() < 1e-9);

        turbo.expire(2200);
        let cooling = turbo.gauge(7000);
        assert_eq!(cooling.phase, TurboPhase::Cooldown);
        assert!((cooling.ratio - 0.5).abs() < 1e-9);

        assert_eq!(turbo.gauge(13_000).phase, TurboPhase::Ready);
    }
}
