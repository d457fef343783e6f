// Sandbox hit points

/// Health pool for the sandbox character
#[derive(Debug, Clone)]
pub struct HealthPool {
    current: i32,
    max: i32,
    /// Health restored per second while alive
    regen_per_sec: f32,
    regen_carry: f32,
}

impl HealthPool {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            regen_per_sec: 0.0,
            regen_carry: 0.0,
        }
    }

    /// Builder-style passive regeneration
    pub fn with_regen(mut self, per_sec: f32) -> Self {
        self.regen_per_sec = per_sec.max(0.0);
        self
    }

    /// Apply damage, clamping at zero. Negative amounts are ignored.
    pub fn damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.current = (self.current - amount).max(0);
    }

    /// Restore health up to max. The dead stay dead.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 || !self.is_alive() {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    /// Apply regeneration for `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.regen_per_sec <= 0.0 || dt <= 0.0 || !self.is_alive() {
            return;
        }
        if self.current >= self.max {
            self.regen_carry = 0.0;
            return;
        }

        self.regen_carry += self.regen_per_sec * dt;
        let whole = self.regen_carry.floor();
        if whole >= 1.0 {
            self.regen_carry -= whole;
            self.heal(whole as i32);
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Current health as a fraction of max
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

impl Default for HealthPool {
    fn default() -> Self {
        Self::new(100)
    }
}
