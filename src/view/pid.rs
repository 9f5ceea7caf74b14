/// Parallel-form PID controller.
///
/// Owned by the DynamicResolutionController; maps the frame-time error to
/// a resolution-scale correction. State changes only through update(),
/// reset(), and the explicit configuration setters — there is no hidden
/// global state.

/// Proportional-integral-derivative controller, parallel form:
/// `out = Kp*e + Ki*∫e + Kd*de/dt`
#[derive(Debug, Clone)]
pub struct PidController {
    kp: f32,
    ki: f32,
    kd: f32,
    /// Bounds on the accumulated integral term
    integral_limits: (f32, f32),
    /// Outputs inside this band collapse to zero (jitter suppression)
    output_dead_band: (f32, f32),
    /// When set, update() stops accumulating the integral (anti-windup
    /// while the controlled output is saturated)
    integral_inhibition: bool,
    integral: f32,
    last_error: f32,
    error: f32,
    derivative: f32,
}

impl PidController {
    /// Pure proportional controller with unit gain; configure via setters.
    pub fn new() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            integral_limits: (f32::MIN, f32::MAX),
            output_dead_band: (0.0, 0.0),
            integral_inhibition: false,
            integral: 0.0,
            last_error: 0.0,
            error: 0.0,
            derivative: 0.0,
        }
    }

    /// Set the parallel gains. Does not reset the accumulated state;
    /// call reset() when re-parameterizing a live controller.
    pub fn set_parallel_gains(&mut self, kp: f32, ki: f32, kd: f32) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
    }

    /// Bound the integral term to [lo, hi]
    pub fn set_integral_limits(&mut self, lo: f32, hi: f32) {
        debug_assert!(lo <= hi);
        self.integral_limits = (lo, hi);
    }

    /// Collapse outputs within [lo, hi] to zero
    pub fn set_output_dead_band(&mut self, lo: f32, hi: f32) {
        debug_assert!(lo <= hi);
        self.output_dead_band = (lo, hi);
    }

    /// Enable/disable integral accumulation (anti-windup)
    pub fn set_integral_inhibition_enabled(&mut self, enabled: bool) {
        self.integral_inhibition = enabled;
    }

    /// Clear the accumulated error state
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
        self.error = 0.0;
        self.derivative = 0.0;
    }

    /// Advance the controller by one step of duration `dt` and return the
    /// correction for bringing `measure` toward `target`.
    pub fn update(&mut self, measure: f32, target: f32, dt: f32) -> f32 {
        debug_assert!(dt > 0.0);

        let error = target - measure;
        if !self.integral_inhibition {
            self.integral = (self.integral + error * dt)
                .clamp(self.integral_limits.0, self.integral_limits.1);
        }
        self.derivative = (error - self.last_error) / dt;
        self.last_error = error;
        self.error = error;

        let out = self.kp * error + self.ki * self.integral + self.kd * self.derivative;
        if out >= self.output_dead_band.0 && out <= self.output_dead_band.1 {
            return 0.0;
        }
        out
    }

    // ===== TELEMETRY =====

    /// Error of the last update
    pub fn error(&self) -> f32 {
        self.error
    }

    /// Accumulated integral term
    pub fn integral(&self) -> f32 {
        self.integral
    }

    /// Derivative of the last update
    pub fn derivative(&self) -> f32 {
        self.derivative
    }
}

impl Default for PidController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "pid_tests.rs"]
mod tests;
