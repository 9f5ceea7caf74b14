/// Dynamic resolution: closed-loop control of the render-target scale.
///
/// Each frame the measured frame time is compared against the target
/// interval and fed through a PID controller; the output drives a
/// multiplicative ("velocity" style) update of the 2D scale factor. The
/// controller state lives on the View and persists for its lifetime;
/// there is no global state.

use std::time::Duration;
use glam::Vec2;
use crate::graphics_device::Viewport;
use super::pid::PidController;

/// Integral gain of the scale controller (in "frames" units, dt = 1)
const PID_CONTROLLER_KI: f32 = 0.002;
/// Derivative gain of the scale controller
const PID_CONTROLLER_KD: f32 = 0.0;

/// Dynamic resolution configuration.
///
/// Values are sanitized by View::set_dynamic_resolution_options; nothing
/// here is ever a fatal error.
#[derive(Debug, Clone, Copy)]
pub struct DynamicResolutionOptions {
    pub enabled: bool,
    /// Force both axes to scale together. When false, shrinking reduces
    /// the longer viewport axis first.
    pub homogeneous_scaling: bool,
    /// Lower bound of the per-axis scale
    pub min_scale: Vec2,
    /// Upper bound of the per-axis scale
    pub max_scale: Vec2,
    /// Sharpening strength applied by the upscaler
    pub sharpness: f32,
}

impl Default for DynamicResolutionOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            homogeneous_scaling: false,
            min_scale: Vec2::splat(0.5),
            max_scale: Vec2::ONE,
            sharpness: 0.9,
        }
    }
}

/// Frame pacing configuration
#[derive(Debug, Clone, Copy)]
pub struct FrameRateOptions {
    /// Target frame interval in units of 1 / refresh_rate
    pub interval: u8,
    /// Fraction of the target period kept as safety margin
    pub head_room_ratio: f32,
    /// Reaction rate of the controller; proportional gain is
    /// `1 - exp(-scale_rate)`
    pub scale_rate: f32,
}

impl Default for FrameRateOptions {
    fn default() -> Self {
        Self {
            interval: 1,
            head_room_ratio: 0.0,
            scale_rate: 1.0 / 8.0,
        }
    }
}

/// Display properties consumed by frame pacing
#[derive(Debug, Clone, Copy)]
pub struct DisplayInfo {
    /// Refresh rate in Hz
    pub refresh_rate: f32,
}

impl Default for DisplayInfo {
    fn default() -> Self {
        Self { refresh_rate: 60.0 }
    }
}

/// One frame's timing measurement.
///
/// `valid` is false during the first frames and whenever the driver
/// cannot report timing; the controller then clamps instead of running.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    /// Raw frame time
    pub frame_time: Duration,
    /// Denoised frame time (median-filtered upstream), controller input
    pub denoised_frame_time: Duration,
    pub valid: bool,
}

impl FrameInfo {
    /// An unusable sample (startup frames)
    pub fn invalid() -> Self {
        Self {
            frame_time: Duration::ZERO,
            denoised_frame_time: Duration::ZERO,
            valid: false,
        }
    }
}

/// PID-driven anisotropic scale state for one view.
pub struct DynamicResolutionController {
    /// Unrounded scale, fed back into the next iteration
    scale: Vec2,
    pid: PidController,
}

impl DynamicResolutionController {
    pub fn new() -> Self {
        let mut pid = PidController::new();
        // Integral term is used to fight back the dead-band below, we
        // limit how much it can act.
        pid.set_integral_limits(-100.0, 100.0);
        // dead-band, 1% for scaling down, 5% for scaling up. This
        // stabilizes all the jitters.
        pid.set_output_dead_band(-0.01, 0.05);
        Self { scale: Vec2::ONE, pid }
    }

    /// Internal (unrounded) scale state
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Controller telemetry for the frame-history debug record
    pub fn pid(&self) -> &PidController {
        &self.pid
    }

    /// Advance the controller by one frame and return the scale to apply.
    ///
    /// The returned scale is rounded so the scaled viewport dimensions are
    /// multiples of 8 pixels (quad-shading alignment); the internal state
    /// keeps the unrounded value so the feedback loop is not quantized.
    /// A scale of exactly 1.0 is reported unrounded.
    pub fn update_scale(
        &mut self,
        options: &DynamicResolutionOptions,
        frame_rate: &FrameRateOptions,
        display: &DisplayInfo,
        viewport: &Viewport,
        info: &FrameInfo,
    ) -> Vec2 {
        if !options.enabled {
            self.scale = Vec2::ONE;
            return Vec2::ONE;
        }

        if !info.valid {
            // always clamp to the min/max scale range, but keep the
            // controller out of the loop — garbage samples would poison
            // the integral term
            self.scale = Vec2::ONE.clamp(options.min_scale, options.max_scale);
            return self.scale;
        }

        let kp = 1.0 - (-frame_rate.scale_rate).exp();
        self.pid
            .set_parallel_gains(kp, PID_CONTROLLER_KI, PID_CONTROLLER_KD);

        // all values in ms below; dt = 1 keeps the parameters in "frames"
        let dt = 1.0;
        let target = (1000.0 * frame_rate.interval as f32) / display.refresh_rate;
        let target_with_headroom = target * (1.0 - frame_rate.head_room_ratio);
        let measured = info.denoised_frame_time.as_secs_f32() * 1000.0;
        let out = self.pid.update(measured / target_with_headroom, 1.0, dt);

        // maps the pid command to a multiplicative scale correction;
        // asymmetric on purpose: being over budget shrinks faster than
        // having headroom grows
        let command = if out < 0.0 { 1.0 / (1.0 - out) } else { 1.0 + out };

        // relative scaling ("velocity" control): the command applies to
        // the current scaled area, not to the original viewport
        let scale = self.scale.x * self.scale.y * command;

        let w = viewport.width as f32;
        let h = viewport.height as f32;
        if scale < 1.0 && !options.homogeneous_scaling {
            // figure out the major and minor axis
            let major = w.max(h);
            let minor = w.min(h);

            // the major axis is scaled down first, down to the minor axis
            let max_major_scale = minor / major;
            let major_scale = scale.max(max_major_scale);

            // then the minor axis is scaled down to the original aspect-ratio
            let minor_scale = (scale / major_scale).max(major_scale * max_major_scale);

            // if we have some scaling capacity left, scale homogeneously
            let homogeneous_scale = scale / (major_scale * minor_scale);

            let split = homogeneous_scale.sqrt();
            if w > h {
                self.scale = Vec2::new(split * major_scale, split * minor_scale);
            } else {
                self.scale = Vec2::new(split * minor_scale, split * major_scale);
            }
        } else {
            // when scaling up, always scale homogeneously
            self.scale = Vec2::splat(scale.sqrt());
        }

        // always clamp to the min/max scale range
        let unclamped = self.scale;
        self.scale = unclamped.clamp(options.min_scale, options.max_scale);

        // disable the integral term while outside the controllable range
        // (i.e. we clamped), so it doesn't have to unwind after the fact
        self.pid
            .set_integral_inhibition_enabled(self.scale != unclamped);

        // tweak the reported factors so the scaled viewport lands on
        // multiples of 8 pixels (8x8 = 64 fragments helps warp sizes)
        let rounded_x = if self.scale.x == 1.0 {
            1.0
        } else {
            ((self.scale.x * w / 8.0).floor() * 8.0) / w
        };
        let rounded_y = if self.scale.y == 1.0 {
            1.0
        } else {
            ((self.scale.y * h / 8.0).floor() * 8.0) / h
        };
        Vec2::new(rounded_x, rounded_y)
    }
}

impl Default for DynamicResolutionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "dynamic_resolution_tests.rs"]
mod tests;
