use crate::{
    body::Body,
    config::{ArrowMode, LabConfig, LabParams, Param},
    error::LabError,
    render::{ForceArrow, Snapshot},
    utils,
};

use log::{debug, warn};
use ultraviolet::Vec2;

/// A control-panel action, applied between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Configure(Param, f32),
    ApplyImpulse,
    Reset,
}

/// Which boundaries the body hit during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounces {
    pub floor: bool,
    pub ceiling: bool,
    pub right: bool,
    pub left: bool,
}

impl Bounces {
    pub fn any(&self) -> bool {
        self.floor || self.ceiling || self.right || self.left
    }
}

/// Result of a single [`Simulation::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The body is inactive; nothing changed.
    Inert,
    /// The body was integrated, possibly bouncing off some boundaries.
    Advanced(Bounces),
}

impl StepOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, StepOutcome::Advanced(_))
    }
}

/// Fixed-step simulation of the lab's single point mass inside a viewport.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Kinematic state.
    pub body: Body,
    /// User-tunable values from the control panel.
    pub params: LabParams,
    /// Gravity and friction only act while this is set.
    pub active: bool,
    /// Seconds since the last impulse, used for the arrow overlay.
    pub impulse_elapsed: f32,
    /// Arrow overlay policy.
    pub arrow: ArrowMode,
    width: f32,
    height: f32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Seconds per tick.
    pub const TIME_STEP: f32 = 1.0 / 60.0;
    /// Collision and drawing radius of the body.
    pub const RADIUS: f32 = 30.0;
    /// Strip at the bottom of the viewport reserved for the control panel.
    pub const FLOOR_MARGIN: f32 = 100.0;
    /// Distance of the spawn point above the bottom edge.
    pub const SPAWN_LIFT: f32 = 140.0;
    /// Scale-down applied to gravity to keep the fall at screen-friendly speeds.
    pub const GRAVITY_SCALE: f32 = 0.1;
    /// Scale applied to the impulse magnitude before dividing by mass.
    pub const IMPULSE_SCALE: f32 = 0.5;
    /// How long the arrow stays visible in [`ArrowMode::Fade`].
    pub const ARROW_WINDOW: f32 = 0.1;
    /// Smallest mass accepted.
    pub const MIN_MASS: f32 = 1e-3;

    /// A simulation over the default 300x600 viewport with default parameters.
    pub fn new() -> Self {
        let config = LabConfig::default();
        Self::build(config.width, config.height, config.params, config.arrow)
    }

    /// A simulation over a `width` x `height` viewport with default parameters.
    pub fn with_viewport(width: f32, height: f32) -> Result<Self, LabError> {
        Self::from_config(&LabConfig {
            width,
            height,
            ..LabConfig::default()
        })
    }

    pub fn from_config(config: &LabConfig) -> Result<Self, LabError> {
        let (width, height) = (config.width, config.height);
        let fits = width.is_finite()
            && height.is_finite()
            && width >= 2.0 * Self::RADIUS
            && height - Self::FLOOR_MARGIN >= 2.0 * Self::RADIUS
            && height - Self::SPAWN_LIFT >= Self::RADIUS;
        if !fits {
            return Err(LabError::ViewportTooSmall { width, height });
        }

        let defaults = LabParams::default();
        let mut params = config.params;
        for param in Param::ALL {
            if !params.get(param).is_finite() {
                warn!("{:?} is not finite, using default {}", param, defaults.get(param));
                params.set(param, defaults.get(param));
            }
        }
        params.mass = Self::floor_mass(params.mass);
        Ok(Self::build(width, height, params, config.arrow))
    }

    fn build(width: f32, height: f32, params: LabParams, arrow: ArrowMode) -> Self {
        let spawn = Body::spawn_point(width, height, Self::SPAWN_LIFT);
        Self {
            body: Body::at_rest(spawn, Self::RADIUS),
            params,
            active: false,
            impulse_elapsed: 0.0,
            arrow,
            width,
            height,
        }
    }

    fn floor_mass(mass: f32) -> f32 {
        // Also catches NaN.
        if mass > Self::MIN_MASS {
            mass
        } else {
            warn!("mass {} clamped to {}", mass, Self::MIN_MASS);
            Self::MIN_MASS
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Where the body starts and where `reset` puts it back.
    pub fn spawn_point(&self) -> Vec2 {
        Body::spawn_point(self.width, self.height, Self::SPAWN_LIFT)
    }

    /// Lowest y the body centre may reach.
    pub fn floor(&self) -> f32 {
        self.height - Self::FLOOR_MARGIN - self.body.radius
    }

    /// Overwrites one parameter. Takes effect on the next step; position and velocity are untouched.
    /// Non-finite values are ignored and the previous value is kept.
    pub fn configure(&mut self, param: Param, value: f32) {
        if !value.is_finite() {
            warn!("ignoring non-finite {:?} = {}", param, value);
            return;
        }
        let value = match param {
            Param::Mass => Self::floor_mass(value),
            _ => value,
        };
        debug!("configure {:?} = {}", param, value);
        self.params.set(param, value);
    }

    /// Velocity change one impulse would add with the current parameters.
    pub fn impulse_delta(&self) -> Vec2 {
        let p = &self.params;
        let scaled = (p.impulse_magnitude * Self::IMPULSE_SCALE) / p.mass;
        utils::heading(p.impulse_angle) * scaled
    }

    /// Activates the body and adds an impulse to its velocity. Impulses accumulate.
    pub fn apply_impulse(&mut self) {
        let delta = self.impulse_delta();
        self.body.kick(delta);
        self.active = true;
        self.impulse_elapsed = 0.0;
        debug!("impulse {:?} -> velocity {:?}", delta, self.body.vel);
    }

    /// Puts the body back at rest at the spawn point. Parameters are kept.
    pub fn reset(&mut self) {
        self.body = Body::at_rest(self.spawn_point(), Self::RADIUS);
        self.active = false;
        self.impulse_elapsed = 0.0;
        debug!("reset to {:?}", self.body.pos);
    }

    /// Applies a control-panel command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Configure(param, value) => self.configure(param, value),
            Command::ApplyImpulse => self.apply_impulse(),
            Command::Reset => self.reset(),
        }
    }

    /// Advances the simulation by one tick.
    /// Gravity is added before friction damps both axes, then position is
    /// integrated with explicit Euler and clamped back inside the viewport.
    pub fn step(&mut self) -> StepOutcome {
        if !self.active {
            return StepOutcome::Inert;
        }

        let p = self.params;
        let g_eff = p.gravity * Self::GRAVITY_SCALE;

        let mut vel = Vec2::new(
            self.body.vel.x * p.friction,
            (self.body.vel.y + g_eff * Self::TIME_STEP) * p.friction,
        );
        let mut pos = self.body.pos + vel;

        let bounces = self.resolve(&mut pos, &mut vel, p.restitution);

        self.body.pos = pos;
        self.body.vel = vel;

        if self.arrow == ArrowMode::Fade {
            self.impulse_elapsed += Self::TIME_STEP;
        }

        StepOutcome::Advanced(bounces)
    }

    /// Clamps `pos` to the viewport and reflects `vel` on each crossed edge.
    /// Checked in order floor, ceiling, right, left; X and Y can both fire in one tick.
    fn resolve(&self, pos: &mut Vec2, vel: &mut Vec2, restitution: f32) -> Bounces {
        let r = self.body.radius;
        let mut bounces = Bounces::default();

        if pos.y + r > self.height - Self::FLOOR_MARGIN {
            pos.y = self.height - Self::FLOOR_MARGIN - r;
            vel.y = -vel.y * restitution;
            bounces.floor = true;
        }
        if pos.y - r < 0.0 {
            pos.y = r;
            vel.y = -vel.y * restitution;
            bounces.ceiling = true;
        }
        if pos.x + r > self.width {
            pos.x = self.width - r;
            vel.x = -vel.x * restitution;
            bounces.right = true;
        }
        if pos.x - r < 0.0 {
            pos.x = r;
            vel.x = -vel.x * restitution;
            bounces.left = true;
        }

        bounces
    }

    /// Whether the force arrow should be drawn this frame.
    pub fn arrow_visible(&self) -> bool {
        self.active && self.impulse_elapsed < Self::ARROW_WINDOW
    }

    pub fn force_arrow(&self) -> Option<ForceArrow> {
        self.arrow_visible()
            .then(|| ForceArrow::new(self.body.pos, self.params.impulse_angle))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.body.pos,
            vel: self.body.vel,
            radius: self.body.radius,
            active: self.active,
            arrow: self.force_arrow(),
        }
    }
}
