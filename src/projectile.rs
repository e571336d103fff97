use crate::config;
use crate::error::SimError;
use crate::types::{Player, Point};

/// Everything needed to put a shell in the air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub origin: Point,
    pub angle_degrees: f64, // Measured from horizontal, toward the opponent
    pub speed: f64,
    pub mass: f64,
    pub radius: f64,
    pub gravity: f64, // Downward acceleration applied each update
    pub shooter: Player,
}

impl Launch {
    /// A launch using the default physical constants.
    pub fn new(origin: Point, angle_degrees: f64, speed: f64, shooter: Player) -> Self {
        Launch {
            origin,
            angle_degrees,
            speed,
            mass: config::PROJECTILE_MASS,
            radius: config::PROJECTILE_RADIUS,
            gravity: config::GRAVITY,
            shooter,
        }
    }
}

// Represents the single shell in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Point,
    velocity: Point,
    mass: f64,
    radius: f64,
    gravity: f64,
    shooter: Player,
    active: bool,
    bounce_count: u32,
}

impl Projectile {
    /// Decomposes the launch speed into a velocity.
    ///
    /// `vy` is negated because y grows downward; player two's `vx` is negated
    /// so both sides aim with the same angle convention. Fails only on
    /// non-finite inputs.
    pub fn new(launch: Launch) -> Result<Self, SimError> {
        if !launch.angle_degrees.is_finite() || !launch.speed.is_finite() {
            return Err(SimError::NonFiniteLaunch {
                angle: launch.angle_degrees,
                speed: launch.speed,
            });
        }
        if !launch.origin.is_finite() || !launch.mass.is_finite() {
            return Err(SimError::NonFiniteBody);
        }

        let angle_rad = launch.angle_degrees.to_radians();
        let mut vx = launch.speed * angle_rad.cos();
        let vy = -launch.speed * angle_rad.sin();
        if launch.shooter == Player::Two {
            vx = -vx;
        }

        Ok(Projectile {
            position: launch.origin,
            velocity: Point::new(vx, vy),
            mass: launch.mass,
            radius: launch.radius,
            gravity: launch.gravity,
            shooter: launch.shooter,
            active: true,
            bounce_count: 0,
        })
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn shooter(&self) -> Player {
        self.shooter
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bounce_count(&self) -> u32 {
        self.bounce_count
    }

    /// One semi-implicit Euler step: position moves with the velocity from
    /// before the step, then gravity is applied. Inert projectiles don't move.
    pub fn update(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.position += self.velocity * dt;
        self.velocity.y += self.gravity * dt;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_velocity(&mut self, velocity: Point) {
        self.velocity = velocity;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn increment_bounce(&mut self) {
        self.bounce_count += 1;
    }
}
