//! Configuration constants and match tunables for the artillery duel.

use crate::error::ConfigError;
use crate::obstacle::{Obstacle, Rect};
use crate::types::{Player, Point};

// Arena geometry
pub const ARENA_WIDTH: f64 = 800.0; // Arena width in arena units
pub const ARENA_HEIGHT: f64 = 600.0; // Arena height in arena units
pub const FLOOR_Y: f64 = 550.0; // Ground line the projectile bounces on
pub const EXIT_MARGIN: f64 = 100.0; // Distance past any edge before a shot is lost
pub const FLOOR_DEPTH_MARGIN: f64 = 50.0; // Depth below the arena bottom that ends a shot

// Cannons
pub const CANNON_OFFSET: f64 = 35.0; // Distance from the firing player's near wall
pub const CANNON_HEIGHT: f64 = 175.0; // Launch height for both cannons

// Rival zones (x, y, width, height), keyed by the player who owns them
pub const RIVAL_ZONE_PLAYER_ONE: Rect = Rect::new(240.0, 440.0, 60.0, 110.0);
pub const RIVAL_ZONE_PLAYER_TWO: Rect = Rect::new(690.0, 440.0, 60.0, 110.0);

// Physics
pub const GRAVITY: f64 = 150.0; // Units/s², larger than the unit scale for visible arcs
pub const RESTITUTION: f64 = 0.6; // Fraction of speed kept on floor and obstacle bounces
pub const DAMAGE_FACTOR: f64 = 0.5; // Damage = factor * mass * impact speed
pub const PROJECTILE_MASS: f64 = 1.0;
pub const PROJECTILE_RADIUS: f64 = 8.0;
pub const MAX_BOUNCES: u32 = 3; // Bounces before a projectile is spent

// Driver timing
pub const TICK_DT: f64 = 0.016; // Seconds per simulation tick (~60Hz)
pub const MAX_FLIGHT_TICKS: u32 = 10_000; // Guard against shots that never settle

// Launch controls
pub const DEFAULT_ANGLE: f64 = 45.0;
pub const MIN_ANGLE: f64 = 0.0;
pub const MAX_ANGLE: f64 = 90.0;
pub const DEFAULT_SPEED: f64 = 150.0;
pub const MIN_SPEED: f64 = 50.0;
pub const MAX_SPEED: f64 = 300.0;

// Rendering configuration
pub const UI_PANEL_WIDTH: i32 = 200; // Width of the side panel
pub const WINDOW_WIDTH: i32 = ARENA_WIDTH as i32 + UI_PANEL_WIDTH;
pub const WINDOW_HEIGHT: i32 = ARENA_HEIGHT as i32;

/// Every tunable and geometry value the match engine consults.
///
/// The engine carries its own copy so two matches with different balance
/// settings can run side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub arena_width: f64,
    pub arena_height: f64,
    pub floor_y: f64,
    pub exit_margin: f64,
    pub floor_depth_margin: f64,
    pub cannon_offset: f64,
    pub cannon_height: f64,
    /// Indexed by owner: `[player one's zone, player two's zone]`.
    pub rival_zones: [Rect; 2],
    pub gravity: f64,
    pub restitution: f64,
    pub damage_factor: f64,
    pub projectile_mass: f64,
    pub projectile_radius: f64,
    pub max_bounces: u32,
    pub tick_dt: f64,
    pub max_flight_ticks: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            floor_y: FLOOR_Y,
            exit_margin: EXIT_MARGIN,
            floor_depth_margin: FLOOR_DEPTH_MARGIN,
            cannon_offset: CANNON_OFFSET,
            cannon_height: CANNON_HEIGHT,
            rival_zones: [RIVAL_ZONE_PLAYER_ONE, RIVAL_ZONE_PLAYER_TWO],
            gravity: GRAVITY,
            restitution: RESTITUTION,
            damage_factor: DAMAGE_FACTOR,
            projectile_mass: PROJECTILE_MASS,
            projectile_radius: PROJECTILE_RADIUS,
            max_bounces: MAX_BOUNCES,
            tick_dt: TICK_DT,
            max_flight_ticks: MAX_FLIGHT_TICKS,
        }
    }
}

impl MatchConfig {
    /// Default tunables with the given arena bounds.
    pub fn with_arena(width: f64, height: f64) -> Self {
        MatchConfig {
            arena_width: width,
            arena_height: height,
            ..Default::default()
        }
    }

    /// The zone owned by `owner`; a shot from the other side landing in it wins outright.
    pub fn rival_zone_of(&self, owner: Player) -> Rect {
        self.rival_zones[owner.index()]
    }

    /// Where `player`'s cannon releases its projectile.
    pub fn cannon_position(&self, player: Player) -> Point {
        let x = match player {
            Player::One => self.cannon_offset,
            Player::Two => self.arena_width - self.cannon_offset,
        };
        Point::new(x, self.cannon_height)
    }

    /// Checks user-supplied overrides. The engine itself never rejects values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("arena width", self.arena_width),
            ("arena height", self.arena_height),
            ("gravity", self.gravity),
            ("projectile mass", self.projectile_mass),
            ("projectile radius", self.projectile_radius),
            ("tick duration", self.tick_dt),
        ];
        for (name, value) in positives {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !self.damage_factor.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "damage factor",
            });
        }
        if self.damage_factor < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "damage factor",
                value: self.damage_factor,
            });
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::RestitutionOutOfRange(self.restitution));
        }
        if self.max_bounces == 0 {
            return Err(ConfigError::ZeroBounceLimit);
        }
        Ok(())
    }
}

/// The classic three-bunker setup for each side: `(owner, obstacle)` in
/// insertion order.
pub fn standard_layout() -> Vec<(Player, Obstacle)> {
    let bunker =
        |x: f64, resistance: f64| Obstacle::new(Rect::new(x, 450.0, 40.0, 100.0), resistance);
    vec![
        (Player::One, bunker(50.0, 200.0)),
        (Player::One, bunker(100.0, 200.0)),
        (Player::One, bunker(150.0, 100.0)),
        (Player::Two, bunker(610.0, 200.0)),
        (Player::Two, bunker(660.0, 200.0)),
        (Player::Two, bunker(710.0, 100.0)),
    ]
}
