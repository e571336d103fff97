//! The match simulation: one shell in flight, two sets of bunkers, and the
//! rules that decide who wins.

use crate::config::{self, MatchConfig};
use crate::obstacle::{CollisionSide, Obstacle};
use crate::projectile::{Launch, Projectile};
use crate::types::{Player, Point};
use crate::{debug_collision, debug_flight, debug_turn};
use log::{info, warn};
use std::collections::VecDeque;

/// Where the match stands, as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingLaunch(Player),
    InFlight,
    Over(Player),
}

/// Notifications produced while the engine runs, drained by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    Launched {
        shooter: Player,
        origin: Point,
        velocity: Point,
    },
    WallBounce {
        position: Point,
        bounces: u32,
    },
    ObstacleHit {
        owner: Player,
        index: usize,
        side: CollisionSide,
        position: Point,
        damage: f64,
        remaining: f64,
        destroyed: bool,
    },
    RivalZoneHit {
        shooter: Player,
        position: Point,
    },
    // Left the play area or sank below the floor
    ProjectileLost {
        position: Point,
    },
    // Used up its bounces
    ProjectileSpent {
        position: Point,
    },
    Victory {
        winner: Player,
    },
    TurnSwitched {
        player: Player,
    },
}

#[derive(Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    current_player: Player,
    winner: Option<Player>,
    obstacles: [Vec<Obstacle>; 2],
    projectile: Option<Projectile>,
    events: VecDeque<MatchEvent>,
}

impl MatchEngine {
    /// A match with default tunables and the given arena bounds.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(MatchConfig::with_arena(width, height))
    }

    pub fn with_config(config: MatchConfig) -> Self {
        MatchEngine {
            config,
            current_player: Player::One,
            winner: None,
            obstacles: [Vec::new(), Vec::new()],
            projectile: None,
            events: VecDeque::new(),
        }
    }

    /// A match populated with the classic three bunkers per side.
    pub fn standard(config: MatchConfig) -> Self {
        let mut engine = Self::with_config(config);
        for (owner, obstacle) in config::standard_layout() {
            engine.add_obstacle(owner, obstacle);
        }
        engine
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn add_obstacle(&mut self, player: Player, obstacle: Obstacle) {
        self.obstacles[player.index()].push(obstacle);
    }

    /// Fires a new shell from `player`'s cannon, discarding any shell already
    /// in the air. Turn discipline is the caller's job. Ignored once the
    /// match is over.
    pub fn launch_projectile(&mut self, player: Player, angle_degrees: f64, speed: f64) {
        if self.is_over() {
            debug_flight!("Launch by {} ignored, match is over", player);
            return;
        }

        if let Some(previous) = self.projectile.take() {
            if previous.is_active() {
                debug_flight!("Pre-empting shell in flight at {}", previous.position());
            }
        }

        let launch = Launch {
            origin: self.config.cannon_position(player),
            angle_degrees,
            speed,
            mass: self.config.projectile_mass,
            radius: self.config.projectile_radius,
            gravity: self.config.gravity,
            shooter: player,
        };

        match Projectile::new(launch) {
            Ok(projectile) => {
                info!(
                    "{} fired at {:.1} degrees, speed {:.1}",
                    player, angle_degrees, speed
                );
                self.events.push_back(MatchEvent::Launched {
                    shooter: player,
                    origin: projectile.position(),
                    velocity: projectile.velocity(),
                });
                self.projectile = Some(projectile);
            }
            Err(e) => {
                warn!("{} launch rejected: {}", player, e);
            }
        }
    }

    /// Advances the shell by `dt` seconds and resolves what it touched.
    /// Returns whether it is still in flight.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(projectile) = self.projectile.as_mut() else {
            return false;
        };
        if !projectile.is_active() {
            return false;
        }

        projectile.update(dt);
        let pos = projectile.position();

        if self.is_outside_play_area(pos) {
            debug_flight!("Shell left the arena at {}", pos);
            self.deactivate_projectile();
            self.events.push_back(MatchEvent::ProjectileLost { position: pos });
            return false;
        }

        // A direct hit wins before any bounce gets a chance to deflect it
        let shooter = self.current_player;
        if self.config.rival_zone_of(shooter.opponent()).contains(pos) {
            debug_collision!("{} struck the rival zone at {}", shooter, pos);
            self.deactivate_projectile();
            self.events.push_back(MatchEvent::RivalZoneHit {
                shooter,
                position: pos,
            });
            self.declare_winner(shooter);
            return false;
        }

        if !self.resolve_wall_collisions() {
            return false;
        }

        if !self.resolve_obstacle_collisions() {
            return false;
        }

        // Uses the post-integration position, before any wall clamping
        if pos.y > self.config.arena_height + self.config.floor_depth_margin {
            debug_flight!("Shell sank below the floor at {}", pos);
            self.deactivate_projectile();
            self.events.push_back(MatchEvent::ProjectileLost { position: pos });
            return false;
        }

        true
    }

    /// Ends the current player's turn. The in-flight shell, if any, is
    /// dropped. After the match is over only the drop happens.
    pub fn switch_turn(&mut self) {
        self.projectile = None;
        if self.is_over() {
            return;
        }

        self.current_player = self.current_player.opponent();
        info!("Turn passes to {}", self.current_player);
        self.events.push_back(MatchEvent::TurnSwitched {
            player: self.current_player,
        });
        self.evaluate_victory();
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn phase(&self) -> MatchPhase {
        match self.winner {
            Some(winner) => MatchPhase::Over(winner),
            None if self.active_projectile().is_some() => MatchPhase::InFlight,
            None => MatchPhase::AwaitingLaunch(self.current_player),
        }
    }

    /// `player`'s bunkers in insertion order, destroyed ones included.
    pub fn obstacles(&self, player: Player) -> &[Obstacle] {
        &self.obstacles[player.index()]
    }

    pub fn active_projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref().filter(|p| p.is_active())
    }

    /// Bounces the shell in flight can still take, `None` when idle.
    pub fn bounces_remaining(&self) -> Option<u32> {
        self.active_projectile()
            .map(|p| self.config.max_bounces.saturating_sub(p.bounce_count()))
    }

    /// Takes every event recorded since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.events.drain(..).collect()
    }

    fn is_outside_play_area(&self, pos: Point) -> bool {
        let margin = self.config.exit_margin;
        pos.x < -margin
            || pos.x > self.config.arena_width + margin
            || pos.y < -margin
            || pos.y > self.config.arena_height + margin
    }

    fn deactivate_projectile(&mut self) {
        if let Some(projectile) = self.projectile.as_mut() {
            projectile.set_active(false);
        }
    }

    /// Counts a bounce and spends the shell when it reaches the limit.
    /// Returns whether the shell is still active.
    fn register_bounce(&mut self) -> bool {
        let max_bounces = self.config.max_bounces;
        let Some(projectile) = self.projectile.as_mut() else {
            return false;
        };
        projectile.increment_bounce();
        if projectile.bounce_count() >= max_bounces {
            projectile.set_active(false);
            debug_collision!(
                "Shell spent after {} bounces at {}",
                projectile.bounce_count(),
                projectile.position()
            );
            self.events.push_back(MatchEvent::ProjectileSpent {
                position: projectile.position(),
            });
            return false;
        }
        true
    }

    /// Side walls and ceiling reflect elastically; the floor keeps only the
    /// restitution fraction of vertical speed. Any contact is one bounce.
    fn resolve_wall_collisions(&mut self) -> bool {
        let width = self.config.arena_width;
        let floor_y = self.config.floor_y;
        let restitution = self.config.restitution;
        let Some(projectile) = self.projectile.as_mut() else {
            return false;
        };

        let mut pos = projectile.position();
        let mut vel = projectile.velocity();
        let radius = projectile.radius();
        let mut collided = false;

        if pos.x - radius <= 0.0 {
            vel.x = -vel.x;
            pos.x = radius;
            collided = true;
        } else if pos.x + radius >= width {
            vel.x = -vel.x;
            pos.x = width - radius;
            collided = true;
        }

        if pos.y - radius <= 0.0 {
            vel.y = -vel.y;
            pos.y = radius;
            collided = true;
        }

        if pos.y + radius >= floor_y {
            vel.y = -vel.y * restitution;
            pos.y = floor_y - radius;
            collided = true;
        }

        if !collided {
            return true;
        }

        projectile.set_position(pos);
        projectile.set_velocity(vel);
        let bounces = projectile.bounce_count() + 1;
        debug_collision!("Wall bounce #{} at {}", bounces, pos);
        self.events.push_back(MatchEvent::WallBounce {
            position: pos,
            bounces,
        });
        self.register_bounce()
    }

    /// Checks the opponent's bunkers in order; the first one touched takes
    /// damage and deflects the shell. At most one bunker is hit per tick.
    fn resolve_obstacle_collisions(&mut self) -> bool {
        let shooter = self.current_player;
        let target = shooter.opponent();
        let damage_factor = self.config.damage_factor;
        let restitution = self.config.restitution;
        let Some(projectile) = self.projectile.as_mut() else {
            return false;
        };

        let pos = projectile.position();
        let mut vel = projectile.velocity();
        let radius = projectile.radius();

        let targets = &mut self.obstacles[target.index()];
        let Some(index) = targets.iter().position(|o| o.check_collision(pos, radius)) else {
            return true;
        };
        let obstacle = &mut targets[index];

        let previous = pos - vel * 0.01;
        let side = obstacle.collision_side(pos, previous);
        let damage = damage_factor * projectile.mass() * vel.length();
        obstacle.take_damage(damage);

        if side.is_horizontal_face() {
            vel.y = -vel.y * restitution;
        } else {
            vel.x = -vel.x * restitution;
        }
        projectile.set_velocity(vel);

        let remaining = obstacle.resistance();
        let destroyed = obstacle.is_destroyed();
        debug_collision!(
            "{} bunker #{} hit on {:?} face for {:.1} damage, {:.1} left",
            target,
            index,
            side,
            damage,
            remaining
        );
        if destroyed {
            info!("{} lost bunker #{}", target, index);
        }
        self.events.push_back(MatchEvent::ObstacleHit {
            owner: target,
            index,
            side,
            position: pos,
            damage,
            remaining,
            destroyed,
        });

        let still_active = self.register_bounce();
        self.evaluate_victory();
        if self.is_over() {
            self.deactivate_projectile();
            return false;
        }
        still_active
    }

    /// A side with bunkers that are all destroyed loses. Player one is
    /// checked first, so if both fall together player two wins. A decided
    /// match is never re-decided.
    fn evaluate_victory(&mut self) {
        if self.is_over() {
            return;
        }
        if self.all_destroyed(Player::One) {
            self.declare_winner(Player::Two);
        } else if self.all_destroyed(Player::Two) {
            self.declare_winner(Player::One);
        }
    }

    // An empty side has nothing left to lose, so it is not defeated
    fn all_destroyed(&self, player: Player) -> bool {
        let obstacles = &self.obstacles[player.index()];
        !obstacles.is_empty() && obstacles.iter().all(Obstacle::is_destroyed)
    }

    fn declare_winner(&mut self, winner: Player) {
        self.winner = Some(winner);
        info!("Match over, {} wins", winner);
        debug_turn!("Final turn belonged to {}", self.current_player);
        self.events.push_back(MatchEvent::Victory { winner });
    }
}
