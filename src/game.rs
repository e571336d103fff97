use crate::particles::ParticleSystem;
use crate::render::{Hud, Renderer};
use log::info;
use macroquad::prelude::{
    Color, KeyCode, ORANGE, RED, Vec2, get_frame_time, is_key_down, is_key_pressed, next_frame,
};
use siege_duel::config::{self, MatchConfig};
use siege_duel::utils;
use siege_duel::{Duel, MatchEngine, MatchEvent, Point, TurnOutcome};

const ANGLE_RATE: f64 = 45.0; // Degrees per second while a key is held
const SPEED_RATE: f64 = 100.0; // Units per second while a key is held
const DUST: Color = Color::new(0.55, 0.45, 0.33, 1.0);

fn point_to_vec2(p: Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

/// The interactive match: aim state, the turn driver and the effects layered on top.
pub struct Game {
    config: MatchConfig,
    duel: Duel,
    pub particle_system: ParticleSystem,
    angle: f64,
    speed: f64,
    status: String,
    announcement: Option<String>,
}

impl Game {
    pub fn new(config: MatchConfig) -> Self {
        let duel = Duel::new(MatchEngine::standard(config.clone()));
        let status = format!("{} to fire", duel.engine().current_player());
        Game {
            config,
            duel,
            particle_system: ParticleSystem::new(),
            angle: config::DEFAULT_ANGLE,
            speed: config::DEFAULT_SPEED,
            status,
            announcement: None,
        }
    }

    /// Run the main game loop using the provided renderer
    pub async fn run(&mut self, renderer: &mut Renderer) {
        info!("Starting main loop...");

        while !Renderer::window_should_close() {
            let frame_time = get_frame_time();
            self.handle_input(frame_time as f64);

            if let Some(outcome) = self.duel.advance(frame_time as f64) {
                self.on_outcome(outcome);
            }
            self.process_events();
            self.particle_system.update(frame_time);

            let hud = Hud {
                angle: self.angle,
                speed: self.speed,
                status: &self.status,
            };
            renderer.draw_frame(
                self.duel.engine(),
                self.duel.interpolated_projectile_position(),
                &self.particle_system,
                &hud,
                self.announcement.as_deref(),
            );
            next_frame().await;
        }
        info!("Exiting Siege Duel.");
    }

    fn handle_input(&mut self, dt: f64) {
        if is_key_pressed(KeyCode::R) && self.duel.engine().is_over() {
            self.restart();
            return;
        }

        let mut d_angle = 0.0;
        let mut d_speed = 0.0;
        if is_key_down(KeyCode::Up) {
            d_angle += ANGLE_RATE * dt;
        }
        if is_key_down(KeyCode::Down) {
            d_angle -= ANGLE_RATE * dt;
        }
        if is_key_down(KeyCode::Right) {
            d_speed += SPEED_RATE * dt;
        }
        if is_key_down(KeyCode::Left) {
            d_speed -= SPEED_RATE * dt;
        }
        self.adjust_aim(d_angle, d_speed);

        if is_key_pressed(KeyCode::Space) {
            self.fire();
        }
    }

    fn adjust_aim(&mut self, d_angle: f64, d_speed: f64) {
        self.angle = utils::clamp(self.angle + d_angle, config::MIN_ANGLE, config::MAX_ANGLE);
        self.speed = utils::clamp(self.speed + d_speed, config::MIN_SPEED, config::MAX_SPEED);
    }

    fn fire(&mut self) -> bool {
        let player = self.duel.engine().current_player();
        if !self.duel.fire(self.angle, self.speed) {
            return false;
        }
        info!(
            "{} fires at {:.0} deg, speed {:.0}",
            player, self.angle, self.speed
        );
        self.status = format!("{} firing...", player);
        true
    }

    fn on_outcome(&mut self, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::NextTurn(player) => {
                self.status = format!("{} to fire", player);
            }
            TurnOutcome::Victory(winner) => {
                self.status = format!("{} wins!", winner);
                self.announcement = Some(format!("{} Wins!", winner));
            }
        }
    }

    // Engine notifications become particles
    fn process_events(&mut self) {
        for event in self.duel.drain_events() {
            match event {
                MatchEvent::Launched {
                    origin, velocity, ..
                } => {
                    self.particle_system
                        .spawn_muzzle_flash(point_to_vec2(origin), point_to_vec2(velocity));
                }
                MatchEvent::WallBounce { position, .. } => {
                    self.particle_system
                        .spawn_explosion(point_to_vec2(position), DUST, 6, 40.0, 0.3);
                }
                MatchEvent::ObstacleHit {
                    position,
                    destroyed,
                    ..
                } => {
                    let (count, max_speed) = if destroyed { (40, 140.0) } else { (15, 80.0) };
                    self.particle_system.spawn_explosion(
                        point_to_vec2(position),
                        ORANGE,
                        count,
                        max_speed,
                        0.5,
                    );
                }
                MatchEvent::RivalZoneHit { position, .. } => {
                    self.particle_system
                        .spawn_explosion(point_to_vec2(position), RED, 60, 180.0, 0.8);
                }
                MatchEvent::ProjectileLost { .. }
                | MatchEvent::ProjectileSpent { .. }
                | MatchEvent::Victory { .. }
                | MatchEvent::TurnSwitched { .. } => {}
            }
        }
    }

    fn restart(&mut self) {
        info!("Starting a new match");
        *self = Game::new(self.config.clone());
    }
}
