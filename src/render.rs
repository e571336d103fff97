use crate::particles::ParticleSystem;
use macroquad::prelude::*;
use siege_duel::config::{ARENA_HEIGHT, ARENA_WIDTH, UI_PANEL_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH};
use siege_duel::{MatchEngine, MatchPhase, Obstacle, Player, Point, Rect};

const SKY: Color = Color::new(0.53, 0.81, 0.92, 1.0);
const GROUND: Color = Color::new(0.40, 0.26, 0.13, 1.0);
const PLAYER_ONE_COLOR: Color = Color::new(0.27, 0.51, 0.71, 1.0); // Steel blue
const PLAYER_TWO_COLOR: Color = Color::new(0.86, 0.08, 0.24, 1.0); // Crimson
const PANEL_BACKGROUND: Color = Color::new(0.08, 0.08, 0.20, 1.0);
const BARREL_LENGTH: f32 = 28.0;

// Conversion helpers (arena units map 1:1 to pixels)
fn point_to_vec2(p: Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => PLAYER_ONE_COLOR,
        Player::Two => PLAYER_TWO_COLOR,
    }
}

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

// Helper function to calculate health bar gradient color
fn get_health_gradient_color(ratio: f32) -> Color {
    if ratio > 0.5 {
        // Green to Yellow (1.0 -> 0.5)
        let t = (ratio - 0.5) * 2.0;
        Color::new(1.0 - t, 1.0, 0.0, 1.0)
    } else {
        // Yellow to Red (0.5 -> 0.0)
        let t = ratio * 2.0;
        Color::new(1.0, t, 0.0, 1.0)
    }
}

/// Everything the side panel shows that the engine doesn't know about.
pub struct Hud<'a> {
    pub angle: f64,
    pub speed: f64,
    pub status: &'a str,
}

// Handles rendering the match state using macroquad
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    pub fn draw_frame(
        &self,
        engine: &MatchEngine,
        projectile_position: Option<Point>,
        particle_system: &ParticleSystem,
        hud: &Hud,
        announcement: Option<&str>,
    ) {
        clear_background(SKY);

        let floor_y = engine.config().floor_y as f32;
        draw_rectangle(
            0.0,
            floor_y,
            ARENA_WIDTH as f32,
            ARENA_HEIGHT as f32 - floor_y,
            GROUND,
        );

        for player in [Player::One, Player::Two] {
            Self::draw_rival_zone(engine.config().rival_zone_of(player), player);
            Self::draw_obstacles(engine.obstacles(player), player);
        }

        Self::draw_cannons(engine, hud.angle);

        if let Some(position) = projectile_position {
            let radius = engine.config().projectile_radius as f32;
            let center = point_to_vec2(position);
            draw_circle(center.x, center.y, radius, BLACK);
        }

        Self::draw_particles(particle_system);

        draw_text("PLAYER 1", 50.0, 590.0, 22.0, PLAYER_ONE_COLOR);
        draw_text("PLAYER 2", 680.0, 590.0, 22.0, PLAYER_TWO_COLOR);

        self.draw_ui_panel(engine, hud);

        if let Some(msg) = announcement {
            self.draw_announcement(msg);
        }
    }

    fn draw_rival_zone(zone: Rect, owner: Player) {
        draw_rectangle(
            zone.x as f32,
            zone.y as f32,
            zone.width as f32,
            zone.height as f32,
            faded_color(player_color(owner), 0.15),
        );
        draw_rectangle_lines(
            zone.x as f32,
            zone.y as f32,
            zone.width as f32,
            zone.height as f32,
            1.0,
            faded_color(player_color(owner), 0.6),
        );
    }

    // Destroyed bunkers stay in the engine but are not drawn
    fn draw_obstacles(obstacles: &[Obstacle], owner: Player) {
        for obstacle in obstacles.iter().filter(|o| !o.is_destroyed()) {
            let rect = obstacle.rect();
            let (x, y, w, h) = (rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32);
            draw_rectangle(x, y, w, h, player_color(owner));
            draw_rectangle_lines(x, y, w, h, 2.0, BLACK);

            let ratio = obstacle.health_ratio() as f32;
            draw_rectangle(x, y - 8.0, w, 4.0, Color::from_rgba(54, 58, 70, 255));
            draw_rectangle(x, y - 8.0, w * ratio, 4.0, get_health_gradient_color(ratio));

            let label = format!("{}", obstacle.resistance() as i32);
            let dims = measure_text(&label, None, 18, 1.0);
            let center = point_to_vec2(rect.center());
            draw_text(&label, center.x - dims.width / 2.0, center.y + 5.0, 18.0, WHITE);
        }
    }

    // The barrel of whoever is on turn follows the aim
    fn draw_cannons(engine: &MatchEngine, angle: f64) {
        for player in [Player::One, Player::Two] {
            let base = point_to_vec2(engine.config().cannon_position(player));
            draw_circle(base.x, base.y, 10.0, DARKGRAY);

            let barrel_angle = if player == engine.current_player() { angle } else { 45.0 };
            let rad = barrel_angle.to_radians() as f32;
            let dir_x = match player {
                Player::One => rad.cos(),
                Player::Two => -rad.cos(),
            };
            let tip = base + Vec2::new(dir_x, -rad.sin()) * BARREL_LENGTH;
            draw_line(base.x, base.y, tip.x, tip.y, 6.0, player_color(player));
        }
    }

    // Particles advance once per frame, so they are drawn where they are
    fn draw_particles(particle_system: &ParticleSystem) {
        for particle in &particle_system.particles {
            let pos = particle.position;
            draw_circle(pos.x, pos.y, 2.0, particle.color);
        }
    }

    fn draw_ui_panel(&self, engine: &MatchEngine, hud: &Hud) {
        let panel_x = ARENA_WIDTH as f32;
        let panel_width = UI_PANEL_WIDTH as f32;
        let padding = 12.0;
        let line = 24.0;
        let mut y = 32.0;

        draw_rectangle(panel_x, 0.0, panel_width, WINDOW_HEIGHT as f32, PANEL_BACKGROUND);
        draw_text("SIEGE DUEL", panel_x + padding, y, 30.0, WHITE);
        y += line * 1.5;

        let (turn_text, turn_color) = match engine.phase() {
            MatchPhase::Over(winner) => (format!("{} wins", winner), player_color(winner)),
            MatchPhase::InFlight => (
                format!("{} firing", engine.current_player()),
                player_color(engine.current_player()),
            ),
            MatchPhase::AwaitingLaunch(player) => (format!("Turn: {}", player), player_color(player)),
        };
        draw_text(&turn_text, panel_x + padding, y, 22.0, turn_color);
        y += line;

        draw_text(&format!("Angle: {:.0} deg", hud.angle), panel_x + padding, y, 20.0, WHITE);
        y += line;
        draw_text(&format!("Speed: {:.0}", hud.speed), panel_x + padding, y, 20.0, WHITE);
        y += line;

        let bounces = match engine.bounces_remaining() {
            Some(n) => format!("Bounces left: {}", n),
            None => "Bounces left: -".to_string(),
        };
        draw_text(&bounces, panel_x + padding, y, 20.0, LIGHTGRAY);
        y += line * 1.5;

        for player in [Player::One, Player::Two] {
            let standing = engine.obstacles(player).iter().filter(|o| !o.is_destroyed()).count();
            let text = format!("{}: {} bunkers", player, standing);
            draw_text(&text, panel_x + padding, y, 18.0, player_color(player));
            y += line;
        }
        y += line / 2.0;

        for status_line in hud.status.lines() {
            draw_text(status_line, panel_x + padding, y, 16.0, YELLOW);
            y += line * 0.8;
        }

        let help = ["Up/Down: angle", "Left/Right: speed", "Space: fire", "R: new match", "Esc: quit"];
        let mut help_y = WINDOW_HEIGHT as f32 - padding - line * 0.8 * (help.len() as f32 - 1.0);
        for entry in help {
            draw_text(entry, panel_x + padding, help_y, 16.0, GRAY);
            help_y += line * 0.8;
        }
    }

    fn draw_announcement(&self, msg: &str) {
        let rect_width = 460.0;
        let rect_height = 120.0;
        let x = (ARENA_WIDTH as f32 / 2.0) - (rect_width / 2.0);
        let y = (WINDOW_HEIGHT as f32 / 2.0) - (rect_height / 2.0);
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 180));

        let font_size = 36;
        let dims = measure_text(msg, None, font_size, 1.0);
        draw_text(
            msg,
            x + (rect_width - dims.width) / 2.0,
            y + rect_height / 2.0,
            font_size as f32,
            WHITE,
        );

        let hint = "Press R for a new match or ESC to exit";
        let hint_dims = measure_text(hint, None, 18, 1.0);
        draw_text(
            hint,
            x + (rect_width - hint_dims.width) / 2.0,
            y + rect_height - 16.0,
            18.0,
            LIGHTGRAY,
        );
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }

    // Total window size, for the window configuration
    pub fn window_size() -> (i32, i32) {
        (WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}
