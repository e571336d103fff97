use ::rand::Rng;
use macroquad::prelude::{Color, Vec2, YELLOW};

// Represents a single particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    velocity: Vec2,
    pub color: Color,
    lifetime: f32, // Time remaining in seconds
    initial_lifetime: f32,
}

impl Particle {
    fn new(position: Vec2, velocity: Vec2, color: Color, lifetime: f32) -> Self {
        Particle {
            position,
            velocity,
            color,
            lifetime,
            initial_lifetime: lifetime,
        }
    }

    // Update particle state over time
    fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.lifetime -= dt;

        // Fade out effect
        self.color.a = (self.lifetime / self.initial_lifetime).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}

// Manages a collection of particles
#[derive(Debug)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    rng: ::rand::rngs::ThreadRng,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem {
            particles: Vec::new(),
            rng: ::rand::thread_rng(),
        }
    }

    // Spawns a burst of particles
    pub fn spawn_explosion(
        &mut self,
        position: Vec2,
        base_color: Color,
        count: usize,
        max_speed: f32,
        lifetime: f32,
    ) {
        for _ in 0..count {
            let angle = self.rng.r#gen::<f32>() * std::f32::consts::TAU;
            let speed = self.rng.r#gen::<f32>() * max_speed;
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            let particle_lifetime = lifetime * (0.5 + self.rng.r#gen::<f32>() * 0.5);

            self.particles.push(Particle::new(
                position,
                velocity,
                base_color,
                particle_lifetime,
            ));
        }
    }

    /// Short directional burst at the cannon mouth. `direction` is the shell's
    /// launch velocity in screen space.
    pub fn spawn_muzzle_flash(&mut self, position: Vec2, direction: Vec2) {
        let count = 8;
        let lifetime = 0.2;
        let base_speed = 120.0;
        let spread_rad = 20f32.to_radians();
        let base_angle = direction.y.atan2(direction.x);

        for _ in 0..count {
            let angle = base_angle + (self.rng.r#gen::<f32>() - 0.5) * spread_rad;
            let speed = base_speed * (0.7 + self.rng.r#gen::<f32>() * 0.6);
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            let mut color = YELLOW;
            color.a = 0.8;

            self.particles.push(Particle::new(
                position,
                velocity,
                color,
                lifetime * (0.8 + self.rng.r#gen::<f32>() * 0.4),
            ));
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.update(dt);
            p.is_alive()
        });
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
