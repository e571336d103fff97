use crate::types::Point;

// Axis-aligned rectangle: origin is the top-left corner, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Closest point of the rectangle to `point` (the point itself if inside).
    pub fn closest_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Which face of an obstacle a projectile struck.
///
/// Declaration order is the tie-break priority when two faces are equally near.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl CollisionSide {
    /// Top and bottom faces reflect the vertical velocity component.
    pub fn is_horizontal_face(self) -> bool {
        matches!(self, CollisionSide::Top | CollisionSide::Bottom)
    }
}

/// A destructible bunker owned by one player.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    rect: Rect,
    resistance: f64,
    initial_resistance: f64,
}

impl Obstacle {
    /// Negative starting resistance is clamped to zero (born destroyed).
    pub fn new(rect: Rect, resistance: f64) -> Self {
        let resistance = resistance.max(0.0);
        Obstacle {
            rect,
            resistance,
            initial_resistance: resistance,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    pub fn initial_resistance(&self) -> f64 {
        self.initial_resistance
    }

    /// Remaining resistance as a fraction of the starting value, for health bars.
    pub fn health_ratio(&self) -> f64 {
        if self.initial_resistance > 0.0 {
            self.resistance / self.initial_resistance
        } else {
            0.0
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.resistance <= 0.0
    }

    /// Subtracts `amount` and clamps at zero. Zero damage is a no-op.
    pub fn take_damage(&mut self, amount: f64) {
        self.resistance -= amount;
        if self.resistance < 0.0 {
            self.resistance = 0.0;
        }
    }

    /// Exact circle-vs-AABB overlap. Destroyed obstacles never collide.
    pub fn check_collision(&self, center: Point, radius: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let closest = self.rect.closest_point(center);
        center.distance(&closest) < radius
    }

    /// The face whose edge line lies nearest to `center`.
    ///
    /// Only `center` decides the result; `_previous_center` is accepted so a
    /// directional refinement can be added without changing callers. Ties go
    /// Top, then Right, then Bottom, then Left.
    pub fn collision_side(&self, center: Point, _previous_center: Point) -> CollisionSide {
        let dist_top = (center.y - self.rect.top()).abs();
        let dist_bottom = (center.y - self.rect.bottom()).abs();
        let dist_left = (center.x - self.rect.left()).abs();
        let dist_right = (center.x - self.rect.right()).abs();

        let min_dist = dist_top.min(dist_bottom).min(dist_left).min(dist_right);

        if min_dist == dist_top {
            CollisionSide::Top
        } else if min_dist == dist_right {
            CollisionSide::Right
        } else if min_dist == dist_bottom {
            CollisionSide::Bottom
        } else {
            CollisionSide::Left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn bunker(resistance: f64) -> Obstacle {
        Obstacle::new(Rect::new(50.0, 450.0, 40.0, 100.0), resistance)
    }

    #[test]
    fn test_take_damage_scenario() {
        let mut obstacle = bunker(200.0);
        // 0.5 damage factor * 1.0 mass * speed 100
        obstacle.take_damage(0.5 * 1.0 * 100.0);
        assert_approx_eq!(obstacle.resistance(), 150.0);
        assert!(!obstacle.is_destroyed());
    }

    #[test]
    fn test_destroyed_exactly_on_second_hit() {
        let mut obstacle = bunker(40.0);
        obstacle.take_damage(30.0);
        assert_approx_eq!(obstacle.resistance(), 10.0);
        assert!(!obstacle.is_destroyed());
        obstacle.take_damage(30.0);
        assert_eq!(obstacle.resistance(), 0.0);
        assert!(obstacle.is_destroyed());
    }

    #[test]
    fn test_resistance_never_negative() {
        let mut obstacle = bunker(10.0);
        for damage in [0.0, 5.0, 1_000.0, 3.0, 0.0] {
            obstacle.take_damage(damage);
            assert!(obstacle.resistance() >= 0.0);
        }
        assert_eq!(obstacle.resistance(), 0.0);
        assert_eq!(obstacle.health_ratio(), 0.0);
    }

    #[test]
    fn test_zero_damage_is_noop() {
        let mut obstacle = bunker(75.0);
        obstacle.take_damage(0.0);
        assert_eq!(obstacle.resistance(), 75.0);
        assert_eq!(obstacle.health_ratio(), 1.0);
    }

    #[test]
    fn test_negative_initial_resistance_clamped() {
        let obstacle = bunker(-5.0);
        assert_eq!(obstacle.resistance(), 0.0);
        assert!(obstacle.is_destroyed());
    }

    #[test]
    fn test_check_collision_circle_vs_box() {
        let obstacle = bunker(100.0);
        // Inside the box
        assert!(obstacle.check_collision(Point::new(70.0, 500.0), 8.0));
        // 7 units left of the left edge: overlaps an 8-radius circle
        assert!(obstacle.check_collision(Point::new(43.0, 500.0), 8.0));
        // Exactly touching is not a collision (strict inequality)
        assert!(!obstacle.check_collision(Point::new(42.0, 500.0), 8.0));
        // Near the corner: distance sqrt(50) ~ 7.07 < 8
        assert!(obstacle.check_collision(Point::new(45.0, 445.0), 8.0));
        // Diagonal from the corner: distance sqrt(72) ~ 8.49 > 8
        assert!(!obstacle.check_collision(Point::new(44.0, 444.0), 8.0));
    }

    #[test]
    fn test_destroyed_obstacle_never_collides() {
        let mut obstacle = bunker(10.0);
        obstacle.take_damage(10.0);
        assert!(!obstacle.check_collision(Point::new(70.0, 500.0), 8.0));
    }

    #[test]
    fn test_collision_side_nearest_edge() {
        let obstacle = bunker(100.0);
        let prev = Point::ZERO;
        assert_eq!(obstacle.collision_side(Point::new(70.0, 447.0), prev), CollisionSide::Top);
        assert_eq!(obstacle.collision_side(Point::new(70.0, 553.0), prev), CollisionSide::Bottom);
        assert_eq!(obstacle.collision_side(Point::new(46.0, 500.0), prev), CollisionSide::Left);
        assert_eq!(obstacle.collision_side(Point::new(94.0, 500.0), prev), CollisionSide::Right);
    }

    #[test]
    fn test_collision_side_tie_breaks() {
        let obstacle = bunker(100.0);
        let prev = Point::ZERO;
        // Top-left corner: top and left tie -> Top
        assert_eq!(obstacle.collision_side(Point::new(50.0, 450.0), prev), CollisionSide::Top);
        // Top-right corner: top and right tie -> Top
        assert_eq!(obstacle.collision_side(Point::new(90.0, 450.0), prev), CollisionSide::Top);
        // Bottom-right corner: right and bottom tie -> Right
        assert_eq!(obstacle.collision_side(Point::new(90.0, 550.0), prev), CollisionSide::Right);
        // Bottom-left corner: bottom and left tie -> Bottom
        assert_eq!(obstacle.collision_side(Point::new(50.0, 550.0), prev), CollisionSide::Bottom);
    }

    #[test]
    fn test_collision_side_ignores_previous_center() {
        let obstacle = bunker(100.0);
        let center = Point::new(46.0, 500.0);
        assert_eq!(
            obstacle.collision_side(center, Point::new(0.0, 0.0)),
            obstacle.collision_side(center, Point::new(500.0, 900.0))
        );
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let zone = Rect::new(240.0, 440.0, 60.0, 110.0);
        assert!(zone.contains(Point::new(240.0, 440.0)));
        assert!(zone.contains(Point::new(300.0, 550.0)));
        assert!(zone.contains(Point::new(270.0, 500.0)));
        assert!(!zone.contains(Point::new(300.1, 500.0)));
        assert!(!zone.contains(Point::new(270.0, 439.9)));
    }
}
