//! Turn driver: runs the engine at a fixed tick rate and decides when the
//! turn passes. The engine never switches turns by itself; this is the only
//! place that calls `switch_turn`.

use crate::engine::{MatchEngine, MatchEvent};
use crate::types::{Player, Point};
use crate::utils;
use crate::debug_turn;
use log::{info, warn};

/// How a shot ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    NextTurn(Player),
    Victory(Player),
}

#[derive(Debug)]
pub struct Duel {
    engine: MatchEngine,
    in_flight: bool,
    flight_ticks: u32,
    time_accumulator: f64,
    prev_position: Option<Point>,
}

impl Duel {
    pub fn new(engine: MatchEngine) -> Self {
        Duel {
            engine,
            in_flight: false,
            flight_ticks: 0,
            time_accumulator: 0.0,
            prev_position: None,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn is_shot_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.engine.drain_events()
    }

    /// Fires for whoever is on turn. Refused while a shot is airborne, after
    /// the match ends, or when the engine rejects the launch.
    pub fn fire(&mut self, angle_degrees: f64, speed: f64) -> bool {
        if self.engine.is_over() || self.in_flight {
            return false;
        }
        let player = self.engine.current_player();
        self.engine.launch_projectile(player, angle_degrees, speed);

        let Some(projectile) = self.engine.active_projectile() else {
            return false;
        };
        self.prev_position = Some(projectile.position());
        self.in_flight = true;
        self.flight_ticks = 0;
        self.time_accumulator = 0.0;
        true
    }

    /// Feeds wall-clock time in and runs as many fixed ticks as it covers.
    /// Returns the outcome on the frame the shot comes to an end.
    pub fn advance(&mut self, frame_time: f64) -> Option<TurnOutcome> {
        if !self.in_flight {
            return None;
        }
        let dt = self.engine.config().tick_dt;
        self.time_accumulator += frame_time;

        while self.time_accumulator >= dt {
            self.time_accumulator -= dt;
            if let Some(outcome) = self.step() {
                return Some(outcome);
            }
        }
        None
    }

    /// Runs the current shot to completion without regard to wall-clock time.
    pub fn resolve_shot(&mut self) -> Option<TurnOutcome> {
        if !self.in_flight {
            return None;
        }
        loop {
            if let Some(outcome) = self.step() {
                return Some(outcome);
            }
        }
    }

    /// Fraction of a tick accumulated but not yet simulated.
    pub fn interpolation_alpha(&self) -> f64 {
        let dt = self.engine.config().tick_dt;
        utils::clamp(self.time_accumulator / dt, 0.0, 1.0)
    }

    /// Where to draw the shell this frame, blended between the last two ticks.
    pub fn interpolated_projectile_position(&self) -> Option<Point> {
        let current = self.engine.active_projectile()?.position();
        let previous = self.prev_position.unwrap_or(current);
        Some(utils::lerp_point(previous, current, self.interpolation_alpha()))
    }

    fn step(&mut self) -> Option<TurnOutcome> {
        let dt = self.engine.config().tick_dt;
        let max_ticks = self.engine.config().max_flight_ticks;

        self.prev_position = self.engine.active_projectile().map(|p| p.position());
        self.flight_ticks += 1;
        if self.engine.tick(dt) {
            if self.flight_ticks < max_ticks {
                return None;
            }
            warn!(
                "Shot abandoned after {} ticks without settling",
                self.flight_ticks
            );
        }
        Some(self.finish_shot())
    }

    fn finish_shot(&mut self) -> TurnOutcome {
        debug_turn!("Shot settled after {} ticks", self.flight_ticks);
        self.in_flight = false;
        self.flight_ticks = 0;
        self.time_accumulator = 0.0;
        self.prev_position = None;

        if self.engine.winner().is_none() {
            self.engine.switch_turn();
        }
        match self.engine.winner() {
            Some(winner) => {
                info!("{} wins the duel", winner);
                TurnOutcome::Victory(winner)
            }
            None => TurnOutcome::NextTurn(self.engine.current_player()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MatchConfig, RIVAL_ZONE_PLAYER_ONE};
    use crate::obstacle::Rect;
    use assert_approx_eq::assert_approx_eq;

    fn standard_duel() -> Duel {
        Duel::new(MatchEngine::standard(MatchConfig::default()))
    }

    #[test]
    fn test_vertical_shot_passes_the_turn() {
        let mut duel = standard_duel();
        // Straight up: ceiling, floor, floor
        assert!(duel.fire(90.0, 300.0));
        assert!(duel.is_shot_in_flight());
        assert_eq!(duel.resolve_shot(), Some(TurnOutcome::NextTurn(Player::Two)));
        assert!(!duel.is_shot_in_flight());
        assert_eq!(duel.engine().current_player(), Player::Two);
        assert!(duel.engine().active_projectile().is_none());

        let bounces = duel
            .drain_events()
            .iter()
            .filter(|e| matches!(e, MatchEvent::WallBounce { .. }))
            .count();
        assert_eq!(bounces, 3);
    }

    #[test]
    fn test_rival_zone_shot_wins() {
        let config = MatchConfig {
            rival_zones: [RIVAL_ZONE_PLAYER_ONE, Rect::new(100.0, 150.0, 50.0, 50.0)],
            ..Default::default()
        };
        let mut duel = Duel::new(MatchEngine::standard(config));
        assert!(duel.fire(0.0, 200.0));
        assert_eq!(duel.resolve_shot(), Some(TurnOutcome::Victory(Player::One)));
        assert!(!duel.fire(45.0, 150.0));
        assert_eq!(duel.engine().current_player(), Player::One);
    }

    #[test]
    fn test_fire_refused_while_in_flight() {
        let mut duel = standard_duel();
        assert!(duel.fire(90.0, 300.0));
        assert!(!duel.fire(30.0, 100.0));
        assert!(duel.resolve_shot().is_some());
        assert!(duel.fire(30.0, 100.0));
        assert_eq!(
            duel.engine().active_projectile().unwrap().shooter(),
            Player::Two
        );
    }

    #[test]
    fn test_rejected_launch_is_not_in_flight() {
        let mut duel = standard_duel();
        assert!(!duel.fire(f64::NAN, 150.0));
        assert!(!duel.is_shot_in_flight());
        assert_eq!(duel.advance(1.0), None);
        assert_eq!(duel.resolve_shot(), None);
        assert_eq!(duel.engine().current_player(), Player::One);
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut duel = standard_duel();
        assert!(duel.fire(90.0, 300.0));
        let start = duel.engine().active_projectile().unwrap().position();

        // Less than one tick: nothing simulated yet
        assert_eq!(duel.advance(0.008), None);
        assert_eq!(duel.engine().active_projectile().unwrap().position(), start);
        assert_approx_eq!(duel.interpolation_alpha(), 0.5);

        // Crosses the first tick boundary
        assert_eq!(duel.advance(0.010), None);
        let after = duel.engine().active_projectile().unwrap().position();
        assert!(after.y < start.y);
        assert_approx_eq!(duel.interpolation_alpha(), 0.125);

        let drawn = duel.interpolated_projectile_position().unwrap();
        assert!(drawn.y < start.y && drawn.y > after.y);
    }

    #[test]
    fn test_advance_reports_outcome_once() {
        let mut duel = standard_duel();
        assert!(duel.fire(90.0, 300.0));
        let mut outcome = None;
        for _ in 0..2_000 {
            if let Some(result) = duel.advance(1.0 / 60.0) {
                outcome = Some(result);
                break;
            }
        }
        assert_eq!(outcome, Some(TurnOutcome::NextTurn(Player::Two)));
        assert_eq!(duel.advance(1.0 / 60.0), None);
    }

    #[test]
    fn test_flight_tick_guard_abandons_shot() {
        let config = MatchConfig {
            max_flight_ticks: 5,
            ..Default::default()
        };
        let mut duel = Duel::new(MatchEngine::standard(config));
        assert!(duel.fire(45.0, 150.0));
        assert_eq!(duel.resolve_shot(), Some(TurnOutcome::NextTurn(Player::Two)));
        assert!(duel.engine().active_projectile().is_none());
    }
}
