//! Frame clock for Vantage
//!
//! Turns raw wall-clock deltas into the clamped, scaled delta time every
//! per-frame `advance` call consumes.

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            config: TimeConfig::default(),
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            fixed_accumulator: 0.0,
        }
    }
}

impl GameTime {
    /// Create a new frame clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the clock with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.max(0.0).min(self.config.max_delta_time);
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Delta time of the current frame
    pub fn delta(&self) -> f32 {
        self.delta_time
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta() > 0.0);
        assert_eq!(time.frame_count, 1);
        assert!((time.total_time - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(3.0);
        assert_eq!(time.delta(), time.config.max_delta_time);

        time.update(-1.0);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_fixed_steps() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.1,
            ..Default::default()
        });
        time.update(0.25);
        assert_eq!(time.fixed_steps(), 2);
        assert_eq!(time.fixed_steps(), 0);
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::new(TimeConfig {
            time_scale: 0.5,
            ..Default::default()
        });
        time.update(0.2);
        assert!((time.delta() - 0.1).abs() < 1e-6);
        assert!((time.unscaled_delta_time - 0.2).abs() < 1e-6);
    }
}
