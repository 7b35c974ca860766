//! Step player
//!
//! Advances through the dispatch steps on a fixed interval. Time is fed in by
//! the caller through [`Player::tick`], so playback is deterministic.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Player {
    step_count: usize,
    active_step: usize,
    playing: bool,
    /// Time since the last step change while playing
    elapsed: Duration,
    step_duration: Duration,
}

impl Player {
    pub fn new(step_duration: Duration) -> Self {
        Self {
            step_count: 0,
            active_step: 0,
            playing: false,
            elapsed: Duration::ZERO,
            step_duration,
        }
    }

    /// New step list: playback stops and rewinds
    pub fn set_step_count(&mut self, step_count: usize) {
        self.stop();
        self.step_count = step_count;
        self.active_step = 0;
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_at_end(&self) -> bool {
        self.active_step + 1 >= self.step_count
    }

    /// Start playing. Returns `false` when already on the last step.
    pub fn play(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.playing = true;
        self.elapsed = Duration::ZERO;
        true
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.elapsed = Duration::ZERO;
    }

    /// Jump to `step`, stopping playback. Returns `false` when out of range.
    pub fn seek(&mut self, step: usize) -> bool {
        if step >= self.step_count {
            return false;
        }
        self.stop();
        self.active_step = step;
        true
    }

    pub fn next(&mut self) -> bool {
        self.seek(self.active_step + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.active_step.checked_sub(1) {
            Some(step) => self.seek(step),
            None => false,
        }
    }

    /// Let `elapsed` time pass. Returns the new active step when it changed.
    pub fn tick(&mut self, elapsed: Duration) -> Option<usize> {
        if !self.playing || self.step_duration.is_zero() {
            return None;
        }

        let before = self.active_step;
        self.elapsed += elapsed;
        while self.playing && self.elapsed >= self.step_duration {
            self.elapsed -= self.step_duration;
            self.active_step += 1;
            if self.is_at_end() {
                self.stop();
            }
        }

        (self.active_step != before).then_some(self.active_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(steps: usize) -> Player {
        let mut player = Player::new(Duration::from_secs(3));
        player.set_step_count(steps);
        player
    }

    #[test]
    fn test_play_until_end() {
        let mut player = player(3);
        assert!(player.play());

        assert_eq!(player.tick(Duration::from_secs(2)), None);
        assert_eq!(player.tick(Duration::from_secs(1)), Some(1));
        assert!(player.is_playing());
        assert_eq!(player.tick(Duration::from_secs(10)), Some(2));
        assert!(!player.is_playing());
        assert!(!player.play());
    }

    #[test]
    fn test_seek_stops_playback() {
        let mut player = player(4);
        player.play();
        assert!(player.next());
        assert!(!player.is_playing());
        assert!(player.previous());
        assert!(!player.previous());
        assert!(!player.seek(4));
        assert_eq!(player.active_step(), 0);
    }

    #[test]
    fn test_new_steps_stop_playback() {
        let mut player = player(4);
        player.play();
        player.tick(Duration::from_secs(3));
        player.set_step_count(2);

        assert!(!player.is_playing());
        assert_eq!(player.active_step(), 0);
    }

    #[test]
    fn test_single_step_cannot_play() {
        let mut player = player(1);
        assert!(!player.play());
        assert_eq!(player.tick(Duration::from_secs(5)), None);
    }
}
