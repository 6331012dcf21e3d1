use std::time::Instant;

use kiss3d::event::{Action, Key, WindowEvent};

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_STEP_ONCE: Key = Key::N;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_TOGGLE_ORBITS: Key = Key::O;
const KEY_TOGGLE_HUD: Key = Key::H;

const MAX_STEPS_PER_FRAME: u32 = 64;

/// The knobs the user can turn while the scene is running.
pub struct Controller {
    steps_per_frame: u32,
    paused: bool,
    step_requested: bool,
    pub show_orbits: bool,
    pub show_hud: bool,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new(show_orbits: bool, show_hud: bool) -> Self {
        Controller {
            steps_per_frame: 1,
            paused: false,
            step_requested: false,
            show_orbits,
            show_hud,
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                self.paused = !self.paused;
                tracing::debug!(paused = self.paused, "toggled pause");
            }
            WindowEvent::Key(KEY_STEP_ONCE, Action::Press, _) => {
                if self.paused {
                    self.step_requested = true;
                }
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.steps_per_frame = (self.steps_per_frame * 2).min(MAX_STEPS_PER_FRAME);
                tracing::info!("Stepping {} times per frame", self.steps_per_frame);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.steps_per_frame = (self.steps_per_frame / 2).max(1);
                tracing::info!("Stepping {} times per frame", self.steps_per_frame);
            }
            WindowEvent::Key(KEY_TOGGLE_ORBITS, Action::Press, _) => {
                self.show_orbits = !self.show_orbits;
            }
            WindowEvent::Key(KEY_TOGGLE_HUD, Action::Press, _) => {
                self.show_hud = !self.show_hud;
            }
            _ => {}
        }
    }

    /// How many times the model should be stepped this frame. Consumes a
    /// pending single-step request.
    pub fn take_steps(&mut self) -> u32 {
        if !self.paused {
            self.steps_per_frame
        } else if self.step_requested {
            self.step_requested = false;
            1
        } else {
            0
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn steps_per_frame(&self) -> u32 {
        self.steps_per_frame
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

#[cfg(test)]
mod tests {
    use kiss3d::event::Modifiers;

    use super::*;

    fn press(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Press, Modifiers::empty())
    }

    #[test]
    fn test_runs_one_step_per_frame_by_default() {
        let mut controller = Controller::new(true, true);
        assert_eq!(controller.take_steps(), 1);
        assert_eq!(controller.take_steps(), 1);
    }

    #[test]
    fn test_pause_and_single_step() {
        let mut controller = Controller::new(true, true);
        controller.process_event(&press(KEY_TOGGLE_PAUSE));
        assert!(controller.is_paused());
        assert_eq!(controller.take_steps(), 0);

        controller.process_event(&press(KEY_STEP_ONCE));
        assert_eq!(controller.take_steps(), 1);
        assert_eq!(controller.take_steps(), 0);

        controller.process_event(&press(KEY_TOGGLE_PAUSE));
        assert_eq!(controller.take_steps(), 1);
    }

    #[test]
    fn test_single_step_ignored_while_running() {
        let mut controller = Controller::new(true, true);
        controller.process_event(&press(KEY_STEP_ONCE));
        controller.process_event(&press(KEY_TOGGLE_PAUSE));
        assert_eq!(controller.take_steps(), 0);
    }

    #[test]
    fn test_steps_per_frame_bounds() {
        let mut controller = Controller::new(true, true);
        controller.process_event(&press(KEY_SLOW_DOWN));
        assert_eq!(controller.steps_per_frame(), 1);

        for _ in 0..10 {
            controller.process_event(&press(KEY_SPEED_UP));
        }
        assert_eq!(controller.steps_per_frame(), MAX_STEPS_PER_FRAME);
        assert_eq!(controller.take_steps(), MAX_STEPS_PER_FRAME);

        controller.process_event(&press(KEY_SLOW_DOWN));
        assert_eq!(controller.steps_per_frame(), 32);
    }

    #[test]
    fn test_toggles_ignore_release() {
        let mut controller = Controller::new(true, false);
        controller.process_event(&press(KEY_TOGGLE_ORBITS));
        controller.process_event(&press(KEY_TOGGLE_HUD));
        controller.process_event(&WindowEvent::Key(
            KEY_TOGGLE_HUD,
            Action::Release,
            Modifiers::empty(),
        ));
        assert!(!controller.show_orbits);
        assert!(controller.show_hud);
    }
}
