//! Logical locomotion state driven by discrete key events
//!
//! Only the state lives here (speed, gravity, flight, vertical drift).
//! Moving a camera with it is left to whoever renders the scene.

use crate::constants::*;
use crate::player::input::{InputState, Key};

/// What a key event changed, so the caller can update its HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementChange {
    None,
    FlightToggled(bool),
    MouseLockToggled(bool),
    QuitRequested,
}

#[derive(Debug, Clone)]
pub struct Movement {
    flying: bool,
    mouse_locked: bool,
    quit_requested: bool,
    clock: f32,
    last_space_press: Option<f32>,
    double_press_threshold: f32,
    base_speed: f32,
    sprint_speed: f32,
    fly_speed: f32,
    held: InputState,
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(
            PLAYER_BASE_SPEED,
            PLAYER_SPRINT_SPEED,
            FLY_VERTICAL_SPEED,
            DOUBLE_PRESS_THRESHOLD,
        )
    }
}

impl Movement {
    pub fn new(base_speed: f32, sprint_speed: f32, fly_speed: f32, double_press: f32) -> Self {
        Self {
            flying: false,
            mouse_locked: true,
            quit_requested: false,
            clock: 0.0,
            last_space_press: None,
            double_press_threshold: double_press,
            base_speed,
            sprint_speed,
            fly_speed,
            held: InputState::default(),
        }
    }

    pub fn key_down(&mut self, key: Key) -> MovementChange {
        match key {
            Key::Space => {
                self.held.jump = true;
                let double = self
                    .last_space_press
                    .is_some_and(|last| self.clock - last < self.double_press_threshold);
                if double {
                    self.flying = !self.flying;
                    // a third press must start a fresh pair
                    self.last_space_press = None;
                    tracing::debug!("Flight {}", if self.flying { "on" } else { "off" });
                    return MovementChange::FlightToggled(self.flying);
                }
                self.last_space_press = Some(self.clock);
                MovementChange::None
            }
            Key::Shift => {
                self.held.descend = true;
                MovementChange::None
            }
            Key::Control => {
                self.held.sprint = true;
                MovementChange::None
            }
            Key::Escape => {
                self.mouse_locked = !self.mouse_locked;
                MovementChange::MouseLockToggled(self.mouse_locked)
            }
            Key::Quit if !self.mouse_locked => {
                self.quit_requested = true;
                MovementChange::QuitRequested
            }
            Key::Quit | Key::Digit(_) => MovementChange::None,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Space => self.held.jump = false,
            Key::Shift => self.held.descend = false,
            Key::Control => self.held.sprint = false,
            _ => {}
        }
    }

    /// Advances the clock and returns the vertical displacement for this
    /// step. Only flight moves the player vertically on its own.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.clock += dt.max(0.0);
        if !self.flying {
            return 0.0;
        }
        let mut dy = 0.0;
        if self.held.jump {
            dy += self.fly_speed * dt;
        }
        if self.held.descend {
            dy -= self.fly_speed * dt;
        }
        dy
    }

    pub fn speed(&self) -> f32 {
        if self.flying || self.held.sprint {
            self.sprint_speed
        } else {
            self.base_speed
        }
    }

    pub fn gravity(&self) -> f32 {
        if self.flying { 0.0 } else { PLAYER_GRAVITY }
    }

    pub fn is_flying(&self) -> bool {
        self.flying
    }

    pub fn is_mouse_locked(&self) -> bool {
        self.mouse_locked
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Keys currently held down.
    pub fn input(&self) -> InputState {
        self.held
    }
}
