use glam::{IVec3, Vec3};

/// Keys the core reacts to. Anything else is dropped by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Space,
    Shift,
    Control,
    Escape,
    Quit,
}

impl Key {
    pub fn from_name(name: &str) -> Option<Key> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "space" => Some(Key::Space),
            "shift" | "left_shift" => Some(Key::Shift),
            "control" | "ctrl" => Some(Key::Control),
            "escape" | "esc" => Some(Key::Escape),
            "q" => Some(Key::Quit),
            _ => match lower.parse::<u8>() {
                Ok(digit @ 1..=9) => Some(Key::Digit(digit)),
                _ => None,
            },
        }
    }
}

/// Discrete events delivered by the input/picking collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Primary action on a targeted cell: remove it.
    Break { target: IVec3 },
    /// Secondary action on a targeted face: fill the adjacent cell.
    Place { target: IVec3, normal: IVec3 },
    /// Break whatever the ray from `origin` along `direction` hits first.
    BreakLook { origin: Vec3, direction: Vec3 },
    /// Place against whatever the ray hits first.
    PlaceLook { origin: Vec3, direction: Vec3 },
    SelectSlot(usize),
    /// Scroll-wheel style selection change.
    CycleSlot(i32),
    Tick { dt: f32 },
}

/// Keys held down between key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub jump: bool,
    pub descend: bool,
    pub sprint: bool,
}
