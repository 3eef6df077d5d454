//! Player-related modules
//! Contains hotbar selection, input events, movement state, and picking.

pub mod hotbar;
pub mod input;
pub mod movement;
pub mod pick;

// Re-export commonly used types
pub use hotbar::Hotbar;
pub use input::{InputEvent, InputState, Key};
pub use movement::{Movement, MovementChange};
pub use pick::{Aabb, BlockHit, raycast};
