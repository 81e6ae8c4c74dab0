//! Keyboard polling for the windowed demo.
//!
//! The core never reads devices itself; this maps raylib key state to the
//! [`InputCommands`] resource the player controller consumes.
use raylib::RaylibHandle;
use raylib::ffi::KeyboardKey;

use crate::resources::input::InputCommands;

/// Snapshot of the movement and action keys for this frame.
pub fn read_input_commands(rl: &RaylibHandle) -> InputCommands {
    let down = |key: KeyboardKey| rl.is_key_down(key);
    let pressed = |key: KeyboardKey| rl.is_key_pressed(key);

    InputCommands {
        move_left: down(KeyboardKey::KEY_A) || down(KeyboardKey::KEY_LEFT),
        move_right: down(KeyboardKey::KEY_D) || down(KeyboardKey::KEY_RIGHT),
        stop: false,
        jump: pressed(KeyboardKey::KEY_SPACE) || pressed(KeyboardKey::KEY_W),
        attack: pressed(KeyboardKey::KEY_Z) || pressed(KeyboardKey::KEY_J),
    }
}

/// Fold a new frame of input into the pending commands.
///
/// Edges are OR-ed so a press is not lost if no tick ran in between.
pub fn merge_input(pending: &mut InputCommands, frame: InputCommands) {
    pending.move_left = frame.move_left;
    pending.move_right = frame.move_right;
    pending.stop = frame.stop;
    pending.jump |= frame.jump;
    pending.attack |= frame.attack;
}
