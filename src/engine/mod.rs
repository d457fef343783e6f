// Engine modules: frame timing and input state

pub mod game_loop;
pub mod input;
