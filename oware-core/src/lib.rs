pub mod constants;
pub mod error;
pub mod hash;
pub mod r#move;
pub mod notation;
pub mod player;
pub mod state;
pub mod tables;

pub use error::{CapacityError, MoveError, PositionError};
pub use hash::Hash;
pub use player::Player;
pub use r#move::Move;
pub use state::{EvalWeights, GameState, Winner};
