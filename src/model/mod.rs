pub mod event;
pub mod game;
pub mod people;
pub mod reference;
pub mod stats;

pub use event::*;
pub use game::*;
pub use people::*;
pub use reference::*;
pub use stats::*;
