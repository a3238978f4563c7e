pub mod attacks;
pub mod catalogue;
pub mod disambiguation;
pub mod san;
pub mod types;

pub use attacks::{attacks_from, pawn_captures, pawn_pushes, ray_from_towards};
pub use catalogue::Catalogue;
pub use disambiguation::{discriminators_for, resolve_discriminator};
pub use san::{SanMove, render};
pub use types::*;
