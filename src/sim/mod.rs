//! Garden simulation
//!
//! All gameplay entities live here. This module stays free of platform
//! dependencies:
//! - Time only advances through `update(dt, ..)`
//! - Randomness only comes from a caller-supplied RNG
//! - Effects leave through return values and the `GameEvent` outbox

pub mod bug;
pub mod collision;
pub mod entity;
pub mod orb;
pub mod particle;
pub mod plant;
pub mod player;
pub mod state;

pub use bug::{Bug, BugKind};
pub use collision::{Rect, centers_within};
pub use entity::{Contact, Entity, Interaction, WorldView, as_dyn, update_all};
pub use orb::FlowOrb;
pub use particle::{Particle, ParticleKind};
pub use plant::Plant;
pub use player::{INTERACT_RADIUS, Player};
pub use state::{GameEvent, Garden};
