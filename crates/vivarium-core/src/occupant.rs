//! Tank occupants
//!
//! Anything the habitat tracks: steerable creatures and static scenery such
//! as the tank itself. Statics have no food-chain rank and sort after all
//! ranked occupants.

use vivarium_creature::{BodyId, Steerable};
use vivarium_scene::NodeId;

pub enum Occupant {
    /// A creature-capable occupant driven through the `Steerable` trait
    Steerable(Box<dyn Steerable>),
    /// Static scenery; participates in the occupant order but never steps
    Static(NodeId),
}

impl Occupant {
    /// Food-chain rank; `None` for statics
    pub fn rank(&self) -> Option<i32> {
        match self {
            Occupant::Steerable(s) => Some(s.body().rank()),
            Occupant::Static(_) => None,
        }
    }

    /// Body id; `None` for statics
    pub fn id(&self) -> Option<BodyId> {
        match self {
            Occupant::Steerable(s) => Some(s.body().id()),
            Occupant::Static(_) => None,
        }
    }

    /// Root node of this occupant's subtree
    pub fn root(&self) -> NodeId {
        match self {
            Occupant::Steerable(s) => s.body().root(),
            Occupant::Static(node) => *node,
        }
    }

    pub fn as_steerable(&self) -> Option<&dyn Steerable> {
        match self {
            Occupant::Steerable(s) => Some(s.as_ref()),
            Occupant::Static(_) => None,
        }
    }

    pub fn as_steerable_mut(&mut self) -> Option<&mut dyn Steerable> {
        match self {
            Occupant::Steerable(s) => Some(s.as_mut()),
            Occupant::Static(_) => None,
        }
    }
}
