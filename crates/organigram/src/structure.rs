//! Structural view of an organization.
//!
//! The layout engine never walks the caller's flat collections directly.
//! This module turns them into:
//!
//! - [`OrgIndex`]: id lookups, the resolved structural parent of every item,
//!   ordered children lists and the forest roots. Building the index rejects
//!   duplicate ids and parent cycles.
//! - [`HeadCounter`]: memoized occupant aggregation over the entity hierarchy.

mod headcount;
mod index;

pub(crate) use headcount::HeadCounter;
pub(crate) use index::{NodeKey, OrgIndex};
