//! Selections marked on page images and the rules deciding where they apply.
//!
//! - [`SelectionRegion`] - one rectangle and its constraint solver
//! - [`SelectionSet`] - all regions of a document, addressed by [`RegionId`]
//! - [`is_visible`] - the selection mode / exception predicate

mod region;
mod set;
mod visibility;

pub use region::{RegionId, SelectionRegion};
pub use set::SelectionSet;
pub use visibility::{is_visible, SelectionMode};
