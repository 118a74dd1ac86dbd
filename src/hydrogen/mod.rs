//! Hydrogen management: expanding implicit and explicit H counts into graph
//! atoms, collapsing graph hydrogens back into counts, and folding explicit
//! hydrogen query atoms into H-count queries on their neighbors.

use petgraph::graph::NodeIndex;

mod add;
pub mod merge;
pub mod placement;
mod remove;
pub mod residue;
mod stereo;

pub use add::{add_hs, add_hs_mut};
pub use merge::{is_query_h, merge_query_hs, merge_query_hs_mut};
pub use remove::{remove_hs, remove_hs_mut, remove_hs_mut_with, remove_hs_with};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddHsOptions {
    pub explicit_only: bool,
    pub add_coords: bool,
    /// `None` means all atoms.
    pub only_on_atoms: Option<Vec<NodeIndex>>,
    pub add_residue_info: bool,
}

impl AddHsOptions {
    pub(crate) fn selects(&self, idx: NodeIndex) -> bool {
        self.only_on_atoms
            .as_ref()
            .is_none_or(|atoms| atoms.contains(&idx))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveHsOptions {
    /// Only strip hydrogens that [`add_hs`] created from implicit counts.
    pub implicit_only: bool,
    pub update_explicit_count: bool,
    /// Ignored when `implicit_only` is set.
    pub sanitize: bool,
}

impl Default for RemoveHsOptions {
    fn default() -> Self {
        Self {
            implicit_only: false,
            update_explicit_count: false,
            sanitize: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeQueryHsOptions {
    /// Keep hydrogens that carry an atom-map number.
    pub merge_unmapped_only: bool,
}
