pub mod atom;
pub mod bond;
pub mod conformer;
pub mod element;
pub mod geometry;
pub mod hydrogen;
pub mod mol;
pub mod query;
pub mod sanitize;
pub mod traits;
pub mod valence;

pub use atom::{Atom, Chirality, CipLabel, Hybridization, ResidueInfo};
pub use bond::{Bond, BondDirection, BondOrder, BondStereo};
pub use conformer::Conformer;
pub use element::Element;
pub use hydrogen::{
    add_hs, add_hs_mut, is_query_h, merge_query_hs, merge_query_hs_mut, remove_hs, remove_hs_mut,
    remove_hs_mut_with, remove_hs_with, AddHsOptions, MergeQueryHsOptions, RemoveHsOptions,
};
pub use mol::{IndexRemap, Mol};
pub use query::AtomExpr;
pub use sanitize::{SanitizeError, Sanitizer, ValenceSanitizer};
pub use traits::RemapAtoms;
