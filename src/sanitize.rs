//! Post-mutation sanitization seam.
//!
//! Hydrogen removal may renumber atoms; callers that asked for it get a
//! sanitize pass afterwards. The pass itself is a collaborator supplied
//! through [`Sanitizer`]; [`ValenceSanitizer`] is the built-in default.

use thiserror::Error;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;
use crate::valence;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    #[error("explicit valence {valence} of atom {atom_idx} (Z={atomic_num}) exceeds allowed {allowed:?}")]
    AtomValence {
        atom_idx: usize,
        atomic_num: u8,
        valence: u8,
        allowed: Vec<u8>,
    },

    #[error("cannot kekulize atoms {atom_indices:?}")]
    Kekulize { atom_indices: Vec<usize> },

    #[error("invalid stereo on bond {bond_idx}: {reason}")]
    BondStereo { bond_idx: usize, reason: String },
}

impl SanitizeError {
    pub fn bond_stereo(bond_idx: usize, reason: impl Into<String>) -> Self {
        Self::BondStereo {
            bond_idx,
            reason: reason.into(),
        }
    }
}

/// A whole-molecule consistency pass run after structural edits.
pub trait Sanitizer {
    fn sanitize(&self, mol: &mut Mol<Atom, Bond>) -> Result<(), SanitizeError>;
}

impl<F> Sanitizer for F
where
    F: Fn(&mut Mol<Atom, Bond>) -> Result<(), SanitizeError>,
{
    fn sanitize(&self, mol: &mut Mol<Atom, Bond>) -> Result<(), SanitizeError> {
        self(mol)
    }
}

/// Refreshes implicit H counts and rejects over-valent atoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValenceSanitizer;

impl Sanitizer for ValenceSanitizer {
    fn sanitize(&self, mol: &mut Mol<Atom, Bond>) -> Result<(), SanitizeError> {
        valence::update_property_caches(mol);
        valence::check_valence(mol)
    }
}
