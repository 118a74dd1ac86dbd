use petgraph::graph::{EdgeIndex, NodeIndex};

use super::{stereo, RemoveHsOptions};
use crate::atom::Atom;
use crate::bond::{Bond, BondDirection, BondOrder};
use crate::element;
use crate::mol::Mol;
use crate::sanitize::{SanitizeError, Sanitizer, ValenceSanitizer};
use crate::valence::{total_valence, update_property_cache};

pub fn remove_hs(
    mol: &Mol<Atom, Bond>,
    opts: &RemoveHsOptions,
) -> Result<Mol<Atom, Bond>, SanitizeError> {
    remove_hs_with(mol, opts, &ValenceSanitizer)
}

/// On failure the copy is dropped and only the error is returned.
pub fn remove_hs_with(
    mol: &Mol<Atom, Bond>,
    opts: &RemoveHsOptions,
    sanitizer: &impl Sanitizer,
) -> Result<Mol<Atom, Bond>, SanitizeError> {
    let mut result = mol.clone();
    remove_hs_mut_with(&mut result, opts, sanitizer)?;
    Ok(result)
}

pub fn remove_hs_mut(mol: &mut Mol<Atom, Bond>, opts: &RemoveHsOptions) -> Result<(), SanitizeError> {
    remove_hs_mut_with(mol, opts, &ValenceSanitizer)
}

/// Never removed: hydrogens without neighbors, query hydrogens,
/// two-coordinate hydrogens, implicit-tagged hydrogens on dummy atoms and,
/// unless tagged implicit, isotope-labeled hydrogens, hydrogens on another
/// hydrogen or a dummy, and the only substituent on a stereo double-bond end.
///
/// If the sanitizer fails, the molecule is left in its post-removal state.
pub fn remove_hs_mut_with(
    mol: &mut Mol<Atom, Bond>,
    opts: &RemoveHsOptions,
    sanitizer: &impl Sanitizer,
) -> Result<(), SanitizeError> {
    for idx in (0..mol.atom_count()).map(NodeIndex::new) {
        if !mol.atom(idx).is_hydrogen() {
            update_property_cache(mol, idx);
        }
    }

    let mut removed = 0usize;
    let mut cursor = 0usize;
    while cursor < mol.atom_count() {
        let idx = NodeIndex::new(cursor);
        if !mol.atom(idx).is_hydrogen() {
            restore_no_implicit(mol, idx);
            cursor += 1;
        } else if let Some(h_bond) = removable_bond(mol, idx, opts) {
            remove_hydrogen(mol, idx, h_bond, opts.update_explicit_count);
            removed += 1;
        } else {
            cursor += 1;
        }
    }
    log::debug!("removed {removed} hydrogens");

    if opts.sanitize && !opts.implicit_only {
        sanitizer.sanitize(mol)?;
    }
    Ok(())
}

fn restore_no_implicit(mol: &mut Mol<Atom, Bond>, idx: NodeIndex) {
    let atom = mol.atom_mut(idx);
    if let Some(orig) = atom.orig_no_implicit.take() {
        atom.no_implicit = orig;
        update_property_cache(mol, idx);
    }
}

fn removable_bond(mol: &Mol<Atom, Bond>, h: NodeIndex, opts: &RemoveHsOptions) -> Option<EdgeIndex> {
    let atom = mol.atom(h);
    let mut bonds = mol.bonds_of(h);
    let (Some(h_bond), None) = (bonds.next(), bonds.next()) else {
        if mol.degree(h) == 0 {
            log::warn!("not removing hydrogen atom {} without neighbors", h.index());
        }
        return None;
    };
    if atom.query.is_some() {
        return None;
    }
    let heavy = mol.other_atom(h_bond, h);

    if atom.is_implicit_h {
        if mol.atom(heavy).atomic_num < 1 {
            log::warn!(
                "not removing hydrogen atom {} with only dummy atom neighbors",
                h.index()
            );
            return None;
        }
        return Some(h_bond);
    }

    if opts.implicit_only || atom.isotope != 0 || mol.atom(heavy).atomic_num <= 1 {
        return None;
    }

    // lone substituent at a stereo double-bond end
    if mol.degree(heavy) == 2 {
        let h_dir_set = mol.bond(h_bond).direction != BondDirection::None;
        let pins_stereo = mol.bonds_of(heavy).any(|e| {
            let bond = mol.bond(e);
            bond.order == BondOrder::Double && (bond.stereo.is_specified() || h_dir_set)
        });
        if pins_stereo {
            return None;
        }
    }
    Some(h_bond)
}

fn remove_hydrogen(
    mol: &mut Mol<Atom, Bond>,
    h: NodeIndex,
    h_bond: EdgeIndex,
    update_explicit_count: bool,
) {
    let heavy = mol.other_atom(h_bond, h);

    if keeps_h_explicitly(mol, heavy, update_explicit_count) {
        let heavy_atom = mol.atom_mut(heavy);
        heavy_atom.explicit_h_count = heavy_atom.explicit_h_count.saturating_add(1);
    }
    stereo::fix_chirality(mol, heavy, h_bond);
    stereo::preserve_bond_stereo(mol, h, heavy, h_bond);

    let remap = mol.remove_atom(h);
    if let Some(heavy) = remap.atom(heavy) {
        update_property_cache(mol, heavy);
    }
}

fn keeps_h_explicitly(mol: &Mol<Atom, Bond>, heavy: NodeIndex, update_explicit_count: bool) -> bool {
    let atom = mol.atom(heavy);
    if update_explicit_count || atom.no_implicit || atom.chirality.is_specified() {
        return true;
    }
    if matches!(atom.atomic_num, 7 | 15) && atom.is_aromatic {
        return true;
    }
    let valence = total_valence(mol, heavy);
    element::default_valences(atom.atomic_num)
        .get(1..)
        .is_some_and(|non_default| non_default.contains(&valence))
}
