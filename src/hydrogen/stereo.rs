//! Stereo fix-ups applied before a hydrogen is deleted.
//!
//! All three need the neighbor order as it is *before* deletion, so they run
//! while the hydrogen is still in the graph.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Atom;
use crate::bond::{Bond, BondDirection, BondOrder, BondStereo};
use crate::mol::{permutation_parity, Mol};

/// Deletion keeps the remaining bonds in order, which is the same as moving
/// `h_bond` to the end and dropping it; an odd move inverts the tag.
pub(super) fn fix_chirality(mol: &mut Mol<Atom, Bond>, heavy: NodeIndex, h_bond: EdgeIndex) {
    if !mol.atom(heavy).chirality.is_specified() {
        return;
    }
    let current: Vec<EdgeIndex> = mol.bonds_of(heavy).collect();
    let mut probe: Vec<EdgeIndex> = current.iter().copied().filter(|&e| e != h_bond).collect();
    probe.push(h_bond);
    if !permutation_parity(&current, &probe) {
        let atom = mol.atom_mut(heavy);
        atom.chirality = atom.chirality.invert();
    }
}

pub(super) fn preserve_bond_stereo(
    mol: &mut Mol<Atom, Bond>,
    hydrogen: NodeIndex,
    heavy: NodeIndex,
    h_bond: EdgeIndex,
) {
    let dir = mol.bond(h_bond).direction;
    if dir == BondDirection::Unknown && mol.begin_atom(h_bond) == heavy {
        mol.atom_mut(heavy).unknown_stereo = true;
        return;
    }
    if dir.is_directional() {
        transfer_direction(mol, heavy, h_bond, dir);
    }
    adjust_stereo_atoms(mol, hydrogen, heavy);
}

fn transfer_direction(
    mol: &mut Mol<Atom, Bond>,
    heavy: NodeIndex,
    h_bond: EdgeIndex,
    dir: BondDirection,
) {
    let mut found_dir = false;
    let mut target = None;
    for e in mol.bonds_of(heavy) {
        let bond = mol.bond(e);
        if e == h_bond || bond.order != BondOrder::Single {
            continue;
        }
        if bond.direction == BondDirection::None {
            target = Some(e);
        } else {
            found_dir = true;
        }
    }
    let Some(target) = target.filter(|_| !found_dir) else {
        return;
    };
    let flip = mol.begin_atom(target) == heavy && mol.begin_atom(h_bond) == heavy;
    mol.bond_mut(target).direction = if flip { dir.flipped() } else { dir };
}

/// Replaces `hydrogen` in the stereo references of a double bond at `heavy`
/// by another substituent of `heavy`.
///
/// `Cis`/`Trans` are measured against the references and get inverted; `E`/`Z`
/// are kept. Returns whether a descriptor was inverted. Nothing happens when
/// `heavy` has no other substituent.
pub(super) fn adjust_stereo_atoms(
    mol: &mut Mol<Atom, Bond>,
    hydrogen: NodeIndex,
    heavy: NodeIndex,
) -> bool {
    if mol.degree(heavy) == 2 || mol.bond_between(hydrogen, heavy).is_none() {
        return false;
    }
    let bonds: Vec<EdgeIndex> = mol.bonds_of(heavy).collect();
    for e in bonds {
        let bond = mol.bond(e);
        if bond.order != BondOrder::Double || !bond.stereo.is_specified() {
            continue;
        }
        let Some(mut refs) = bond.stereo_atoms else {
            continue;
        };
        let Some(slot) = refs.iter().position(|&a| a == hydrogen) else {
            continue;
        };
        let far_end = mol.other_atom(e, heavy);
        let Some(substitute) = mol.neighbors(heavy).find(|&n| n != far_end && n != hydrogen)
        else {
            continue;
        };
        refs[slot] = substitute;
        let (stereo, inverted) = match bond.stereo {
            BondStereo::Cis => (BondStereo::Trans, true),
            BondStereo::Trans => (BondStereo::Cis, true),
            other => (other, false),
        };
        let bond = mol.bond_mut(e);
        bond.stereo_atoms = Some(refs);
        bond.stereo = stereo;
        return inverted;
    }
    false
}
