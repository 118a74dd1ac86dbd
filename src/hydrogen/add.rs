use petgraph::graph::NodeIndex;

use super::{placement, residue, AddHsOptions};
use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;
use crate::valence::update_property_cache;

pub fn add_hs(mol: &Mol<Atom, Bond>, opts: &AddHsOptions) -> Mol<Atom, Bond> {
    let mut result = mol.clone();
    add_hs_mut(&mut result, opts);
    result
}

/// New hydrogens are appended after all existing atoms. Atoms whose implicit
/// hydrogens were expanded are switched to `no_implicit`, keeping the previous
/// flag for [`remove_hs`](super::remove_hs) to restore.
pub fn add_hs_mut(mol: &mut Mol<Atom, Bond>, opts: &AddHsOptions) {
    let stop = mol.atom_count();
    for idx in 0..stop {
        update_property_cache(mol, NodeIndex::new(idx));
    }

    let to_add: usize = (0..stop)
        .map(NodeIndex::new)
        .filter(|&idx| opts.selects(idx))
        .map(|idx| {
            let atom = mol.atom(idx);
            let implicit = if opts.explicit_only {
                0
            } else {
                atom.implicit_h_count
            };
            usize::from(atom.explicit_h_count) + usize::from(implicit)
        })
        .sum();
    mol.reserve_conformer_capacity(to_add);

    for idx in (0..stop).map(NodeIndex::new) {
        if !opts.selects(idx) {
            continue;
        }
        let explicit = mol.atom(idx).explicit_h_count;
        let implicit = mol.atom(idx).implicit_h_count;

        for _ in 0..explicit {
            attach_hydrogen(mol, idx, false, opts.add_coords);
        }
        mol.atom_mut(idx).explicit_h_count = 0;

        if !opts.explicit_only {
            for _ in 0..implicit {
                attach_hydrogen(mol, idx, true, opts.add_coords);
            }
            let atom = mol.atom_mut(idx);
            atom.orig_no_implicit = Some(atom.no_implicit);
            atom.no_implicit = true;
        }
        update_property_cache(mol, idx);
    }

    if opts.add_residue_info {
        residue::assign_hs_residue_info(mol);
    }
    log::debug!("added {to_add} hydrogens to {stop} atoms");
}

fn attach_hydrogen(mol: &mut Mol<Atom, Bond>, heavy: NodeIndex, implicit: bool, coords: bool) {
    let h = mol.add_atom(Atom {
        is_implicit_h: implicit,
        ..Atom::hydrogen()
    });
    mol.add_bond(heavy, h, Bond::single());
    update_property_cache(mol, h);
    if coords {
        placement::set_hydrogen_coords(mol, h, heavy);
    }
}
