//! PDB residue labels for hydrogens created by [`add_hs`](super::add_hs).

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::atom::{Atom, ResidueInfo};
use crate::bond::Bond;
use crate::mol::Mol;

/// Four-column PDB atom name for the `id`-th hydrogen of a residue.
///
/// Only the last three digits are kept; names of ids with three digits wrap
/// the last digit to the front.
///
/// ```
/// use hydrocrab::hydrogen::residue::hydrogen_label;
///
/// assert_eq!(hydrogen_label(1), " H1 ");
/// assert_eq!(hydrogen_label(12), " H12");
/// assert_eq!(hydrogen_label(123), "3H12");
/// ```
pub fn hydrogen_label(id: u32) -> String {
    let digits = id.to_string();
    let tail = &digits[digits.len().saturating_sub(3)..];
    let padded = format!("H{tail:<3}");
    let (head, last) = padded.split_at(3);
    format!("{last}{head}")
}

/// Labels every unlabeled hydrogen bonded to a residue atom.
///
/// Hydrogens are numbered per residue in neighbor order, even when a
/// residue's atoms are not contiguous. Labeled hydrogens still consume a
/// number. Serial numbers continue after the largest serial already present.
pub(crate) fn assign_hs_residue_info(mol: &mut Mol<Atom, Bond>) {
    let mut serial = mol
        .atoms()
        .filter_map(|idx| mol.atom(idx).residue.as_ref())
        .map(|info| info.serial_number)
        .max()
        .unwrap_or(0);

    let mut h_ids: HashMap<(i32, String), u32> = HashMap::new();
    for idx in (0..mol.atom_count()).map(NodeIndex::new) {
        let Some(info) = mol.atom(idx).residue.clone() else {
            continue;
        };
        let hydrogens: Vec<NodeIndex> = mol
            .neighbors(idx)
            .filter(|&nbr| mol.atom(nbr).is_hydrogen())
            .collect();
        for h in hydrogens {
            let h_id = h_ids
                .entry((info.residue_number, info.chain_id.clone()))
                .or_insert(0);
            *h_id += 1;
            let h_id = *h_id;
            if mol.atom(h).residue.is_some() {
                continue;
            }
            serial += 1;
            mol.atom_mut(h).residue = Some(ResidueInfo {
                name: hydrogen_label(h_id),
                serial_number: serial,
                residue_name: info.residue_name.clone(),
                residue_number: info.residue_number,
                chain_id: info.chain_id.clone(),
                is_hetero_atom: info.is_hetero_atom,
                ..ResidueInfo::default()
            });
        }
    }
}
