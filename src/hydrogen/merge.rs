//! Folding explicit hydrogen query atoms into H-count queries.
//!
//! `C[H]` becomes `[C;!H0]` and `C([H])[H]` becomes `[C;!H0;!H1]`: one
//! negated exact count per merged hydrogen, which together read as "at least
//! n hydrogens" without needing range queries.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use super::MergeQueryHsOptions;
use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;
use crate::query::AtomExpr;

/// Whether the atom at `idx` stands for an explicit hydrogen in a query.
///
/// Plain hydrogens and `[#1]` always count. Other atoms need exactly one
/// neighbor and a non-negated query whose `And` tree holds a `#1` leaf. A
/// `#1` leaf next to an `Or` is ambiguous; such atoms are reported and left
/// alone.
pub fn is_query_h(mol: &Mol<Atom, Bond>, idx: NodeIndex) -> bool {
    let atom = mol.atom(idx);
    if atom.atomic_num == 1 && atom.query.as_ref().is_none_or(|q| q.is_element(1)) {
        return true;
    }
    if mol.degree(idx) != 1 {
        return false;
    }
    let Some(query) = atom.query.as_ref() else {
        return false;
    };
    if query.is_negated() {
        return false;
    }

    let mut has_h = false;
    let mut has_or = false;
    let mut queue = VecDeque::from([query]);
    while let Some(expr) = queue.pop_front() {
        if has_h && has_or {
            break;
        }
        match expr {
            AtomExpr::Or(_) => has_or = true,
            AtomExpr::Element { atomic_num: 1, .. } => has_h = true,
            AtomExpr::And(children) => queue.extend(children),
            _ => {}
        }
    }
    if has_h && has_or {
        log::warn!(
            "explicit H query on atom {} is combined with an OR and will not be merged",
            idx.index()
        );
        return false;
    }
    has_h
}

pub fn merge_query_hs(mol: &Mol<Atom, Bond>, opts: &MergeQueryHsOptions) -> Mol<Atom, Bond> {
    let mut result = mol.clone();
    merge_query_hs_mut(&mut result, opts);
    result
}

/// Removes query hydrogens, ANDing `!H0 .. !H(n-1)` onto each heavy atom
/// that loses `n` of them. Atoms without a query first get an element query.
///
/// Sub-patterns of recursive queries are merged the same way, at any depth.
pub fn merge_query_hs_mut(mol: &mut Mol<Atom, Bond>, opts: &MergeQueryHsOptions) {
    let mut pending = vec![mol];
    while let Some(mol) = pending.pop() {
        merge_level(mol, opts);
        for atom in Mol::atoms_mut(mol) {
            if let Some(query) = atom.query.as_mut() {
                pending.extend(query.recursive_mols_mut());
            }
        }
    }
}

fn merge_level(mol: &mut Mol<Atom, Bond>, opts: &MergeQueryHsOptions) {
    let hatoms: Vec<bool> = mol.atoms().map(|idx| is_query_h(mol, idx)).collect();

    let mut doomed = Vec::new();
    for idx in mol.atoms().filter(|idx| !hatoms[idx.index()]).collect::<Vec<_>>() {
        let merged: Vec<NodeIndex> = mol
            .neighbors(idx)
            .filter(|nbr| hatoms[nbr.index()])
            .filter(|&nbr| !opts.merge_unmapped_only || mol.atom(nbr).map_number == 0)
            .collect();
        if merged.is_empty() {
            continue;
        }

        let atom = mol.atom_mut(idx);
        let atomic_num = atom.atomic_num;
        let query = atom.query.get_or_insert_with(|| AtomExpr::element(atomic_num));
        for count in 0..merged.len() {
            let count = u8::try_from(count).unwrap_or(u8::MAX);
            query.and_with(AtomExpr::Not(Box::new(AtomExpr::TotalHCount(count))));
        }
        doomed.extend(merged);
    }

    doomed.sort_unstable();
    doomed.dedup();
    if !doomed.is_empty() {
        mol.remove_atoms(&doomed);
        log::debug!("merged {} query hydrogens", doomed.len());
    }
}
