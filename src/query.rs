use std::collections::VecDeque;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;

/// Atom query predicate attached to pattern atoms. Trees are walked with
/// explicit work-lists.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomExpr {
    True,
    /// `aromatic` is `None` for `#n` (either), `Some(true)` for lowercase,
    /// `Some(false)` for uppercase.
    Element {
        atomic_num: u8,
        aromatic: Option<bool>,
    },
    Isotope(u16),
    Charge(i8),
    Degree(u8),
    /// Graph hydrogens included (`H`).
    TotalHCount(u8),
    Recursive(Box<Mol<Atom, Bond>>),
    And(Vec<AtomExpr>),
    Or(Vec<AtomExpr>),
    Not(Box<AtomExpr>),
}

impl AtomExpr {
    /// `#n`: element match that ignores aromaticity.
    pub fn element(atomic_num: u8) -> Self {
        AtomExpr::Element {
            atomic_num,
            aromatic: None,
        }
    }

    pub fn is_element(&self, atomic_num: u8) -> bool {
        matches!(self, AtomExpr::Element { atomic_num: n, .. } if *n == atomic_num)
    }

    pub fn is_negated(&self) -> bool {
        matches!(self, AtomExpr::Not(_))
    }

    pub fn children(&self) -> &[AtomExpr] {
        match self {
            AtomExpr::And(v) | AtomExpr::Or(v) => v.as_slice(),
            AtomExpr::Not(inner) => std::slice::from_ref(inner.as_ref()),
            _ => &[],
        }
    }

    pub fn and_with(&mut self, other: AtomExpr) {
        match self {
            AtomExpr::And(v) => v.push(other),
            _ => {
                let prev = std::mem::replace(self, AtomExpr::True);
                *self = AtomExpr::And(vec![prev, other]);
            }
        }
    }

    /// Every sub-pattern held by a `Recursive` node anywhere in the tree,
    /// breadth-first. Sub-patterns nested inside those are not included.
    pub fn recursive_mols_mut(&mut self) -> Vec<&mut Mol<Atom, Bond>> {
        let mut found = Vec::new();
        let mut queue: VecDeque<&mut AtomExpr> = VecDeque::from([self]);
        while let Some(expr) = queue.pop_front() {
            match expr {
                AtomExpr::Recursive(mol) => found.push(mol.as_mut()),
                AtomExpr::And(v) | AtomExpr::Or(v) => queue.extend(v.iter_mut()),
                AtomExpr::Not(inner) => queue.push_back(inner.as_mut()),
                _ => {}
            }
        }
        found
    }

    /// The `n` of each `!Hn` term directly under a top-level `And`.
    pub fn negated_total_h_counts(&self) -> Vec<u8> {
        let terms = match self {
            AtomExpr::And(v) => v.as_slice(),
            other => std::slice::from_ref(other),
        };
        terms
            .iter()
            .filter_map(|t| match t {
                AtomExpr::Not(inner) => match inner.as_ref() {
                    AtomExpr::TotalHCount(n) => Some(*n),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }
}
