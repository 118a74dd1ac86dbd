use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::element;
use crate::mol::Mol;
use crate::sanitize::SanitizeError;

/// Sum of incident bond orders plus the atom's explicit H count.
pub fn explicit_valence(mol: &Mol<Atom, Bond>, atom: NodeIndex) -> u8 {
    mol.bonds_of(atom)
        .map(|e| mol.bond(e).order.valence_contrib())
        .fold(mol.atom(atom).explicit_h_count, u8::saturating_add)
}

/// Explicit valence plus the cached implicit H count.
pub fn total_valence(mol: &Mol<Atom, Bond>, atom: NodeIndex) -> u8 {
    explicit_valence(mol, atom).saturating_add(mol.atom(atom).implicit_h_count)
}

/// Valence list used for `atom`.
///
/// Charged atoms use the list of the isoelectronic neutral element, so
/// `[NH4+]` is read against carbon and `[OH-]` against fluorine.
pub fn allowed_valences(atom: &Atom) -> &'static [u8] {
    let effective = i16::from(atom.atomic_num) - i16::from(atom.formal_charge);
    match u8::try_from(effective) {
        Ok(n) if atom.atomic_num != 0 => element::default_valences(n),
        _ => &[],
    }
}

/// Number of hydrogens needed to bring the atom up to its next allowed
/// valence.
pub fn calc_implicit_h_count(mol: &Mol<Atom, Bond>, atom: NodeIndex) -> u8 {
    let a = mol.atom(atom);
    if a.no_implicit {
        return 0;
    }
    let ev = explicit_valence(mol, atom);
    allowed_valences(a)
        .iter()
        .find(|&&v| v >= ev)
        .map_or(0, |&v| v - ev)
}

/// Refreshes the derived per-atom properties (the implicit H count).
pub fn update_property_cache(mol: &mut Mol<Atom, Bond>, atom: NodeIndex) {
    let implicit = calc_implicit_h_count(mol, atom);
    mol.atom_mut(atom).implicit_h_count = implicit;
}

pub fn update_property_caches(mol: &mut Mol<Atom, Bond>) {
    for idx in 0..mol.atom_count() {
        update_property_cache(mol, NodeIndex::new(idx));
    }
}

/// Fails on the first atom whose explicit valence exceeds every allowed
/// valence. Atoms with an empty valence list are not checked.
pub fn check_valence(mol: &Mol<Atom, Bond>) -> Result<(), SanitizeError> {
    for idx in mol.atoms() {
        let atom = mol.atom(idx);
        let allowed = allowed_valences(atom);
        let Some(&max) = allowed.last() else {
            continue;
        };
        let valence = explicit_valence(mol, idx);
        if valence > max {
            return Err(SanitizeError::AtomValence {
                atom_idx: idx.index(),
                atomic_num: atom.atomic_num,
                valence,
                allowed: allowed.to_vec(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondOrder;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn methane_gets_four() {
        let mut mol = Mol::<Atom, Bond>::new();
        mol.add_atom(Atom::new(6));
        update_property_caches(&mut mol);
        assert_eq!(mol.atom(n(0)).implicit_h_count, 4);
        assert_eq!(total_valence(&mol, n(0)), 4);
    }

    #[test]
    fn explicit_hs_count_toward_valence() {
        let mut mol = Mol::<Atom, Bond>::new();
        mol.add_atom(Atom {
            atomic_num: 6,
            explicit_h_count: 1,
            ..Atom::default()
        });
        update_property_caches(&mut mol);
        assert_eq!(mol.atom(n(0)).implicit_h_count, 3);
        assert_eq!(mol.atom(n(0)).num_hs(), 4);
    }

    #[test]
    fn ethylene_carbons() {
        let mut mol = Mol::<Atom, Bond>::new();
        let a = mol.add_atom(Atom::new(6));
        let b = mol.add_atom(Atom::new(6));
        mol.add_bond(a, b, Bond::double());
        update_property_caches(&mut mol);
        assert_eq!(mol.atom(a).implicit_h_count, 2);
        assert_eq!(mol.atom(b).implicit_h_count, 2);
    }

    #[test]
    fn hypervalent_nitrogen_uses_next_valence() {
        let mut mol = Mol::<Atom, Bond>::new();
        let nn = mol.add_atom(Atom::new(7));
        for _ in 0..4 {
            let c = mol.add_atom(Atom::new(6));
            mol.add_bond(nn, c, Bond::single());
        }
        update_property_cache(&mut mol, nn);
        assert_eq!(mol.atom(nn).implicit_h_count, 1);
    }

    #[test]
    fn charged_atoms_are_isoelectronic() {
        let mut mol = Mol::<Atom, Bond>::new();
        let ammonium = mol.add_atom(Atom {
            atomic_num: 7,
            formal_charge: 1,
            ..Atom::default()
        });
        let hydroxide = mol.add_atom(Atom {
            atomic_num: 8,
            formal_charge: -1,
            ..Atom::default()
        });
        update_property_caches(&mut mol);
        assert_eq!(mol.atom(ammonium).implicit_h_count, 4);
        assert_eq!(mol.atom(hydroxide).implicit_h_count, 1);
    }

    #[test]
    fn no_implicit_and_metals_get_none() {
        let mut mol = Mol::<Atom, Bond>::new();
        mol.add_atom(Atom {
            atomic_num: 6,
            no_implicit: true,
            ..Atom::default()
        });
        mol.add_atom(Atom::new(26));
        mol.add_atom(Atom::new(0));
        update_property_caches(&mut mol);
        assert!(mol.atoms().all(|i| mol.atom(i).implicit_h_count == 0));
    }

    #[test]
    fn pentavalent_carbon_invalid() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom {
            atomic_num: 6,
            explicit_h_count: 4,
            ..Atom::default()
        });
        let o = mol.add_atom(Atom::new(8));
        mol.add_bond(c, o, Bond::single());
        let err = check_valence(&mol).unwrap_err();
        assert_eq!(
            err,
            SanitizeError::AtomValence {
                atom_idx: 0,
                atomic_num: 6,
                valence: 5,
                allowed: vec![4],
            }
        );
    }

    #[test]
    fn huge_h_counts_saturate() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom {
            atomic_num: 6,
            explicit_h_count: u8::MAX,
            implicit_h_count: 3,
            ..Atom::default()
        });
        let o = mol.add_atom(Atom::new(8));
        mol.add_bond(c, o, Bond::double());
        assert_eq!(explicit_valence(&mol, c), u8::MAX);
        assert_eq!(total_valence(&mol, c), u8::MAX);
        assert_eq!(calc_implicit_h_count(&mol, c), 0);
        let err = check_valence(&mol).unwrap_err();
        assert!(matches!(
            err,
            SanitizeError::AtomValence {
                atom_idx: 0,
                valence: u8::MAX,
                ..
            }
        ));
    }

    #[test]
    fn radicals_pass_valence_check() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom {
            atomic_num: 6,
            no_implicit: true,
            ..Atom::default()
        });
        let c2 = mol.add_atom(Atom::new(6));
        mol.add_bond(
            c,
            c2,
            Bond {
                order: BondOrder::Triple,
                ..Bond::default()
            },
        );
        assert!(check_valence(&mol).is_ok());
    }
}
