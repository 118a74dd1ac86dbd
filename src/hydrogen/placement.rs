//! Coordinates for newly attached hydrogens.
//!
//! One deterministic position per hydrogen, chosen from the number of
//! neighbors the heavy atom already has and its hybridization. 3-D conformers
//! place the hydrogen at the H–X covalent bond length; 2-D conformers use a
//! unit offset and keep every hydrogen in the `z = 0` plane.

use nalgebra::{Point3, Unit, Vector3};
use petgraph::graph::NodeIndex;

use crate::atom::{Atom, CipLabel, Hybridization};
use crate::bond::{Bond, BondOrder};
use crate::conformer::Conformer;
use crate::element::covalent_radius;
use crate::geometry::{is_degenerate, perpendicular, rotate_about, triple_product};
use crate::mol::Mol;

const SP3_BEND_DEG: f64 = 180.0 - 109.471;
const SP2_BEND_DEG: f64 = 60.0;
const HALF_TETRAHEDRAL_DEG: f64 = 109.471 / 2.0;
// triple product below which three neighbor directions are coplanar
const COPLANAR_VOLUME: f64 = 0.1;

/// # Panics
///
/// Panics under the same conditions as [`place_hydrogen`].
pub fn set_hydrogen_coords(mol: &mut Mol<Atom, Bond>, hydrogen: NodeIndex, heavy: NodeIndex) {
    for i in 0..mol.conformers().len() {
        let pos = place_hydrogen(mol, &mol.conformers()[i], heavy, hydrogen);
        mol.conformers_mut()[i].set_position(hydrogen.index(), pos);
    }
}

/// Degenerate input (coincident atoms, five or more neighbors) puts the
/// hydrogen on top of the heavy atom.
///
/// # Panics
///
/// Panics if `hydrogen` is not bonded to `heavy` or does not have degree 1.
pub fn place_hydrogen(
    mol: &Mol<Atom, Bond>,
    conf: &Conformer,
    heavy: NodeIndex,
    hydrogen: NodeIndex,
) -> Point3<f64> {
    assert_ne!(heavy, hydrogen, "hydrogen and heavy atom must differ");
    assert_eq!(
        mol.degree(hydrogen),
        1,
        "hydrogen {} must have exactly one neighbor",
        hydrogen.index()
    );
    assert!(
        mol.bond_between(heavy, hydrogen).is_some(),
        "no bond between atoms {} and {}",
        heavy.index(),
        hydrogen.index()
    );

    let heavy_pos = conf.position(heavy.index());
    let others: Vec<NodeIndex> = mol.neighbors(heavy).filter(|&n| n != hydrogen).collect();

    let dir = match others.as_slice() {
        [] if conf.is_3d() => Some(Vector3::z()),
        [] => Some(Vector3::x()),
        &[nbr] => one_neighbor(mol, conf, heavy, nbr),
        &[a, b] => two_neighbors(mol.atom(heavy).hybridization, conf, heavy, a, b),
        &[a, b, c] => three_neighbors(mol, conf, heavy, [a, b, c]),
        _ => None,
    };

    let Some(dir) = dir else {
        return heavy_pos;
    };
    let scale = if conf.is_3d() {
        covalent_radius(1) + covalent_radius(mol.atom(heavy).atomic_num)
    } else {
        1.0
    };
    heavy_pos + dir * scale
}

fn away_from(conf: &Conformer, from: NodeIndex, to: NodeIndex) -> Option<Vector3<f64>> {
    let v = conf.position(from.index()) - conf.position(to.index());
    (!is_degenerate(&v)).then(|| v.normalize())
}

fn one_neighbor(
    mol: &Mol<Atom, Bond>,
    conf: &Conformer,
    heavy: NodeIndex,
    nbr: NodeIndex,
) -> Option<Vector3<f64>> {
    let away = away_from(conf, heavy, nbr)?;
    let dir = match mol.atom(heavy).hybridization {
        Hybridization::SP3 => {
            let axis = if conf.is_3d() {
                Unit::new_normalize(perpendicular(&away))
            } else {
                Vector3::z_axis()
            };
            rotate_about(&away, &axis, SP3_BEND_DEG)
        }
        Hybridization::SP2 => {
            let axis = sp2_axis(mol, conf, heavy, nbr, &away);
            rotate_about(&away, &axis, SP2_BEND_DEG)
        }
        _ => away,
    };
    Some(dir)
}

/// Rotation axis for an sp2 center with one neighbor.
///
/// When the neighbor is itself double or aromatic bonded to the center and
/// has a further substituent, the axis is normal to the plane of that
/// substituent, so the hydrogen lands in the same plane.
fn sp2_axis(
    mol: &Mol<Atom, Bond>,
    conf: &Conformer,
    heavy: NodeIndex,
    nbr: NodeIndex,
    away: &Vector3<f64>,
) -> Unit<Vector3<f64>> {
    let conjugated = mol.bond_between(heavy, nbr).is_some_and(|b| {
        let bond = mol.bond(b);
        bond.is_aromatic || bond.order == BondOrder::Double
    });
    if conjugated {
        let plane_normal = mol
            .neighbors(nbr)
            .find(|&n| n != heavy)
            .and_then(|nbr2| away_from(conf, nbr2, nbr))
            .map(|to_nbr2| to_nbr2.cross(away))
            .filter(|n| !is_degenerate(n));
        if let Some(normal) = plane_normal {
            return Unit::new_normalize(normal);
        }
    }
    if conf.is_3d() {
        Unit::new_normalize(perpendicular(away))
    } else {
        Vector3::z_axis()
    }
}

fn two_neighbors(
    hybridization: Hybridization,
    conf: &Conformer,
    heavy: NodeIndex,
    a: NodeIndex,
    b: NodeIndex,
) -> Option<Vector3<f64>> {
    let v1 = away_from(conf, heavy, a)?;
    let v2 = away_from(conf, heavy, b)?;
    let sum = v1 + v2;
    if is_degenerate(&sum) {
        // linear neighbors
        return Some(perpendicular(&v1));
    }
    let dir = sum.normalize();
    if conf.is_3d() && hybridization == Hybridization::SP3 {
        let axis = v1.cross(&v2).cross(&dir);
        if !is_degenerate(&axis) {
            return Some(rotate_about(&dir, &Unit::new_normalize(axis), HALF_TETRAHEDRAL_DEG));
        }
    }
    Some(dir)
}

fn three_neighbors(
    mol: &Mol<Atom, Bond>,
    conf: &Conformer,
    heavy: NodeIndex,
    mut nbrs: [NodeIndex; 3],
) -> Option<Vector3<f64>> {
    let cip_label = mol.atom(heavy).cip_label;
    if cip_label.is_some() {
        nbrs.sort_by_key(|&n| (mol.atom(n).cip_rank, n.index()));
    }
    let v = [
        away_from(conf, heavy, nbrs[0])?,
        away_from(conf, heavy, nbrs[1])?,
        away_from(conf, heavy, nbrs[2])?,
    ];

    let dir = if conf.is_3d() {
        if triple_product(&v[2], &v[0], &v[1]).abs() < COPLANAR_VOLUME {
            let normal = v[0].cross(&v[1]);
            match cip_label {
                Some(label) => {
                    let vol = triple_product(&(normal - v[2]), &(v[0] - v[2]), &(v[1] - v[2]));
                    let flip = match label {
                        CipLabel::S => vol < 0.0,
                        CipLabel::R => vol > 0.0,
                    };
                    if flip {
                        -normal
                    } else {
                        normal
                    }
                }
                None => normal,
            }
        } else {
            v[0] + v[1] + v[2]
        }
    } else {
        // flat: go between the two neighbors with the widest angle
        let mut best = (0, 1, 2);
        let mut min_dot = v[0].dot(&v[1]);
        for (i, j, k) in [(1, 2, 0), (0, 2, 1)] {
            let d = v[i].dot(&v[j]);
            if d < min_dot {
                min_dot = d;
                best = (i, j, k);
            }
        }
        let sum = v[best.0] + v[best.1];
        if is_degenerate(&sum) {
            v[best.2]
        } else {
            -sum
        }
    };
    (!is_degenerate(&dir)).then(|| dir.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;
    const CH_BOND: f64 = 0.31 + 0.76;

    fn center_with_neighbors(
        nbr_positions: &[[f64; 3]],
        hybridization: Hybridization,
        is_3d: bool,
    ) -> (Mol<Atom, Bond>, NodeIndex, NodeIndex) {
        let mut mol = Mol::new();
        mol.add_conformer(Conformer::new(0, is_3d));
        let c = mol.add_atom(Atom {
            atomic_num: 6,
            hybridization,
            ..Atom::default()
        });
        for p in nbr_positions {
            let nbr = mol.add_atom(Atom::new(6));
            mol.add_bond(c, nbr, Bond::single());
            mol.conformers_mut()[0].set_position(nbr.index(), Point3::new(p[0], p[1], p[2]));
        }
        let h = mol.add_atom(Atom::hydrogen());
        mol.add_bond(c, h, Bond::single());
        (mol, c, h)
    }

    fn place(mol: &Mol<Atom, Bond>, c: NodeIndex, h: NodeIndex) -> Point3<f64> {
        place_hydrogen(mol, &mol.conformers()[0], c, h)
    }

    fn angle_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
        (a.dot(b) / (a.norm() * b.norm())).acos().to_degrees()
    }

    #[test]
    fn isolated_atom_3d_along_z() {
        let (mol, c, h) = center_with_neighbors(&[], Hybridization::SP3, true);
        let pos = place(&mol, c, h);
        assert!((pos - Point3::new(0.0, 0.0, CH_BOND)).norm() < EPS);
    }

    #[test]
    fn isolated_atom_2d_unit_x() {
        let (mol, c, h) = center_with_neighbors(&[], Hybridization::SP3, false);
        assert_eq!(place(&mol, c, h), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn sp3_one_neighbor_is_tetrahedral() {
        let (mol, c, h) = center_with_neighbors(&[[1.54, 0.0, 0.0]], Hybridization::SP3, true);
        let pos = place(&mol, c, h).coords;
        assert!((pos.norm() - CH_BOND).abs() < EPS);
        assert!((angle_deg(&pos, &Vector3::x()) - 109.471).abs() < 1e-3);
    }

    #[test]
    fn sp3_one_neighbor_2d_stays_flat() {
        let (mol, c, h) = center_with_neighbors(&[[1.0, 0.0, 0.0]], Hybridization::SP3, false);
        let pos = place(&mol, c, h);
        assert_eq!(pos.z, 0.0);
        assert!((pos.coords.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn sp2_follows_substituent_plane() {
        let mut mol = Mol::new();
        mol.add_conformer(Conformer::new(0, true));
        let c1 = mol.add_atom(Atom {
            atomic_num: 6,
            hybridization: Hybridization::SP2,
            ..Atom::default()
        });
        let c2 = mol.add_atom(Atom::new(6));
        let c3 = mol.add_atom(Atom::new(6));
        mol.add_bond(c1, c2, Bond::double());
        mol.add_bond(c2, c3, Bond::single());
        mol.conformers_mut()[0].set_position(c2.index(), Point3::new(1.34, 0.0, 0.0));
        mol.conformers_mut()[0].set_position(c3.index(), Point3::new(2.0, 1.2, 0.0));
        let h = mol.add_atom(Atom::hydrogen());
        mol.add_bond(c1, h, Bond::single());

        let pos = place(&mol, c1, h).coords;
        assert!(pos.z.abs() < EPS);
        assert!((angle_deg(&pos, &Vector3::x()) - 120.0).abs() < 1e-6);
    }

    #[test]
    fn sp2_without_plane_in_2d_stays_flat() {
        let (mol, c, h) = center_with_neighbors(&[[1.0, 1.0, 0.0]], Hybridization::SP2, false);
        let pos = place(&mol, c, h);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn sp_lies_along_axis() {
        let (mol, c, h) = center_with_neighbors(&[[1.2, 0.0, 0.0]], Hybridization::SP, true);
        let pos = place(&mol, c, h);
        assert!((pos - Point3::new(-CH_BOND, 0.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn coincident_neighbor_puts_h_on_heavy() {
        let (mut mol, c, h) =
            center_with_neighbors(&[[0.0, 0.0, 0.0]], Hybridization::SP3, true);
        mol.conformers_mut()[0].set_position(c.index(), Point3::new(1.0, 2.0, 3.0));
        mol.conformers_mut()[0].set_position(1, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(place(&mol, c, h), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn two_neighbors_sp2_bisects() {
        let (mol, c, h) = center_with_neighbors(
            &[[1.0, 0.0, 0.0], [-0.5, 0.866_025_4, 0.0]],
            Hybridization::SP2,
            true,
        );
        let pos = place(&mol, c, h).coords;
        let expected = Vector3::new(-0.5, -0.866_025_4, 0.0).normalize() * CH_BOND;
        assert!((pos - expected).norm() < 1e-5);
    }

    #[test]
    fn two_neighbors_sp3_leaves_plane() {
        let (mol, c, h) = center_with_neighbors(
            &[[1.0, 0.0, 0.0], [-0.333, 0.943, 0.0]],
            Hybridization::SP3,
            true,
        );
        let pos = place(&mol, c, h).coords;
        assert!((pos.norm() - CH_BOND).abs() < EPS);
        assert!(pos.z.abs() > 0.5);
    }

    #[test]
    fn two_neighbors_2d_is_unit_and_flat() {
        let (mol, c, h) = center_with_neighbors(
            &[[1.0, 0.0, 0.0], [-0.5, 0.866_025_4, 0.0]],
            Hybridization::SP3,
            false,
        );
        let pos = place(&mol, c, h);
        assert_eq!(pos.z, 0.0);
        assert!((pos.coords.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn three_neighbors_tetrahedral_fourth_vertex() {
        let s = 1.54 / 3f64.sqrt();
        let (mol, c, h) = center_with_neighbors(
            &[[s, s, s], [s, -s, -s], [-s, s, -s]],
            Hybridization::SP3,
            true,
        );
        let pos = place(&mol, c, h).coords;
        let expected = Vector3::new(-1.0, -1.0, 1.0).normalize() * CH_BOND;
        assert!((pos - expected).norm() < 1e-6);
    }

    #[test]
    fn three_coplanar_neighbors_use_cip_label() {
        let planar = [[1.0, 0.0, 0.0], [-0.5, 0.866_025_4, 0.0], [-0.5, -0.866_025_4, 0.0]];
        let (mut mol, c, h) = center_with_neighbors(&planar, Hybridization::SP3, true);
        assert!(place(&mol, c, h).z > 0.0);

        for (i, nbr) in [1usize, 2, 3].into_iter().enumerate() {
            mol.atom_mut(NodeIndex::new(nbr)).cip_rank = i as u32;
        }
        mol.atom_mut(c).cip_label = Some(CipLabel::R);
        assert!(place(&mol, c, h).z < 0.0);
        mol.atom_mut(c).cip_label = Some(CipLabel::S);
        assert!(place(&mol, c, h).z > 0.0);
    }

    #[test]
    fn three_neighbors_2d_widest_gap() {
        let (mol, c, h) = center_with_neighbors(
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
            Hybridization::SP3,
            false,
        );
        let pos = place(&mol, c, h);
        assert!((pos - Point3::new(0.0, -1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn crowded_center_puts_h_on_heavy() {
        let (mol, c, h) = center_with_neighbors(
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            Hybridization::SP3D,
            true,
        );
        assert_eq!(place(&mol, c, h), Point3::origin());
    }

    #[test]
    fn set_coords_fills_every_conformer() {
        let (mut mol, c, h) = center_with_neighbors(&[], Hybridization::SP3, true);
        mol.add_conformer(Conformer::new(2, false));
        set_hydrogen_coords(&mut mol, h, c);
        assert!((mol.conformers()[0].position(h.index()).z - CH_BOND).abs() < EPS);
        assert_eq!(mol.conformers()[1].position(h.index()), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "exactly one neighbor")]
    fn rejects_bridging_hydrogen() {
        let (mut mol, c, h) = center_with_neighbors(&[[1.0, 0.0, 0.0]], Hybridization::SP3, true);
        mol.add_bond(NodeIndex::new(1), h, Bond::single());
        place(&mol, c, h);
    }
}
