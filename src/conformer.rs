//! Coordinate sets attached to a molecule.

use nalgebra::Point3;

use crate::mol::IndexRemap;

/// One set of atom positions, indexed by atom index.
///
/// 2-D conformers keep every `z` at zero; hydrogen placement switches to
/// planar rules for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    positions: Vec<Point3<f64>>,
    is_3d: bool,
}

impl Conformer {
    /// A conformer with `n` atoms at the origin.
    pub fn new(n: usize, is_3d: bool) -> Self {
        Self {
            positions: vec![Point3::origin(); n],
            is_3d,
        }
    }

    pub fn from_positions(positions: Vec<Point3<f64>>, is_3d: bool) -> Self {
        Self { positions, is_3d }
    }

    pub fn is_3d(&self) -> bool {
        self.is_3d
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn position(&self, idx: usize) -> Point3<f64> {
        self.positions[idx]
    }

    pub fn set_position(&mut self, idx: usize, pos: Point3<f64>) {
        self.positions[idx] = pos;
    }

    pub fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
    }

    pub(crate) fn push(&mut self, pos: Point3<f64>) {
        self.positions.push(pos);
    }

    pub(crate) fn apply_remap(&mut self, remap: &IndexRemap) {
        let mut old = 0usize;
        self.positions.retain(|_| {
            let keep = remap.atom_index(old).is_some();
            old += 1;
            keep
        });
    }
}
