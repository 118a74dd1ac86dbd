use petgraph::graph::NodeIndex;

use crate::mol::IndexRemap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
}

impl BondOrder {
    pub fn valence_contrib(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

/// Double-bond stereo descriptor.
///
/// `Cis`/`Trans` are measured against the bond's stereo reference atoms;
/// `Z`/`E` are absolute CIP labels and do not depend on which substituents
/// are referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum BondStereo {
    #[default]
    None,
    /// Stereo explicitly unknown (crossed or wavy double bond).
    Any,
    Z,
    E,
    Cis,
    Trans,
}

impl BondStereo {
    /// True for descriptors stronger than `Any`.
    pub fn is_specified(self) -> bool {
        self > BondStereo::Any
    }
}

/// Single-bond direction used to encode double-bond geometry (`/` and `\`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondDirection {
    #[default]
    None,
    EndUpRight,
    EndDownRight,
    /// Wavy bond.
    Unknown,
}

impl BondDirection {
    pub fn is_directional(self) -> bool {
        matches!(self, BondDirection::EndUpRight | BondDirection::EndDownRight)
    }

    pub fn flipped(self) -> Self {
        match self {
            BondDirection::EndUpRight => BondDirection::EndDownRight,
            BondDirection::EndDownRight => BondDirection::EndUpRight,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bond {
    pub order: BondOrder,
    pub is_aromatic: bool,
    pub stereo: BondStereo,
    /// Substituents the `stereo` descriptor is measured against, one per end.
    pub stereo_atoms: Option<[NodeIndex; 2]>,
    pub direction: BondDirection,
}

impl Bond {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn double() -> Self {
        Self {
            order: BondOrder::Double,
            ..Self::default()
        }
    }
}

impl crate::traits::RemapAtoms for Bond {
    fn remap_atoms(&mut self, remap: &IndexRemap) {
        let Some([a, b]) = self.stereo_atoms else {
            return;
        };
        match (remap.atom(a), remap.atom(b)) {
            (Some(a), Some(b)) => self.stereo_atoms = Some([a, b]),
            _ => {
                self.stereo_atoms = None;
                if matches!(self.stereo, BondStereo::Cis | BondStereo::Trans) {
                    self.stereo = BondStereo::None;
                }
            }
        }
    }
}
