use crate::query::AtomExpr;

/// Tetrahedral chiral tag.
///
/// The handedness is read relative to the atom's incident bonds in the order
/// [`Mol::bonds_of`](crate::Mol::bonds_of) yields them: looking from the first
/// neighbor, the remaining neighbors turn clockwise (`Cw`) or counterclockwise
/// (`Ccw`). Any reordering of those bonds must be compensated by
/// [`Chirality::invert`] when its permutation is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chirality {
    /// No chirality specified.
    #[default]
    None,
    /// Clockwise (@@) arrangement.
    Cw,
    /// Counterclockwise (@) arrangement.
    Ccw,
}

impl Chirality {
    /// Swaps `Cw` and `Ccw`; `None` is left alone.
    pub fn invert(self) -> Self {
        match self {
            Chirality::None => Chirality::None,
            Chirality::Cw => Chirality::Ccw,
            Chirality::Ccw => Chirality::Cw,
        }
    }

    pub fn is_specified(self) -> bool {
        self != Chirality::None
    }
}

/// Bonding geometry class, used to pick the placement rule for new hydrogens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hybridization {
    /// Not perceived yet.
    #[default]
    Unspecified,
    S,
    SP,
    SP2,
    SP3,
    SP3D,
    SP3D2,
    Other,
}

/// CIP descriptor assigned by an external stereo perception pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipLabel {
    R,
    S,
}

/// PDB-style residue annotation of an atom belonging to a biopolymer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueInfo {
    /// Four-column atom label, e.g. `" CA "` or `" H1 "`.
    pub name: String,
    pub serial_number: i32,
    pub alt_loc: String,
    pub residue_name: String,
    pub residue_number: i32,
    pub chain_id: String,
    pub insertion_code: String,
    pub occupancy: f64,
    pub temp_factor: f64,
    pub is_hetero_atom: bool,
}

impl Default for ResidueInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            serial_number: 0,
            alt_loc: String::new(),
            residue_name: String::new(),
            residue_number: 0,
            chain_id: String::new(),
            insertion_code: String::new(),
            occupancy: 1.0,
            temp_factor: 0.0,
            is_hetero_atom: false,
        }
    }
}

/// Atom record stored on every node of a [`Mol`](crate::Mol).
///
/// Besides the intrinsic properties read off a structural formula, the atom
/// carries the stereo annotations and bookkeeping flags that hydrogen
/// addition and removal need to keep consistent.
///
/// # Examples
///
/// ```
/// use hydrocrab::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     explicit_h_count: 1,
///     ..Atom::default()
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// assert!(!carbon.is_hydrogen());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (0 = dummy, 1 = H, 6 = C, …).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Hydrogens written on the atom itself (e.g. the `3` in `[CH3]`).
    pub explicit_h_count: u8,
    /// Hydrogens implied by valence. Derived: refreshed by
    /// [`update_property_cache`](crate::valence::update_property_cache).
    pub implicit_h_count: u8,
    /// When set, the atom never takes implicit hydrogens.
    pub no_implicit: bool,
    /// Whether this atom is in an aromatic ring.
    pub is_aromatic: bool,
    pub chirality: Chirality,
    pub hybridization: Hybridization,
    /// CIP label, if stereo perception assigned one.
    pub cip_label: Option<CipLabel>,
    /// Canonical CIP rank among the atoms of the molecule.
    pub cip_rank: u32,
    /// Reaction atom-map number. `0` means unmapped.
    pub map_number: u16,
    /// Query predicate for pattern atoms.
    pub query: Option<AtomExpr>,
    pub residue: Option<ResidueInfo>,
    /// Set on hydrogens created from an implicit count, so they can be
    /// stripped again by an implicit-only removal.
    pub is_implicit_h: bool,
    /// The `no_implicit` value in effect before hydrogen expansion forced it
    /// on.
    pub orig_no_implicit: Option<bool>,
    /// Set when a removed hydrogen carried a wavy (unknown direction) bond.
    pub unknown_stereo: bool,
}

impl Atom {
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    /// A plain hydrogen, as created by hydrogen expansion.
    pub fn hydrogen() -> Self {
        Self::new(1)
    }

    pub fn is_hydrogen(&self) -> bool {
        self.atomic_num == 1
    }

    /// Explicit plus implicit hydrogen count (graph hydrogens excluded).
    pub fn num_hs(&self) -> u8 {
        self.explicit_h_count + self.implicit_h_count
    }
}
