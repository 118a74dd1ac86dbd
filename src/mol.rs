use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use crate::conformer::Conformer;
use crate::traits::RemapAtoms;

/// Old-to-new index map produced by every structural removal.
///
/// Indices above a removed atom or bond shift down by the number of removed
/// entries below them; removed entries map to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexRemap {
    atoms: Vec<Option<NodeIndex>>,
    bonds: Vec<Option<EdgeIndex>>,
}

impl IndexRemap {
    pub fn atom(&self, old: NodeIndex) -> Option<NodeIndex> {
        self.atoms.get(old.index()).copied().flatten()
    }

    pub fn atom_index(&self, old: usize) -> Option<usize> {
        self.atom(NodeIndex::new(old)).map(|n| n.index())
    }

    pub fn bond(&self, old: EdgeIndex) -> Option<EdgeIndex> {
        self.bonds.get(old.index()).copied().flatten()
    }

    /// Number of atoms that did not survive.
    pub fn removed_atoms(&self) -> usize {
        self.atoms.iter().filter(|a| a.is_none()).count()
    }

    pub fn removed_bonds(&self) -> usize {
        self.bonds.iter().filter(|b| b.is_none()).count()
    }
}

/// A molecular graph with atoms of type `A` and bonds of type `B`.
///
/// Atoms and bonds live in a `petgraph` undirected graph. Next to the graph the
/// molecule keeps, per atom, the ordered list of incident bonds; that order is
/// what [`neighbors`](Mol::neighbors) and [`bonds_of`](Mol::bonds_of) iterate
/// and what chiral tags are read against. New bonds are appended to the end
/// of both endpoints' lists.
///
/// Every attached [`Conformer`] holds exactly one position per atom.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    atom_bonds: Vec<Vec<EdgeIndex>>,
    conformers: Vec<Conformer>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            atom_bonds: Vec::new(),
            conformers: Vec::new(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    /// Appends an atom. Every conformer grows by one position at the origin.
    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        let idx = self.graph.add_node(atom);
        self.atom_bonds.push(Vec::new());
        for conf in &mut self.conformers {
            conf.push(nalgebra::Point3::origin());
        }
        idx
    }

    /// Adds a bond from `begin` to `end`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range or `begin == end`.
    pub fn add_bond(&mut self, begin: NodeIndex, end: NodeIndex, bond: B) -> EdgeIndex {
        assert!(begin != end, "bond endpoints must differ ({})", begin.index());
        let idx = self.graph.add_edge(begin, end, bond);
        self.atom_bonds[begin.index()].push(idx);
        self.atom_bonds[end.index()].push(idx);
        idx
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.atom_bonds[idx.index()].len()
    }

    /// Neighbors of `idx`, in incident-bond order.
    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.atom_bonds[idx.index()]
            .iter()
            .map(move |&e| self.other_atom(e, idx))
    }

    /// Incident bonds of `idx`, in stored order.
    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.atom_bonds[idx.index()].iter().copied()
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn atoms_mut(&mut self) -> impl Iterator<Item = &mut A> + '_ {
        self.graph.node_weights_mut()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    pub fn begin_atom(&self, idx: EdgeIndex) -> NodeIndex {
        self.graph.raw_edges()[idx.index()].source()
    }

    pub fn end_atom(&self, idx: EdgeIndex) -> NodeIndex {
        self.graph.raw_edges()[idx.index()].target()
    }

    /// The endpoint of `bond` that is not `atom`.
    pub fn other_atom(&self, bond: EdgeIndex, atom: NodeIndex) -> NodeIndex {
        let edge = &self.graph.raw_edges()[bond.index()];
        if edge.source() == atom {
            edge.target()
        } else {
            debug_assert_eq!(edge.target(), atom, "atom is not on bond");
            edge.source()
        }
    }

    pub fn conformers(&self) -> &[Conformer] {
        &self.conformers
    }

    pub fn conformers_mut(&mut self) -> &mut [Conformer] {
        &mut self.conformers
    }

    /// # Panics
    ///
    /// Panics if the conformer does not hold one position per atom.
    pub fn add_conformer(&mut self, conf: Conformer) -> usize {
        assert_eq!(
            conf.len(),
            self.atom_count(),
            "conformer length must equal atom count"
        );
        self.conformers.push(conf);
        self.conformers.len() - 1
    }

    /// Reserves room for `additional` more atoms in every conformer.
    pub fn reserve_conformer_capacity(&mut self, additional: usize) {
        for conf in &mut self.conformers {
            conf.reserve(additional);
        }
    }
}

impl<A, B: RemapAtoms> Mol<A, B> {
    /// Removes one atom and its bonds. See [`Mol::remove_atoms`].
    pub fn remove_atom(&mut self, idx: NodeIndex) -> IndexRemap {
        self.remove_atoms(&[idx])
    }

    /// Removes a set of atoms together with every bond touching them.
    ///
    /// Surviving atoms and bonds keep their relative order. The returned
    /// remap has already been applied to incident-bond lists, to every
    /// bond's stereo reference atoms and to all conformers.
    pub fn remove_atoms(&mut self, doomed: &[NodeIndex]) -> IndexRemap {
        let mut keep = vec![true; self.atom_count()];
        for &idx in doomed {
            keep[idx.index()] = false;
        }
        self.rebuild(|n| keep[n.index()], |_| true)
    }

    pub fn remove_bond(&mut self, idx: EdgeIndex) -> IndexRemap {
        self.rebuild(|_| true, |e| e != idx)
    }

    fn rebuild(
        &mut self,
        keep_atom: impl Fn(NodeIndex) -> bool,
        keep_bond: impl Fn(EdgeIndex) -> bool,
    ) -> IndexRemap {
        let (nodes, edges) = std::mem::take(&mut self.graph).into_nodes_edges();
        let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());

        let atoms: Vec<Option<NodeIndex>> = nodes
            .into_iter()
            .enumerate()
            .map(|(i, node)| keep_atom(NodeIndex::new(i)).then(|| graph.add_node(node.weight)))
            .collect();

        let bonds: Vec<Option<EdgeIndex>> = edges
            .into_iter()
            .enumerate()
            .map(|(i, edge)| {
                let source = atoms[edge.source().index()]?;
                let target = atoms[edge.target().index()]?;
                keep_bond(EdgeIndex::new(i)).then(|| graph.add_edge(source, target, edge.weight))
            })
            .collect();

        let remap = IndexRemap { atoms, bonds };

        let old_lists = std::mem::take(&mut self.atom_bonds);
        self.atom_bonds = old_lists
            .into_iter()
            .enumerate()
            .filter(|(i, _)| remap.atom_index(*i).is_some())
            .map(|(_, list)| list.into_iter().filter_map(|e| remap.bond(e)).collect())
            .collect();

        for weight in graph.edge_weights_mut() {
            weight.remap_atoms(&remap);
        }
        for conf in &mut self.conformers {
            conf.apply_remap(&remap);
        }
        self.graph = graph;

        log::trace!(
            "removed {} atoms and {} bonds",
            remap.removed_atoms(),
            remap.removed_bonds()
        );
        remap
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            atom_bonds: self.atom_bonds.clone(),
            conformers: self.conformers.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        if self.atoms().any(|idx| self.atom(idx) != other.atom(idx)) {
            return false;
        }
        let bonds_equal = self.bonds().all(|idx| {
            self.bond(idx) == other.bond(idx)
                && self.bond_endpoints(idx) == other.bond_endpoints(idx)
        });
        bonds_equal && self.atom_bonds == other.atom_bonds && self.conformers == other.conformers
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("conformers", &self.conformers.len())
            .finish()
    }
}

/// Returns `true` when reordering `from` into `to` takes an even number of
/// transpositions.
///
/// Both slices must hold the same elements; a length mismatch counts as even.
pub fn permutation_parity<T: Eq>(from: &[T], to: &[T]) -> bool {
    if from.len() != to.len() {
        return true;
    }
    let perm: Vec<usize> = from
        .iter()
        .map(|f| to.iter().position(|t| t == f).unwrap_or(0))
        .collect();
    let mut visited = vec![false; perm.len()];
    let mut swaps = 0usize;
    for start in 0..perm.len() {
        let mut j = start;
        let mut cycle_len = 0usize;
        while !visited[j] {
            visited[j] = true;
            j = perm[j];
            cycle_len += 1;
        }
        swaps += cycle_len.saturating_sub(1);
    }
    swaps.is_multiple_of(2)
}
