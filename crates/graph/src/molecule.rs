use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use crate::atom::{Atom, Bond};
use crate::error::GraphError;
use crate::ring::Ring;

/// Index of an atom inside a [`MolGraph`].
pub type AtomId = NodeIndex;
/// Index of a bond inside a [`MolGraph`].
pub type BondId = EdgeIndex;

/// An annotated, undirected molecular graph.
///
/// Atoms and bonds are addressed by stable indices assigned in insertion
/// order. Ring information is optional: providers attach it with
/// [`MolGraph::set_rings`] once ring perception has run.
#[derive(Debug, Clone, Default)]
pub struct MolGraph {
    graph: UnGraph<Atom, Bond>,
    rings: Option<Vec<Ring>>,
}

impl MolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(atoms: usize, bonds: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(atoms, bonds),
            rings: None,
        }
    }

    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        self.graph.add_node(atom)
    }

    /// Connect two existing atoms.
    ///
    /// Self loops and parallel bonds are rejected; a simple path can use neither.
    pub fn add_bond(&mut self, a: AtomId, b: AtomId, bond: Bond) -> Result<BondId, GraphError> {
        self.check_atom(a)?;
        self.check_atom(b)?;
        if a == b {
            return Err(GraphError::SelfLoop { index: a.index() });
        }
        if self.graph.find_edge(a, b).is_some() {
            return Err(GraphError::DuplicateBond {
                a: a.index(),
                b: b.index(),
            });
        }
        Ok(self.graph.add_edge(a, b, bond))
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.graph.node_weight(id)
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.graph.edge_weight(id)
    }

    pub fn bond_endpoints(&self, id: BondId) -> Option<(AtomId, AtomId)> {
        self.graph.edge_endpoints(id)
    }

    pub fn bond_between(&self, a: AtomId, b: AtomId) -> Option<BondId> {
        self.graph.find_edge(a, b)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Atom indices in insertion order.
    pub fn atom_ids(&self) -> impl Iterator<Item = AtomId> {
        self.graph.node_indices()
    }

    pub fn atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> + '_ {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    /// Bonds as `(id, a, b, bond)` in insertion order.
    pub fn bonds(&self) -> impl Iterator<Item = (BondId, AtomId, AtomId, &Bond)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.id(), e.source(), e.target(), e.weight()))
    }

    /// Neighbors of `id` together with the connecting bond.
    pub fn neighbors(&self, id: AtomId) -> impl Iterator<Item = (AtomId, BondId)> + '_ {
        self.graph.edges(id).map(move |e| {
            let other = if e.source() == id {
                e.target()
            } else {
                e.source()
            };
            (other, e.id())
        })
    }

    /// Connected components, each sorted by atom index, ordered by their lowest atom.
    pub fn components(&self) -> Vec<Vec<AtomId>> {
        let n = self.graph.node_count();
        let mut sets = UnionFind::<usize>::new(n);
        for e in self.graph.edge_references() {
            sets.union(e.source().index(), e.target().index());
        }

        let mut slot_of_root = vec![usize::MAX; n];
        let mut components: Vec<Vec<AtomId>> = Vec::new();
        for id in self.graph.node_indices() {
            let root = sets.find(id.index());
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = components.len();
                components.push(Vec::new());
            }
            components[slot_of_root[root]].push(id);
        }
        components
    }

    /// Attach ring annotations and rewrite the ring flags of atoms and bonds.
    ///
    /// Every ring must be a closed cycle of distinct atoms whose bonds join
    /// consecutive members. On error the graph is left unchanged.
    pub fn set_rings(&mut self, rings: Vec<Ring>) -> Result<(), GraphError> {
        for ring in &rings {
            self.check_ring(ring)?;
        }

        for atom in self.graph.node_weights_mut() {
            atom.in_ring = false;
        }
        for bond in self.graph.edge_weights_mut() {
            bond.in_ring = false;
        }
        for ring in &rings {
            for &a in ring.atoms() {
                self.graph[a].in_ring = true;
            }
            for &b in ring.bonds() {
                self.graph[b].in_ring = true;
            }
        }
        self.rings = Some(rings);
        Ok(())
    }

    /// Ring annotation, if the provider supplied one.
    pub fn rings(&self) -> Option<&[Ring]> {
        self.rings.as_deref()
    }

    /// The ring as a standalone graph: ring atoms in cycle order, ring bonds
    /// only, annotated with the ring itself.
    pub fn ring_subgraph(&self, ring: &Ring) -> Result<MolGraph, GraphError> {
        self.check_ring(ring)?;
        let mut sub = MolGraph::with_capacity(ring.size(), ring.size());
        let ids: Vec<AtomId> = ring
            .atoms()
            .iter()
            .map(|&a| sub.add_atom(self.graph[a].clone()))
            .collect();
        let mut bonds = Vec::with_capacity(ring.size());
        for (i, &b) in ring.bonds().iter().enumerate() {
            let next = ids[(i + 1) % ids.len()];
            bonds.push(sub.add_bond(ids[i], next, self.graph[b])?);
        }
        sub.set_rings(vec![Ring::new(ids, bonds)])?;
        Ok(sub)
    }

    fn check_atom(&self, id: AtomId) -> Result<(), GraphError> {
        if id.index() < self.graph.node_count() {
            Ok(())
        } else {
            Err(GraphError::UnknownAtom { index: id.index() })
        }
    }

    fn check_ring(&self, ring: &Ring) -> Result<(), GraphError> {
        let size = ring.size();
        if size < 3 || ring.bonds().len() != size {
            return Err(GraphError::InvalidRing(format!(
                "ring has {size} atoms and {} bonds",
                ring.bonds().len()
            )));
        }
        let mut seen = vec![false; self.graph.node_count()];
        for (i, &a) in ring.atoms().iter().enumerate() {
            self.check_atom(a)?;
            if std::mem::replace(&mut seen[a.index()], true) {
                return Err(GraphError::InvalidRing(format!(
                    "atom {} repeats in ring",
                    a.index()
                )));
            }
            let b = ring.atoms()[(i + 1) % size];
            let joins = self
                .graph
                .edge_endpoints(ring.bonds()[i])
                .is_some_and(|(x, y)| (x == a && y == b) || (x == b && y == a));
            if !joins {
                return Err(GraphError::InvalidRing(format!(
                    "bond {} does not join atoms {} and {}",
                    ring.bonds()[i].index(),
                    a.index(),
                    b.index()
                )));
            }
        }
        Ok(())
    }
}
