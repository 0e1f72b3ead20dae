use crate::error::GraphError;
use crate::molecule::{AtomId, BondId, MolGraph};

/// One ring of a molecule: a closed cycle of atoms with the bonds joining them.
///
/// `bonds[i]` connects `atoms[i]` and `atoms[(i + 1) % size]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ring {
    atoms: Vec<AtomId>,
    bonds: Vec<BondId>,
}

impl Ring {
    /// Build a ring from explicit atom and bond lists.
    ///
    /// No validation happens here; [`MolGraph::set_rings`] checks rings against the graph.
    pub fn new(atoms: Vec<AtomId>, bonds: Vec<BondId>) -> Self {
        Self { atoms, bonds }
    }

    /// Build a ring from its atom cycle, resolving the bonds from `graph`.
    pub fn from_atoms(graph: &MolGraph, atoms: Vec<AtomId>) -> Result<Self, GraphError> {
        if atoms.len() < 3 {
            return Err(GraphError::InvalidRing(format!(
                "a ring needs at least 3 atoms (got {})",
                atoms.len()
            )));
        }
        let mut bonds = Vec::with_capacity(atoms.len());
        for (i, &a) in atoms.iter().enumerate() {
            let b = atoms[(i + 1) % atoms.len()];
            let bond = graph.bond_between(a, b).ok_or_else(|| {
                GraphError::InvalidRing(format!(
                    "atoms {} and {} are not bonded",
                    a.index(),
                    b.index()
                ))
            })?;
            bonds.push(bond);
        }
        Ok(Self { atoms, bonds })
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[BondId] {
        &self.bonds
    }

    /// Ring size (number of atoms).
    pub fn size(&self) -> usize {
        self.atoms.len()
    }
}

/// Source of ring information for a graph.
///
/// Ring perception is not done by the fingerprint engine. Providers either
/// annotate graphs up front (see [`AnnotatedRings`]) or plug in their own
/// finder. Failures are returned as [`GraphError`] and propagated unchanged.
pub trait RingPerception: Send + Sync {
    fn perceive(&self, graph: &MolGraph) -> Result<Vec<Ring>, GraphError>;
}

/// Reads the rings stored on the graph by [`MolGraph::set_rings`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotatedRings;

impl RingPerception for AnnotatedRings {
    fn perceive(&self, graph: &MolGraph) -> Result<Vec<Ring>, GraphError> {
        graph
            .rings()
            .map(<[Ring]>::to_vec)
            .ok_or(GraphError::MissingRingAnnotation)
    }
}

impl<F> RingPerception for F
where
    F: Fn(&MolGraph) -> Result<Vec<Ring>, GraphError> + Send + Sync,
{
    fn perceive(&self, graph: &MolGraph) -> Result<Vec<Ring>, GraphError> {
        self(graph)
    }
}
