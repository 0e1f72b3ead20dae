//! Canonical, direction-independent path keys.
//!
//! A path is written as `atom (bond atom)*` once forward and once backward;
//! the lexicographically smaller string is the key. Labels come from a
//! [`LabelTable`] built for one graph and dropped with it, so nothing learned
//! while encoding one graph can influence another.

use graph::{Atom, Bond, BondOrder, MolGraph};

use crate::walker::PathRef;

/// Single-character alphabet for common elements, kept for key compatibility
/// with legacy path fingerprints.
pub fn legacy_symbol(atom: &Atom) -> &str {
    if atom.pseudo {
        return "*";
    }
    match atom.symbol.as_str() {
        "Cl" => "X",
        "Br" => "Z",
        "Si" => "Y",
        "As" => "D",
        "Li" => "L",
        "Se" => "E",
        "Na" => "G",
        "Ca" => "J",
        "Al" => "A",
        other => other,
    }
}

pub fn bond_symbol(bond: &Bond) -> &'static str {
    match bond.order {
        BondOrder::Single => "-",
        BondOrder::Double => "=",
        BondOrder::Triple => "#",
        BondOrder::Aromatic => ":",
        BondOrder::Other => "~",
    }
}

/// Which attributes end up in labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelStyle {
    /// Suffix ring atoms with `%`.
    pub ring_marker: bool,
    /// Distinguish bond orders; otherwise every bond is `-`.
    pub bond_orders: bool,
}

impl LabelStyle {
    /// Element symbols and bond orders.
    pub const STANDARD: LabelStyle = LabelStyle {
        ring_marker: false,
        bond_orders: true,
    };
    /// Element symbols with ring membership, and bond orders.
    pub const RING_AWARE: LabelStyle = LabelStyle {
        ring_marker: true,
        bond_orders: true,
    };
    /// Element symbols over bare connectivity.
    pub const TOPOLOGY: LabelStyle = LabelStyle {
        ring_marker: false,
        bond_orders: false,
    };
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Per-graph atom and bond labels.
#[derive(Debug, Clone)]
pub struct LabelTable {
    atoms: Vec<String>,
    bonds: Vec<&'static str>,
}

impl LabelTable {
    pub fn new(graph: &MolGraph, style: LabelStyle) -> Self {
        let atoms = graph
            .atoms()
            .map(|(_, atom)| {
                let mut label = legacy_symbol(atom).to_string();
                if style.ring_marker && atom.in_ring {
                    label.push('%');
                }
                label
            })
            .collect();

        let mut bonds = vec!["-"; graph.bond_count()];
        if style.bond_orders {
            for (id, _, _, bond) in graph.bonds() {
                bonds[id.index()] = bond_symbol(bond);
            }
        }
        Self { atoms, bonds }
    }

    /// Canonical key of `path`; equal for a path and its reverse.
    pub fn encode(&self, path: PathRef<'_>) -> String {
        debug_assert_eq!(path.atoms.len(), path.bonds.len() + 1);
        let capacity = path.atoms.len() * 3;

        let mut forward = String::with_capacity(capacity);
        forward.push_str(&self.atoms[path.atoms[0].index()]);
        for (bond, atom) in path.bonds.iter().zip(&path.atoms[1..]) {
            forward.push_str(self.bonds[bond.index()]);
            forward.push_str(&self.atoms[atom.index()]);
        }

        let mut reverse = String::with_capacity(capacity);
        let last = path.atoms.len() - 1;
        reverse.push_str(&self.atoms[path.atoms[last].index()]);
        for (bond, atom) in path.bonds.iter().rev().zip(path.atoms[..last].iter().rev()) {
            reverse.push_str(self.bonds[bond.index()]);
            reverse.push_str(&self.atoms[atom.index()]);
        }

        if reverse < forward {
            reverse
        } else {
            forward
        }
    }
}
