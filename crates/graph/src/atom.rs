use serde::{Deserialize, Serialize};

/// Symbols that providers use for wildcard / attachment-point atoms.
const PSEUDO_SYMBOLS: [&str; 2] = ["*", "R"];

/// A labeled vertex of a [`MolGraph`](crate::MolGraph).
///
/// Atoms are immutable once added to a graph, except for the ring flag which
/// is written by [`MolGraph::set_rings`](crate::MolGraph::set_rings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// Element symbol as supplied by the provider (`"C"`, `"Cl"`, `"*"`).
    pub symbol: String,
    /// Formal charge, if the provider recorded one.
    #[serde(default)]
    pub formal_charge: Option<i8>,
    #[serde(default)]
    pub aromatic: bool,
    #[serde(default)]
    pub in_ring: bool,
    /// Wildcard / pseudo atom. Skipped by path enumeration unless pseudo atoms are hashed.
    #[serde(default)]
    pub pseudo: bool,
}

impl Atom {
    /// Create an atom for `symbol`. Wildcard symbols are flagged as pseudo atoms.
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let pseudo = PSEUDO_SYMBOLS.contains(&symbol.as_str());
        Self {
            symbol,
            formal_charge: None,
            aromatic: false,
            in_ring: false,
            pseudo,
        }
    }

    /// Create an explicit pseudo atom with a free-form label.
    pub fn pseudo(label: impl Into<String>) -> Self {
        Self {
            pseudo: true,
            ..Self::new(label)
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = Some(charge);
        self
    }

    pub fn with_aromatic(mut self, aromatic: bool) -> Self {
        self.aromatic = aromatic;
        self
    }

    pub fn with_in_ring(mut self, in_ring: bool) -> Self {
        self.in_ring = in_ring;
        self
    }

    /// Nonzero formal charge, if any.
    pub fn charge(&self) -> Option<i8> {
        self.formal_charge.filter(|c| *c != 0)
    }
}

/// Bond order class as annotated by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
    Other,
}

/// A labeled edge of a [`MolGraph`](crate::MolGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Bond {
    pub order: BondOrder,
    #[serde(default)]
    pub in_ring: bool,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            in_ring: false,
        }
    }

    pub fn single() -> Self {
        Self::new(BondOrder::Single)
    }

    pub fn double() -> Self {
        Self::new(BondOrder::Double)
    }

    pub fn triple() -> Self {
        Self::new(BondOrder::Triple)
    }

    pub fn aromatic() -> Self {
        Self::new(BondOrder::Aromatic)
    }

    pub fn is_aromatic(&self) -> bool {
        self.order == BondOrder::Aromatic
    }
}
