//! # molfp Graph Model
//!
//! Labeled molecular graphs as consumed by the molfp fingerprint engine.
//!
//! ## Contract
//!
//! - Graphs arrive **already annotated**: element symbols, formal charges,
//!   aromaticity and bond order classes are decided by the provider.
//! - Ring perception is an external collaborator. Providers either attach
//!   rings with [`MolGraph::set_rings`] or implement [`RingPerception`].
//! - Nothing in this crate parses file formats.
//!
//! ## Example Usage
//!
//! ```
//! use graph::{Atom, Bond, MolGraph, Ring};
//!
//! // Cyclopropanol
//! let mut g = MolGraph::new();
//! let c: Vec<_> = (0..3).map(|_| g.add_atom(Atom::new("C"))).collect();
//! let o = g.add_atom(Atom::new("O"));
//! g.add_bond(c[0], c[1], Bond::single()).unwrap();
//! g.add_bond(c[1], c[2], Bond::single()).unwrap();
//! g.add_bond(c[2], c[0], Bond::single()).unwrap();
//! g.add_bond(c[0], o, Bond::single()).unwrap();
//!
//! let ring = Ring::from_atoms(&g, c.clone()).unwrap();
//! g.set_rings(vec![ring]).unwrap();
//!
//! assert_eq!(g.atom_count(), 4);
//! assert!(g.atom(c[0]).unwrap().in_ring);
//! assert!(!g.atom(o).unwrap().in_ring);
//! ```
mod atom;
mod error;
mod molecule;
mod ring;

pub use crate::atom::{Atom, Bond, BondOrder};
pub use crate::error::GraphError;
pub use crate::molecule::{AtomId, BondId, MolGraph};
pub use crate::ring::{AnnotatedRings, Ring, RingPerception};
