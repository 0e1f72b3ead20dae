//! Test-only graph provider and exact-match oracle.
//!
//! `parse_smiles` reads the organic subset, bracket atoms, branches, ring
//! closures and explicit bonds. Stereo marks, isotopes, hydrogen counts and
//! atom classes are read and ignored. Rings are annotated with a minimal
//! cycle basis found from shortest cycles through each bond.
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use molfp::{Atom, AtomId, Bond, BondOrder, MolGraph, Ring};

const ORGANIC: [&str; 10] = ["Cl", "Br", "B", "C", "N", "O", "P", "S", "F", "I"];
const AROMATIC: [char; 6] = ['b', 'c', 'n', 'o', 'p', 's'];

/// Parse `smiles` into an annotated graph. Panics on malformed input.
pub fn parse_smiles(smiles: &str) -> MolGraph {
    let mut g = MolGraph::new();
    let chars: Vec<char> = smiles.chars().collect();
    let mut i = 0;
    let mut prev: Option<AtomId> = None;
    let mut branches: Vec<Option<AtomId>> = Vec::new();
    let mut pending: Option<BondOrder> = None;
    let mut open: BTreeMap<u32, (AtomId, Option<BondOrder>)> = BTreeMap::new();

    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' => {
                branches.push(prev);
                i += 1;
            }
            ')' => {
                prev = branches.pop().expect("unbalanced ')'");
                i += 1;
            }
            '-' | '/' | '\\' => {
                pending = Some(BondOrder::Single);
                i += 1;
            }
            '=' => {
                pending = Some(BondOrder::Double);
                i += 1;
            }
            '#' => {
                pending = Some(BondOrder::Triple);
                i += 1;
            }
            ':' => {
                pending = Some(BondOrder::Aromatic);
                i += 1;
            }
            '.' => {
                prev = None;
                i += 1;
            }
            '0'..='9' | '%' => {
                let number = if c == '%' {
                    let digits: String = chars[i + 1..i + 3].iter().collect();
                    i += 3;
                    digits.parse().expect("ring number")
                } else {
                    i += 1;
                    c.to_digit(10).expect("digit")
                };
                let here = prev.expect("ring closure without an atom");
                match open.remove(&number) {
                    Some((other, order)) => {
                        let order = pending.take().or(order);
                        connect(&mut g, other, here, order);
                    }
                    None => {
                        open.insert(number, (here, pending.take()));
                    }
                }
            }
            '[' => {
                let end = i + chars[i..].iter().position(|&ch| ch == ']').expect("missing ']'");
                let atom = parse_bracket(&chars[i + 1..end]);
                let id = g.add_atom(atom);
                if let Some(p) = prev {
                    connect(&mut g, p, id, pending.take());
                }
                prev = Some(id);
                i = end + 1;
            }
            _ => {
                let (atom, len) = parse_organic(&chars[i..]);
                let id = g.add_atom(atom);
                if let Some(p) = prev {
                    connect(&mut g, p, id, pending.take());
                }
                prev = Some(id);
                i += len;
            }
        }
    }
    assert!(open.is_empty(), "unclosed ring bonds in {smiles}");

    let rings = perceive_rings(&g);
    g.set_rings(rings).expect("ring annotation");
    g
}

fn parse_organic(chars: &[char]) -> (Atom, usize) {
    if AROMATIC.contains(&chars[0]) {
        let symbol = chars[0].to_ascii_uppercase().to_string();
        return (Atom::new(symbol).with_aromatic(true), 1);
    }
    if chars[0] == '*' {
        return (Atom::pseudo("*"), 1);
    }
    for symbol in ORGANIC {
        let n = symbol.len();
        if chars.len() >= n && chars[..n].iter().copied().eq(symbol.chars()) {
            return (Atom::new(symbol), n);
        }
    }
    panic!("unsupported atom at {:?}", chars.iter().collect::<String>());
}

fn parse_bracket(body: &[char]) -> Atom {
    let mut i = 0;
    while i < body.len() && body[i].is_ascii_digit() {
        i += 1;
    }
    let (symbol, aromatic) = if body[i] == '*' {
        i += 1;
        ("*".to_string(), false)
    } else if body[i].is_ascii_lowercase() {
        let mut s = body[i].to_ascii_uppercase().to_string();
        i += 1;
        // two-letter aromatic symbols: se, as
        if i < body.len() && matches!((s.as_str(), body[i]), ("S", 'e') | ("A", 's')) {
            s.push(body[i]);
            i += 1;
        }
        (s, true)
    } else {
        let mut s = body[i].to_string();
        i += 1;
        if i < body.len() && body[i].is_ascii_lowercase() {
            s.push(body[i]);
            i += 1;
        }
        (s, false)
    };

    let mut charge: i8 = 0;
    while i < body.len() {
        match body[i] {
            '@' | 'H' | ':' => i += 1,
            d if d.is_ascii_digit() => i += 1,
            sign @ ('+' | '-') => {
                let unit: i8 = if sign == '+' { 1 } else { -1 };
                i += 1;
                if i < body.len() && body[i].is_ascii_digit() {
                    let magnitude = body[i].to_digit(10).expect("digit") as i8;
                    charge += unit * magnitude;
                    i += 1;
                } else {
                    charge += unit;
                }
            }
            other => panic!("unsupported bracket content {other:?}"),
        }
    }

    let atom = if symbol == "*" {
        Atom::pseudo("*")
    } else {
        Atom::new(symbol).with_aromatic(aromatic)
    };
    if charge != 0 { atom.with_charge(charge) } else { atom }
}

fn connect(g: &mut MolGraph, a: AtomId, b: AtomId, order: Option<BondOrder>) {
    let both_aromatic = g.atom(a).expect("atom").aromatic && g.atom(b).expect("atom").aromatic;
    let order = order.unwrap_or(if both_aromatic {
        BondOrder::Aromatic
    } else {
        BondOrder::Single
    });
    g.add_bond(a, b, Bond::new(order)).expect("bond");
}

/// Minimal cycle basis: shortest cycles through each bond, smallest first,
/// kept while independent over GF(2).
pub fn perceive_rings(g: &MolGraph) -> Vec<Ring> {
    let needed = g.bond_count() + g.components().len() - g.atom_count();
    let mut candidates: Vec<Vec<AtomId>> = Vec::new();
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    for (bond, a, b, _) in g.bonds() {
        if let Some(path) = shortest_path_avoiding(g, a, b, bond.index()) {
            let mut key: Vec<usize> = path.iter().map(|x| x.index()).collect();
            key.sort_unstable();
            if seen.insert(key) {
                candidates.push(path);
            }
        }
    }
    candidates.sort_by_key(Vec::len);

    let mut basis: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    let mut rings = Vec::new();
    for atoms in candidates {
        if rings.len() == needed {
            break;
        }
        let ring = Ring::from_atoms(g, atoms).expect("cycle");
        let mut edges: BTreeSet<usize> = ring.bonds().iter().map(|b| b.index()).collect();
        while let Some(row) = edges.last().and_then(|pivot| basis.get(pivot)) {
            edges = edges.symmetric_difference(row).copied().collect();
        }
        if let Some(pivot) = edges.last().copied() {
            basis.insert(pivot, edges);
            rings.push(ring);
        }
    }
    rings
}

fn shortest_path_avoiding(g: &MolGraph, from: AtomId, to: AtomId, skip: usize) -> Option<Vec<AtomId>> {
    let mut parent: BTreeMap<usize, AtomId> = BTreeMap::new();
    let mut queue = VecDeque::from([from]);
    let mut visited = BTreeSet::from([from.index()]);
    while let Some(a) = queue.pop_front() {
        if a == to {
            let mut path = vec![to];
            let mut cur = to;
            while let Some(&p) = parent.get(&cur.index()) {
                path.push(p);
                cur = p;
            }
            path.reverse();
            return Some(path);
        }
        let mut next: Vec<(AtomId, usize)> = g
            .neighbors(a)
            .map(|(b, bond)| (b, bond.index()))
            .filter(|&(_, bond)| bond != skip)
            .collect();
        next.sort_unstable_by_key(|(b, _)| b.index());
        for (b, _) in next {
            if visited.insert(b.index()) {
                parent.insert(b.index(), a);
                queue.push_back(b);
            }
        }
    }
    None
}

/// Exact substructure test: is `query` a subgraph of `target`, matching
/// element, aromaticity and bond order?
pub fn substructure_match(query: &MolGraph, target: &MolGraph) -> bool {
    if query.atom_count() > target.atom_count() || query.bond_count() > target.bond_count() {
        return false;
    }
    let order = search_order(query);
    let mut mapping: Vec<Option<AtomId>> = vec![None; query.atom_count()];
    let mut used = vec![false; target.atom_count()];
    extend_match(query, target, &order, 0, &mut mapping, &mut used)
}

/// Query atoms in breadth-first order per component, so each atom after
/// the first of its component has an already mapped neighbor.
fn search_order(query: &MolGraph) -> Vec<AtomId> {
    let mut order = Vec::with_capacity(query.atom_count());
    let mut placed = vec![false; query.atom_count()];
    for start in query.atom_ids() {
        if placed[start.index()] {
            continue;
        }
        placed[start.index()] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(a) = queue.pop_front() {
            order.push(a);
            for (b, _) in query.neighbors(a) {
                if !placed[b.index()] {
                    placed[b.index()] = true;
                    queue.push_back(b);
                }
            }
        }
    }
    order
}

fn extend_match(
    query: &MolGraph,
    target: &MolGraph,
    order: &[AtomId],
    depth: usize,
    mapping: &mut Vec<Option<AtomId>>,
    used: &mut Vec<bool>,
) -> bool {
    let Some(&q) = order.get(depth) else {
        return true;
    };
    let q_atom = query.atom(q).expect("query atom");
    let q_degree = query.neighbors(q).count();

    for t in target.atom_ids() {
        if used[t.index()] {
            continue;
        }
        let t_atom = target.atom(t).expect("target atom");
        if t_atom.symbol != q_atom.symbol
            || t_atom.aromatic != q_atom.aromatic
            || target.neighbors(t).count() < q_degree
        {
            continue;
        }
        let bonds_agree = query.neighbors(q).all(|(qn, qb)| match mapping[qn.index()] {
            None => true,
            Some(tn) => target.bond_between(t, tn).is_some_and(|tb| {
                let q_order = query.bond(qb).expect("query bond").order;
                target.bond(tb).expect("target bond").order == q_order
            }),
        });
        if !bonds_agree {
            continue;
        }

        mapping[q.index()] = Some(t);
        used[t.index()] = true;
        if extend_match(query, target, order, depth + 1, mapping, used) {
            return true;
        }
        mapping[q.index()] = None;
        used[t.index()] = false;
    }
    false
}

/// `K_n` over carbon atoms, annotated with a ring basis.
pub fn complete_graph(n: usize) -> MolGraph {
    let mut g = MolGraph::new();
    let ids: Vec<_> = (0..n).map(|_| g.add_atom(Atom::new("C"))).collect();
    for i in 0..n {
        for j in (i + 1)..n {
            g.add_bond(ids[i], ids[j], Bond::single()).expect("bond");
        }
    }
    let rings = perceive_rings(&g);
    g.set_rings(rings).expect("ring annotation");
    g
}

/// Small named corpus mixing rings, chains, charges and halogens.
pub fn corpus() -> Vec<(String, MolGraph)> {
    [
        ("methane", "C"),
        ("ethanol", "CCO"),
        ("acetic_acid", "CC(=O)O"),
        ("acetate", "CC(=O)[O-]"),
        ("cyclohexane", "C1CCCCC1"),
        ("benzene", "c1ccccc1"),
        ("toluene", "Cc1ccccc1"),
        ("phenol", "Oc1ccccc1"),
        ("chlorobenzene", "Clc1ccccc1"),
        ("naphthalene", "c1ccc2ccccc2c1"),
        ("pyridine", "c1ccncc1"),
        ("acetonitrile", "CC#N"),
        ("glycine", "NCC(=O)O"),
        ("bromoethane", "CCBr"),
    ]
    .into_iter()
    .map(|(id, smiles)| (id.to_string(), parse_smiles(smiles)))
    .collect()
}
