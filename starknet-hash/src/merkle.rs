//! Fixed-size Merkle trees, as used by SNIP-12 `merkletree` fields.
//!
//! Pairs are hashed in numeric order, `hash(min(x, y), max(x, y))`, so a
//! proof only records siblings and never their side. An odd node at the end
//! of a layer is paired with zero.

use crate::MerkleError;
use stark_curve::{FieldElement, pedersen_hash, poseidon_hash};

/// Hash function combining two nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MerkleHasher {
    /// Pedersen, for revision 0 typed data.
    #[default]
    Pedersen,
    /// Poseidon, for revision 1 typed data.
    Poseidon,
}

/// Hash two nodes in numeric order.
pub fn pair_hash(
    hasher: MerkleHasher,
    x: &FieldElement,
    y: &FieldElement,
) -> Result<FieldElement, MerkleError> {
    let (low, high) = if x <= y { (x, y) } else { (y, x) };

    match hasher {
        MerkleHasher::Pedersen => Ok(pedersen_hash(low, high)?),
        MerkleHasher::Poseidon => Ok(poseidon_hash(low, high)),
    }
}

/// Merkle tree over a fixed, ordered list of leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    hasher: MerkleHasher,
    leaves: Vec<FieldElement>,
    /// Every layer below the root, starting with the leaves.
    branches: Vec<Vec<FieldElement>>,
    root: FieldElement,
}

impl MerkleTree {
    /// Build the tree over `leaves`.
    pub fn new(leaves: Vec<FieldElement>, hasher: MerkleHasher) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::Empty);
        }

        let mut branches = Vec::new();
        let mut layer = leaves.clone();

        while layer.len() > 1 {
            let next = layer
                .chunks(2)
                .map(|pair| pair_hash(hasher, &pair[0], pair.get(1).unwrap_or(&FieldElement::ZERO)))
                .collect::<Result<Vec<_>, _>>()?;
            branches.push(layer);
            layer = next;
        }

        tracing::trace!(leaves = leaves.len(), layers = branches.len(), "built merkle tree");

        Ok(Self {
            hasher,
            leaves,
            branches,
            root: layer[0],
        })
    }

    /// Root of the tree.
    pub fn root(&self) -> FieldElement {
        self.root
    }

    /// Leaves, in insertion order.
    pub fn leaves(&self) -> &[FieldElement] {
        &self.leaves
    }

    /// Layers below the root, from the leaves up.
    pub fn branches(&self) -> &[Vec<FieldElement>] {
        &self.branches
    }

    /// Hash function of the tree.
    pub fn hasher(&self) -> MerkleHasher {
        self.hasher
    }

    /// Siblings on the path from `leaf` to the root.
    ///
    /// For repeated leaves this proves the first occurrence.
    pub fn proof(&self, leaf: &FieldElement) -> Result<Vec<FieldElement>, MerkleError> {
        let mut index = self
            .leaves
            .iter()
            .position(|candidate| candidate == leaf)
            .ok_or_else(|| MerkleError::LeafNotFound(leaf.to_string()))?;

        let mut path = Vec::with_capacity(self.branches.len());
        for layer in &self.branches {
            let sibling = layer.get(index ^ 1).copied().unwrap_or(FieldElement::ZERO);
            path.push(sibling);
            index /= 2;
        }

        Ok(path)
    }

    /// Check that `proof` links `leaf` to `root`.
    pub fn verify_proof(
        hasher: MerkleHasher,
        root: &FieldElement,
        leaf: &FieldElement,
        proof: &[FieldElement],
    ) -> Result<bool, MerkleError> {
        let mut node = *leaf;
        for sibling in proof {
            node = pair_hash(hasher, &node, sibling)?;
        }
        Ok(node == *root)
    }
}

#[cfg(test)]
mod tests {
    use super::{MerkleHasher, MerkleTree, pair_hash};
    use crate::MerkleError;
    use proptest::prelude::*;
    use stark_curve::{FieldElement, pedersen_hash};

    fn leaves(values: &[u64]) -> Vec<FieldElement> {
        values.iter().copied().map(FieldElement::from_u64).collect()
    }

    #[test]
    fn empty_tree_is_rejected() {
        assert_eq!(
            MerkleTree::new(Vec::new(), MerkleHasher::Pedersen),
            Err(MerkleError::Empty)
        );
    }

    #[test]
    fn single_leaf_is_the_root() {
        let tree = MerkleTree::new(leaves(&[7]), MerkleHasher::Poseidon).unwrap();
        assert_eq!(tree.root(), FieldElement::from_u64(7));
        assert!(tree.branches().is_empty());
        assert!(tree.proof(&FieldElement::from_u64(7)).unwrap().is_empty());
    }

    #[test]
    fn odd_leaf_is_paired_with_zero() {
        let tree = MerkleTree::new(leaves(&[1, 2, 3]), MerkleHasher::Pedersen).unwrap();
        let left = pedersen_hash(&FieldElement::from_u64(1), &FieldElement::from_u64(2)).unwrap();
        let right = pedersen_hash(&FieldElement::ZERO, &FieldElement::from_u64(3)).unwrap();
        let root = if left <= right {
            pedersen_hash(&left, &right)
        } else {
            pedersen_hash(&right, &left)
        }
        .unwrap();

        assert_eq!(tree.root(), root);
        assert_eq!(tree.branches().len(), 2);
        assert_eq!(
            tree.proof(&FieldElement::from_u64(3)).unwrap(),
            vec![FieldElement::ZERO, left]
        );
    }

    #[test]
    fn unknown_leaf_has_no_proof() {
        let tree = MerkleTree::new(leaves(&[1, 2]), MerkleHasher::Pedersen).unwrap();
        assert!(matches!(
            tree.proof(&FieldElement::from_u64(5)),
            Err(MerkleError::LeafNotFound(_))
        ));
    }

    #[test]
    fn tampered_proof_fails() {
        let tree = MerkleTree::new(leaves(&[1, 2, 3, 4, 5]), MerkleHasher::Poseidon).unwrap();
        let leaf = FieldElement::from_u64(4);
        let mut proof = tree.proof(&leaf).unwrap();
        proof[1] += FieldElement::ONE;
        assert!(!MerkleTree::verify_proof(tree.hasher(), &tree.root(), &leaf, &proof).unwrap());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn every_leaf_has_a_valid_proof(values in prop::collection::vec(any::<u64>(), 1..12)) {
            let tree = MerkleTree::new(leaves(&values), MerkleHasher::Poseidon).unwrap();
            for leaf in tree.leaves() {
                let proof = tree.proof(leaf).unwrap();
                prop_assert!(
                    MerkleTree::verify_proof(tree.hasher(), &tree.root(), leaf, &proof).unwrap()
                );
            }
        }

        #[test]
        fn pair_hash_is_commutative(x in any::<u64>(), y in any::<u64>()) {
            let (x, y) = (FieldElement::from_u64(x), FieldElement::from_u64(y));
            for hasher in [MerkleHasher::Pedersen, MerkleHasher::Poseidon] {
                prop_assert_eq!(
                    pair_hash(hasher, &x, &y).unwrap(),
                    pair_hash(hasher, &y, &x).unwrap()
                );
            }
        }
    }
}
