//! Composition of the initial validator set before L1 creation.
//!
//! The 20% weight-share threshold that hard-blocks live weight changes is
//! only a warning here: the set does not exist yet, so an operator may
//! knowingly bootstrap with a concentrated distribution. The two policies
//! are intentionally separate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use chain_models::ids::NodeId;

use crate::utils::errors::{LifecycleError, Result};

/// One validator in the bootstrap set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialValidatorEntry {
    pub node_id: NodeId,
    pub bls_public_key: Vec<u8>,
    pub weight: u64,
}

/// Non-blocking advisory attached to a composed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightWarning {
    pub node_id: NodeId,
    pub weight: u64,
    pub total_weight: u64,
}

/// A validated bootstrap validator set with its advisories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialValidatorSet {
    pub entries: Vec<InitialValidatorEntry>,
    pub total_weight: u64,
    pub warnings: Vec<WeightWarning>,
}

/// Validate a bootstrap set and collect concentration warnings.
///
/// Errors only on malformed input; weight concentration never blocks.
pub fn compose_initial_validator_set(
    entries: Vec<InitialValidatorEntry>,
) -> Result<InitialValidatorSet> {
    if entries.is_empty() {
        return Err(LifecycleError::UserInput(
            "initial validator set must not be empty".to_string(),
        ));
    }

    let mut seen: BTreeSet<&NodeId> = BTreeSet::new();
    let mut total_weight: u64 = 0;
    for entry in &entries {
        if entry.node_id.is_empty() {
            return Err(LifecycleError::UserInput("node ID must not be empty".to_string()));
        }
        if entry.bls_public_key.is_empty() {
            return Err(LifecycleError::UserInput(format!(
                "validator {} is missing a BLS public key",
                entry.node_id
            )));
        }
        if entry.weight == 0 {
            return Err(LifecycleError::UserInput(format!(
                "validator {} has zero weight",
                entry.node_id
            )));
        }
        if !seen.insert(&entry.node_id) {
            return Err(LifecycleError::UserInput(format!(
                "duplicate node ID {}",
                entry.node_id
            )));
        }
        total_weight = total_weight.checked_add(entry.weight).ok_or_else(|| {
            LifecycleError::UserInput("total validator weight overflows".to_string())
        })?;
    }

    let warnings: Vec<WeightWarning> = entries
        .iter()
        .filter(|entry| u128::from(entry.weight) * 5 >= u128::from(total_weight))
        .map(|entry| {
            warn!(node = %entry.node_id, weight = entry.weight, total = total_weight,
                "validator holds at least 20% of initial weight");
            WeightWarning {
                node_id: entry.node_id.clone(),
                weight: entry.weight,
                total_weight,
            }
        })
        .collect();

    Ok(InitialValidatorSet {
        entries,
        total_weight,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, weight: u64) -> InitialValidatorEntry {
        InitialValidatorEntry {
            node_id: NodeId(id.to_string()),
            bls_public_key: vec![0xaa; 48],
            weight,
        }
    }

    #[test]
    fn concentration_warns_but_does_not_block() {
        let set = compose_initial_validator_set(vec![
            entry("NodeID-1", 80),
            entry("NodeID-2", 10),
            entry("NodeID-3", 10),
        ])
        .unwrap();
        assert_eq!(set.total_weight, 100);
        assert_eq!(set.warnings.len(), 1);
        assert_eq!(set.warnings[0].node_id, NodeId("NodeID-1".to_string()));
        assert_eq!(set.entries.len(), 3);
    }

    #[test]
    fn balanced_set_has_no_warnings() {
        let set = compose_initial_validator_set(vec![
            entry("NodeID-1", 10),
            entry("NodeID-2", 10),
            entry("NodeID-3", 10),
            entry("NodeID-4", 10),
            entry("NodeID-5", 10),
            entry("NodeID-6", 10),
        ])
        .unwrap();
        assert!(set.warnings.is_empty());
    }

    #[test]
    fn exactly_twenty_percent_warns() {
        let set =
            compose_initial_validator_set(vec![entry("NodeID-1", 20), entry("NodeID-2", 80)])
                .unwrap();
        // Both entries trip the threshold: 20/100 and 80/100.
        assert_eq!(set.warnings.len(), 2);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(
            compose_initial_validator_set(vec![]),
            Err(LifecycleError::UserInput(_))
        ));
        assert!(matches!(
            compose_initial_validator_set(vec![entry("NodeID-1", 0)]),
            Err(LifecycleError::UserInput(_))
        ));
        assert!(matches!(
            compose_initial_validator_set(vec![entry("NodeID-1", 5), entry("NodeID-1", 5)]),
            Err(LifecycleError::UserInput(_))
        ));
        let mut missing_key = entry("NodeID-1", 5);
        missing_key.bls_public_key.clear();
        assert!(matches!(
            compose_initial_validator_set(vec![missing_key]),
            Err(LifecycleError::UserInput(_))
        ));
    }
}
