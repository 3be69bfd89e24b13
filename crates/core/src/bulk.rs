//! Bulk actions over a selection
//!
//! Applies one destructive or mutating action per selected key,
//! sequentially, in the listing's original order. The policy is fail-fast
//! and non-transactional: the first per-key failure is returned and no
//! further keys are attempted, while keys already processed keep their new
//! state. Callers that need the surviving state must re-list the bucket.

use tracing::debug;

use crate::acl::AclPolicy;
use crate::error::Result;
use crate::select::BulkSelection;
use crate::store::ObjectStore;

/// Action applied to every selected key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    /// Delete the object
    Delete,
    /// Apply a canned ACL policy to the object
    ChangeAcl(AclPolicy),
}

/// Apply `action` to each key of `selection`, stopping at the first failure.
pub async fn apply(
    store: &dyn ObjectStore,
    action: BulkAction,
    selection: &BulkSelection,
) -> Result<()> {
    for key in selection.keys() {
        match action {
            BulkAction::Delete => {
                debug!(%key, "deleting");
                store.delete_object(key).await?;
            }
            BulkAction::ChangeAcl(policy) => {
                debug!(%key, %policy, "changing acl");
                store.change_acl(key, policy).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::{MockObjectStore, ObjectSummary};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn selection(keys: &[&str]) -> BulkSelection {
        let listing: Vec<ObjectSummary> = keys.iter().map(|k| ObjectSummary::key(*k)).collect();
        BulkSelection::select("", &listing)
    }

    #[tokio::test]
    async fn test_delete_processes_keys_in_order() {
        let mut store = MockObjectStore::new();
        let mut seq = Sequence::new();
        for key in ["batch/1", "batch/2", "batch/3"] {
            store
                .expect_delete_object()
                .with(eq(key))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let result = apply(
            &store,
            BulkAction::Delete,
            &selection(&["batch/1", "batch/2", "batch/3"]),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_first_failure_halts_remaining_keys() {
        // Five keys, the third fails: the first two end up mutated, the
        // last two are never attempted, and the failure is reported.
        let mut store = MockObjectStore::new();
        let mut seq = Sequence::new();
        for key in ["k/1", "k/2"] {
            store
                .expect_change_acl()
                .withf(move |k, p| k == key && *p == AclPolicy::PublicRead)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }
        store
            .expect_change_acl()
            .withf(|k, _| k == "k/3")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::Store("AccessDenied".into())));
        // No expectations for k/4 and k/5: reaching them would panic.

        let result = apply(
            &store,
            BulkAction::ChangeAcl(AclPolicy::PublicRead),
            &selection(&["k/1", "k/2", "k/3", "k/4", "k/5"]),
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert_eq!(err.to_string(), "AccessDenied");
    }

    #[tokio::test]
    async fn test_vanished_key_surfaces_as_per_key_error() {
        let mut store = MockObjectStore::new();
        store
            .expect_delete_object()
            .with(eq("gone"))
            .times(1)
            .returning(|_| Err(Error::NotFound("gone".into())));

        let result = apply(&store, BulkAction::Delete, &selection(&["gone"])).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_selection_is_a_no_op() {
        let store = MockObjectStore::new();
        let result = apply(&store, BulkAction::Delete, &selection(&[])).await;
        assert!(result.is_ok());
    }
}
