//! Client-side join for entities the store cannot join natively.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::Hash;

use super::StoreResult;

/// Pair each child with its parent, fetching the parents in one batch.
///
/// Parent keys are collected from the children, de-duplicated and handed to
/// `fetch` once. Children whose parent is missing (or whose key is `None`) get
/// `None`. A failed parent fetch is logged and degrades to `None` for every
/// child; it never fails the children.
pub async fn batch_resolve<C, P, K, KC, KP, F, Fut>(
    children: Vec<C>,
    child_key: KC,
    parent_key: KP,
    fetch: F,
) -> Vec<(C, Option<P>)>
where
    K: Eq + Hash + Clone,
    P: Clone,
    KC: Fn(&C) -> Option<K>,
    KP: Fn(&P) -> K,
    F: FnOnce(Vec<K>) -> Fut,
    Fut: Future<Output = StoreResult<Vec<P>>>,
{
    let mut seen = HashSet::new();
    let keys: Vec<K> = children
        .iter()
        .filter_map(&child_key)
        .filter(|k| seen.insert(k.clone()))
        .collect();

    if keys.is_empty() {
        return children.into_iter().map(|c| (c, None)).collect();
    }

    let parents: HashMap<K, P> = match fetch(keys).await {
        Ok(parents) => parents.into_iter().map(|p| (parent_key(&p), p)).collect(),
        Err(e) => {
            tracing::warn!("Batch parent fetch failed, continuing without parents: {}", e);
            HashMap::new()
        }
    };

    children
        .into_iter()
        .map(|c| {
            let parent = child_key(&c).and_then(|k| parents.get(&k).cloned());
            (c, parent)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Parent {
        id: u32,
        name: &'static str,
    }

    #[tokio::test]
    async fn fetches_distinct_keys_once_and_keeps_child_order() {
        let calls = AtomicUsize::new(0);
        let children = vec![(1, Some(10)), (2, Some(20)), (3, Some(10)), (4, None)];

        let resolved = batch_resolve(
            children,
            |c: &(u32, Option<u32>)| c.1,
            |p: &Parent| p.id,
            |keys: Vec<u32>| {
                calls.fetch_add(1, Ordering::SeqCst);
                assert_eq!(keys, vec![10, 20]);
                async move {
                    Ok::<_, StoreError>(vec![
                        Parent { id: 10, name: "ten" },
                        Parent { id: 20, name: "twenty" },
                    ])
                }
            },
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let names: Vec<Option<&str>> = resolved
            .iter()
            .map(|(_, p)| p.as_ref().map(|p| p.name))
            .collect();
        assert_eq!(names, vec![Some("ten"), Some("twenty"), Some("ten"), None]);
        assert_eq!(resolved[3].0 .0, 4);
    }

    #[tokio::test]
    async fn missing_parents_become_none() {
        let resolved = batch_resolve(
            vec![1u32, 2],
            |c: &u32| Some(*c),
            |p: &Parent| p.id,
            |_keys| async { Ok::<_, StoreError>(vec![Parent { id: 2, name: "two" }]) },
        )
        .await;

        assert_eq!(resolved[0].1, None);
        assert_eq!(resolved[1].1.as_ref().map(|p| p.name), Some("two"));
    }

    #[tokio::test]
    async fn failed_parent_fetch_degrades_to_none() {
        let resolved = batch_resolve(
            vec![1u32, 2],
            |c: &u32| Some(*c),
            |p: &Parent| p.id,
            |_keys| async { Err::<Vec<Parent>, _>(StoreError::Persistence("offline".to_string())) },
        )
        .await;

        assert_eq!(resolved.len(), 2);
        assert!(resolved.iter().all(|(_, p)| p.is_none()));
    }

    #[tokio::test]
    async fn no_keys_means_no_fetch() {
        let calls = AtomicUsize::new(0);
        let resolved = batch_resolve(
            vec![None::<u32>, None],
            |c: &Option<u32>| *c,
            |p: &Parent| p.id,
            |_keys| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, StoreError>(Vec::<Parent>::new()) }
            },
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(resolved.iter().all(|(_, p)| p.is_none()));
    }
}
