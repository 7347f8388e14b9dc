use std::collections::HashMap;
use std::hash::Hash;

/// Group items by key, keeping groups in the order their keys first appear
/// and items in their original order within each group.
pub fn group_by_first_seen<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        match positions.get(&k) {
            Some(&idx) => groups[idx].1.push(item),
            None => {
                positions.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Count items per key, in first-seen key order.
pub fn count_by_first_seen<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for item in items {
        let k = key(&item);
        match positions.get(&k) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(k.clone(), counts.len());
                counts.push((k, 1));
            }
        }
    }

    counts
}
