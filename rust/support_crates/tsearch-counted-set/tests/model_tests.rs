//! Randomized comparison of `CountedSet` against a `BTreeMap` model.

use std::collections::BTreeMap;

use tsearch_counted_set::CountedSet;

type Model = BTreeMap<i64, u64>;

fn model_entries(model: &Model) -> Vec<(i64, u64)> {
    model
        .iter()
        .filter(|&(_, &c)| c > 0)
        .map(|(&k, &c)| (k, c))
        .collect()
}

fn check(set: &CountedSet, model: &Model) {
    set.verify();
    let expected = model_entries(model);
    assert_eq!(set.iter().collect::<Vec<_>>(), expected);
    assert_eq!(set.len(), expected.len());

    let keys = set.sorted_keys().unwrap();
    assert_eq!(keys.len(), set.len());
    let counts: Vec<u64> = keys.iter().map(|&k| set.count_of(k)).collect();
    assert!(counts.iter().all(|&c| c > 0));
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

fn random_set(
    rng: &mut fastrand::Rng,
    range: std::ops::Range<i64>,
    ops: usize,
) -> (CountedSet, Model) {
    let mut set = CountedSet::new();
    let mut model = Model::new();
    for _ in 0..ops {
        let key = rng.i64(range.clone());
        if rng.u8(..10) < 8 {
            let amount = rng.u64(0..4);
            set.add_count(key, amount).unwrap();
            let entry = model.entry(key).or_default();
            *entry = entry.saturating_add(amount);
        } else {
            let live_before = set.contains(key);
            let len_before = set.len();
            set.remove(key);
            model.insert(key, 0);
            assert_eq!(set.len(), len_before - usize::from(live_before));
            assert_eq!(set.count_of(key), 0);
        }
    }
    (set, model)
}

#[test]
fn test_random_add_remove() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for round in 0..20 {
        let (set, model) = random_set(&mut rng, -200..200, 500 + round * 50);
        check(&set, &model);
        for key in -210..210 {
            let expected = model.get(&key).copied().unwrap_or(0);
            assert_eq!(set.count_of(key), expected, "key {key}");
            assert_eq!(set.contains(key), expected > 0, "key {key}");
        }
    }
}

#[test]
fn test_random_union() {
    let mut rng = fastrand::Rng::with_seed(17);
    for _ in 0..20 {
        let (mut a, mut model_a) = random_set(&mut rng, 0..100, 200);
        let (b, model_b) = random_set(&mut rng, 50..150, 200);
        a.union(&b).unwrap();
        for (key, count) in model_entries(&model_b) {
            let entry = model_a.entry(key).or_default();
            *entry = entry.saturating_add(count);
        }
        check(&a, &model_a);
        check(&b, &model_b);
    }
}

#[test]
fn test_random_intersect() {
    let mut rng = fastrand::Rng::with_seed(23);
    for _ in 0..20 {
        let (mut a, model_a) = random_set(&mut rng, 0..100, 200);
        let (b, model_b) = random_set(&mut rng, 50..150, 200);
        a.intersect(&b).unwrap();

        let mut expected = Model::new();
        for (key, count) in model_entries(&model_a) {
            let other = model_b.get(&key).copied().unwrap_or(0);
            if other > 0 {
                expected.insert(key, count.saturating_add(other));
            }
        }
        check(&a, &expected);
    }
}

#[test]
fn test_random_minus() {
    let mut rng = fastrand::Rng::with_seed(31);
    for _ in 0..20 {
        let (mut a, mut model_a) = random_set(&mut rng, 0..100, 200);
        let (b, model_b) = random_set(&mut rng, 50..150, 200);
        a.minus(&b);
        for (key, count) in model_entries(&model_b) {
            if let Some(entry) = model_a.get_mut(&key) {
                *entry = entry.saturating_sub(count);
            }
        }
        check(&a, &model_a);
    }
}

#[test]
fn test_random_copies_diverge() {
    let mut rng = fastrand::Rng::with_seed(47);
    let (mut original, model) = random_set(&mut rng, -50..50, 300);
    let copy = original.try_clone().unwrap();

    original.remove_all();
    original.add_count(1000, 3).unwrap();

    check(&copy, &model);
    assert_eq!(original.iter().collect::<Vec<_>>(), vec![(1000, 3)]);
}

#[test]
fn test_slots_never_reused() {
    let mut rng = fastrand::Rng::with_seed(61);
    let mut set = CountedSet::new();
    let mut distinct = std::collections::BTreeSet::new();
    for _ in 0..2000 {
        let key = rng.i64(0..300);
        if rng.bool() {
            set.add(key).unwrap();
            distinct.insert(key);
        } else {
            set.remove(key);
        }
        assert_eq!(set.node_count(), distinct.len());
        assert!(set.len() <= set.node_count());
    }
    set.verify();
}
