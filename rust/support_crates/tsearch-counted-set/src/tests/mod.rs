
use crate::CountedSet;

pub(crate) fn set_of(entries: &[(i64, u64)]) -> CountedSet {
    let mut set = CountedSet::new();
    for &(key, count) in entries {
        set.add_count(key, count).unwrap();
    }
    set.verify();
    set
}

pub(crate) fn entries(set: &CountedSet) -> Vec<(i64, u64)> {
    set.iter().collect()
}
