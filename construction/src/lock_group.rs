use ckb_types::packed;
use std::collections::HashMap;

/// Inputs sharing one lock script, signed together by a single signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockGroup {
    pub lock_hash: packed::Byte32,
    /// Input positions, ascending.
    pub members: Vec<usize>,
}

impl LockGroup {
    /// The position holding the group witness.
    pub fn first(&self) -> usize {
        self.members[0]
    }
}

/// Groups input lock scripts by script hash.
///
/// Groups are ordered by the first position of their lock and list every position sharing it.
pub fn group_by_lock<'a, I>(locks: I) -> Vec<LockGroup>
where
    I: IntoIterator<Item = &'a packed::Script>,
{
    let mut groups: Vec<LockGroup> = Vec::new();
    let mut positions: HashMap<packed::Byte32, usize> = HashMap::new();
    for (index, lock) in locks.into_iter().enumerate() {
        let lock_hash = lock.calc_script_hash();
        match positions.get(&lock_hash) {
            Some(&group) => groups[group].members.push(index),
            None => {
                positions.insert(lock_hash.clone(), groups.len());
                groups.push(LockGroup {
                    lock_hash,
                    members: vec![index],
                });
            }
        }
    }
    groups
}
