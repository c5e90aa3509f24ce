//! A fixed-size telephone book hash table using linear probing with chaining.
//!
//! Colliding records are placed in the next free slot and linked into a chain
//! starting at their home slot, so a lookup follows chain links instead of
//! probing every slot. Two insertion policies are offered:
//!
//! - *without replacement*: records never move once placed.
//! - *with replacement*: a record sitting in somebody else's home slot is
//!   evicted to make room, which keeps chains short.
//!
//! The hash is the sum of the character codes of the name modulo the capacity.
//! It ignores character positions, so anagrams like `"abc"` and `"cba"` always
//! collide.

use log::{debug, warn};

use crate::error::{HashTableError, Result};

/// Table size used by [`HashTable::default`].
pub const DEFAULT_CAPACITY: usize = 10;

/// A telephone book entry stored in a [`HashTable`] slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    telephone: u64,
    /// Index of the next slot in this record's collision chain.
    chain: Option<usize>,
}

impl Record {
    fn new(name: String, telephone: u64) -> Self {
        Self {
            name,
            telephone,
            chain: None,
        }
    }

    /// Returns the client name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the telephone number.
    pub fn telephone(&self) -> u64 {
        self.telephone
    }

    /// Returns the slot the collision chain continues at, if any.
    pub fn chain(&self) -> Option<usize> {
        self.chain
    }
}

/// How a colliding insert is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionPolicy {
    /// Existing records are never moved.
    WithoutReplacement,
    /// Records occupying a foreign home slot are evicted.
    WithReplacement,
}

/// Result of a lookup together with the number of name comparisons it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    pub record: Option<&'a Record>,
    pub comparisons: usize,
}

/// A fixed-capacity hash table mapping client names to telephone numbers.
///
/// ```
/// use avl_hash::HashTable;
/// let mut table = HashTable::new(10).unwrap();
/// table.insert_with_replacement("Shubham", 10002).unwrap();
/// table.insert_with_replacement("Advait", 10005).unwrap();
/// assert_eq!(table.search("Shubham").map(|r| r.telephone()), Some(10002));
/// assert!(table.search("Kaustubh").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct HashTable {
    slots: Box<[Option<Record>]>,
    /// Number of occupied slots
    occupied: usize,
}

impl HashTable {
    /// Creates an empty table with `capacity` slots.
    /// The capacity is fixed for the lifetime of the table.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(HashTableError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![None; capacity].into_boxed_slice(),
            occupied: 0,
        })
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Returns true if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Maps a name to its home slot.
    pub fn hash(&self, name: &str) -> usize {
        let sum = name
            .chars()
            .fold(0usize, |acc, c| acc.wrapping_add(c as usize));
        sum % self.slots.len()
    }

    /// Inserts a record using the given collision policy.
    /// Returns the slot the new record was placed in.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        telephone: u64,
        policy: CollisionPolicy,
    ) -> Result<usize> {
        match policy {
            CollisionPolicy::WithoutReplacement => {
                self.insert_without_replacement(name, telephone)
            }
            CollisionPolicy::WithReplacement => self.insert_with_replacement(name, telephone),
        }
    }

    /// Inserts a record, resolving a collision by placing the new record in the
    /// next free slot and appending it to the chain of its home slot.
    /// Returns the slot the new record was placed in.
    pub fn insert_without_replacement(
        &mut self,
        name: impl Into<String>,
        telephone: u64,
    ) -> Result<usize> {
        let record = Record::new(name.into(), telephone);
        let home = self.hash(&record.name);
        if self.slots[home].is_none() {
            self.place(home, record);
            return Ok(home);
        }
        let free = self.next_free(home)?;
        Ok(self.chain_into(home, free, record))
    }

    /// Inserts a record, evicting the occupant of its home slot if that occupant
    /// does not hash there itself.
    /// Returns the slot the new record was placed in.
    pub fn insert_with_replacement(
        &mut self,
        name: impl Into<String>,
        telephone: u64,
    ) -> Result<usize> {
        let record = Record::new(name.into(), telephone);
        let home = self.hash(&record.name);
        if self.slots[home].is_none() {
            self.place(home, record);
            return Ok(home);
        }

        let free = self.next_free(home)?;
        let evicted = match self.slots[home].take() {
            Some(occupant) if self.hash(&occupant.name) != home => occupant,
            occupant => {
                // Rightful owner stays, new record joins its chain
                self.slots[home] = occupant;
                return Ok(self.chain_into(home, free, record));
            }
        };
        let occupant_home = self.hash(&evicted.name);
        // Home stays occupied, only placing the evicted record grows the count
        self.slots[home] = Some(record);
        debug!(
            "Collision at slot {}, evicting '{}' to slot {}",
            home, evicted.name, free
        );

        // Keep the evicted record reachable from its own home slot
        match self.predecessor(occupant_home, home) {
            Some(prev) => self.link(prev, free),
            None => warn!(
                "Evicted '{}' was not chained from its home slot {}",
                evicted.name, occupant_home
            ),
        }
        self.place(free, evicted);
        Ok(home)
    }

    /// Returns the record stored under `name`.
    ///
    /// Checks the home slot first and then follows the chain links from there.
    pub fn search(&self, name: &str) -> Option<&Record> {
        self.lookup(name).record
    }

    /// Looks up `name` and counts the name comparisons it takes.
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        let mut comparisons = 0;
        let mut current = Some(self.hash(name));
        // A chain visits every slot at most once
        for _ in 0..self.slots.len() {
            let record = match current.and_then(|index| self.slots[index].as_ref()) {
                None => break,
                Some(record) => record,
            };
            comparisons += 1;
            if record.name == name {
                return Lookup {
                    record: Some(record),
                    comparisons,
                };
            }
            current = record.chain;
        }
        Lookup {
            record: None,
            comparisons,
        }
    }

    /// Sums the lookup costs of `names`.
    /// Used to compare both collision policies on the same input.
    pub fn total_comparisons<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.lookup(name.as_ref()).comparisons)
            .sum()
    }

    /// Returns every slot with its index, empty slots included.
    pub fn display(&self) -> Vec<(usize, Option<&Record>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (index, slot.as_ref()))
            .collect()
    }

    /// Returns an iterator over the stored records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.slots.iter().flatten()
    }

    fn place(&mut self, index: usize, record: Record) {
        debug_assert!(self.slots[index].is_none());
        self.slots[index] = Some(record);
        self.occupied += 1;
    }

    /// Places `record` in the free slot `free` and appends it to the chain starting at `home`.
    fn chain_into(&mut self, home: usize, free: usize, record: Record) -> usize {
        debug!(
            "Collision at slot {}, placing '{}' in slot {}",
            home, record.name, free
        );
        let tail = self.chain_tail(home);
        self.link(tail, free);
        self.place(free, record);
        free
    }

    fn link(&mut self, from: usize, to: usize) {
        if let Some(record) = self.slots[from].as_mut() {
            record.chain = Some(to);
        }
    }

    /// Linear probing for the next empty slot after `start`, wrapping around.
    fn next_free(&self, start: usize) -> Result<usize> {
        let capacity = self.capacity();
        if self.is_full() {
            return Err(HashTableError::TableFull { capacity });
        }
        (1..capacity)
            .map(|offset| (start + offset) % capacity)
            .find(|&index| self.slots[index].is_none())
            .ok_or(HashTableError::TableFull { capacity })
    }

    /// Returns the last slot of the chain starting at `start`.
    fn chain_tail(&self, start: usize) -> usize {
        let mut tail = start;
        for _ in 0..self.slots.len() {
            match self.slots[tail].as_ref().and_then(|record| record.chain) {
                Some(next) => tail = next,
                None => break,
            }
        }
        tail
    }

    /// Returns the slot whose chain link points at `target`, walking from `start`.
    fn predecessor(&self, start: usize, target: usize) -> Option<usize> {
        let mut current = start;
        for _ in 0..self.slots.len() {
            let next = self.slots[current].as_ref()?.chain?;
            if next == target {
                return Some(current);
            }
            current = next;
        }
        None
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self {
            slots: vec![None; DEFAULT_CAPACITY].into_boxed_slice(),
            occupied: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telephone(table: &HashTable, name: &str) -> Option<u64> {
        table.search(name).map(Record::telephone)
    }

    #[test]
    fn test_zero_capacity() {
        assert_eq!(HashTable::new(0).unwrap_err(), HashTableError::ZeroCapacity);
    }

    #[test]
    fn test_default() {
        let table = HashTable::default();
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);
        assert!(table.is_empty());
        assert!(!table.is_full());
    }

    #[test]
    fn test_hash() {
        let table = HashTable::new(10).unwrap();
        assert_eq!(table.hash("Shubham"), 712 % 10);
        assert_eq!(table.hash("Advait"), 601 % 10);
        assert_eq!(table.hash("Kaustubh"), 839 % 10);
        assert_eq!(table.hash(""), 0);
        // Character positions are ignored
        assert_eq!(table.hash("abc"), table.hash("cba"));
    }

    #[test]
    fn test_insert_at_home_slot() {
        for policy in [CollisionPolicy::WithoutReplacement, CollisionPolicy::WithReplacement] {
            let mut table = HashTable::new(10).unwrap();
            for (name, phone) in [("Shubham", 10002), ("Advait", 10005), ("Kaustubh", 10006)] {
                let index = table.insert(name, phone, policy).unwrap();
                assert_eq!(index, table.hash(name));
            }
            assert_eq!(table.len(), 3);
            assert_eq!(telephone(&table, "Shubham"), Some(10002));
            assert_eq!(telephone(&table, "Advait"), Some(10005));
            assert_eq!(telephone(&table, "Kaustubh"), Some(10006));
            assert_eq!(table.lookup("Shubham").comparisons, 1);
        }
    }

    #[test]
    fn test_search_missing() {
        let mut table = HashTable::new(10).unwrap();
        assert!(table.search("A").is_none());
        assert_eq!(table.lookup("A").comparisons, 0);

        table.insert_without_replacement("A", 1).unwrap();
        // "K" shares the home slot of "A" but is not stored
        let lookup = table.lookup("K");
        assert!(lookup.record.is_none());
        assert_eq!(lookup.comparisons, 1);
    }

    #[test]
    fn test_insert_without_replacement() {
        // "A" and "K" hash to 5, "B" hashes to 6
        let mut table = HashTable::new(10).unwrap();
        assert_eq!(table.insert_without_replacement("A", 1).unwrap(), 5);
        assert_eq!(table.insert_without_replacement("K", 2).unwrap(), 6);
        assert_eq!(table.insert_without_replacement("B", 3).unwrap(), 7);

        let slots = table.display();
        assert_eq!(slots[5].1.map(Record::chain), Some(Some(6)));
        assert_eq!(slots[6].1.map(Record::name), Some("K"));
        assert_eq!(slots[6].1.map(Record::chain), Some(Some(7)));
        assert_eq!(slots[7].1.map(Record::name), Some("B"));

        assert_eq!(telephone(&table, "A"), Some(1));
        assert_eq!(telephone(&table, "K"), Some(2));
        assert_eq!(telephone(&table, "B"), Some(3));
        assert_eq!(table.lookup("B").comparisons, 2);

        // Names are compared along the whole chain, not only at its end
        assert_eq!(table.search("K").map(Record::name), Some("K"));
        let lookup = table.lookup("U");
        assert!(lookup.record.is_none());
        assert_eq!(lookup.comparisons, 3);
    }

    #[test]
    fn test_evict_keeps_chain_successor() {
        // "A", "K" and "U" hash to 5, "B" hashes to 6
        let mut table = HashTable::new(10).unwrap();
        table.insert_with_replacement("A", 1).unwrap();
        table.insert_with_replacement("K", 2).unwrap();
        table.insert_with_replacement("U", 3).unwrap();
        assert_eq!(table.display()[6].1.map(Record::chain), Some(Some(7)));

        // "K" sits mid chain 5 -> 6 -> 7 and moves to slot 8
        assert_eq!(table.insert_with_replacement("B", 4).unwrap(), 6);
        assert_eq!(table.len(), 4);

        let slots = table.display();
        assert_eq!(slots[5].1.map(Record::chain), Some(Some(8)));
        assert_eq!(slots[6].1.map(Record::name), Some("B"));
        assert_eq!(slots[6].1.map(Record::chain), Some(None));
        assert_eq!(slots[8].1.map(Record::name), Some("K"));
        assert_eq!(slots[8].1.map(Record::chain), Some(Some(7)));
        assert_eq!(slots[7].1.map(Record::name), Some("U"));

        assert_eq!(telephone(&table, "U"), Some(3));
        assert_eq!(table.lookup("U").comparisons, 3);
        assert_eq!(table.lookup("K").comparisons, 2);
        assert_eq!(table.lookup("B").comparisons, 1);
    }

    #[test]
    fn test_evict_into_full_table() {
        // "A" hashes to slot 2 and would evict the last "B", but no slot is left for it
        let mut table = HashTable::new(3).unwrap();
        table.insert_with_replacement("B", 1).unwrap();
        table.insert_with_replacement("B", 2).unwrap();
        table.insert_with_replacement("B", 3).unwrap();
        let before: Vec<_> = table.iter().cloned().collect();
        assert_eq!(
            table.insert_with_replacement("A", 4),
            Err(HashTableError::TableFull { capacity: 3 })
        );
        let after: Vec<_> = table.iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_insert_with_replacement_evicts() {
        let mut table = HashTable::new(10).unwrap();
        assert_eq!(table.insert_with_replacement("A", 1).unwrap(), 5);
        assert_eq!(table.insert_with_replacement("K", 2).unwrap(), 6);
        // "K" does not belong to slot 6 and moves on to slot 7
        assert_eq!(table.insert_with_replacement("B", 3).unwrap(), 6);
        assert_eq!(table.len(), 3);

        let slots = table.display();
        assert_eq!(slots[5].1.map(Record::chain), Some(Some(7)));
        assert_eq!(slots[6].1.map(Record::name), Some("B"));
        assert_eq!(slots[6].1.map(Record::chain), Some(None));
        assert_eq!(slots[7].1.map(Record::name), Some("K"));

        assert_eq!(telephone(&table, "A"), Some(1));
        assert_eq!(telephone(&table, "K"), Some(2));
        assert_eq!(telephone(&table, "B"), Some(3));
        assert_eq!(table.lookup("B").comparisons, 1);
        assert_eq!(table.lookup("K").comparisons, 2);
    }

    #[test]
    fn test_rightful_owner_stays() {
        let mut table = HashTable::new(10).unwrap();
        table.insert_with_replacement("A", 1).unwrap();
        assert_eq!(table.insert_with_replacement("K", 2).unwrap(), 6);
        assert_eq!(table.search("A").map(Record::name), Some("A"));
        assert_eq!(table.display()[5].1.map(Record::chain), Some(Some(6)));
    }

    #[test]
    fn test_chain_grows_at_tail() {
        let mut table = HashTable::new(10).unwrap();
        table.insert_with_replacement("Shubham", 10002).unwrap();
        table.insert_with_replacement("Shubham", 10003).unwrap();
        table.insert_with_replacement("Shubham", 10004).unwrap();

        let slots = table.display();
        assert_eq!(slots[2].1.map(Record::chain), Some(Some(3)));
        assert_eq!(slots[3].1.map(Record::chain), Some(Some(4)));
        assert_eq!(slots[4].1.map(Record::chain), Some(None));
        // Duplicate names resolve to the first record of the chain
        assert_eq!(telephone(&table, "Shubham"), Some(10002));
    }

    #[test]
    fn test_linear_search_wraps_around() {
        // "Kaustubh" hashes to the last slot
        let mut table = HashTable::new(10).unwrap();
        table.insert_without_replacement("Kaustubh", 1).unwrap();
        assert_eq!(table.insert_without_replacement("Kaustubh", 2).unwrap(), 0);
        assert_eq!(table.display()[9].1.map(Record::chain), Some(Some(0)));
    }

    #[test]
    fn test_table_full() {
        for policy in [CollisionPolicy::WithoutReplacement, CollisionPolicy::WithReplacement] {
            let mut table = HashTable::new(3).unwrap();
            for phone in 1..=3 {
                table.insert("A", phone, policy).unwrap();
            }
            assert!(table.is_full());
            assert_eq!(
                table.insert("B", 4, policy),
                Err(HashTableError::TableFull { capacity: 3 })
            );
            assert_eq!(table.len(), 3);
            assert!(table.search("B").is_none());
        }
    }

    #[test]
    fn test_display() {
        let mut table = HashTable::new(4).unwrap();
        table.insert_without_replacement("A", 1).unwrap();
        let slots = table.display();
        assert_eq!(slots.len(), 4);
        assert_eq!(slots.iter().filter(|(_, slot)| slot.is_some()).count(), 1);
        assert_eq!(slots[1].1.map(Record::telephone), Some(1));
        assert_eq!(table.iter().count(), 1);
    }
}
