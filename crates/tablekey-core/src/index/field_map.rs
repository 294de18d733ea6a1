use crate::value::Value;

///
/// PrimaryKeySlot
///
/// Where one primary-key field lives in an index's merged field sequence.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimaryKeySlot {
    /// Back-reference to an index field at this position.
    Index(usize),
    /// Position within the primary-key fields appended after the index fields.
    Tail(usize),
}

///
/// PrimaryKeyFieldMap
///
/// Merged field layout of a secondary index plus the slot of every
/// primary-key field, computed once at construction.
///
/// Merged order: index fields as given, then primary-key fields not already
/// among them, in primary-key order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimaryKeyFieldMap {
    merged_fields: Vec<String>,
    index_len: usize,
    slots: Box<[PrimaryKeySlot]>,
}

impl PrimaryKeyFieldMap {
    #[must_use]
    pub fn build<S: AsRef<str>>(index_fields: &[S], primary_key: &[String]) -> Self {
        let mut merged_fields: Vec<String> = index_fields
            .iter()
            .map(|field| field.as_ref().to_string())
            .collect();
        let index_len = merged_fields.len();

        let mut slots = Vec::with_capacity(primary_key.len());
        let mut tail_len = 0;
        for pk in primary_key {
            if let Some(position) = merged_fields[..index_len]
                .iter()
                .position(|field| field == pk)
            {
                slots.push(PrimaryKeySlot::Index(position));
                continue;
            }

            merged_fields.push(pk.clone());
            slots.push(PrimaryKeySlot::Tail(tail_len));
            tail_len += 1;
        }

        Self {
            merged_fields,
            index_len,
            slots: slots.into_boxed_slice(),
        }
    }

    /// Index fields followed by the appended primary-key tail.
    #[must_use]
    pub fn merged_fields(&self) -> &[String] {
        &self.merged_fields
    }

    #[must_use]
    pub fn index_fields(&self) -> &[String] {
        &self.merged_fields[..self.index_len]
    }

    /// Primary-key fields not covered by the index fields.
    #[must_use]
    pub fn tail_fields(&self) -> &[String] {
        &self.merged_fields[self.index_len..]
    }

    #[must_use]
    pub fn slots(&self) -> &[PrimaryKeySlot] {
        &self.slots
    }

    #[must_use]
    pub const fn index_len(&self) -> usize {
        self.index_len
    }

    /// Position of a slot in the merged sequence.
    #[must_use]
    pub const fn merged_position(&self, slot: PrimaryKeySlot) -> usize {
        match slot {
            PrimaryKeySlot::Index(position) => position,
            PrimaryKeySlot::Tail(position) => self.index_len + position,
        }
    }

    /// Gather primary-key values from a fully decoded merged sequence.
    #[must_use]
    pub fn primary_key_from_merged(&self, merged: &[Value]) -> Vec<Value> {
        debug_assert_eq!(merged.len(), self.merged_fields.len());

        self.slots
            .iter()
            .map(|&slot| merged[self.merged_position(slot)].clone())
            .collect()
    }

    /// Gather primary-key values from index values and tail values held apart.
    #[must_use]
    pub fn primary_key_from_parts(&self, index: &[Value], tail: &[Value]) -> Vec<Value> {
        debug_assert_eq!(index.len(), self.index_len);
        debug_assert_eq!(tail.len(), self.tail_fields().len());

        self.slots
            .iter()
            .map(|&slot| match slot {
                PrimaryKeySlot::Index(position) => index[position].clone(),
                PrimaryKeySlot::Tail(position) => tail[position].clone(),
            })
            .collect()
    }

    /// Tail values (primary-key fields outside the index) in tail order.
    #[must_use]
    pub fn tail_from_primary_key(&self, primary_key: &[Value]) -> Vec<Value> {
        self.slots
            .iter()
            .zip(primary_key)
            .filter(|(slot, _)| matches!(slot, PrimaryKeySlot::Tail(_)))
            .map(|(_, value)| value.clone())
            .collect()
    }
}

///
/// TESTS
///
