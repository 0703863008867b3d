// src/domain/identity.rs
//
// Identity shared by every catalog and account record

/// Integer identifier, unique within one record type
pub type EntityId = i32;

/// Filler value of legacy fixed-size ID arrays. Never a reference.
pub const PADDING_ID: EntityId = 0;

/// Anything carrying an immutable identifier
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// True when `id` can name a record
pub fn is_reference(id: EntityId) -> bool {
    id != PADDING_ID
}

/// Yields the referencing IDs of an ID array, skipping padding
pub fn references(ids: &[EntityId]) -> impl Iterator<Item = EntityId> + '_ {
    ids.iter().copied().filter(|id| is_reference(*id))
}
