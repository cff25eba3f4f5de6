//! Domain types and models

pub mod mapping;
pub mod submission;
pub mod target;

pub use mapping::{FieldKind, FieldMapEntry, FieldMapSchema, FieldMapping};
pub use submission::{
    AssigneeRef, AssigneesPayload, EntryField, EntryNote, Feed, NoteKind, Submission,
};
pub use target::TargetInstance;
