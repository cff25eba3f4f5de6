//! Pure helpers with no I/O

pub mod payload_tree;
