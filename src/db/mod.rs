//! Database layer (in-process store).

pub mod memory;

pub use memory::MemberStore;
