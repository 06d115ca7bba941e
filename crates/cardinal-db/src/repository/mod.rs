//! Repository layer — query functions organized by domain.

pub mod themes;
