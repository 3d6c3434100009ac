//! Data models for the maintenance tracker

pub mod client;
pub mod equipment;
pub mod maintenance;
pub mod user;

// Re-export commonly used types
pub use client::{Client, ClientShort};
pub use equipment::{Equipment, EquipmentStatus};
pub use maintenance::Maintenance;
pub use user::{Capability, Identity, User, UserShort};
