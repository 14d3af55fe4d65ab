pub mod family;
pub mod presence;

pub use family::{ApplicationFamily, Asset, Channel, Families};
pub use presence::PresenceDescriptor;
