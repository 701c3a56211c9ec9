pub mod ids;
pub mod family;
pub mod participant;
pub mod assignment;
pub mod wishlist;

// Re-exports for convenience
pub use ids::Id;
pub use family::{Family, FamilyCode};
pub use participant::Participant;
pub use assignment::{Assignment, AssignmentSet};
pub use wishlist::{Gift, WishList};
