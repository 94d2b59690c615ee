pub mod body;
pub mod mapping;
pub mod markers;

pub use body::{AvatarAnchors, AvatarController, RootTransform, TrackingMode, REFERENCE_HEIGHT};
pub use mapping::TrackingTarget;
pub use markers::{anchor_markers, Marker};
