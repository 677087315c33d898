pub mod disabled;
pub mod error;
pub mod events;
pub mod geometry;
pub mod model;
pub mod registry;
pub mod session;
