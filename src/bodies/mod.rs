mod body;
mod catalog;
mod elements;

pub use body::{Body, BodyClass, PositionVector};
pub use catalog::BodyCatalog;
pub use elements::{ElementsStore, OrbitalElements};
