mod kepler;
mod resolver;
mod scale;
mod transfer;

pub use kepler::{AU_TO_KM, KEPLER_TOLERANCE, ResolveError, elements_to_xy, solve_kepler};
pub use resolver::{PositionResolver, ResolveMode};
pub use scale::{DistanceScale, OrbitScales};
pub use transfer::MissionTransfer;
