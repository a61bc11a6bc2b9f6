//! Domain entities: robots, areas, grids, and cleaning sessions.

pub mod area;
pub mod coverage;
pub mod grid;
pub mod position;
pub mod robot;
pub mod session;

pub use area::Area;
pub use coverage::CoverageGrid;
pub use grid::Square;
pub use position::Position;
pub use robot::{Robot, RobotHistory};
pub use session::CleaningSession;
