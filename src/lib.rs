pub mod driver;
pub mod stats;
pub mod time;

pub(crate) mod buffer;
pub(crate) mod dispatch;
pub(crate) mod entities;
pub(crate) mod simulation;
pub(crate) mod variates;

pub use entities::project::ProjectId;
pub use entities::request::{Kind, Request, Status};
pub use entities::unit::UnitId;
pub use stats::{SourceStats, Summary, UnitStats};
