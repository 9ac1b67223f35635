pub mod body;
pub mod config;
pub mod driver;
pub mod error;
pub mod render;
pub mod simulation;
pub mod utils;
pub mod c_api;

pub use body::Body;
pub use config::{ArrowMode, LabConfig, LabParams, Param};
pub use driver::Driver;
pub use error::LabError;
pub use render::{ForceArrow, Snapshot};
pub use simulation::{Bounces, Command, Simulation, StepOutcome};
pub use ultraviolet;
