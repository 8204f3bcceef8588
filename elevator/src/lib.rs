pub mod dispatcher;
pub mod engine;
pub mod modules;
pub mod policies;
pub mod utilities;

pub use dispatcher::{Dispatcher, Tick};
pub use engine::{DispatchEngine, Outcome, RunSummary};
pub use policies::{Action, DispatchPolicy};
pub use utilities::elevator_status::{Behaviour, ElevatorStatus};
