pub mod config;
pub mod selection;

mod logic;
pub use logic::{Logic, LogicArgs, RequestId, SelectionState};

mod session;
pub use session::{Session, Step};

mod tokio_thread;

pub use encore_api;
pub use encore_state;
pub use selection::{Selection, SelectionError, Strategy, StrategyKind};
