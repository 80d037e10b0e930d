pub mod dispatcher;

pub use dispatcher::{DispatchOutcome, DispatchReport, SignalDispatcher};
