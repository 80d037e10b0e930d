pub mod order;
pub mod signal;

pub use order::{OrderRequest, OrderSide, OrderType, WorkingType};
pub use signal::{SignalAction, SignalError, TradingSignal};
