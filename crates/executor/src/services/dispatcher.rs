use std::sync::Arc;

use common::models::{OrderRequest, OrderSide, SignalAction, TradingSignal};
use exchange::OrderGateway;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub placed: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    MissingSymbol,
    UnknownAction(String),
    Executed(DispatchReport),
}

/// Turns one webhook signal into exchange orders.
///
/// Never fails: every exchange error is logged and swallowed so the webhook
/// caller always gets an answer.
pub struct SignalDispatcher {
    gateway: Arc<dyn OrderGateway>,
}

impl SignalDispatcher {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    pub async fn dispatch(&self, signal: &TradingSignal) -> DispatchOutcome {
        info!("RECEIVED SIGNAL: {:?}", signal);

        let Some(symbol) = signal.normalized_symbol() else {
            error!("Signal rejected: missing symbol");
            return DispatchOutcome::MissingSymbol;
        };
        let quantity = signal.quantity();

        let Some(action) = signal.action() else {
            let raw = signal.raw_action();
            warn!("Unknown action {} for {}, no orders sent", raw, symbol);
            return DispatchOutcome::UnknownAction(raw);
        };

        if matches!(action, SignalAction::OpenLong | SignalAction::OpenShort)
            && signal.has_unusable_stop_loss()
        {
            warn!("Ignoring unusable stop_loss for {}: not a positive price", symbol);
        }

        let orders = plan_orders(action, &symbol, quantity, signal.stop_loss());
        info!("Executing {} for {} (qty {}, {} order(s))", action, symbol, quantity, orders.len());

        let report = self.execute(&orders).await;
        info!(
            "Signal {} {} done: placed={} failed={} skipped={}",
            action, symbol, report.placed, report.failed, report.skipped
        );

        DispatchOutcome::Executed(report)
    }

    /// Sends orders one after another. An entry order the exchange rejected
    /// still gets its stop sent; an entry call that produced no answer at all
    /// (transport or decode failure) ends the signal there.
    async fn execute(&self, orders: &[OrderRequest]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for (leg, order) in orders.iter().enumerate() {
            match self.gateway.place_order(order).await {
                Ok(ack) => {
                    report.placed += 1;
                    info!(
                        "ORDER EXECUTED: {} {} {} ID={}, Status={}",
                        order.side, order.order_type, order.symbol, ack.order_id, ack.status
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    error!(
                        "ORDER FAILED: {} {} {}: {}",
                        order.side, order.order_type, order.symbol, e
                    );

                    if leg == 0 {
                        if !e.is_rejection() {
                            report.skipped = orders.len() - 1;
                            if report.skipped > 0 {
                                warn!("Entry order failed, skipping stop-loss for {}", order.symbol);
                            }
                            break;
                        }
                    } else {
                        error!("Position on {} may be open WITHOUT a stop-loss", order.symbol);
                    }
                }
            }
        }

        report
    }
}

/// Entry (or exit) order first, then the optional stop for new positions.
pub fn plan_orders(
    action: SignalAction,
    symbol: &str,
    quantity: u64,
    stop_loss: Option<f64>,
) -> Vec<OrderRequest> {
    let (side, protect) = match action {
        SignalAction::OpenLong => (OrderSide::Buy, true),
        SignalAction::OpenShort => (OrderSide::Sell, true),
        SignalAction::CloseLong => (OrderSide::Sell, false),
        SignalAction::CloseShort => (OrderSide::Buy, false),
    };

    let mut orders = vec![OrderRequest::market(symbol, side, quantity)];
    if let (true, Some(stop_price)) = (protect, stop_loss) {
        orders.push(OrderRequest::stop_market(
            symbol,
            side.opposite(),
            quantity,
            stop_price,
        ));
    }
    orders
}
