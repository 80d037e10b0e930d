use async_trait::async_trait;
use common::models::OrderRequest;
use exchange::{ExchangeError, OrderAck, OrderGateway};
use mockall::mock;

mock! {
    pub Gateway {}

    #[async_trait]
    impl OrderGateway for Gateway {
        async fn place_order(&self, order: &OrderRequest) -> Result<OrderAck, ExchangeError>;
    }
}

pub fn ack_for(order: &OrderRequest) -> OrderAck {
    OrderAck {
        order_id: 1,
        symbol: order.symbol.clone(),
        status: "NEW".to_string(),
        client_order_id: "mock".to_string(),
        side: order.side.to_string(),
        order_type: order.order_type.to_string(),
        orig_qty: order.quantity.to_string(),
        stop_price: order.stop_price.map(|p| p.to_string()),
    }
}

pub fn exchange_down() -> ExchangeError {
    ExchangeError::Http {
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

/// A 2xx body that is not an order.
pub fn garbled_response() -> ExchangeError {
    ExchangeError::Decode(serde_json::from_str::<OrderAck>("{}").unwrap_err())
}
