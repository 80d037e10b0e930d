use async_trait::async_trait;
use common::models::OrderRequest;

use crate::{ExchangeError, OrderAck};

/// Anything that can place a single order on the exchange.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_order(&self, order: &OrderRequest) -> Result<OrderAck, ExchangeError>;
}
