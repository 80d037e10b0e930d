use serde::Deserialize;

/// The parts of a `/fapi/v1/order` response worth logging.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderAck {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    pub symbol: String,
    pub status: String,
    #[serde(rename = "clientOrderId", default)]
    pub client_order_id: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    #[serde(rename = "origQty", default)]
    pub orig_qty: String,
    #[serde(rename = "stopPrice", default)]
    pub stop_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BinanceApiError {
    pub code: i64,
    pub msg: String,
}
