use async_trait::async_trait;
use common::{config::ExchangeSettings, models::OrderRequest};
use reqwest::{Client, Method, header::CONTENT_TYPE};
use tracing::{debug, error, info};

use super::{BinanceApiError, ORDER_ENDPOINT, OrderAck};
use crate::{ExchangeError, OrderGateway, RequestSigner};

/// USDⓈ-M futures REST client. Cheap to clone; the inner `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: String,
    signer: RequestSigner,
}

impl BinanceClient {
    pub fn new(settings: &ExchangeSettings) -> Result<Self, ExchangeError> {
        let signer = RequestSigner::new(&settings.secret_key)?;

        Ok(Self {
            client: Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            signer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl OrderGateway for BinanceClient {
    async fn place_order(&self, order: &OrderRequest) -> Result<OrderAck, ExchangeError> {
        let query = self.signer.sign(&order.params());
        let url = format!("{}{}?{}", self.base_url, ORDER_ENDPOINT, query);

        info!(
            "Placing Order: {} {} {} {}",
            order.side, order.order_type, order.quantity, order.symbol
        );
        debug!(endpoint = ORDER_ENDPOINT, query = %query, "Binance POST request");

        let resp = self
            .client
            .request(Method::POST, &url)
            .header("X-MBX-APIKEY", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), body = %body, "Binance response");

        if !status.is_success() {
            error!("Binance Order Failed: {}", body);
            if let Ok(err) = serde_json::from_str::<BinanceApiError>(&body) {
                return Err(ExchangeError::Api {
                    code: err.code,
                    msg: err.msg,
                });
            }
            return Err(ExchangeError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let ack = serde_json::from_str::<OrderAck>(&body)?;
        Ok(ack)
    }
}
