use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/env", get(handlers::env_info))
        .route("/webhook", post(handlers::webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use common::{
        config::Settings,
        models::{OrderSide, OrderType},
    };
    use mockall::Sequence;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        services::SignalDispatcher,
        testing::{MockGateway, ack_for, exchange_down},
    };

    fn app(mock: MockGateway) -> Router {
        let settings = Settings::from_lookup(|key| match key {
            "BINANCE_API_KEY" => Some("fake-key".to_string()),
            "BINANCE_SECRET_KEY" => Some("fake-secret".to_string()),
            "APP_ENV" => Some("test".to_string()),
            _ => None,
        })
        .unwrap();

        let dispatcher = SignalDispatcher::new(Arc::new(mock));
        create_router(AppState::new(Arc::new(settings), Arc::new(dispatcher)))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_webhook_success_places_orders() {
        let mut mock = MockGateway::new();
        let mut seq = Sequence::new();
        mock.expect_place_order()
            .withf(|o| o.symbol == "BTCUSDT" && o.side == OrderSide::Buy && o.order_type == OrderType::Market)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|o| Ok(ack_for(o)));
        mock.expect_place_order()
            .withf(|o| o.side == OrderSide::Sell && o.order_type == OrderType::StopMarket)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|o| Ok(ack_for(o)));

        let response = app(mock)
            .oneshot(post_json(
                r#"{"symbol":"BINANCE:BTCUSDT.P","action":"OPEN_LONG","quantity":"1","stop_loss":"60000"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Signal processed");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_webhook_succeeds_when_exchange_fails() {
        let mut mock = MockGateway::new();
        mock.expect_place_order()
            .times(1)
            .returning(|_| Err(exchange_down()));

        let response = app(mock)
            .oneshot(post_json(r#"{"symbol":"ETH","action":"CLOSE_SHORT"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "success");
    }

    #[tokio::test]
    async fn test_webhook_unknown_action_and_missing_symbol() {
        for body in [
            r#"{"symbol":"BTCUSDT","action":"HOLD"}"#,
            r#"{"action":"OPEN_LONG"}"#,
            r#"{}"#,
        ] {
            let mut mock = MockGateway::new();
            mock.expect_place_order().times(0);

            let response = app(mock).oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "body: {body}");
            assert_eq!(read_json(response).await["status"], "success");
        }
    }

    #[tokio::test]
    async fn test_webhook_array_body_is_ignored() {
        let mut mock = MockGateway::new();
        mock.expect_place_order().times(0);

        let response = app(mock).oneshot(post_json("[1,2,3]")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "success");
    }

    #[tokio::test]
    async fn test_webhook_scalar_and_null_bodies_rejected() {
        for body in ["null", "42", r#""OPEN_LONG""#] {
            let mut mock = MockGateway::new();
            mock.expect_place_order().times(0);

            let response = app(mock).oneshot(post_json(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(read_json(response).await["status"], "error");
        }
    }

    #[tokio::test]
    async fn test_webhook_numeric_symbol_is_handler_failure() {
        let mut mock = MockGateway::new();
        mock.expect_place_order().times(0);

        let response = app(mock)
            .oneshot(post_json(r#"{"symbol":42,"action":"OPEN_LONG"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().starts_with("malformed signal"));
    }

    #[tokio::test]
    async fn test_webhook_invalid_json_rejected() {
        let mut mock = MockGateway::new();
        mock.expect_place_order().times(0);

        let response = app(mock).oneshot(post_json("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["status"], "error");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(MockGateway::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["service"], "Binance Webhook Bot");
        assert_eq!(body["environment"], "test");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_env_reports_presence_only() {
        let response = app(MockGateway::new())
            .oneshot(Request::builder().uri("/env").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = read_json(response).await;
        assert_eq!(
            body,
            json!({"has_api_key": true, "has_secret_key": true, "environment": "test"})
        );
        assert!(!body.to_string().contains("fake-secret"));
    }
}
