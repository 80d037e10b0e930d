use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const EXCHANGE_PREFIX: &str = "BINANCE:";
const PERPETUAL_SUFFIX: &str = ".P";
const QUOTE_ASSET: &str = "USDT";
const DEFAULT_QUANTITY: u64 = 1;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signal payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("malformed signal: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    OpenLong,
    OpenShort,
    CloseLong,
    CloseShort,
}

impl SignalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenLong => "OPEN_LONG",
            Self::OpenShort => "OPEN_SHORT",
            Self::CloseLong => "CLOSE_LONG",
            Self::CloseShort => "CLOSE_SHORT",
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN_LONG" => Ok(Self::OpenLong),
            "OPEN_SHORT" => Ok(Self::OpenShort),
            "CLOSE_LONG" => Ok(Self::CloseLong),
            "CLOSE_SHORT" => Ok(Self::CloseShort),
            _ => Err(()),
        }
    }
}

/// Inbound webhook payload.
///
/// `quantity` and `stop_loss` arrive as numbers or strings depending on the
/// alert template, so both are kept raw and resolved on access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingSignal {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    action: Option<Value>,
    #[serde(default)]
    quantity: Option<Value>,
    #[serde(default)]
    stop_loss: Option<Value>,
}

impl TradingSignal {
    /// Arrays carry no fields and read as an empty signal; bare scalars and
    /// `null` are rejected.
    pub fn from_value(value: Value) -> Result<Self, SignalError> {
        match value {
            Value::Object(map) => Ok(serde_json::from_value(Value::Object(map))?),
            Value::Array(_) => Ok(Self::default()),
            Value::Null => Err(SignalError::NotAnObject("null")),
            Value::Bool(_) => Err(SignalError::NotAnObject("a boolean")),
            Value::Number(_) => Err(SignalError::NotAnObject("a number")),
            Value::String(_) => Err(SignalError::NotAnObject("a string")),
        }
    }

    /// Raw symbol as received; empty counts as missing.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref().filter(|s| !s.is_empty())
    }

    pub fn normalized_symbol(&self) -> Option<String> {
        self.symbol().map(normalize_symbol)
    }

    /// `None` when the action is absent or not one of the four known values.
    pub fn action(&self) -> Option<SignalAction> {
        self.action.as_ref()?.as_str()?.parse().ok()
    }

    /// Action text for logging, whatever was sent.
    pub fn raw_action(&self) -> String {
        match &self.action {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "<none>".to_string(),
        }
    }

    pub fn quantity(&self) -> u64 {
        resolve_quantity(self.quantity.as_ref())
    }

    pub fn stop_loss(&self) -> Option<f64> {
        resolve_stop_loss(self.stop_loss.as_ref())
    }

    /// True when a stop-loss value was sent but cannot be used as a price.
    pub fn has_unusable_stop_loss(&self) -> bool {
        let supplied = match &self.stop_loss {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        };
        supplied && self.stop_loss().is_none()
    }
}

/// `BINANCE:BTCUSDT.P` -> `BTCUSDT`, `SOL` -> `SOLUSDT`.
pub fn normalize_symbol(raw: &str) -> String {
    let symbol = raw.strip_prefix(EXCHANGE_PREFIX).unwrap_or(raw);
    let symbol = symbol.strip_suffix(PERPETUAL_SUFFIX).unwrap_or(symbol);

    if symbol.ends_with(QUOTE_ASSET) {
        symbol.to_string()
    } else {
        format!("{symbol}{QUOTE_ASSET}")
    }
}

/// Integer quantity; anything absent, unparseable or below one falls back to 1.
pub fn resolve_quantity(value: Option<&Value>) -> u64 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && f.abs() < i64::MAX as f64).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };

    match parsed {
        Some(n) if n > 0 => n as u64,
        _ => DEFAULT_QUANTITY,
    }
}

/// Positive, finite stop price or nothing.
pub fn resolve_stop_loss(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_decimal(s),
        _ => None,
    };
    parsed.filter(|p| p.is_finite() && *p > 0.0)
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    // Too many digits for i64 saturates rather than falling back to the default
    let n = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -n } else { n })
}

fn leading_decimal(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(s.len());
    let candidate = &s[..end];

    // Longest prefix that still parses, e.g. "42000.5abc" -> 42000.5, "1e" -> 1
    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f64>().ok())
}
