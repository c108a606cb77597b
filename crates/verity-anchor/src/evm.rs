//! # EVM Anchor Registry — JSON-RPC Adapter
//!
//! Talks to an anchoring contract on an EVM chain through plain JSON-RPC,
//! without a web3 dependency: the two contract calls the registry needs
//! are four-byte selector concatenations over a 32-byte digest, built by
//! hand and submitted via `eth_call` / `eth_sendTransaction`.
//!
//! ## Error Handling
//!
//! Transport failures, timeouts, non-2xx responses, and malformed bodies
//! map to [`AnchorError::Unreachable`]. An RPC-level error on the write
//! path means the node processed and refused the transaction, which maps
//! to [`AnchorError::Rejected`].
//!
//! ## Timeout & Retry
//!
//! Reads (`eth_call`) retry on transport errors with exponential backoff.
//! Writes are sent exactly once; a blind retry of `eth_sendTransaction`
//! could submit duplicate transactions.

use serde::Deserialize;
use std::time::Duration;

use verity_core::ContentDigest;

use crate::config::AnchorConfig;
use crate::error::AnchorError;
use crate::registry::AnchorRegistry;

/// Maximum number of retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// Send an HTTP request with exponential backoff retry on transport errors.
///
/// The closure `f` is called up to `MAX_RETRIES + 1` times. Only
/// [`reqwest::Error`] transport failures trigger a retry — the caller is
/// responsible for inspecting the response status code.
async fn retry_send<F, Fut>(f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    // Retry attempts with backoff, then one final attempt without retry.
    for attempt in 0..MAX_RETRIES {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt));
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "ledger RPC request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    // Final attempt — no more retries.
    f().await
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Anchor registry backed by an EVM contract over JSON-RPC.
///
/// This is a synchronous facade: it owns a single-threaded Tokio runtime
/// and drives each HTTP exchange to completion on the calling thread.
/// Do not call registry methods from inside an async runtime; wrap the
/// call in `tokio::task::spawn_blocking` there.
pub struct EvmAnchorRegistry {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    config: AnchorConfig,
    endpoint: String,
}

impl std::fmt::Debug for EvmAnchorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmAnchorRegistry")
            .field("endpoint", &self.endpoint)
            .field("contract", &self.config.contract_address)
            .field("chain", &self.config.chain_name)
            .finish()
    }
}

impl EvmAnchorRegistry {
    /// Create a registry from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::Unreachable`] if the HTTP client or the
    /// internal runtime cannot be constructed.
    pub fn new(config: AnchorConfig) -> Result<Self, AnchorError> {
        let endpoint = config.rpc_url.to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnchorError::Unreachable {
                endpoint: endpoint.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AnchorError::Unreachable {
                endpoint: endpoint.clone(),
                reason: format!("failed to start async runtime: {e}"),
            })?;
        Ok(Self {
            client,
            runtime,
            config,
            endpoint,
        })
    }

    /// The configuration this registry was built from.
    pub fn config(&self) -> &AnchorConfig {
        &self.config
    }

    /// Build calldata for a single-`bytes32` contract call: `0x`, the
    /// four-byte selector, then the digest, all hex.
    fn calldata(selector: &str, digest: &ContentDigest) -> String {
        format!("0x{selector}{}", digest.to_hex())
    }

    async fn rpc_call(
        &self,
        rpc_method: &str,
        params: serde_json::Value,
        retry: bool,
    ) -> Result<RpcResponse, AnchorError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": rpc_method,
            "params": params,
        });
        let url = self.config.rpc_url.clone();

        let send = || self.client.post(url.clone()).json(&body).send();
        let result = if retry {
            retry_send(send).await
        } else {
            send().await
        };

        let resp = result.map_err(|e| {
            let reason = if e.is_timeout() {
                format!("request timed out after {}s", self.config.timeout_secs)
            } else {
                format!("{e}")
            };
            AnchorError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason,
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AnchorError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: format!("{rpc_method}: HTTP {status} — {text}"),
            });
        }

        resp.json::<RpcResponse>()
            .await
            .map_err(|e| AnchorError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: format!("malformed JSON-RPC response: {e}"),
            })
    }

    /// Read-only contract call. Retried on transport errors.
    async fn eth_call(&self, data: String) -> Result<Vec<u8>, AnchorError> {
        tracing::debug!(contract = %self.config.contract_address, "eth_call");
        let params = serde_json::json!([
            {"to": self.config.contract_address, "data": data},
            "latest",
        ]);
        let response = self.rpc_call("eth_call", params, true).await?;

        if let Some(err) = response.error {
            // A read that errors gives no definitive answer either way.
            return Err(AnchorError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: format!("RPC error {}: {}", err.code, err.message),
            });
        }
        let raw = response
            .result
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| AnchorError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: "eth_call response carried no result".to_string(),
            })?;
        decode_hex_response(raw).map_err(|reason| AnchorError::Unreachable {
            endpoint: self.endpoint.clone(),
            reason,
        })
    }

    /// State-changing contract call. Sent exactly once.
    async fn eth_send_transaction(&self, data: String) -> Result<String, AnchorError> {
        let params = serde_json::json!([{
            "from": self.config.from_address,
            "to": self.config.contract_address,
            "data": data,
        }]);
        let response = self.rpc_call("eth_sendTransaction", params, false).await?;

        if let Some(err) = response.error {
            return Err(AnchorError::Rejected {
                reason: format!("RPC error {}: {}", err.code, err.message),
            });
        }
        response
            .result
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AnchorError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: "eth_sendTransaction response carried no result".to_string(),
            })
    }
}

impl AnchorRegistry for EvmAnchorRegistry {
    fn is_anchored(&self, digest: &ContentDigest) -> Result<bool, AnchorError> {
        let data = Self::calldata(&self.config.interface.is_anchored_selector, digest);
        let bytes = self.runtime.block_on(self.eth_call(data))?;
        Ok(decode_abi_bool(&bytes))
    }

    fn record(&self, digest: &ContentDigest) -> Result<String, AnchorError> {
        let data = Self::calldata(&self.config.interface.anchor_selector, digest);
        let tx = self.runtime.block_on(self.eth_send_transaction(data))?;
        tracing::info!(
            chain = %self.config.chain_name,
            tx = %tx,
            digest = %digest,
            "credential digest anchored"
        );
        Ok(tx)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Decode a `0x`-prefixed hex response body into bytes.
fn decode_hex_response(raw: &str) -> Result<Vec<u8>, String> {
    let body = raw.strip_prefix("0x").unwrap_or(raw);
    if body.len() % 2 != 0 {
        return Err(format!("odd-length hex response: {raw:?}"));
    }
    (0..body.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&body[i..i + 2], 16)
                .map_err(|_| format!("non-hex byte in response: {raw:?}"))
        })
        .collect()
}

/// Interpret an ABI-encoded return as a boolean.
///
/// An anchored digest comes back as a 32-byte word ending in `0x01`; an
/// empty return (`0x`) from a node means nothing is recorded.
fn decode_abi_bool(bytes: &[u8]) -> bool {
    bytes.iter().any(|b| *b != 0)
}
