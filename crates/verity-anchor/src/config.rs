//! Anchor registry configuration.
//!
//! Configures the JSON-RPC endpoint, contract location, and contract
//! interface for ledger anchoring. Defaults target a local development
//! node. Override via environment variables or explicit construction.

use thiserror::Error;
use url::Url;

/// First four bytes of `keccak256("isAnchored(bytes32)")`, hex-encoded.
pub const SELECTOR_IS_ANCHORED: &str = "4f0b5801";

/// First four bytes of `keccak256("anchorCredential(bytes32)")`, hex-encoded.
pub const SELECTOR_ANCHOR_CREDENTIAL: &str = "12d49197";

/// The two contract entry points the registry calls, as hex-encoded
/// four-byte function selectors.
///
/// The defaults match the reference anchoring contract. Deployments with
/// different function names override the selectors here rather than
/// patching call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInterface {
    /// Selector for the read-only anchored-status query.
    pub is_anchored_selector: String,
    /// Selector for the anchoring transaction.
    pub anchor_selector: String,
}

impl Default for ContractInterface {
    fn default() -> Self {
        Self {
            is_anchored_selector: SELECTOR_IS_ANCHORED.to_string(),
            anchor_selector: SELECTOR_ANCHOR_CREDENTIAL.to_string(),
        }
    }
}

/// Configuration for connecting to an EVM anchoring contract.
#[derive(Debug, Clone)]
pub struct AnchorConfig {
    /// JSON-RPC endpoint of the ledger node.
    pub rpc_url: Url,
    /// Address of the deployed anchoring contract (`0x` + 40 hex chars).
    pub contract_address: String,
    /// Sender address for anchoring transactions.
    pub from_address: String,
    /// Chain label used in logs and receipts (e.g. `ethereum`, `polygon`).
    pub chain_name: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Contract function selectors.
    pub interface: ContractInterface,
}

impl AnchorConfig {
    /// Create a configuration with the default chain name, timeout, and
    /// contract interface.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorConfigError::InvalidAddress`] if either address is
    /// not `0x` followed by 40 hex characters.
    pub fn new(
        rpc_url: Url,
        contract_address: impl Into<String>,
        from_address: impl Into<String>,
    ) -> Result<Self, AnchorConfigError> {
        let contract_address = checked_address("contract", contract_address.into())?;
        let from_address = checked_address("from", from_address.into())?;
        Ok(Self {
            rpc_url,
            contract_address,
            from_address,
            chain_name: "ethereum".to_string(),
            timeout_secs: 10,
            interface: ContractInterface::default(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VERITY_RPC_URL` (required)
    /// - `VERITY_CONTRACT_ADDRESS` (required)
    /// - `VERITY_FROM_ADDRESS` (required)
    /// - `VERITY_CHAIN` (default: `ethereum`)
    /// - `VERITY_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, AnchorConfigError> {
        let raw_url = required_var("VERITY_RPC_URL")?;
        let rpc_url = Url::parse(&raw_url)
            .map_err(|e| AnchorConfigError::InvalidUrl("VERITY_RPC_URL".to_string(), e.to_string()))?;

        let mut config = Self::new(
            rpc_url,
            required_var("VERITY_CONTRACT_ADDRESS")?,
            required_var("VERITY_FROM_ADDRESS")?,
        )?;
        if let Ok(chain) = std::env::var("VERITY_CHAIN") {
            config.chain_name = chain;
        }
        config.timeout_secs = std::env::var("VERITY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        Ok(config)
    }

    /// Create a configuration pointing at a local mock node (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`AnchorConfigError::InvalidUrl`] if the localhost URL
    /// cannot be parsed (should not occur for valid port numbers, but
    /// avoids `expect()`).
    pub fn local_mock(port: u16) -> Result<Self, AnchorConfigError> {
        let rpc_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| AnchorConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        let mut config = Self::new(
            rpc_url,
            "0x1111111111111111111111111111111111111111",
            "0x2222222222222222222222222222222222222222",
        )?;
        config.chain_name = "local".to_string();
        config.timeout_secs = 5;
        Ok(config)
    }
}

fn required_var(var: &str) -> Result<String, AnchorConfigError> {
    std::env::var(var).map_err(|_| AnchorConfigError::MissingVar(var.to_string()))
}

fn checked_address(label: &str, addr: String) -> Result<String, AnchorConfigError> {
    if is_valid_eth_address(&addr) {
        Ok(addr)
    } else {
        Err(AnchorConfigError::InvalidAddress(label.to_string(), addr))
    }
}

/// Whether a string is a well-formed EVM address: `0x` + 40 hex chars.
pub fn is_valid_eth_address(addr: &str) -> bool {
    match addr.strip_prefix("0x") {
        Some(body) => body.len() == 40 && body.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum AnchorConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid {0} address: \"{1}\" (expected 0x followed by 40 hex characters)")]
    InvalidAddress(String, String),
}
