//! Account API endpoints
//!
//! All routes live under `/api/auth` and answer with
//! `{"success": true, "data": ...}` on success.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use void_wallet::{Account, CredentialKind};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Account fields returned by generate and import
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub private_key: String,
    pub mnemonic: String,
    pub public_key: String,
    pub user_address: String,
    pub wif: String,
    pub word_count: usize,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            private_key: account.private_key().to_hex(),
            mnemonic: account.mnemonic().to_string(),
            public_key: account.public_key().to_hex(),
            user_address: account.address().to_string(),
            wif: account.wif().to_string(),
            word_count: account.word_count(),
        }
    }
}

/// Public identity returned by credential validation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialData {
    pub valid: bool,
    pub user_address: String,
    pub public_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportMnemonicRequest {
    pub mnemonic: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPrivateKeyRequest {
    pub private_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateCredentialsRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub credential: Option<String>,
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    let auth = Router::new()
        .route("/generate-account", post(generate_account))
        .route("/import-mnemonic", post(import_mnemonic))
        .route("/import-private-key", post(import_private_key))
        .route("/validate-credentials", post(validate_credentials));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth)
        .with_state(state)
}

fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Trimmed, non-empty request field
fn required(field: Option<String>, message: &'static str) -> Result<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingField(message))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": void_wallet::VERSION }))
}

/// Generate new account
async fn generate_account(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let account = state.accounts.generate()?;
    info!(address = %account.address(), "account generated");

    Ok(success(AccountData::from(&account)))
}

/// Import account from mnemonic
async fn import_mnemonic(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ImportMnemonicRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = body?;
    let mnemonic = required(req.mnemonic, "Mnemonic is required")?;
    let account = state.accounts.import_mnemonic(&mnemonic)?;
    info!(address = %account.address(), "account imported from mnemonic");

    Ok(success(AccountData::from(&account)))
}

/// Import account from a hex or WIF private key
async fn import_private_key(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ImportPrivateKeyRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = body?;
    let private_key = required(req.private_key, "Private key is required")?;
    let account = state.accounts.import_private_key(&private_key)?;
    info!(address = %account.address(), "account imported from private key");

    Ok(success(AccountData::from(&account)))
}

/// Validate a mnemonic or private key without returning the key
async fn validate_credentials(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ValidateCredentialsRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = body?;
    const MISSING: &str = "Type and credential are required";
    let kind = required(req.kind, MISSING)?;
    let credential = required(req.credential, MISSING)?;

    let kind: CredentialKind = kind.parse().map_err(|_| ApiError::InvalidCredentialType)?;
    let info = state.accounts.validate_credential(kind, &credential)?;

    Ok(success(CredentialData {
        valid: true,
        user_address: info.address.to_string(),
        public_key: info.public_key.to_hex(),
    }))
}
