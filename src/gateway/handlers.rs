//! Economy API handlers
//!
//! Thin translation layer: parse client amounts, call the injected
//! [`EconomyProvider`], wrap the result in the unified response envelope.
//! Amounts cross the wire as decimal strings.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core_types::AccountId;
use crate::ledger::{LedgerError, TransactionOutcome};
use crate::money::{self, MoneyError};

use super::state::AppState;
use super::types::{ApiResponse, error_codes};

type ApiError = (StatusCode, Json<ApiResponse<()>>);

// --- Requests ---

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub account_id: AccountId,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct SufficiencyQuery {
    pub amount: String,
}

// --- Responses ---

#[derive(Debug, Serialize)]
pub struct BalanceData {
    pub account_id: AccountId,
    pub balance: String,
}

#[derive(Debug, Serialize)]
pub struct SufficiencyData {
    pub account_id: AccountId,
    pub amount: String,
    pub sufficient: bool,
}

#[derive(Debug, Serialize)]
pub struct TransferData {
    pub outcome: TransactionOutcome,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: String,
}

// --- Error mapping ---

fn money_error(e: MoneyError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(
            error_codes::INVALID_PARAMETER,
            e.to_string(),
        )),
    )
}

fn ledger_error(e: LedgerError) -> ApiError {
    let (status, code) = match e {
        LedgerError::InvalidAmount => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        LedgerError::ServiceClosed | LedgerError::Timeout(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
        ),
        LedgerError::Overflow | LedgerError::Journal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    };
    (status, Json(ApiResponse::<()>::error(code, e.to_string())))
}

// --- Handlers ---

/// POST /api/v1/economy/deposit
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DepositRequest>,
) -> Result<Json<ApiResponse<BalanceData>>, ApiError> {
    let amount = money::parse_amount(&req.amount, state.decimals).map_err(money_error)?;

    let new_balance = state
        .provider
        .deposit(req.account_id, amount)
        .await
        .map_err(ledger_error)?;

    Ok(Json(ApiResponse::success(BalanceData {
        account_id: req.account_id,
        balance: money::format_amount(new_balance, state.decimals),
    })))
}

/// GET /api/v1/economy/balance/{account_id}
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<AccountId>,
) -> Result<Json<ApiResponse<BalanceData>>, ApiError> {
    let balance = state
        .provider
        .balance(account_id)
        .await
        .map_err(ledger_error)?;

    Ok(Json(ApiResponse::success(BalanceData {
        account_id,
        balance: money::format_amount(balance, state.decimals),
    })))
}

/// GET /api/v1/economy/sufficiency/{account_id}?amount=...
pub async fn check_sufficiency(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<AccountId>,
    Query(query): Query<SufficiencyQuery>,
) -> Result<Json<ApiResponse<SufficiencyData>>, ApiError> {
    let amount = money::parse_amount(&query.amount, state.decimals).map_err(money_error)?;

    let sufficient = state
        .provider
        .has_enough(account_id, amount)
        .await
        .map_err(ledger_error)?;

    Ok(Json(ApiResponse::success(SufficiencyData {
        account_id,
        amount: money::format_amount(amount, state.decimals),
        sufficient,
    })))
}

/// POST /api/v1/economy/transfer
///
/// Executed transfers always answer 200; the outcome value distinguishes
/// SUCCESS from INSUFFICIENT_FUNDS from FAILURE so clients can message each
/// differently. Only malformed requests and transport failures are HTTP
/// errors.
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<ApiResponse<TransferData>>, ApiError> {
    let amount = money::parse_amount(&req.amount, state.decimals).map_err(money_error)?;

    let outcome = state
        .provider
        .transfer(req.from, req.to, amount)
        .await
        .map_err(ledger_error)?;

    Ok(Json(ApiResponse::success(TransferData {
        outcome,
        from: req.from,
        to: req.to,
        amount: money::format_amount(amount, state.decimals),
    })))
}

/// GET /health
pub async fn health() -> Json<ApiResponse<String>> {
    Json(ApiResponse::success("ok".to_string()))
}
