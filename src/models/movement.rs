// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coffee movements and balances.
//!
//! Movements are owned by the coffee backend; this side only needs to
//! label them and to read the balance it reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of ledger entry, as coded by the backend's `movement_type_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum MovementType {
    /// Credit: coffees bought into the account.
    Recharge,
    /// Debit: a coffee brewed or a lost bet.
    Consumption,
}

impl MovementType {
    pub fn code(self) -> i64 {
        match self {
            MovementType::Recharge => 1,
            MovementType::Consumption => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Recharge => "recharge",
            MovementType::Consumption => "consumption",
        }
    }

    /// Read `movement_type_id` from a create-movement body.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        payload
            .get("movement_type_id")
            .and_then(Value::as_i64)
            .and_then(|code| Self::try_from(code).ok())
    }
}

impl From<MovementType> for i64 {
    fn from(kind: MovementType) -> Self {
        kind.code()
    }
}

impl TryFrom<i64> for MovementType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(MovementType::Recharge),
            2 => Ok(MovementType::Consumption),
            other => Err(format!("unknown movement type {}", other)),
        }
    }
}

/// Numeric `balance_Coffees` from a movements payload.
///
/// The backend reports it either as a JSON number or as a numeric string.
pub fn balance_from_payload(payload: &Value) -> Option<f64> {
    match payload.get("balance_Coffees")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
