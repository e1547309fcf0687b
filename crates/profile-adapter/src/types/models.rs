/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - user profile record
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Wallet addresses are `0x` followed by 40 hex digits
pub const WALLET_ADDRESS_LEN: usize = 42;

/// User profile as stored by the user service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "walletAddr", default)]
    pub wallet_addr: String,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub country: String,
}
