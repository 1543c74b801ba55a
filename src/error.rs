//! Error taxonomy for the exchange core.
//!
//! Every operation is all-or-nothing: an error means no state was mutated.
//! The matching loop itself only performs bookkeeping on funds that were
//! already reserved and cannot fail mid-walk.

use thiserror::Error;

use crate::types::{AssetId, OwnerId};

/// Errors returned by exchange operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// Reservation or withdrawal exceeds the available balance
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// The external asset-transfer collaborator refused the transfer
    #[error("insufficient allowance for asset {asset}")]
    InsufficientAllowance { asset: AssetId },

    /// The referenced order id does not exist in that asset's book
    #[error("order {id} not found")]
    NotFound { id: u64 },

    /// The caller does not own the referenced order
    #[error("caller {caller} does not own order {id}")]
    Unauthorized { caller: OwnerId, id: u64 },

    /// Amounts must be positive
    #[error("amount must be positive")]
    ZeroAmount,

    /// Prices must be positive
    #[error("price must be positive")]
    ZeroPrice,

    /// The asset cannot be traded or deposited as a token
    #[error("asset {asset} is not a tradable token")]
    InvalidAsset { asset: AssetId },

    /// Order notional (price * amount) overflows u64
    #[error("order notional overflows")]
    Overflow,

    /// State digest serialization failed
    #[error("state serialization failed")]
    Serialization,
}
