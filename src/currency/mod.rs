//! Currency conversion for the Clyro platform.
//!
//! This module provides the supported fiat currencies and crypto assets,
//! a mutable exchange-rate table with simulated refresh, and immutable
//! rate snapshots that guarantee a single consistent rate generation per
//! computation.
//!
//! All prices in the platform are stored in the base currency (BRL) and
//! converted for display through a [`RateSnapshot`].

pub mod rates;

use serde::{Deserialize, Serialize};

pub use rates::{RateSnapshot, RateTable};

/// Supported fiat currencies.
///
/// BRL is the base currency: exchange rates express how much 1 BRL is
/// worth in each currency, and `rate[Brl]` is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Brazilian real (base currency).
    Brl,
    /// United States dollar.
    Usd,
    /// Euro.
    Eur,
}

impl Currency {
    /// Returns the ISO 4217 code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Brl => "BRL",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    /// Returns the display symbol.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Brl => "R$",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }
}

/// Supported crypto assets, priced in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CryptoAsset {
    /// Ether.
    Eth,
    /// BNB.
    Bnb,
    /// Tether (USD-pegged stablecoin).
    Usdt,
    /// Wrapped Bitcoin.
    Wbtc,
    /// Bitcoin.
    Btc,
}

impl CryptoAsset {
    /// Returns the ticker symbol.
    #[must_use]
    pub fn ticker(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Bnb => "BNB",
            Self::Usdt => "USDT",
            Self::Wbtc => "WBTC",
            Self::Btc => "BTC",
        }
    }
}
