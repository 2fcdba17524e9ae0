//! Exchange-rate tables and snapshots.
//!
//! [`RateTable`] is the mutable, process-wide table of fiat rates and
//! crypto prices. Every refresh bumps a generation counter. Conversions
//! never read the table directly: callers take a [`RateSnapshot`] and run
//! the whole computation against it, so no computation can observe two
//! different rate generations.

use rand::Rng;
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};

use super::{CryptoAsset, Currency};

/// Decimal places kept for fiat rates after a refresh.
const FIAT_RATE_DP: u32 = 4;

/// Decimal places kept for crypto prices after a refresh.
const CRYPTO_PRICE_DP: u32 = 2;

/// Mutable exchange-rate table.
///
/// Rates are relative to the base currency (BRL): `usd` is how many USD
/// one BRL buys. Crypto assets are priced in USD. The table is mutated
/// only by [`apply_fluctuation`](Self::apply_fluctuation), which stands in
/// for a periodic market-data refresh.
#[derive(Debug, Clone)]
pub struct RateTable {
    usd: Decimal,
    eur: Decimal,
    eth_usd: Decimal,
    bnb_usd: Decimal,
    usdt_usd: Decimal,
    wbtc_usd: Decimal,
    btc_usd: Decimal,
    generation: u64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            usd: Decimal::new(1830, 4),
            eur: Decimal::new(1690, 4),
            eth_usd: Decimal::new(350_000, 2),
            bnb_usd: Decimal::new(60_000, 2),
            usdt_usd: Decimal::ONE,
            wbtc_usd: Decimal::new(7_000_000, 2),
            btc_usd: Decimal::new(6_500_000, 2),
            generation: 0,
        }
    }
}

impl RateTable {
    /// Creates a table with the default market rates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current rate generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Takes an immutable snapshot of the current rates.
    ///
    /// All conversions for a single user-visible computation must go
    /// through one snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RateSnapshot {
        RateSnapshot {
            usd: self.usd,
            eur: self.eur,
            eth_usd: self.eth_usd,
            bnb_usd: self.bnb_usd,
            usdt_usd: self.usdt_usd,
            wbtc_usd: self.wbtc_usd,
            btc_usd: self.btc_usd,
            generation: self.generation,
        }
    }

    /// Simulates a market-data refresh.
    ///
    /// USD and EUR rates move by up to ±2%, ETH by ±2.5%, BNB by ±3%,
    /// WBTC and BTC by ±2%. USDT stays pegged at 1 USD and BRL stays
    /// pinned at 1 as the base. Bumps the rate generation.
    pub fn apply_fluctuation<R: Rng>(&mut self, rng: &mut R) {
        self.usd = jitter(rng, self.usd, 0.02, FIAT_RATE_DP);
        self.eur = jitter(rng, self.eur, 0.02, FIAT_RATE_DP);
        self.eth_usd = jitter(rng, self.eth_usd, 0.025, CRYPTO_PRICE_DP);
        self.bnb_usd = jitter(rng, self.bnb_usd, 0.03, CRYPTO_PRICE_DP);
        self.wbtc_usd = jitter(rng, self.wbtc_usd, 0.02, CRYPTO_PRICE_DP);
        self.btc_usd = jitter(rng, self.btc_usd, 0.02, CRYPTO_PRICE_DP);
        self.generation += 1;
    }
}

/// Applies a random relative move of up to `half_spread` in either
/// direction, keeping `dp` decimal places. Falls back to the previous
/// value if the result is not representable.
fn jitter<R: Rng>(rng: &mut R, value: Decimal, half_spread: f64, dp: u32) -> Decimal {
    let factor = 1.0 + rng.gen_range(-1.0..=1.0) * half_spread;
    let moved = value.to_f64().unwrap_or(0.0) * factor;
    Decimal::from_f64(moved).unwrap_or(value).round_dp(dp)
}

/// Immutable view of one rate generation.
///
/// Cheap to copy; holds every rate needed for fiat and crypto conversion.
#[derive(Debug, Clone, Copy)]
pub struct RateSnapshot {
    usd: Decimal,
    eur: Decimal,
    eth_usd: Decimal,
    bnb_usd: Decimal,
    usdt_usd: Decimal,
    wbtc_usd: Decimal,
    btc_usd: Decimal,
    generation: u64,
}

impl RateSnapshot {
    /// Returns the generation this snapshot was taken at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the base-relative rate for a fiat currency.
    #[must_use]
    pub fn fiat_rate(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Brl => Decimal::ONE,
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
        }
    }

    /// Converts an amount between two fiat currencies through the base.
    ///
    /// `amount / rate[from] * rate[to]`. Returns zero instead of dividing
    /// when the source rate is zero.
    #[must_use]
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Decimal {
        if from == to {
            return amount;
        }
        let from_rate = self.fiat_rate(from);
        if from_rate.is_zero() {
            return Decimal::ZERO;
        }
        amount / from_rate * self.fiat_rate(to)
    }

    /// Converts an amount in `from` to the base currency (BRL).
    #[must_use]
    pub fn to_base(&self, amount: Decimal, from: Currency) -> Decimal {
        self.convert(amount, from, Currency::Brl)
    }

    /// Converts a base-currency (BRL) amount to the target currency.
    #[must_use]
    pub fn from_base(&self, amount: Decimal, to: Currency) -> Decimal {
        self.convert(amount, Currency::Brl, to)
    }

    /// Returns the USD price of one unit of a crypto asset.
    #[must_use]
    pub fn crypto_price_usd(&self, asset: CryptoAsset) -> Decimal {
        match asset {
            CryptoAsset::Eth => self.eth_usd,
            CryptoAsset::Bnb => self.bnb_usd,
            CryptoAsset::Usdt => self.usdt_usd,
            CryptoAsset::Wbtc => self.wbtc_usd,
            CryptoAsset::Btc => self.btc_usd,
        }
    }

    /// Returns the price of one unit of a crypto asset in the given fiat
    /// currency.
    #[must_use]
    pub fn crypto_price_in(&self, asset: CryptoAsset, currency: Currency) -> Decimal {
        self.convert(self.crypto_price_usd(asset), Currency::Usd, currency)
    }
}
