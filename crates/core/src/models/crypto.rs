use serde::Serialize;

/// Exchange selected by default when recording a transaction.
pub const DEFAULT_EXCHANGE: &str = "Coincheck";

/// A cryptocurrency offered in the transaction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CryptoCurrency {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Smallest on-chain unit, in decimal places
    pub decimals: u8,
}

const fn crypto(symbol: &'static str, name: &'static str, decimals: u8) -> CryptoCurrency {
    CryptoCurrency { symbol, name, decimals }
}

/// Assets listed on Coincheck (as of December 2024).
pub const SUPPORTED_CRYPTOCURRENCIES: &[CryptoCurrency] = &[
    crypto("BTC", "Bitcoin", 8),
    crypto("ETH", "Ethereum", 18),
    crypto("ETC", "Ethereum Classic", 18),
    crypto("LSK", "Lisk", 8),
    crypto("XRP", "XRP", 6),
    crypto("XEM", "NEM", 6),
    crypto("LTC", "Litecoin", 8),
    crypto("BCH", "Bitcoin Cash", 8),
    crypto("MONA", "MonaCoin", 8),
    crypto("XLM", "Stellar Lumens", 7),
    crypto("QTUM", "Qtum", 8),
    crypto("BAT", "Basic Attention Token", 18),
    crypto("IOST", "IOST", 8),
    crypto("ENJ", "Enjin Coin", 18),
    crypto("OMG", "OMG Network", 18),
    crypto("PLT", "Palette Token", 18),
    crypto("SAND", "The Sandbox", 18),
    crypto("DOT", "Polkadot", 10),
    crypto("FNCT", "FiNANCiE", 18),
    crypto("CHZ", "Chiliz", 18),
    crypto("LINK", "Chainlink", 18),
    crypto("MKR", "Maker", 18),
    crypto("MATIC", "Polygon", 18),
    crypto("IMX", "Immutable X", 18),
    crypto("AXS", "Axie Infinity", 18),
    crypto("DOGE", "Dogecoin", 8),
    crypto("APE", "ApeCoin", 18),
];

pub const POPULAR_EXCHANGES: &[&str] = &[
    "Binance",
    "Coincheck",
    "bitFlyer",
    "GMO Coin",
    "Liquid",
    "Zaif",
    "Huobi",
    "Kraken",
    "Coinbase",
    "Bybit",
    "OKX",
];

/// Look up a supported asset by symbol (case-insensitive).
pub fn find_crypto(symbol: &str) -> Option<&'static CryptoCurrency> {
    let upper = symbol.trim().to_uppercase();
    SUPPORTED_CRYPTOCURRENCIES.iter().find(|c| c.symbol == upper)
}

/// `"BTC - Bitcoin"` style label for pickers.
pub fn display_label(crypto: &CryptoCurrency) -> String {
    format!("{} - {}", crypto.symbol, crypto.name)
}
