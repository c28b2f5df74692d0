//! Price text normalization.

use std::str::FromStr;
use std::sync::LazyLock;

use icmarket_core::{ParsedPrice, PRICE_SCALE};
use regex::Regex;
use rust_decimal::Decimal;

/// Currency symbol to ISO code.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[("$", "USD"), ("\u{a3}", "GBP"), ("\u{20ac}", "EUR")];

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([$\x{a3}\x{20ac}])\s?(\d+(?:\.\d{1,2})?)").unwrap());

/// Map a currency symbol to its code; unknown symbols pass through.
pub fn currency_code(symbol: &str) -> String {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| symbol.to_string())
}

/// Parse the first symbol+amount pair out of price text.
///
/// Thousands separators are dropped before matching and the amount is held
/// at [`PRICE_SCALE`] fractional digits. Returns `None` when
/// there is no symbol followed by digits; callers skip such listings.
pub fn parse_price(text: &str) -> Option<ParsedPrice> {
    let text = text.replace(',', "");
    let caps = PRICE_RE.captures(&text)?;
    let mut amount = Decimal::from_str(&caps[2]).ok()?;
    amount.rescale(PRICE_SCALE);

    Some(ParsedPrice {
        amount,
        currency: currency_code(&caps[1]),
    })
}
