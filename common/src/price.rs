/// Rounds to two decimal places, the precision every stored price uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Discount percentage for a (regular, promo) pair. None when the promo is
/// missing, non-positive, or not actually below the regular price.
pub fn discount_pct(price: f64, promo_price: Option<f64>) -> Option<f64> {
    let promo = promo_price?;
    if promo <= 0.0 || price <= 0.0 || promo >= price {
        return None;
    }
    Some(round2((price - promo) / price * 100.0))
}

/// Parses a price-ish token ("$1,299.00", "1299", "49.9") into a float.
pub fn parse_price_value(value: &str) -> Option<f64> {
    let normalized = value.trim().replace('$', "").replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
