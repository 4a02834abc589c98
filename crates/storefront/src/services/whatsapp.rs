//! WhatsApp deep-link builder for checkout.
//!
//! A successful checkout redirects the buyer to `wa.me` with a pre-filled
//! order summary so the conversation with the seller starts from the exact
//! order details.

use warung_core::Price;

/// Build the `https://wa.me/...` redirect target for an order.
///
/// `phone` is the seller's number in international format without `+`
/// (digits only, validated at config load). The message text is
/// percent-encoded into the `text` query parameter.
#[must_use]
pub fn order_link(phone: &str, product_name: &str, size: &str, quantity: i64, total: Price) -> String {
    let message = format!(
        "Halo, saya ingin membeli:\n\n\
         \u{1F4E6} *{product_name}*\n\
         \u{1F455} Ukuran: *{size}*\n\
         \u{1F4CF} Jumlah: *{quantity}*\n\
         \u{1F4B5} Total: *{}*",
        total.formatted()
    );

    format!("https://wa.me/{phone}?text={}", urlencoding::encode(&message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_link_encodes_total() {
        let total = Price::new(50_000) * 2;
        let link = order_link("628123456789", "Kaos Polos", "M", 2, total);

        assert!(link.starts_with("https://wa.me/628123456789?text="));
        // "Rp 100,000" percent-encoded: space -> %20, comma -> %2C
        assert!(link.contains("Rp%20100%2C000"));
        assert!(link.contains("Kaos%20Polos"));
    }

    #[test]
    fn test_order_link_has_no_raw_whitespace() {
        let link = order_link("628123456789", "Kaos Polos", "L", 1, Price::new(50_000));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }
}
