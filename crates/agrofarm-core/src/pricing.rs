//! Promo codes, order totals and rupee formatting.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::ValidationError;

/// A recognised promo code and the discount it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoCode {
    /// `FARMER10`: 10% off the subtotal.
    Farmer10,
}

impl PromoCode {
    /// Looks up a code, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPromoCode`] for anything unrecognised.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        if code.trim().eq_ignore_ascii_case("farmer10") {
            Ok(PromoCode::Farmer10)
        } else {
            Err(ValidationError::InvalidPromoCode(code.trim().to_owned()))
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            PromoCode::Farmer10 => "FARMER10",
        }
    }

    /// Discount for `subtotal`, rounded to whole rupees.
    #[must_use]
    pub fn discount(self, subtotal: Decimal) -> Decimal {
        let raw = match self {
            PromoCode::Farmer10 => subtotal * Decimal::new(10, 2),
        };
        raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Applies an optional promo to `subtotal`. The total never goes negative.
    #[must_use]
    pub fn compute(subtotal: Decimal, promo: Option<PromoCode>) -> Self {
        let discount = promo.map_or(Decimal::ZERO, |p| p.discount(subtotal).min(subtotal));
        Self {
            subtotal,
            discount,
            total: (subtotal - discount).max(Decimal::ZERO),
        }
    }
}

/// Formats an amount as `₨ 1,234` or `₨ 1,234.5`.
#[must_use]
pub fn format_rupees(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = normalized.abs();
    let text = abs.to_string();
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac {
        Some(f) => format!("₨ {sign}{grouped}.{f}"),
        None => format!("₨ {sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farmer10_is_case_insensitive() {
        assert_eq!(PromoCode::parse("farmer10"), Ok(PromoCode::Farmer10));
        assert_eq!(PromoCode::parse(" FARMER10 "), Ok(PromoCode::Farmer10));
    }

    #[test]
    fn unknown_promo_is_rejected() {
        assert_eq!(
            PromoCode::parse("FREESHIP"),
            Err(ValidationError::InvalidPromoCode("FREESHIP".to_string()))
        );
    }

    #[test]
    fn farmer10_rounds_to_whole_rupees() {
        // 10% of 435 = 43.5 -> 44
        assert_eq!(
            PromoCode::Farmer10.discount(Decimal::from(435)),
            Decimal::from(44)
        );
        assert_eq!(
            PromoCode::Farmer10.discount(Decimal::from(210)),
            Decimal::from(21)
        );
    }

    #[test]
    fn totals_without_promo() {
        let totals = Totals::compute(Decimal::from(210), None);
        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(210));
    }

    #[test]
    fn totals_with_promo() {
        let totals = Totals::compute(Decimal::from(445), Some(PromoCode::Farmer10));
        assert_eq!(totals.discount, Decimal::from(45));
        assert_eq!(totals.total, Decimal::from(400));
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_rupees(Decimal::from(0)), "₨ 0");
        assert_eq!(format_rupees(Decimal::from(210)), "₨ 210");
        assert_eq!(format_rupees(Decimal::from(4500)), "₨ 4,500");
        assert_eq!(format_rupees(Decimal::from(1_234_567)), "₨ 1,234,567");
    }

    #[test]
    fn formats_fraction_only_when_present() {
        assert_eq!(format_rupees(Decimal::new(12_000, 2)), "₨ 120");
        assert_eq!(format_rupees(Decimal::new(123_450, 2)), "₨ 1,234.5");
        assert_eq!(format_rupees(Decimal::from(-1500)), "₨ -1,500");
    }
}
