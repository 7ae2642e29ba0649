//! Promo codes and discount arithmetic.

use crate::{Result, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromoKind {
    /// `value` percent of the total, optionally capped.
    Percent,
    /// `value` rubles off.
    Fixed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromoCode {
    pub code: &'static str,
    pub kind: PromoKind,
    pub value: i64,
    pub max_discount: Option<i64>,
}

pub const REGISTRY: &[PromoCode] = &[
    PromoCode { code: "AROMA2025", kind: PromoKind::Percent, value: 10, max_discount: Some(1000) },
    PromoCode { code: "NEWYEAR", kind: PromoKind::Fixed, value: 500, max_discount: None },
    PromoCode { code: "WELCOME", kind: PromoKind::Percent, value: 5, max_discount: None },
];

fn normalize(input: &str) -> String { input.trim().to_uppercase() }

pub fn lookup(input: &str) -> Option<&'static PromoCode> {
    let code = normalize(input);
    REGISTRY.iter().find(|p| p.code == code)
}

/// Resolves user input to a registered code.
pub fn resolve(input: &str) -> Result<&'static PromoCode> {
    let code = normalize(input);
    if code.is_empty() { return Err(StoreError::EmptyPromoCode); }
    REGISTRY.iter().find(|p| p.code == code).ok_or(StoreError::InvalidPromoCode(code))
}

/// Discount in whole rubles, always within `0..=total`.
pub fn calculate_discount(total: i64, promo: Option<&PromoCode>) -> i64 {
    let Some(promo) = promo else { return 0 };
    let total = total.max(0);
    let discount = match promo.kind {
        PromoKind::Percent => {
            let raw = total.saturating_mul(promo.value) / 100;
            promo.max_discount.map_or(raw, |cap| raw.min(cap))
        }
        PromoKind::Fixed => promo.value,
    };
    discount.clamp(0, total)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
}

impl Totals {
    pub fn compute(subtotal: i64, promo: Option<&PromoCode>) -> Self {
        let discount = calculate_discount(subtotal, promo);
        Self { subtotal, discount, total: subtotal - discount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup(" welcome ").map(|p| p.code), Some("WELCOME"));
        assert!(lookup("bogus").is_none());
    }

    #[test]
    fn test_resolve_errors() {
        assert!(matches!(resolve("   "), Err(StoreError::EmptyPromoCode)));
        assert!(matches!(resolve("nope"), Err(StoreError::InvalidPromoCode(c)) if c == "NOPE"));
        assert_eq!(resolve("NewYear").unwrap().code, "NEWYEAR");
    }

    #[test]
    fn test_percent_capped() {
        let aroma = lookup("AROMA2025");
        assert_eq!(calculate_discount(20000, aroma), 1000);
        assert_eq!(Totals::compute(20000, aroma), Totals { subtotal: 20000, discount: 1000, total: 19000 });
        assert_eq!(calculate_discount(5000, aroma), 500);
    }

    #[test]
    fn test_percent_rounds_down() {
        assert_eq!(calculate_discount(1999, lookup("WELCOME")), 99);
    }

    #[test]
    fn test_fixed_never_exceeds_total() {
        let newyear = lookup("NEWYEAR");
        assert_eq!(calculate_discount(3000, newyear), 500);
        assert_eq!(calculate_discount(300, newyear), 300);
        assert_eq!(calculate_discount(0, newyear), 0);
        assert_eq!(calculate_discount(1000, None), 0);
    }

    #[test]
    fn test_discount_bounds_hold_for_every_code() {
        for promo in REGISTRY {
            for total in [0, 1, 99, 100, 499, 500, 501, 9999, 10000, 10001, 250_000] {
                let d = calculate_discount(total, Some(promo));
                assert!((0..=total).contains(&d), "{} on {total} gave {d}", promo.code);
            }
        }
    }
}
