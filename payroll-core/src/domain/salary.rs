//! Net salary derivation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// The six amounts that feed the net salary rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Compensation {
    pub basic_salary: Decimal,
    /// House rent allowance
    pub hra: Decimal,
    /// Dearness allowance
    pub da: Decimal,
    pub deductions: Decimal,
    pub bonus: Decimal,
    pub tax: Decimal,
}

impl Compensation {
    /// Base components with bonus and tax at zero
    pub fn new(basic_salary: Decimal, hra: Decimal, da: Decimal, deductions: Decimal) -> Self {
        Self {
            basic_salary,
            hra,
            da,
            deductions,
            bonus: Decimal::ZERO,
            tax: Decimal::ZERO,
        }
    }

    /// Derived net salary for these components
    pub fn net_salary(&self) -> Result<Decimal> {
        net_salary(self)
    }

    /// Every component must be a storable non-negative amount, and so must
    /// fit the derived net salary
    pub fn validate(&self) -> Result<()> {
        let components = [
            ("basic salary", self.basic_salary),
            ("HRA", self.hra),
            ("DA", self.da),
            ("deductions", self.deductions),
            ("bonus", self.bonus),
            ("tax", self.tax),
        ];
        for (label, value) in components {
            ensure_non_negative(label, value)?;
        }
        ensure_in_range("net salary", self.net_salary()?)
    }
}

/// (basic + hra + da + bonus) - (deductions + tax)
///
/// Overflow is a validation error rather than a panic.
pub fn net_salary(c: &Compensation) -> Result<Decimal> {
    let overflow = || Error::validation("net salary is out of range");
    let earnings = c
        .basic_salary
        .checked_add(c.hra)
        .and_then(|v| v.checked_add(c.da))
        .and_then(|v| v.checked_add(c.bonus))
        .ok_or_else(overflow)?;
    let withheld = c.deductions.checked_add(c.tax).ok_or_else(overflow)?;
    earnings.checked_sub(withheld).ok_or_else(overflow)
}

/// Amounts are stored as DECIMAL(18, 2)
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a DECIMAL(18, 2) column holds: 9999999999999999.99
pub const MAX_MONEY: Decimal = Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, MONEY_SCALE);

/// Non-negative, storable, with at most two decimal places
fn ensure_non_negative(label: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::validation(format!("{} cannot be negative", label)));
    }
    ensure_in_range(label, value)
}

/// Within +/- MAX_MONEY with at most two decimal places
fn ensure_in_range(label: &str, value: Decimal) -> Result<()> {
    if value.abs() > MAX_MONEY {
        return Err(Error::validation(format!(
            "{} cannot exceed {}",
            label, MAX_MONEY
        )));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(Error::validation(format!(
            "{} cannot have more than {} decimal places",
            label, MONEY_SCALE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_net_salary_formula() {
        let mut c = Compensation::new(dec("30000"), dec("5000"), dec("2500.50"), dec("1200"));
        c.bonus = dec("1000");
        c.tax = dec("3000.25");

        assert_eq!(c.net_salary().unwrap(), dec("34300.25"));
    }

    #[test]
    fn test_bonus_and_tax_default_to_zero() {
        let c = Compensation::new(dec("100"), dec("10"), dec("5"), dec("15"));
        assert_eq!(c.bonus, Decimal::ZERO);
        assert_eq!(c.tax, Decimal::ZERO);
        assert_eq!(c.net_salary().unwrap(), dec("100"));
    }

    #[test]
    fn test_net_salary_can_go_negative() {
        let mut c = Compensation::new(dec("100"), Decimal::ZERO, Decimal::ZERO, dec("90"));
        c.tax = dec("20");
        assert_eq!(c.net_salary().unwrap(), dec("-10"));
    }

    #[test]
    fn test_validate_rejects_negative_component() {
        let mut c = Compensation::new(dec("100"), dec("10"), dec("5"), dec("15"));
        assert!(c.validate().is_ok());

        c.tax = dec("-0.01");
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("tax cannot be negative"));
    }

    #[test]
    fn test_validate_rejects_sub_cent_amounts() {
        let c = Compensation::new(dec("100.005"), dec("10"), dec("5"), dec("15"));
        assert!(c.validate().is_err());

        // Trailing zeros beyond the scale are fine
        let c = Compensation::new(dec("100.5000"), dec("10"), dec("5"), dec("15"));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_max_money_matches_column() {
        assert_eq!(MAX_MONEY, dec("9999999999999999.99"));
    }

    #[test]
    fn test_overflowing_sum_is_validation_error() {
        let c = Compensation::new(Decimal::MAX, Decimal::MAX, Decimal::ZERO, Decimal::ZERO);
        assert!(matches!(net_salary(&c), Err(Error::Validation(_))));
        assert!(matches!(c.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_component_range_follows_column() {
        let c = Compensation::new(MAX_MONEY, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert!(c.validate().is_ok());

        let c = Compensation::new(dec("100000000000000000"), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("basic salary cannot exceed"));
    }

    #[test]
    fn test_net_salary_must_fit_column() {
        // Each component fits, their sum does not
        let c = Compensation::new(MAX_MONEY, dec("0.01"), Decimal::ZERO, Decimal::ZERO);
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("net salary cannot exceed"));

        let mut c = Compensation::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, MAX_MONEY);
        c.tax = MAX_MONEY;
        assert!(matches!(c.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        assert!(ensure_non_negative("hra", -Decimal::ZERO).is_ok());
    }
}
