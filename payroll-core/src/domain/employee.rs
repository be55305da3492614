//! Employee domain model

use rust_decimal::Decimal;
use serde::Serialize;

use super::result::{Error, Result};
use super::salary::Compensation;

/// A stored or about-to-be-stored compensation record
///
/// Fields are private so that `net_salary` can only change through the
/// mutators, each of which recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    emp_id: Option<i64>,
    name: String,
    designation: String,
    #[serde(flatten)]
    compensation: Compensation,
    net_salary: Decimal,
}

impl Employee {
    /// Build a new record from the base compensation fields
    ///
    /// Bonus and tax start at zero; set them with `with_bonus`/`with_tax`
    /// before the first `create`.
    pub fn new(
        name: impl Into<String>,
        designation: impl Into<String>,
        basic_salary: Decimal,
        hra: Decimal,
        da: Decimal,
        deductions: Decimal,
    ) -> Result<Self> {
        let name = name.into();
        let designation = designation.into();
        ensure_not_blank("name", &name)?;
        ensure_not_blank("designation", &designation)?;

        let compensation = Compensation::new(basic_salary, hra, da, deductions);
        compensation.validate()?;

        Ok(Self {
            emp_id: None,
            name,
            designation,
            net_salary: compensation.net_salary()?,
            compensation,
        })
    }

    /// Rebuild a record loaded from the store
    ///
    /// Stored rows are trusted; only the derived figure is recomputed.
    pub(crate) fn restore(
        emp_id: i64,
        name: String,
        designation: String,
        compensation: Compensation,
    ) -> Result<Self> {
        Ok(Self {
            emp_id: Some(emp_id),
            name,
            designation,
            net_salary: compensation.net_salary()?,
            compensation,
        })
    }

    pub fn with_bonus(mut self, bonus: Decimal) -> Result<Self> {
        self.set_bonus(bonus)?;
        Ok(self)
    }

    pub fn with_tax(mut self, tax: Decimal) -> Result<Self> {
        self.set_tax(tax)?;
        Ok(self)
    }

    /// Store-assigned id, `None` until created
    pub fn emp_id(&self) -> Option<i64> {
        self.emp_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn compensation(&self) -> &Compensation {
        &self.compensation
    }

    pub fn basic_salary(&self) -> Decimal {
        self.compensation.basic_salary
    }

    pub fn hra(&self) -> Decimal {
        self.compensation.hra
    }

    pub fn da(&self) -> Decimal {
        self.compensation.da
    }

    pub fn deductions(&self) -> Decimal {
        self.compensation.deductions
    }

    pub fn bonus(&self) -> Decimal {
        self.compensation.bonus
    }

    pub fn tax(&self) -> Decimal {
        self.compensation.tax
    }

    pub fn net_salary(&self) -> Decimal {
        self.net_salary
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        ensure_not_blank("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_designation(&mut self, designation: impl Into<String>) -> Result<()> {
        let designation = designation.into();
        ensure_not_blank("designation", &designation)?;
        self.designation = designation;
        Ok(())
    }

    pub fn set_basic_salary(&mut self, value: Decimal) -> Result<()> {
        self.change_compensation(|c| c.basic_salary = value)
    }

    pub fn set_hra(&mut self, value: Decimal) -> Result<()> {
        self.change_compensation(|c| c.hra = value)
    }

    pub fn set_da(&mut self, value: Decimal) -> Result<()> {
        self.change_compensation(|c| c.da = value)
    }

    pub fn set_deductions(&mut self, value: Decimal) -> Result<()> {
        self.change_compensation(|c| c.deductions = value)
    }

    pub fn set_bonus(&mut self, value: Decimal) -> Result<()> {
        self.change_compensation(|c| c.bonus = value)
    }

    pub fn set_tax(&mut self, value: Decimal) -> Result<()> {
        self.change_compensation(|c| c.tax = value)
    }

    /// Re-derive `net_salary` from the current components
    pub fn recalculate(&mut self) -> Result<()> {
        self.net_salary = self.compensation.net_salary()?;
        Ok(())
    }

    /// Apply `change` only if the result still validates
    fn change_compensation(&mut self, change: impl FnOnce(&mut Compensation)) -> Result<()> {
        let mut candidate = self.compensation;
        change(&mut candidate);
        candidate.validate()?;
        self.net_salary = candidate.net_salary()?;
        self.compensation = candidate;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, emp_id: i64) {
        self.emp_id = Some(emp_id);
    }
}

fn ensure_not_blank(label: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} cannot be empty", label)));
    }
    Ok(())
}
