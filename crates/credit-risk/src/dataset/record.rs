use std::fmt;

use serde::Serialize;

/// Historical credit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Risk {
    Good,
    Bad,
}

impl Risk {
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Risk::Good),
            "2" => Some(Risk::Bad),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Risk::Good => "Good",
            Risk::Bad => "Bad",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One decoded row of the German Credit dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditRecord {
    pub checking_account_status: &'static str,
    pub duration_months: u32,
    pub credit_history: &'static str,
    pub purpose: &'static str,
    pub credit_amount: u32,
    pub savings_account: &'static str,
    pub employment_duration: &'static str,
    /// Installment as a percentage band (1-4) of disposable income.
    pub installment_rate: u8,
    pub personal_status_sex: &'static str,
    pub other_debtors: &'static str,
    pub present_residence_since: u8,
    pub property: &'static str,
    pub age_years: u32,
    pub other_installment_plans: &'static str,
    pub housing: &'static str,
    pub existing_credits: u8,
    pub job: &'static str,
    pub dependents: u8,
    pub telephone: &'static str,
    pub foreign_worker: &'static str,
    pub risk: Risk,
}

impl CreditRecord {
    pub fn is_bad(&self) -> bool {
        self.risk == Risk::Bad
    }
}
