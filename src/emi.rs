//! Equated monthly installment (EMI) calculation.
//!
//! The installment is the fixed payment that amortizes `principal` over
//! `term_months` equal payments at `annual_rate_percent / 12 / 100` per month.
//! Non-finite outcomes are reported as [`EmiError::NotComputable`], never as a
//! value.

use std::fmt;
use thiserror::Error;

/// Which calculator input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanField {
    Principal,
    AnnualRate,
    Term,
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoanField::Principal => "loan amount",
            LoanField::AnnualRate => "interest rate",
            LoanField::Term => "loan tenure",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmiError {
    #[error("{field} must be a positive number")]
    InvalidInput { field: LoanField },
    #[error("installment could not be calculated for these inputs")]
    NotComputable,
}

/// Validated calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    principal: f64,
    annual_rate_percent: f64,
    term_months: f64,
}

impl LoanQuote {
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: f64) -> Result<Self, EmiError> {
        Ok(Self {
            principal: positive(principal, LoanField::Principal)?,
            annual_rate_percent: positive(annual_rate_percent, LoanField::AnnualRate)?,
            term_months: positive(term_months, LoanField::Term)?,
        })
    }

    /// Builds a quote from raw text fields. Surrounding whitespace is ignored;
    /// anything else that is not a plain decimal number is rejected.
    pub fn parse(principal: &str, annual_rate_percent: &str, term_months: &str) -> Result<Self, EmiError> {
        Self::new(
            parse_field(principal, LoanField::Principal)?,
            parse_field(annual_rate_percent, LoanField::AnnualRate)?,
            parse_field(term_months, LoanField::Term)?,
        )
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn term_months(&self) -> f64 {
        self.term_months
    }

    /// Monthly rate as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }

    pub fn installment(&self) -> Result<Installment, EmiError> {
        let r = self.monthly_rate();
        let growth = (1.0 + r).powf(self.term_months);
        let amount = (self.principal * r * growth) / (growth - 1.0);

        if amount.is_finite() && amount >= 0.0 {
            Ok(Installment { amount })
        } else {
            Err(EmiError::NotComputable)
        }
    }
}

/// Computes the fixed monthly payment for the given loan.
pub fn compute_installment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: f64,
) -> Result<Installment, EmiError> {
    LoanQuote::new(principal, annual_rate_percent, term_months)?.installment()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Installment {
    amount: f64,
}

impl Installment {
    /// Raw double-precision amount, unrounded.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn total_payable(&self, quote: &LoanQuote) -> f64 {
        self.amount * quote.term_months()
    }

    pub fn total_interest(&self, quote: &LoanQuote) -> f64 {
        self.total_payable(quote) - quote.principal()
    }

    /// Two decimals with `,` thousands separators, e.g. `8,884.88`.
    pub fn formatted(&self) -> String {
        format_amount(self.amount)
    }
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Formats a non-negative amount with two decimals and grouped thousands.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

fn parse_field(raw: &str, field: LoanField) -> Result<f64, EmiError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| EmiError::InvalidInput { field })
}

fn positive(value: f64, field: LoanField) -> Result<f64, EmiError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EmiError::InvalidInput { field })
    }
}
