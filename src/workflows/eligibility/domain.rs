use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for an offer tier declared in a rulebook.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TierId(pub String);

impl TierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TierId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Flat applicant snapshot collected by the advisory intake form.
///
/// Every field is optional at the edge: predicates treat an absent or
/// unparsable value as failing the check, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub credit_score: Option<u16>,
    #[serde(default)]
    pub current_emi: Option<f64>,
    #[serde(default)]
    pub loan_amount: Option<f64>,
    #[serde(default)]
    pub loan_tenure_months: Option<u32>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
}

/// Employment categories the advisory vertical distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    Business,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::Salaried => "salaried",
            EmploymentType::SelfEmployed => "self-employed",
            EmploymentType::Business => "business",
        }
    }

    /// Lenient parser shared by the CLI and CSV intake.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "salaried" => Some(EmploymentType::Salaried),
            "self-employed" | "self employed" | "self_employed" => {
                Some(EmploymentType::SelfEmployed)
            }
            "business" => Some(EmploymentType::Business),
            _ => None,
        }
    }
}

/// Render a rupee amount with Indian digit grouping (e.g. 15,00,000).
///
/// Reason strings quote thresholds the way the advisory pages display them.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let rupees = rounded.abs() as u64;
    let digits = rupees.to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts = Vec::new();
        let head_bytes = head.as_bytes();
        let mut index = head_bytes.len();
        while index > 2 {
            parts.push(&head[index - 2..index]);
            index -= 2;
        }
        parts.push(&head[..index]);
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
