//! Batch intake of applicant rows exported from the advisory lead sheet.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{Applicant, EmploymentType};

/// Parse applicants from a CSV export.
///
/// Structural CSV problems (ragged rows, broken quoting) surface as errors;
/// field-level problems do not. A blank or unparsable cell becomes `None`
/// and downstream predicates fail closed on it.
pub fn parse_applicants<R: Read>(reader: R) -> Result<Vec<Applicant>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut applicants = Vec::new();

    for record in csv_reader.deserialize::<ApplicantRow>() {
        let row = record?;
        applicants.push(row.into_applicant());
    }

    Ok(applicants)
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    #[serde(
        rename = "Monthly Income",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    monthly_income: Option<String>,
    #[serde(
        rename = "Credit Score",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    credit_score: Option<String>,
    #[serde(
        rename = "Current EMI",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    current_emi: Option<String>,
    #[serde(
        rename = "Loan Amount",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    loan_amount: Option<String>,
    #[serde(
        rename = "Tenure Months",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    tenure_months: Option<String>,
    #[serde(
        rename = "Employment Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    employment_type: Option<String>,
}

impl ApplicantRow {
    fn into_applicant(self) -> Applicant {
        Applicant {
            monthly_income: parse_amount(self.monthly_income.as_deref()),
            credit_score: parse_integer::<u16>(self.credit_score.as_deref()),
            current_emi: parse_amount(self.current_emi.as_deref()),
            loan_amount: parse_amount(self.loan_amount.as_deref()),
            loan_tenure_months: parse_integer::<u32>(self.tenure_months.as_deref()),
            employment_type: self
                .employment_type
                .as_deref()
                .and_then(EmploymentType::parse_label),
        }
    }
}

/// Lead sheets format amounts with rupee signs and grouping commas.
fn parse_amount(value: Option<&str>) -> Option<f64> {
    let cleaned: String = value?
        .chars()
        .filter(|c| *c != ',' && *c != '₹')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn parse_integer<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value?.trim().parse::<T>().ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
