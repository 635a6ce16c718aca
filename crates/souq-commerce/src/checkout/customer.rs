//! Customer details collected at checkout.

use std::fmt;

use crate::checkout::CheckoutError;
use serde::{Deserialize, Serialize};

/// Cities offered in the checkout city picker.
pub const SYRIAN_CITIES: [&str; 14] = [
    "دمشق",
    "حلب",
    "حمص",
    "حماة",
    "اللاذقية",
    "دير الزور",
    "الرقة",
    "درعا",
    "السويداء",
    "القنيطرة",
    "طرطوس",
    "إدلب",
    "الحسكة",
    "ريف دمشق",
];

/// Who is ordering and where it goes.
///
/// Field names match the order submission payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CustomerDetails {
    pub customer_first_name: String,
    pub customer_father_name: String,
    pub customer_last_name: String,
    pub customer_phone: String,
    pub city: String,
    pub street: String,
    /// Detailed address (building, floor, landmarks).
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl CustomerDetails {
    /// Full name in the order it is written on a parcel.
    pub fn full_name(&self) -> String {
        [
            self.customer_first_name.trim(),
            self.customer_father_name.trim(),
            self.customer_last_name.trim(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::Validation(errors))
        }
    }

    /// Every field problem, in form order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let required = [
            ("customer_first_name", &self.customer_first_name),
            ("customer_father_name", &self.customer_father_name),
            ("customer_last_name", &self.customer_last_name),
            ("customer_phone", &self.customer_phone),
            ("city", &self.city),
            ("street", &self.street),
            ("address", &self.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, FieldProblem::Required));
            } else if field == "customer_phone" && !is_valid_phone(value) {
                errors.push(FieldError::new(field, FieldProblem::InvalidPhone));
            }
        }
        errors
    }
}

/// 10 to 15 characters drawn from digits, `+`, `-`, spaces and parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    let len = phone.chars().count();
    (10..=15).contains(&len)
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')') || c.is_whitespace())
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Required,
    InvalidPhone,
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub problem: FieldProblem,
}

impl FieldError {
    pub fn new(field: impl Into<String>, problem: FieldProblem) -> Self {
        Self {
            field: field.into(),
            problem,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Required => write!(f, "{} is required", self.field),
            FieldProblem::InvalidPhone => write!(f, "{} is not a valid phone number", self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> CustomerDetails {
        CustomerDetails {
            customer_first_name: "Rami".into(),
            customer_father_name: "Khaled".into(),
            customer_last_name: "Haddad".into(),
            customer_phone: "+963 944123456".into(),
            city: SYRIAN_CITIES[0].into(),
            street: "Baghdad St".into(),
            address: "Building 4, floor 2".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_complete_details_validate() {
        assert!(complete().validate().is_ok());
        assert_eq!(complete().full_name(), "Rami Khaled Haddad");
    }

    #[test]
    fn test_blank_fields_are_required() {
        let mut details = complete();
        details.customer_father_name = "   ".into();
        details.street.clear();

        let errors = details.field_errors();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["customer_father_name", "street"]);
        assert!(errors.iter().all(|e| e.problem == FieldProblem::Required));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("0944123456"));
        assert!(is_valid_phone("(011) 123-4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("0944-123-456-789-0"));
        assert!(!is_valid_phone("0944l23456"));

        let mut details = complete();
        details.customer_phone = "call me".into();
        let errors = details.field_errors();
        assert_eq!(errors, vec![FieldError::new("customer_phone", FieldProblem::InvalidPhone)]);
        assert_eq!(errors[0].to_string(), "customer_phone is not a valid phone number");
        assert!(matches!(
            details.validate(),
            Err(CheckoutError::Validation(errors)) if errors.len() == 1
        ));
    }

    #[test]
    fn test_notes_are_optional_and_omitted() {
        let json = serde_json::to_value(complete()).unwrap();
        assert!(json.get("notes").is_none());
        assert_eq!(json["street"], "Baghdad St");
    }
}
