//! # Boundary Input Normalization
//!
//! Calculation requests arrive as untyped JSON: each amount may be a number
//! or a numeric-looking string, and any field may be missing. [`RawTaxInput`]
//! captures the payload without interpreting it, and [`RawTaxInput::parse`]
//! produces a validated [`TaxInput`] or a [`ValidationError`]. Nothing is
//! computed from a payload that fails validation.
//!
//! ## Coercion Rules
//!
//! - JSON numbers are used as-is.
//! - Strings are left-trimmed and the longest leading decimal literal is
//!   parsed: `"12abc"` is 12, `" 7.5"` is 7.5, `"abc"` fails.
//! - `null`, booleans, arrays and objects fail.
//! - A coerced value that is not finite fails.
//!
//! A JSON `null` counts as *present*: it is reported as an invalid number,
//! not as a missing field.

use serde_json::Value;

use crate::engine::{compute_tax, TaxResult};
use crate::error::ValidationError;

pub const ANNUAL_INCOME: &str = "annualIncome";
pub const INVESTMENTS: &str = "investments";
pub const OTHER_DEDUCTIONS: &str = "otherDeductions";
pub const OTHER_INCOME: &str = "otherIncome";
pub const USER_NAME: &str = "userName";
pub const USER_EMAIL: &str = "userEmail";

/// Untyped calculation payload. `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTaxInput {
    pub annual_income: Option<Value>,
    pub investments: Option<Value>,
    pub other_deductions: Option<Value>,
    pub other_income: Option<Value>,
    pub user_name: Option<Value>,
    pub user_email: Option<Value>,
}

/// Validated amounts, all finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxInput {
    pub annual_income: f64,
    pub investments: f64,
    pub other_deductions: f64,
    pub other_income: f64,
}

/// Who submitted a calculation. Only the persistence layer reads this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub user_name: String,
    pub user_email: String,
}

impl RawTaxInput {
    /// Capture the recognised fields of a JSON payload.
    ///
    /// Anything other than an object is treated as a payload with no fields.
    pub fn from_json(body: &Value) -> Self {
        let Some(map) = body.as_object() else {
            return Self::default();
        };
        Self {
            annual_income: map.get(ANNUAL_INCOME).cloned(),
            investments: map.get(INVESTMENTS).cloned(),
            other_deductions: map.get(OTHER_DEDUCTIONS).cloned(),
            other_income: map.get(OTHER_INCOME).cloned(),
            user_name: map.get(USER_NAME).cloned(),
            user_email: map.get(USER_EMAIL).cloned(),
        }
    }

    /// Build a payload from four textual amounts, as typed into a form.
    pub fn from_text(
        annual_income: &str,
        investments: &str,
        other_deductions: &str,
        other_income: &str,
    ) -> Self {
        Self {
            annual_income: Some(Value::String(annual_income.to_string())),
            investments: Some(Value::String(investments.to_string())),
            other_deductions: Some(Value::String(other_deductions.to_string())),
            other_income: Some(Value::String(other_income.to_string())),
            ..Self::default()
        }
    }

    /// Validate and coerce the four amounts.
    ///
    /// Presence of every field is checked before any coercion, so a payload
    /// with one missing and one malformed field reports the missing field.
    pub fn parse(&self) -> Result<TaxInput, ValidationError> {
        let (Some(income), Some(investments), Some(deductions), Some(other)) = (
            self.annual_income.as_ref(),
            self.investments.as_ref(),
            self.other_deductions.as_ref(),
            self.other_income.as_ref(),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        Ok(TaxInput {
            annual_income: finite_number(ANNUAL_INCOME, income)?,
            investments: finite_number(INVESTMENTS, investments)?,
            other_deductions: finite_number(OTHER_DEDUCTIONS, deductions)?,
            other_income: finite_number(OTHER_INCOME, other)?,
        })
    }

    /// Extract the submitter identity required when submissions are stored.
    ///
    /// Strings are taken verbatim; numbers and booleans are stringified.
    /// Absent, `null` and structured values count as missing.
    pub fn submitter(&self) -> Result<Submitter, ValidationError> {
        let user_name = self.user_name.as_ref().and_then(scalar_text);
        let user_email = self.user_email.as_ref().and_then(scalar_text);
        match (user_name, user_email) {
            (Some(user_name), Some(user_email)) => Ok(Submitter {
                user_name,
                user_email,
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }
}

impl TaxInput {
    /// Run the tax engine over these amounts.
    pub fn compute(&self) -> TaxResult {
        compute_tax(
            self.annual_income,
            self.investments,
            self.other_deductions,
            self.other_income,
        )
    }
}

fn finite_number(field: &'static str, value: &Value) -> Result<f64, ValidationError> {
    coerce_number(value)
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidNumber { field })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce an untyped scalar to a number. `None` means "not a number".
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse the longest leading decimal literal of `text`.
///
/// Grammar after leading whitespace:
/// `[+-] ( "Infinity" | digits [ "." digits ] | "." digits ) [ (e|E) [+-] digits ]`.
/// Trailing characters are ignored. Returns `None` when no literal starts
/// the string.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    if s[pos..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = pos;
    pos = skip_digits(bytes, pos);
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_end = skip_digits(bytes, pos + 1);
        frac_digits = &s[pos + 1..frac_end];
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            pos = frac_end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = String::new();
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp_pos = pos + 1;
        let exp_sign = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                "-"
            }
            Some(b'+') => {
                exp_pos += 1;
                ""
            }
            _ => "",
        };
        let exp_end = skip_digits(bytes, exp_pos);
        if exp_end > exp_pos {
            exponent = format!("e{exp_sign}{}", &s[exp_pos..exp_end]);
        }
    }

    let literal = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent,
    );
    literal.parse::<f64>().ok()
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AMOUNT_FIELDS: [&str; 4] = [ANNUAL_INCOME, INVESTMENTS, OTHER_DEDUCTIONS, OTHER_INCOME];

    fn complete_payload() -> Value {
        json!({
            "annualIncome": "1200000",
            "investments": 150000,
            "otherDeductions": "50000",
            "otherIncome": 0
        })
    }

    // -- Prefix parsing --

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_float_prefix("1200000"), Some(1_200_000.0));
        assert_eq!(parse_float_prefix("-42.5"), Some(-42.5));
        assert_eq!(parse_float_prefix("+3"), Some(3.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("2.5E-1"), Some(0.25));
    }

    #[test]
    fn parses_leading_prefix_only() {
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix("  7.5 rupees"), Some(7.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("1e+"), Some(1.0));
        assert_eq!(parse_float_prefix("3.2.1"), Some(3.2));
        assert_eq!(parse_float_prefix("1,00,000"), Some(1.0));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("   "), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("e5"), None);
        assert_eq!(parse_float_prefix("NaN"), None);
    }

    #[test]
    fn recognises_infinity_literal() {
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("-Infinityx"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("infinity"), None);
    }

    // -- Scalar coercion --

    #[test]
    fn coerces_numbers_and_strings_only() {
        assert_eq!(coerce_number(&json!(10)), Some(10.0));
        assert_eq!(coerce_number(&json!(10.25)), Some(10.25));
        assert_eq!(coerce_number(&json!("10")), Some(10.0));
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!({"v": 1})), None);
    }

    // -- Payload validation --

    #[test]
    fn parses_complete_payload() {
        let input = RawTaxInput::from_json(&complete_payload()).parse().unwrap();
        assert_eq!(
            input,
            TaxInput {
                annual_income: 1_200_000.0,
                investments: 150_000.0,
                other_deductions: 50_000.0,
                other_income: 0.0,
            }
        );
        assert_eq!(input.compute().taxable_income, 1_000_000.0);
    }

    #[test]
    fn each_missing_field_is_rejected() {
        for field in AMOUNT_FIELDS {
            let mut body = complete_payload();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(
                RawTaxInput::from_json(&body).parse(),
                Err(ValidationError::MissingFields),
                "omitting {field}"
            );
        }
    }

    #[test]
    fn each_non_numeric_field_is_rejected() {
        for field in AMOUNT_FIELDS {
            let mut body = complete_payload();
            body[field] = json!("abc");
            assert_eq!(
                RawTaxInput::from_json(&body).parse(),
                Err(ValidationError::InvalidNumber { field }),
                "non-numeric {field}"
            );
        }
    }

    #[test]
    fn null_is_present_but_invalid() {
        let mut body = complete_payload();
        body["otherIncome"] = Value::Null;
        assert_eq!(
            RawTaxInput::from_json(&body).parse(),
            Err(ValidationError::InvalidNumber {
                field: OTHER_INCOME
            })
        );
    }

    #[test]
    fn missing_wins_over_invalid() {
        let body = json!({
            "annualIncome": "abc",
            "investments": 0,
            "otherDeductions": 0
        });
        assert_eq!(
            RawTaxInput::from_json(&body).parse(),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn long_decimals_parse_identically_as_number_or_text() {
        for literal in [
            "26928070987.05026147895004",
            "746010588305293.3492408159",
            "1234567.8901234567890123456789",
        ] {
            let as_number: Value = serde_json::from_str(literal).unwrap();
            let from_number = coerce_number(&as_number).unwrap();
            let from_text = coerce_number(&Value::String(literal.to_string())).unwrap();
            assert_eq!(from_number.to_bits(), from_text.to_bits(), "{literal}");
            assert_eq!(from_number.to_bits(), literal.parse::<f64>().unwrap().to_bits());
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut body = complete_payload();
        body["annualIncome"] = json!("Infinity");
        assert!(matches!(
            RawTaxInput::from_json(&body).parse(),
            Err(ValidationError::InvalidNumber { .. })
        ));
        body["annualIncome"] = json!("1e400");
        assert!(RawTaxInput::from_json(&body).parse().is_err());
    }

    #[test]
    fn non_object_payload_has_no_fields() {
        for body in [json!([1, 2, 3]), json!("text"), Value::Null] {
            assert_eq!(
                RawTaxInput::from_json(&body).parse(),
                Err(ValidationError::MissingFields)
            );
        }
    }

    #[test]
    fn from_text_goes_through_same_coercion() {
        let input = RawTaxInput::from_text("900000", "0", "0", "1e5").parse().unwrap();
        assert_eq!(input.other_income, 100_000.0);
        assert!(RawTaxInput::from_text("900000", "x", "0", "0").parse().is_err());
    }

    // -- Submitter --

    #[test]
    fn submitter_requires_both_fields() {
        let mut body = complete_payload();
        body["userName"] = json!("Asha");
        assert_eq!(
            RawTaxInput::from_json(&body).submitter(),
            Err(ValidationError::MissingFields)
        );
        body["userEmail"] = json!("asha@example.in");
        assert_eq!(
            RawTaxInput::from_json(&body).submitter().unwrap(),
            Submitter {
                user_name: "Asha".to_string(),
                user_email: "asha@example.in".to_string(),
            }
        );
    }

    #[test]
    fn submitter_stringifies_scalars_and_rejects_null() {
        let mut body = complete_payload();
        body["userName"] = json!(42);
        body["userEmail"] = json!(true);
        let submitter = RawTaxInput::from_json(&body).submitter().unwrap();
        assert_eq!(submitter.user_name, "42");
        assert_eq!(submitter.user_email, "true");

        body["userEmail"] = Value::Null;
        assert!(RawTaxInput::from_json(&body).submitter().is_err());
    }
}
