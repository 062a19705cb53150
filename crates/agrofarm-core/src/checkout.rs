//! Checkout form fields and their validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Easypaisa,
    Jazzcash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CashOnDelivery,
        PaymentMethod::Easypaisa,
        PaymentMethod::Jazzcash,
    ];

    /// Value sent to the API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
            PaymentMethod::Easypaisa => "easypaisa",
            PaymentMethod::Jazzcash => "jazzcash",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Easypaisa => "EasyPaisa",
            PaymentMethod::Jazzcash => "JazzCash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash-on-delivery" | "cod" => Ok(PaymentMethod::CashOnDelivery),
            "easypaisa" => Ok(PaymentMethod::Easypaisa),
            "jazzcash" => Ok(PaymentMethod::Jazzcash),
            other => Err(format!(
                "unknown payment method '{other}' (expected cash-on-delivery, easypaisa, or jazzcash)"
            )),
        }
    }
}

/// Text fields of [`CheckoutForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutField {
    FullName,
    PhoneNumber,
    Street,
    City,
    ZipCode,
    Notes,
}

impl CheckoutField {
    pub const REQUIRED: [CheckoutField; 4] = [
        CheckoutField::FullName,
        CheckoutField::PhoneNumber,
        CheckoutField::Street,
        CheckoutField::City,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CheckoutField::FullName => "Full Name",
            CheckoutField::PhoneNumber => "Phone Number",
            CheckoutField::Street => "Street",
            CheckoutField::City => "City",
            CheckoutField::ZipCode => "Zip Code",
            CheckoutField::Notes => "Notes",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CheckoutField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "fullname" | "name" => Ok(CheckoutField::FullName),
            "phonenumber" | "phone" => Ok(CheckoutField::PhoneNumber),
            "street" | "address" => Ok(CheckoutField::Street),
            "city" => Ok(CheckoutField::City),
            "zipcode" | "zip" => Ok(CheckoutField::ZipCode),
            "notes" | "note" => Ok(CheckoutField::Notes),
            _ => Err(format!("unknown checkout field '{s}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: CheckoutField,
    pub message: String,
}

/// Field-level validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: CheckoutField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn contains(&self, field: CheckoutField) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn push(&mut self, field: CheckoutField, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(|e| e.field.label()).collect();
        f.write_str(&labels.join(", "))
    }
}

/// Shipping and payment details collected by the checkout modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone_number: String,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub notes: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    #[must_use]
    pub fn value(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::FullName => &self.full_name,
            CheckoutField::PhoneNumber => &self.phone_number,
            CheckoutField::Street => &self.street,
            CheckoutField::City => &self.city,
            CheckoutField::ZipCode => &self.zip_code,
            CheckoutField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::FullName => &mut self.full_name,
            CheckoutField::PhoneNumber => &mut self.phone_number,
            CheckoutField::Street => &mut self.street,
            CheckoutField::City => &mut self.city,
            CheckoutField::ZipCode => &mut self.zip_code,
            CheckoutField::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Checks that every required field holds non-blank text.
    ///
    /// # Errors
    ///
    /// Returns every missing field at once, in form order.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for field in CheckoutField::REQUIRED {
            if self.value(field).trim().is_empty() {
                errors.push(field, format!("{} is required", field.label()));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
