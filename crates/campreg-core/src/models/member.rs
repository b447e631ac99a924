use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use super::Numeric;

/// Opaque member identifier assigned by the store.
/// The store sends it as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

struct MemberIdVisitor;

impl<'de> Visitor<'de> for MemberIdVisitor {
    type Value = MemberId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MemberId, E> {
        Ok(MemberId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MemberId, E> {
        Ok(MemberId(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MemberId, E> {
        Ok(MemberId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MemberIdVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Exact match against the stored text; anything else is unclassified.
    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    MPesa,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::MPesa,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::MPesa => "M-Pesa",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    pub fn from_stored(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registrant as exchanged with the member store.
///
/// Every field is optional on the wire; the required-at-creation rule is
/// enforced by the form reconciler, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MemberId>,

    // Identity
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: Numeric,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    // Affiliation
    pub church_name: Option<String>,
    pub denomination: Option<String>,
    pub pastor_name: Option<String>,

    // Emergency contact
    pub emergency_name: Option<String>,
    pub emergency_relationship: Option<String>,
    pub emergency_phone: Option<String>,
    pub emergency_alt_phone: Option<String>,

    // Medical
    pub allergies: Option<String>,
    pub chronic_illnesses: Option<String>,
    pub medications: Option<String>,

    // Consent
    pub consent_signature: Option<String>,
    pub consent_date: Option<String>,

    // Financial
    pub camp_fee: Numeric,
    pub deposit_paid: Numeric,
    pub balance: Numeric,

    // Payment
    pub payment_method: Option<String>,
    pub receipt_no: Option<String>,

    // Office use
    pub registration_no: Option<String>,
    pub date_received: Option<String>,
    pub checked_by: Option<String>,
}

impl MemberRecord {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::from_stored)
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method.as_deref().and_then(PaymentMethod::from_stored)
    }

    pub fn age_str(&self) -> String {
        self.age.whole().map(|a| a.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_from_number_or_string() {
        let a: MemberId = serde_json::from_str("42").unwrap();
        let b: MemberId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "42");
    }

    #[test]
    fn test_parse_store_record() {
        let json = r#"{
            "id": 7,
            "full_name": "Alice Wanjiru",
            "date_of_birth": "2004-03-01",
            "age": 20,
            "gender": "Female",
            "camp_fee": "5000",
            "deposit_paid": 2000,
            "balance": null,
            "payment_method": "M-Pesa",
            "allergies": null
        }"#;
        let m: MemberRecord = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, Some(MemberId::new("7")));
        assert_eq!(m.display_name(), "Alice Wanjiru");
        assert_eq!(m.gender(), Some(Gender::Female));
        assert_eq!(m.age_str(), "20");
        assert_eq!(m.camp_fee, Numeric::Number(5000.0));
        assert_eq!(m.deposit_paid, Numeric::Number(2000.0));
        assert_eq!(m.balance, Numeric::Empty);
        assert_eq!(m.payment_method(), Some(PaymentMethod::MPesa));
        assert_eq!(m.allergies, None);
        assert_eq!(m.checked_by, None);
    }

    #[test]
    fn test_gender_is_exact_match() {
        assert_eq!(Gender::from_stored("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_stored("male"), None);
        assert_eq!(Gender::from_stored(""), None);
    }

    #[test]
    fn test_new_record_omits_id() {
        let m = MemberRecord {
            full_name: Some("Beth".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&m).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["full_name"], "Beth");
        assert!(value["camp_fee"].is_null());
    }
}
