use serde::{Deserialize, Serialize};

use super::{lenient, role::Role};

/// A student record, stored under its generation's key `K`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Student<K> {
    #[serde(rename = "_id")]
    pub id: K,
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub student_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub sub_exp_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_number")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub payment_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_role")]
    pub role: Option<Role>,
}

impl<K> Student<K> {
    pub fn new(id: K, name: &str, phone_number: &str, student_class: &str) -> Self {
        Student {
            id,
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            email: None,
            student_class: student_class.to_string(),
            sub_exp_date: None,
            updated_by: None,
            amount: None,
            payment_time: None,
            role: None,
        }
    }

    /// Records without a role are plain students.
    pub fn role(&self) -> Role {
        self.role.unwrap_or_default()
    }

    /// Paid while the expiry date is today or later. `today` is `YYYY-MM-DD`;
    /// stored dates are ISO-8601, so string order is date order.
    pub fn is_paid(&self, today: &str) -> bool {
        self.sub_exp_date
            .as_deref()
            .is_some_and(|date| date >= today)
    }
}

#[cfg(test)]
impl<K> Student<K> {
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::identity::Uid;

    #[test]
    fn test_student_creation() {
        let student = Student::new(Uid::new("uid-1"), "Asha", "+919876543210", "CLS7");
        assert_eq!(student.role(), Role::Student);
        assert!(student.amount.is_none());
        assert!(!student.is_paid("2026-01-01"));
    }

    #[test]
    fn test_payment_status_compares_dates() {
        let mut student = Student::new(Uid::new("uid-1"), "Asha", "+919876543210", "CLS7");
        student.sub_exp_date = Some("2026-10-19T08:00:00Z".to_string());

        assert!(student.is_paid("2026-10-19"));
        assert!(student.is_paid("2026-01-01"));
        assert!(!student.is_paid("2026-10-20"));
    }

    #[test]
    fn test_stored_under_id_key() {
        let student = Student::new(Uid::new("uid-9"), "Ravi", "+911234567890", "CLS8")
            .with_role(Role::Admin);
        let json = serde_json::to_value(&student).unwrap();

        assert_eq!(json["_id"], "uid-9");
        assert_eq!(json["role"], "admin");
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn test_legacy_record_with_odd_fields() {
        let student: Student<Uid> = serde_json::from_value(serde_json::json!({
            "_id": "uid-2",
            "name": "Kiran",
            "phone_number": "+919000000000",
            "student_class": "CLS10",
            "amount": "1499",
            "role": 7,
            "payment_time": ""
        }))
        .unwrap();

        assert_eq!(student.amount, Some(1499.0));
        assert_eq!(student.role(), Role::Student);
        assert_eq!(student.payment_time, None);
    }
}
