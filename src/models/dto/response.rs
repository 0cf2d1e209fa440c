use serde::Serialize;

use crate::models::domain::{catalog, Role, Student, StudentKey};

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

/// A student's own view of their record.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfileDto {
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone_number: String,
    pub name: String,
    pub student_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_exp_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_time: Option<String>,
    pub role: Role,
    pub payment_status: PaymentStatus,
    pub subjects: Vec<String>,
    pub upgradable_classes: Vec<String>,
}

impl StudentProfileDto {
    /// `today` is `YYYY-MM-DD`.
    pub fn build<K: StudentKey>(student: Student<K>, today: &str) -> Self {
        let payment_status = if student.is_paid(today) {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        };

        StudentProfileDto {
            student_id: student.id.to_string(),
            role: student.role(),
            payment_status,
            subjects: catalog::subjects_for_class(&student.student_class)
                .into_iter()
                .map(str::to_string)
                .collect(),
            upgradable_classes: catalog::upgradable_classes(&student.student_class)
                .iter()
                .map(|c| c.to_string())
                .collect(),
            email: student.email,
            phone_number: student.phone_number,
            name: student.name,
            student_class: student.student_class,
            sub_exp_date: student.sub_exp_date,
            updated_by: student.updated_by,
            amount: student.amount,
            payment_time: student.payment_time,
        }
    }
}

/// What an admin sees when looking another student up.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecordDto {
    pub student_id: String,
    pub name: String,
    pub student_class: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_exp_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_time: Option<String>,
    pub role: Role,
}

impl<K: StudentKey> From<Student<K>> for StudentRecordDto {
    fn from(student: Student<K>) -> Self {
        StudentRecordDto {
            student_id: student.id.to_string(),
            role: student.role(),
            name: student.name,
            student_class: student.student_class,
            phone_number: student.phone_number,
            email: student.email,
            sub_exp_date: student.sub_exp_date,
            updated_by: student.updated_by,
            amount: student.amount,
            payment_time: student.payment_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassUpgradeResponse {
    pub message: String,
    pub student_id: String,
    pub old_class: String,
    pub new_class: String,
}
