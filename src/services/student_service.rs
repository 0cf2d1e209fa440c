use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use validator::Validate;

use crate::{
    auth::{authorize, Capability, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{catalog, Contact, Role, Student, StudentKey},
        dto::{
            request::{ClassUpgradeRequest, RegisterStudentRequest, UpdateStudentRequest},
            response::{ClassUpgradeResponse, StudentProfileDto, StudentRecordDto},
        },
    },
    repositories::{QuizAttemptRepository, StudentRepository},
};

const PAYMENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub struct StudentService<K: StudentKey> {
    repository: Arc<dyn StudentRepository<K>>,
    attempts: Arc<dyn QuizAttemptRepository<K>>,
}

impl<K: StudentKey> StudentService<K> {
    pub fn new(repository: Arc<dyn StudentRepository<K>>, attempts: Arc<dyn QuizAttemptRepository<K>>) -> Self {
        Self {
            repository,
            attempts,
        }
    }

    async fn find_student(&self, id: &K) -> AppResult<Student<K>> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Student<K>> {
        let contact: Contact = identifier.parse()?;
        self.repository
            .find_by_contact(&contact)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// The caller's role as stored on their own record. Callers without a
    /// record are plain students.
    pub async fn role_of(&self, id: &K) -> AppResult<Role> {
        let student = self.repository.find(id).await?;
        Ok(student.map(|s| s.role()).unwrap_or_default())
    }

    /// Fail with `Forbidden` unless the caller may perform `capability`.
    pub async fn require(&self, id: &K, capability: Capability) -> AppResult<Role> {
        let role = self.role_of(id).await?;
        authorize(role, capability).inspect_err(|_| {
            log::warn!("Denied {:?} to {} with role {}", capability, id, role);
        })?;
        Ok(role)
    }

    pub async fn register(&self, id: &K, claims: &Claims, request: &RegisterStudentRequest) -> AppResult<Student<K>> {
        let request = request.trimmed();
        request.validate()?;

        let mut student = Student::new(
            id.clone(),
            &request.name,
            &request.phone_number,
            &request.student_class,
        );
        student.email = claims.email.as_deref().map(|e| e.trim().to_lowercase());

        let student = self.repository.insert(student).await?;
        log::info!("Registered student {} in class {}", id, student.student_class);
        Ok(student)
    }

    /// The caller's profile. Contact details come from the verified token
    /// when it carries them.
    pub async fn profile(&self, id: &K, claims: &Claims) -> AppResult<StudentProfileDto> {
        let mut student = self.find_student(id).await?;

        if let Some(email) = &claims.email {
            student.email = Some(email.clone());
        }
        if let Some(phone_number) = &claims.phone_number {
            student.phone_number = phone_number.clone();
        }

        let today = Utc::now().format("%Y-%m-%d").to_string();
        Ok(StudentProfileDto::build(student, &today))
    }

    pub async fn lookup(&self, caller: &K, identifier: &str) -> AppResult<StudentRecordDto> {
        self.require(caller, Capability::ManageStudents).await?;
        let student = self.find_by_identifier(identifier).await?;
        Ok(student.into())
    }

    /// Admin edit of the student named by `identifier`. A positive amount
    /// renews the subscription for a year from now.
    pub async fn update(
        &self,
        caller: &K,
        claims: &Claims,
        identifier: &str,
        request: &UpdateStudentRequest,
    ) -> AppResult<()> {
        let role = self.require(caller, Capability::ManageStudents).await?;
        if request.is_subscription_update() {
            authorize(role, Capability::ManageSubscriptions)?;
        }

        let mut student = self.find_by_identifier(identifier).await?;
        log::info!("{} updating student {}", caller, student.id);

        if !request.name.is_empty() {
            student.name = request.name.clone();
        }
        if !request.phone_number.is_empty() {
            student.phone_number = request.phone_number.clone();
        }
        if !request.student_class.is_empty() {
            student.student_class = request.student_class.clone();
        }

        if request.is_subscription_update() {
            let updated_by = if request.updated_by.is_empty() {
                claims.email.clone().unwrap_or_else(|| caller.to_string())
            } else {
                request.updated_by.clone()
            };
            renew_subscription(&mut student, request.amount, updated_by, Utc::now())?;
        }

        self.repository.save(student).await?;
        Ok(())
    }

    /// Move the caller to the next class. All of their attempts are removed
    /// so progress starts over.
    pub async fn upgrade_class(&self, id: &K, request: &ClassUpgradeRequest) -> AppResult<ClassUpgradeResponse> {
        let new_class = request.new_class.trim();
        if new_class.is_empty() {
            return Err(AppError::BadRequest("Missing 'newClass' parameter".to_string()));
        }

        let mut student = self.find_student(id).await?;
        let old_class = student.student_class.clone();

        if !catalog::is_valid_upgrade(&old_class, new_class) {
            return Err(AppError::BadRequest("Invalid class upgrade path".to_string()));
        }

        let removed = self.attempts.delete_by_student(id).await?;
        log::info!(
            "Upgrading {} from {} to {}, removed {} attempts",
            id,
            old_class,
            new_class,
            removed
        );

        student.student_class = new_class.to_string();
        self.repository.save(student).await?;

        Ok(ClassUpgradeResponse {
            message: "Class upgraded successfully".to_string(),
            student_id: id.to_string(),
            old_class,
            new_class: new_class.to_string(),
        })
    }
}

fn renew_subscription<K>(
    student: &mut Student<K>,
    amount: f64,
    updated_by: String,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let expires = now
        .checked_add_months(Months::new(12))
        .ok_or_else(|| AppError::InternalError("Subscription expiry out of range".to_string()))?;

    student.amount = Some(amount);
    student.payment_time = Some(now.format(PAYMENT_TIME_FORMAT).to_string());
    student.sub_exp_date = Some(expires.format(EXPIRY_FORMAT).to_string());
    student.updated_by = Some(updated_by);
    Ok(())
}
