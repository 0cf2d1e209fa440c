use crate::{
    errors::{AppError, AppResult},
    models::domain::Role,
};

/// Privileged actions. Everything not listed here is open to any
/// authenticated caller acting on their own record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    ManageQuizzes,
    ManageStudents,
    ManageSubscriptions,
}

pub fn authorize(role: Role, capability: Capability) -> AppResult<()> {
    let allowed = match capability {
        Capability::ManageQuizzes | Capability::ManageStudents => {
            matches!(role, Role::Admin | Role::Super)
        }
        Capability::ManageSubscriptions => role == Role::Super,
    };

    if allowed {
        return Ok(());
    }

    Err(AppError::Forbidden(match capability {
        Capability::ManageSubscriptions => {
            "Only 'super' role can update subscription amounts".to_string()
        }
        _ => "only 'admin' or 'super' role allowed".to_string(),
    }))
}
