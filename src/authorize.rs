use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::{prelude::*, sea_orm_active_enums::RoleType, user};

/// Who an attendance write ends up belonging to, and under which store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub user_id: Uuid,
    pub store_id: Option<Uuid>,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0}")]
    Forbidden(String),

    #[error("employee `{0}` does not exist")]
    NotFound(Uuid),

    #[error(transparent)]
    Db(#[from] DbErr),
}

fn self_target(submitter: &user::Model) -> ResolvedTarget {
    ResolvedTarget {
        user_id: submitter.id,
        store_id: submitter.store_id,
    }
}

/// Decides whether `submitter` may record attendance on behalf of
/// `target_id`, and under which store the record lands.
///
/// - self is always fine
/// - staff asking for someone else silently falls back to self, pending
///   product review; logged so it stays visible
/// - managers may act within their own store only
/// - administrators may act on anyone, landing on the target's store
pub async fn resolve_attendance_target(
    db: &DatabaseConnection,
    submitter: &user::Model,
    target_id: Option<Uuid>,
) -> Result<ResolvedTarget, ResolveError> {
    let Some(target_id) = target_id.filter(|id| *id != submitter.id) else {
        return Ok(self_target(submitter));
    };

    match submitter.role {
        RoleType::Staff => {
            tracing::warn!(
                submitter = %submitter.id,
                requested = %target_id,
                "staff requested attendance for another employee, falling back to self"
            );

            Ok(self_target(submitter))
        }
        RoleType::Manager => {
            let target = find_target(db, target_id).await?;

            match (submitter.store_id, target.store_id) {
                (Some(own), Some(theirs)) if own == theirs => Ok(ResolvedTarget {
                    user_id: target.id,
                    store_id: target.store_id,
                }),
                _ => Err(ResolveError::Forbidden(format!(
                    "manager `{}` may not record attendance for employee `{}` of another store",
                    submitter.id, target.id
                ))),
            }
        }
        RoleType::Administrator => {
            let target = find_target(db, target_id).await?;

            Ok(ResolvedTarget {
                user_id: target.id,
                store_id: target.store_id.or(submitter.store_id),
            })
        }
    }
}

async fn find_target(db: &DatabaseConnection, target_id: Uuid) -> Result<user::Model, ResolveError> {
    User::find_by_id(target_id)
        .one(db).await?
        .ok_or(ResolveError::NotFound(target_id))
}
