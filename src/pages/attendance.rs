use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{authorize, entity::{attendance, prelude::*, sea_orm_active_enums::RoleType, user}, error::ApiError, utils};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(create_attendance)
        .service(get_attendance);
}

#[derive(Debug, Serialize, Deserialize)]
struct CreateAttendance {
    #[serde(default)]
    employee_id: Option<Uuid>,
    #[serde(default)]
    date: Option<NaiveDate>,
    check_in: String,
    check_out: String,
    #[serde(default)]
    note: Option<String>,
}

/// Direct attendance entry. Unlike the setoran posting branch, a resolver
/// denial here is the caller's problem: managers reaching across stores get
/// a 403, unknown targets a 400.
#[post("")]
async fn create_attendance(
    db: web::Data<DatabaseConnection>,
    submitter: user::Model,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let check_in = utils::parse_shift_time(&payload.check_in)
        .ok_or_else(|| ApiError::validation("`check_in` must be a `HH:MM` time"))?;
    let check_out = utils::parse_shift_time(&payload.check_out)
        .ok_or_else(|| ApiError::validation("`check_out` must be a `HH:MM` time"))?;

    let target = authorize::resolve_attendance_target(db.as_ref(), &submitter, payload.employee_id).await?;

    let now = Local::now().fixed_offset();

    let model = Attendance::insert(attendance::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        created_by: Set(Some(submitter.id)),
        updated_by: Set(Some(submitter.id)),
        user_id: Set(target.user_id),
        store_id: Set(target.store_id),
        date: Set(payload.date.unwrap_or_else(utils::today)),
        check_in: Set(check_in),
        check_out: Set(check_out),
        note: Set(payload.note.clone()),
        ..Default::default()
    }).exec_with_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(web::Json(model)))
}

/// Administrators see everything; everyone else is scoped to their store
/// (or, with no store assignment, to their own records).
#[get("")]
async fn get_attendance(db: web::Data<DatabaseConnection>, user: user::Model) -> Result<impl Responder, ApiError> {
    let query = match user.role {
        RoleType::Administrator => Attendance::find(),
        RoleType::Manager | RoleType::Staff => match user.store_id {
            Some(store_id) => Attendance::find().filter(attendance::Column::StoreId.eq(store_id)),
            None => Attendance::find().filter(attendance::Column::UserId.eq(user.id)),
        },
    };

    let records = query
        .order_by_desc(attendance::Column::Date)
        .all(db.as_ref()).await?;

    Ok(web::Json(records))
}
