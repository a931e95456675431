use actix_web::{get, web, Responder};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::{auth::Administrator, entity::{prelude::*, sales}, error::ApiError};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_sales);
}

// Admin-only so operators can compare against the setoran count
#[get("")]
async fn get_sales(db: web::Data<DatabaseConnection>, _admin: Administrator) -> Result<impl Responder, ApiError> {
    let records = Sales::find()
        .order_by_desc(sales::Column::Date)
        .all(db.as_ref()).await?;

    Ok(web::Json(records))
}
