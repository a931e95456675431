use actix_web::{get, web, Responder};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::{auth::Administrator, entity::{cashflow, prelude::*}, error::ApiError};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_cashflow);
}

#[get("")]
async fn get_cashflow(db: web::Data<DatabaseConnection>, _admin: Administrator) -> Result<impl Responder, ApiError> {
    let records = Cashflow::find()
        .order_by_desc(cashflow::Column::Date)
        .all(db.as_ref()).await?;

    Ok(web::Json(records))
}
