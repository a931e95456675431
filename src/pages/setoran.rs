use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::SetoranSettings, entity::{attendance, cashflow, prelude::*, sales, setoran, user}, error::ApiError, normalize, reconcile::{self, ItemClass, LineItem}, utils};

use model::*;

mod model;
mod posting;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(create_setoran)
        .service(get_setoran);
}

/// End-of-shift reconciliation. The setoran insert is the unit of success;
/// everything derived from it happens afterwards in `posting` and cannot
/// fail the request (unless strict mode says otherwise).
#[post("")]
async fn create_setoran(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<SetoranSettings>,
    submitter: user::Model,
    payload: web::Json<CreateSetoran>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();

    if payload.employee_name.trim().is_empty() {
        return Err(ApiError::validation("`employee_name` is required"));
    }

    let jam_masuk = utils::parse_shift_time(&payload.jam_masuk)
        .ok_or_else(|| ApiError::validation("`jam_masuk` must be a `HH:MM` time"))?;
    let jam_keluar = utils::parse_shift_time(&payload.jam_keluar)
        .ok_or_else(|| ApiError::validation("`jam_keluar` must be a `HH:MM` time"))?;

    let half_filled = payload.expenses.iter()
        .chain(payload.income.iter())
        .any(|item| item.classify() == ItemClass::Incomplete);

    if half_filled {
        return Err(ApiError::validation("every expense/income item needs both a description and a positive amount"));
    }

    // Client-side totals are never accepted; everything is derived here
    let summary = reconcile::reconcile(
        payload.nomor_awal,
        payload.nomor_akhir,
        payload.qris_setoran,
        &payload.expenses,
        &payload.income,
        settings.price_per_liter,
    );

    let now = Local::now().fixed_offset();

    let record = Setoran::insert(setoran::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        created_by: Set(Some(submitter.id)),
        updated_by: Set(Some(submitter.id)),
        store_id: Set(submitter.store_id),
        employee_name: Set(payload.employee_name.trim().to_string()),
        employee_id: Set(payload.employee_id),
        jam_masuk: Set(jam_masuk),
        jam_keluar: Set(jam_keluar),
        nomor_awal: Set(payload.nomor_awal),
        nomor_akhir: Set(payload.nomor_akhir),
        qris_setoran: Set(payload.qris_setoran),
        total_liter: Set(summary.total_liters),
        total_setoran: Set(summary.gross_deposit),
        cash_setoran: Set(summary.cash_portion),
        total_pengeluaran: Set(summary.total_expenses),
        total_pemasukan: Set(summary.total_income),
        total_keseluruhan: Set(summary.net_total),
        pengeluaran_json: Set(serde_json::to_string(&summary.valid_expenses).unwrap_or_default()),
        pemasukan_json: Set(serde_json::to_string(&summary.valid_income).unwrap_or_default()),
        ..Default::default()
    }).exec_with_returning(db.as_ref()).await?;

    let outcome = posting::post_derived(db.as_ref(), &submitter, &record, &summary).await;

    if settings.strict_posting && !outcome.failures.is_empty() {
        let detail = outcome.failures.iter()
            .map(|failure| format!("{}: {}", failure.branch, failure.detail))
            .collect::<Vec<_>>()
            .join("; ");

        return Err(ApiError::PostingFailed(detail));
    }

    Ok(HttpResponse::Created().json(web::Json(CreateSetoranResponse {
        setoran: record,
        attendance: outcome.attendance,
        sales: outcome.sales,
        cashflow: outcome.cashflow,
    })))
}

#[get("")]
async fn get_setoran(db: web::Data<DatabaseConnection>, _user: user::Model) -> Result<impl Responder, ApiError> {
    let records = Setoran::find()
        .order_by_desc(setoran::Column::CreatedAt)
        .all(db.as_ref()).await?;

    Ok(web::Json(records))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::{Method, StatusCode}, test, App};
    use chrono::NaiveTime;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use crate::{auth::Authority, entity::sea_orm_active_enums::{CashflowCategory, RoleType}};

    use super::*;

    const SECRET: &[u8] = b"secret";

    fn settings() -> SetoranSettings {
        SetoranSettings { price_per_liter: 11_500.0, strict_posting: false }
    }

    fn staff(store_id: Option<Uuid>) -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            username: "ani".to_string(),
            password: Vec::new(),
            role: RoleType::Staff,
            store_id,
        }
    }

    fn setoran_record(submitter: &user::Model, employee_id: Option<Uuid>) -> setoran::Model {
        setoran::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: Some(submitter.id),
            updated_by: Some(submitter.id),
            store_id: submitter.store_id,
            employee_name: "Ani".to_string(),
            employee_id,
            jam_masuk: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            jam_keluar: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            nomor_awal: 1000.0,
            nomor_akhir: 1100.0,
            qris_setoran: 500_000.0,
            total_liter: 100.0,
            total_setoran: 1_150_000.0,
            cash_setoran: 650_000.0,
            total_pengeluaran: 50_000.0,
            total_pemasukan: 0.0,
            total_keseluruhan: 600_000.0,
            pengeluaran_json: r#"[{"description":"BBM","amount":50000.0}]"#.to_string(),
            pemasukan_json: "[]".to_string(),
        }
    }

    fn attendance_record(submitter: &user::Model, setoran: &setoran::Model) -> attendance::Model {
        attendance::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: Some(submitter.id),
            updated_by: Some(submitter.id),
            user_id: submitter.id,
            store_id: submitter.store_id,
            date: utils::today(),
            check_in: setoran.jam_masuk,
            check_out: setoran.jam_keluar,
            note: Some(format!("setoran {}", setoran.id)),
        }
    }

    fn sales_record(setoran: &setoran::Model) -> sales::Model {
        sales::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            store_id: setoran.store_id,
            date: utils::today(),
            total_sales: setoran.total_setoran,
            transaction_count: setoran.total_liter.round() as i32,
            average_ticket: 11_500.0,
        }
    }

    fn cashflow_record(setoran: &setoran::Model, category: CashflowCategory, description: &str, amount: f64) -> cashflow::Model {
        cashflow::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            store_id: setoran.store_id,
            date: utils::today(),
            category,
            amount,
            description: description.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_create_setoran_rejects_bad_input() {
        let submitter = staff(Some(Uuid::new_v4()));
        let token = Authority::new(SECRET).issue_for(&submitter);

        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .app_data(web::Data::new(settings()))
                .service(web::scope("/setoran").service(create_setoran))
        ).await;

        let cases = [
            // blank employee name
            serde_json::json!({
                "employee_name": "  ",
                "jam_masuk": "08:00",
                "jam_keluar": "17:00",
                "nomor_awal": 1000,
                "nomor_akhir": 1100
            }),
            // unparseable shift time
            serde_json::json!({
                "employee_name": "Ani",
                "jam_masuk": "pagi",
                "jam_keluar": "17:00",
                "nomor_awal": 1000,
                "nomor_akhir": 1100
            }),
            // amount without a description
            serde_json::json!({
                "employee_name": "Ani",
                "jam_masuk": "08:00",
                "jam_keluar": "17:00",
                "nomor_awal": 1000,
                "nomor_akhir": 1100,
                "expenses": [{ "description": "", "amount": 5000 }]
            }),
            // description without an amount
            serde_json::json!({
                "employee_name": "Ani",
                "jam_masuk": "08:00",
                "jam_keluar": "17:00",
                "nomor_awal": 1000,
                "nomor_akhir": 1100,
                "income": [{ "description": "bon", "amount": 0 }]
            }),
        ];

        for body in cases {
            let req = test::TestRequest::default()
                .uri("/setoran")
                .method(Method::POST)
                .insert_header(("Authorization", format!("JWT {token}")))
                .set_json(&body)
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted: {body}");
        }
    }

    #[actix_web::test]
    async fn test_create_setoran_creates_derived_records() {
        let submitter = staff(Some(Uuid::new_v4()));
        let token = Authority::new(SECRET).issue_for(&submitter);

        let setoran = setoran_record(&submitter, Some(submitter.id));
        let attendance = attendance_record(&submitter, &setoran);
        let sales = sales_record(&setoran);
        let cashflow = cashflow_record(&setoran, CashflowCategory::Expense, "BBM", 50_000.0);

        // Insert order: setoran, attendance, sales, then one cashflow row
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![setoran.clone()]])
            .append_query_results([vec![attendance.clone()]])
            .append_query_results([vec![sales.clone()]])
            .append_query_results([vec![cashflow.clone()]]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .app_data(web::Data::new(settings()))
                .service(web::scope("/setoran").service(create_setoran))
        ).await;

        let req = test::TestRequest::default()
            .uri("/setoran")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {token}")))
            .set_json(serde_json::json!({
                "employee_name": "Ani",
                "employeeId": submitter.id,
                "jam_masuk": "08:00",
                "jam_keluar": "17:00",
                "nomor_awal": 1000,
                "nomor_akhir": "1100",
                "qris_setoran": "500000",
                "expenses": [{ "description": "BBM", "amount": 50000 }],
                "income": []
            }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: CreateSetoranResponse = test::read_body_json(response).await;
        assert_eq!(body.setoran, setoran);
        assert_eq!(body.attendance, Some(attendance));
        assert_eq!(body.sales, Some(sales));
        assert_eq!(body.cashflow, vec![cashflow]);
    }

    #[actix_web::test]
    async fn test_create_setoran_isolates_cashflow_failure() {
        let submitter = staff(Some(Uuid::new_v4()));
        let token = Authority::new(SECRET).issue_for(&submitter);

        // No employee id: the attendance branch is skipped entirely
        let setoran = setoran_record(&submitter, None);
        let sales = sales_record(&setoran);
        let surviving = cashflow_record(&setoran, CashflowCategory::Income, "pelunasan bon", 75_000.0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![setoran.clone()]])
            .append_query_results([vec![sales.clone()]])
            .append_query_errors([DbErr::Custom("cashflow insert blew up".to_string())])
            .append_query_results([vec![surviving.clone()]]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .app_data(web::Data::new(settings()))
                .service(web::scope("/setoran").service(create_setoran))
        ).await;

        let req = test::TestRequest::default()
            .uri("/setoran")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {token}")))
            .set_json(serde_json::json!({
                "employee_name": "Ani",
                "jam_masuk": "08:00",
                "jam_keluar": "17:00",
                "nomor_awal": 500,
                "nomor_akhir": 500,
                "income": [
                    { "description": "uang muka", "amount": 25000 },
                    { "description": "pelunasan bon", "amount": 75000 }
                ]
            }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: CreateSetoranResponse = test::read_body_json(response).await;
        assert_eq!(body.setoran, setoran);
        assert_eq!(body.attendance, None);
        assert_eq!(body.sales, Some(sales));
        assert_eq!(body.cashflow, vec![surviving]);
    }

    #[actix_web::test]
    async fn test_create_setoran_strict_mode_fails_on_branch_failure() {
        let submitter = staff(Some(Uuid::new_v4()));
        let token = Authority::new(SECRET).issue_for(&submitter);

        let setoran = setoran_record(&submitter, None);
        let sales = sales_record(&setoran);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![setoran.clone()]])
            .append_query_results([vec![sales.clone()]])
            .append_query_errors([DbErr::Custom("cashflow insert blew up".to_string())]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .app_data(web::Data::new(SetoranSettings { strict_posting: true, ..settings() }))
                .service(web::scope("/setoran").service(create_setoran))
        ).await;

        let req = test::TestRequest::default()
            .uri("/setoran")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {token}")))
            .set_json(serde_json::json!({
                "employee_name": "Ani",
                "jam_masuk": "08:00",
                "jam_keluar": "17:00",
                "nomor_awal": 500,
                "nomor_akhir": 500,
                "income": [{ "description": "uang muka", "amount": 25000 }]
            }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_get_setoran() {
        let submitter = staff(Some(Uuid::new_v4()));
        let token = Authority::new(SECRET).issue_for(&submitter);

        let records = vec![
            setoran_record(&submitter, None),
            setoran_record(&submitter, Some(submitter.id)),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([records.clone()]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .app_data(web::Data::new(settings()))
                .service(web::scope("/setoran").service(get_setoran))
        ).await;

        let req = test::TestRequest::default()
            .uri("/setoran")
            .insert_header(("Authorization", format!("JWT {token}")))
            .to_request();

        let returned: Vec<setoran::Model> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(returned, records);
    }
}
