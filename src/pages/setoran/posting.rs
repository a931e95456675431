use super::*;

use actix_web::rt::time::timeout;
use sea_orm::DbErr;
use tracing::warn;

use crate::{authorize, consts::POSTING_TIMEOUT, entity::sea_orm_active_enums::CashflowCategory, reconcile::Reconciliation, utils};

/// What the three derived branches managed to write.
///
/// Failures end up in `failures` (and in the log), never as an error of the
/// parent request; the setoran row is already durable by the time this runs.
#[derive(Debug, Default)]
pub(super) struct PostingOutcome {
    pub(super) attendance: Option<attendance::Model>,
    pub(super) sales: Option<sales::Model>,
    pub(super) cashflow: Vec<cashflow::Model>,
    pub(super) failures: Vec<PostingFailure>,
}

#[derive(Debug)]
pub(super) struct PostingFailure {
    pub(super) branch: &'static str,
    pub(super) detail: String,
}

impl PostingOutcome {
    fn report(&mut self, setoran_id: Uuid, branch: &'static str, detail: String) {
        warn!(setoran = %setoran_id, branch, %detail, "derived posting failed");
        self.failures.push(PostingFailure { branch, detail });
    }
}

/// Fans a freshly created setoran out into attendance, sales and cashflow
/// records. Branches run in order, each under its own timeout, and none of
/// them can fail another one.
pub(super) async fn post_derived(
    db: &DatabaseConnection,
    submitter: &user::Model,
    record: &setoran::Model,
    summary: &Reconciliation,
) -> PostingOutcome {
    let mut outcome = PostingOutcome::default();

    // Check-in/out are mandatory on the way in, so the only gate left for
    // the attendance branch is whether a target employee was named.
    if let Some(employee_id) = record.employee_id {
        match timeout(POSTING_TIMEOUT, post_attendance(db, submitter, record, employee_id)).await {
            Ok(Ok(model)) => outcome.attendance = Some(model),
            Ok(Err(detail)) => outcome.report(record.id, "attendance", detail),
            Err(_) => outcome.report(record.id, "attendance", "timed out".to_string()),
        }
    }

    match timeout(POSTING_TIMEOUT, post_sales(db, record)).await {
        Ok(Ok(model)) => outcome.sales = Some(model),
        Ok(Err(err)) => outcome.report(record.id, "sales", err.to_string()),
        Err(_) => outcome.report(record.id, "sales", "timed out".to_string()),
    }

    let items = summary.valid_expenses.iter().map(|item| (CashflowCategory::Expense, item))
        .chain(summary.valid_income.iter().map(|item| (CashflowCategory::Income, item)));

    for (category, item) in items {
        match timeout(POSTING_TIMEOUT, post_cashflow(db, record, category, item)).await {
            Ok(Ok(model)) => outcome.cashflow.push(model),
            Ok(Err(err)) => outcome.report(record.id, "cashflow", format!("`{}`: {err}", item.description)),
            Err(_) => outcome.report(record.id, "cashflow", format!("`{}`: timed out", item.description)),
        }
    }

    outcome
}

async fn post_attendance(
    db: &DatabaseConnection,
    submitter: &user::Model,
    record: &setoran::Model,
    employee_id: Uuid,
) -> Result<attendance::Model, String> {
    let target = authorize::resolve_attendance_target(db, submitter, Some(employee_id)).await
        .map_err(|err| err.to_string())?;

    let now = Local::now().fixed_offset();

    Attendance::insert(attendance::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        created_by: Set(Some(submitter.id)),
        updated_by: Set(Some(submitter.id)),
        user_id: Set(target.user_id),
        store_id: Set(target.store_id),
        date: Set(utils::today()),
        check_in: Set(record.jam_masuk),
        check_out: Set(record.jam_keluar),
        note: Set(Some(format!("setoran {}", record.id))),
        ..Default::default()
    }).exec_with_returning(db).await.map_err(|err| err.to_string())
}

async fn post_sales(db: &DatabaseConnection, record: &setoran::Model) -> Result<sales::Model, DbErr> {
    let average_ticket = if record.total_liter > 0.0 {
        record.total_setoran / record.total_liter
    } else {
        0.0
    };

    let now = Local::now().fixed_offset();

    Sales::insert(sales::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        store_id: Set(record.store_id),
        date: Set(utils::today()),
        total_sales: Set(record.total_setoran),
        transaction_count: Set(record.total_liter.round() as i32),
        average_ticket: Set(average_ticket),
        ..Default::default()
    }).exec_with_returning(db).await
}

async fn post_cashflow(
    db: &DatabaseConnection,
    record: &setoran::Model,
    category: CashflowCategory,
    item: &LineItem,
) -> Result<cashflow::Model, DbErr> {
    let now = Local::now().fixed_offset();

    Cashflow::insert(cashflow::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        store_id: Set(record.store_id),
        date: Set(utils::today()),
        category: Set(category),
        amount: Set(item.amount),
        description: Set(item.description.clone()),
        ..Default::default()
    }).exec_with_returning(db).await
}
