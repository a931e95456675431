use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::{setup_store_fk, setup_user_table_fk, util::{default_table_statement, default_user_table_statement, DefaultColumn}};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(
                schema.create_enum_from_active_enum::<RoleType>()
            ).await.unwrap();

        manager
            .create_type(
                schema.create_enum_from_active_enum::<CashflowCategory>()
            ).await.unwrap();

        manager
            .create_table(default_table_statement()
                .table(Store::Table)
                .col(ColumnDef::new(Store::Name)
                    .text()
                    .unique_key()
                    .not_null())
                .take()
            ).await.unwrap();

        manager
            .create_table(default_table_statement()
                .table(User::Table)
                .col(ColumnDef::new(User::Username)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(User::Password)
                    .binary()
                    .not_null()) // Password should be in a hashed format
                .col(ColumnDef::new(User::Role)
                    .custom(RoleType::name())
                    .not_null())
                .col(ColumnDef::new(User::StoreId)
                    .uuid()) // Administrators are not pinned to a store
                .take()
            ).await.unwrap();
        setup_store_fk!(manager, User::Table, User::StoreId);

        manager
            .create_table(default_user_table_statement()
                .table(Setoran::Table)
                .col(ColumnDef::new(Setoran::StoreId)
                    .uuid())
                .col(ColumnDef::new(Setoran::EmployeeName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Setoran::EmployeeId)
                    .uuid())
                .col(ColumnDef::new(Setoran::JamMasuk)
                    .time()
                    .not_null())
                .col(ColumnDef::new(Setoran::JamKeluar)
                    .time()
                    .not_null())
                .col(ColumnDef::new(Setoran::NomorAwal)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::NomorAkhir)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::QrisSetoran)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::TotalLiter)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::TotalSetoran)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::CashSetoran)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::TotalPengeluaran)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::TotalPemasukan)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::TotalKeseluruhan)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Setoran::PengeluaranJson)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Setoran::PemasukanJson)
                    .text()
                    .not_null())
                .take()
        ).await.unwrap();
        setup_user_table_fk!(manager, Setoran::Table);
        setup_store_fk!(manager, Setoran::Table, Setoran::StoreId);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Setoran::Table, Setoran::EmployeeId)
            .to(User::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::SetNull)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await.unwrap();

        manager
            .create_table(default_user_table_statement()
                .table(Attendance::Table)
                .col(ColumnDef::new(Attendance::UserId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Attendance::StoreId)
                    .uuid())
                .col(ColumnDef::new(Attendance::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Attendance::CheckIn)
                    .time()
                    .not_null())
                .col(ColumnDef::new(Attendance::CheckOut)
                    .time()
                    .not_null())
                .col(ColumnDef::new(Attendance::Note)
                    .text())
                .take()
        ).await.unwrap();
        setup_user_table_fk!(manager, Attendance::Table);
        setup_store_fk!(manager, Attendance::Table, Attendance::StoreId);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Attendance::Table, Attendance::UserId)
            .to(User::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await.unwrap();

        manager
            .create_table(default_table_statement()
                .table(Sales::Table)
                .col(ColumnDef::new(Sales::StoreId)
                    .uuid())
                .col(ColumnDef::new(Sales::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Sales::TotalSales)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Sales::TransactionCount)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Sales::AverageTicket)
                    .double()
                    .not_null())
                .take()
        ).await.unwrap();
        setup_store_fk!(manager, Sales::Table, Sales::StoreId);

        manager
            .create_table(default_table_statement()
                .table(Cashflow::Table)
                .col(ColumnDef::new(Cashflow::StoreId)
                    .uuid())
                .col(ColumnDef::new(Cashflow::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Cashflow::Category)
                    .custom(CashflowCategory::name())
                    .not_null())
                .col(ColumnDef::new(Cashflow::Amount)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Cashflow::Description)
                    .text()
                    .not_null())
                .take()
        ).await.unwrap();
        setup_store_fk!(manager, Cashflow::Table, Cashflow::StoreId);

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(
            TableDropStatement::new()
                .table(Cashflow::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Sales::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Attendance::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Setoran::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(User::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Store::Table)
                .take()
        ).await.unwrap();

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(CashflowCategory::name())
                    .to_owned()
            ).await.unwrap();

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(RoleType::name())
                    .to_owned()
            ).await.unwrap();

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Store {
    Table,
    Name,
}

#[derive(Iden)]
pub(crate) enum User {
    Table,
    Username,
    Password,
    Role,
    StoreId,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
enum RoleType {
    #[sea_orm(string_value = "staff")]
    Staff,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "administrator")]
    Administrator,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cashflow_category")]
enum CashflowCategory {
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "income")]
    Income,
}

#[derive(Iden)]
enum Setoran {
    Table,
    StoreId,
    EmployeeName,
    EmployeeId,
    JamMasuk,
    JamKeluar,
    NomorAwal,
    NomorAkhir,
    QrisSetoran,
    TotalLiter,
    TotalSetoran,
    CashSetoran,
    TotalPengeluaran,
    TotalPemasukan,
    TotalKeseluruhan,
    PengeluaranJson,
    PemasukanJson,
}

#[derive(Iden)]
enum Attendance {
    Table,
    UserId,
    StoreId,
    Date,
    CheckIn,
    CheckOut,
    Note,
}

#[derive(Iden)]
enum Sales {
    Table,
    StoreId,
    Date,
    TotalSales,
    TransactionCount,
    AverageTicket,
}

#[derive(Iden)]
enum Cashflow {
    Table,
    StoreId,
    Date,
    Category,
    Amount,
    Description,
}
