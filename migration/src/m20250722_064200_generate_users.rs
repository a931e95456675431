use sea_orm_migration::prelude::*;
use sha2::Digest as _;

use crate::m20250720_091500_init::{Store, User};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn store_uuid(n: u128) -> String {
    format!("{:032x}", n)
}

fn user_uuid(n: u128) -> String {
    format!("{:032x}", 0x1000 + n)
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let time = Expr::val("2025-07-22T06:42:00.000Z").cast_as("timestamptz");

        for (n, name) in [(1, "Toko Satu"), (2, "Toko Dua")] {
            manager
                .exec_stmt(Query::insert()
                    .into_table(Store::Table)
                    .columns(["id", "created_at", "updated_at", "name"])
                    .values_panic([Expr::val(store_uuid(n)).cast_as("uuid"), time.clone(), time.clone(), name.into()])
                    .to_owned()
            ).await.unwrap();
        }

        // Password equals the username, hashed the same way the login route does
        let seed_users = [
            (1u128, "manager1", "manager", 1u128),
            (2, "manager2", "manager", 2),
            (3, "staff1", "staff", 1),
            (4, "staff2", "staff", 1),
            (5, "staff3", "staff", 2),
            (6, "staff4", "staff", 2),
        ];

        for (n, username, role, store) in seed_users {
            let hashed_password = &sha2::Sha256::digest(&format!("{}:{}", username, username))[..];

            manager
                .exec_stmt(Query::insert()
                    .into_table(User::Table)
                    .columns(["id", "created_at", "updated_at", "username", "password", "role", "store_id"])
                    .values_panic([
                        Expr::val(user_uuid(n)).cast_as("uuid"),
                        time.clone(),
                        time.clone(),
                        username.into(),
                        hashed_password.into(),
                        Expr::val(role).cast_as("role_type"),
                        Expr::val(store_uuid(store)).cast_as("uuid"),
                    ])
                    .to_owned()
            ).await.unwrap();
        }

        // Create an administrator without a store assignment

        let hashed_password = &sha2::Sha256::digest("admin:admin")[..];

        manager
            .exec_stmt(Query::insert()
                .into_table(User::Table)
                .columns(["id", "created_at", "updated_at", "username", "password", "role"])
                .values_panic([
                    Expr::val(user_uuid(99)).cast_as("uuid"),
                    time.clone(),
                    time.clone(),
                    "admin".into(),
                    hashed_password.into(),
                    Expr::val("administrator").cast_as("role_type"),
                ])
                .to_owned()
        ).await.unwrap();

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for n in 1..=6u128 {
            manager
                .exec_stmt(Query::delete()
                    .from_table(User::Table)
                    .and_where(Expr::col("id").eq(Expr::val(user_uuid(n)).cast_as("uuid")))
                    .to_owned()
            ).await.unwrap();
        }

        manager
            .exec_stmt(Query::delete()
                .from_table(User::Table)
                .and_where(Expr::col("id").eq(Expr::val(user_uuid(99)).cast_as("uuid")))
                .to_owned()
        ).await.unwrap();

        for n in 1..=2u128 {
            manager
                .exec_stmt(Query::delete()
                    .from_table(Store::Table)
                    .and_where(Expr::col("id").eq(Expr::val(store_uuid(n)).cast_as("uuid")))
                    .to_owned()
            ).await.unwrap();
        }

        Ok(())
    }
}
