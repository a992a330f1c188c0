//! Unique indexes backing the one-account-per-mobile-number rule and loan number uniqueness.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_loans::Loans;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_loans_mobile_number_unique")
                    .table(Loans::Table)
                    .col(Loans::MobileNumber)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_loans_loan_number_unique")
                    .table(Loans::Table)
                    .col(Loans::LoanNumber)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_loans_loan_number_unique").table(Loans::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_loans_mobile_number_unique").table(Loans::Table).to_owned())
            .await
    }
}
