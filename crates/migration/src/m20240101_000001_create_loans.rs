//! Create `loans` table.
//! One row per borrower account; balances are plain integers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Loans::Table)
                    .if_not_exists()
                    .col(pk_auto(Loans::LoanId))
                    .col(string_len(Loans::MobileNumber, 15).not_null())
                    .col(string_len(Loans::LoanNumber, 64).not_null())
                    .col(string_len(Loans::LoanType, 100).not_null())
                    .col(integer(Loans::TotalLoan).not_null())
                    .col(integer(Loans::AmountPaid).not_null())
                    .col(integer(Loans::OutstandingAmount).not_null())
                    .col(timestamp_with_time_zone(Loans::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Loans::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Loans::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Loans {
    Table,
    LoanId,
    MobileNumber,
    LoanNumber,
    LoanType,
    TotalLoan,
    AmountPaid,
    OutstandingAmount,
    CreatedAt,
    UpdatedAt,
}
