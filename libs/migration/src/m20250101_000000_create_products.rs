use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        big_integer(Products::Id)
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Products::Name))
                    .col(string(Products::SerialNumber))
                    .col(decimal_len(Products::Price, 19, 2))
                    .col(integer(Products::Quantity).default(0))
                    .to_owned(),
            )
            .await?;

        // One row per serial number
        manager
            .create_index(
                Index::create()
                    .name("idx_products_serial_number")
                    .table(Products::Table)
                    .col(Products::SerialNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    SerialNumber,
    Price,
    Quantity,
}
