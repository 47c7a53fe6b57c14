use sea_orm_migration::prelude::*;

use crate::m20260812_000001_create_employees::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::EmployeeId).integer().null())
                    .col(
                        ColumnDef::new(Orders::OrderTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(Orders::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_employee_id")
                            .from(Orders::Table, Orders::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on is_active for the active/completed partition queries
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_is_active")
                    .table(Orders::Table)
                    .col(Orders::IsActive)
                    .to_owned(),
            )
            .await?;

        // Index on order_time for newest-first ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_order_time")
                    .table(Orders::Table)
                    .col(Orders::OrderTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Orders {
    Table,
    Id,
    EmployeeId,
    OrderTime,
    IsActive,
}
