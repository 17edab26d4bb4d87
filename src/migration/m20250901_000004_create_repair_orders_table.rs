use sea_orm_migration::prelude::*;

use super::m20250901_000002_create_vehicles_table::Vehicles;
use super::m20250901_000003_create_services_table::Services;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepairOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairOrders::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RepairOrders::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(RepairOrders::EntryDate).date().not_null())
                    .col(ColumnDef::new(RepairOrders::ExitDate).date().null())
                    .col(
                        ColumnDef::new(RepairOrders::Status)
                            .string_len(20)
                            .not_null()
                            .default("received"),
                    )
                    .col(
                        ColumnDef::new(RepairOrders::TotalAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repair_orders_vehicle_id")
                            .from(RepairOrders::Table, RepairOrders::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_orders_entry_date")
                    .table(RepairOrders::Table)
                    .col(RepairOrders::EntryDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RepairOrderServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairOrderServices::RepairOrderId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepairOrderServices::ServiceId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RepairOrderServices::RepairOrderId)
                            .col(RepairOrderServices::ServiceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repair_order_services_order_id")
                            .from(RepairOrderServices::Table, RepairOrderServices::RepairOrderId)
                            .to(RepairOrders::Table, RepairOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repair_order_services_service_id")
                            .from(RepairOrderServices::Table, RepairOrderServices::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairOrderServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepairOrders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RepairOrders {
    Table,
    Id,
    VehicleId,
    EntryDate,
    ExitDate,
    Status,
    TotalAmount,
}

#[derive(DeriveIden)]
enum RepairOrderServices {
    Table,
    RepairOrderId,
    ServiceId,
}
