use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::repair_order_services::Entity")]
    RepairOrderServices,
}

impl Related<super::repair_order_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairOrderServices.def()
    }
}

// Many-to-many through the join table.
impl Related<super::repair_orders::Entity> for Entity {
    fn to() -> RelationDef {
        super::repair_order_services::Relation::RepairOrders.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::repair_order_services::Relation::Services.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
