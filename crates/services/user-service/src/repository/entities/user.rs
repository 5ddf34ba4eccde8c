//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    pub password_hash: String,
    pub age: i32,
    pub additional_information: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parent::Entity")]
    Parents,
}

impl Related<super::parent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine the user row with its parent names into the aggregate.
    pub fn into_user(self, parents: Vec<String>) -> User {
        User {
            id: self.id,
            name: self.name,
            password_hash: self.password_hash,
            age: self.age,
            additional_information: self.additional_information,
            parents,
        }
    }
}
