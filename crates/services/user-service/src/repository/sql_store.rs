//! Relational user store on SeaORM.
//!
//! Every write runs inside one transaction. An error rolls it back
//! explicitly; a dropped future rolls it back when the open transaction is
//! dropped.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use common::{AppResult, OptionExt};
use domain::User;

use super::classify::classify_db_error;
use super::entities::{parent, user};
use super::user_store::{check_password, UserStore};

/// Concrete implementation of UserStore backed by the `users` and
/// `user_parents` tables.
#[derive(Clone)]
pub struct SqlUserStore {
    db: DatabaseConnection,
}

impl SqlUserStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.db.begin().await.map_err(classify_db_error)
    }

    /// Commit on success, roll back on error.
    async fn finish<T>(txn: DatabaseTransaction, result: AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => {
                txn.commit().await.map_err(classify_db_error)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    /// Insert one row per parent, in list order.
    async fn insert_parents<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        parents: &[String],
    ) -> Result<(), DbErr> {
        for name in parents {
            let row = parent::ActiveModel {
                id: NotSet,
                user_id: Set(user_id.to_string()),
                name: Set(name.clone()),
            };
            parent::Entity::insert(row)
                .exec_without_returning(conn)
                .await?;
        }
        Ok(())
    }

    async fn delete_parents<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<(), DbErr> {
        parent::Entity::delete_many()
            .filter(parent::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    async fn parent_names<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<Vec<String>, DbErr> {
        parent::Entity::find()
            .select_only()
            .column(parent::Column::Name)
            .filter(parent::Column::UserId.eq(user_id))
            .order_by_asc(parent::Column::Id)
            .into_tuple::<String>()
            .all(conn)
            .await
    }

    async fn create_in(txn: &DatabaseTransaction, user: &User) -> AppResult<()> {
        let row = user::ActiveModel {
            id: Set(user.id.clone()),
            name: Set(user.name.clone()),
            password_hash: Set(user.password_hash.clone()),
            age: Set(user.age),
            additional_information: Set(user.additional_information.clone()),
        };
        user::Entity::insert(row)
            .exec_without_returning(txn)
            .await
            .map_err(classify_db_error)?;

        Self::insert_parents(txn, &user.id, &user.parents)
            .await
            .map_err(classify_db_error)
    }

    async fn update_in(txn: &DatabaseTransaction, user: &User) -> AppResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Name, Expr::value(user.name.clone()))
            .col_expr(user::Column::Age, Expr::value(user.age))
            .col_expr(
                user::Column::AdditionalInformation,
                Expr::value(user.additional_information.clone()),
            )
            .filter(user::Column::Id.eq(user.id.as_str()))
            .exec(txn)
            .await
            .map_err(classify_db_error)?;

        // MySQL counts changed rows, not matched ones
        if result.rows_affected == 0 {
            user::Entity::find_by_id(user.id.clone())
                .one(txn)
                .await
                .map_err(classify_db_error)?
                .ok_or_not_found()?;
        }

        Self::delete_parents(txn, &user.id)
            .await
            .map_err(classify_db_error)?;
        Self::insert_parents(txn, &user.id, &user.parents)
            .await
            .map_err(classify_db_error)
    }

    async fn delete_in(txn: &DatabaseTransaction, id: &str) -> AppResult<()> {
        Self::delete_parents(txn, id)
            .await
            .map_err(classify_db_error)?;
        user::Entity::delete_by_id(id.to_string())
            .exec(txn)
            .await
            .map_err(classify_db_error)?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<()> {
        let hash: Option<String> = user::Entity::find()
            .select_only()
            .column(user::Column::PasswordHash)
            .filter(user::Column::Name.eq(username))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(classify_db_error)?;

        check_password(hash, password)
    }

    async fn create_user(&self, user: &User) -> AppResult<()> {
        tracing::debug!(user_id = %user.id, parents = user.parents.len(), "Inserting user");
        let txn = self.begin().await?;
        let result = Self::create_in(&txn, user).await;
        Self::finish(txn, result).await
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(classify_db_error)?
            .ok_or_not_found()?;

        let parents = Self::parent_names(&self.db, id)
            .await
            .map_err(classify_db_error)?;

        Ok(model.into_user(parents))
    }

    async fn update_user(&self, user: &User) -> AppResult<User> {
        tracing::debug!(user_id = %user.id, parents = user.parents.len(), "Updating user");
        let txn = self.begin().await?;
        let result = Self::update_in(&txn, user).await;
        Self::finish(txn, result).await?;

        self.get_user(&user.id).await
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        tracing::debug!(user_id = %id, "Deleting user");
        let txn = self.begin().await?;
        let result = Self::delete_in(&txn, id).await;
        Self::finish(txn, result).await
    }
}
