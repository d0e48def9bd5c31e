//! SeaORM-backed identity store.
//!
//! Owns the credential column: passwords are hashed here on create and
//! verified here on login, so hash material never crosses into the
//! domain layer.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    DirectoryError, DirectoryResult, User, UserListQuery, UserStatus, UserStoreInterface,
};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserStore {
    db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> DirectoryResult<User> {
    let status = UserStatus::try_from(model.status).map_err(|_| {
        DirectoryError::Store(vec![format!(
            "Stored status {} for user {} is out of range",
            model.status, model.id
        )])
    })?;

    Ok(User {
        id: model.id,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        phone: model.phone,
        role_id: model.role_id,
        address_id: model.address_id,
        agent_id: model.agent_id,
        company_id: model.company_id,
        agent_permission: model.agent_permission,
        status,
    })
}

fn store_err(e: sea_orm::DbErr) -> DirectoryError {
    DirectoryError::Store(vec![format!("Database error: {e}")])
}

fn mutation_err(e: sea_orm::DbErr) -> DirectoryError {
    let text = e.to_string();
    if text.contains("unique") || text.contains("UNIQUE") || text.contains("duplicate") {
        DirectoryError::Store(vec!["Username or email already exists".to_string()])
    } else {
        store_err(e)
    }
}

// ── Identity store implementation ───────────────────────────────

#[async_trait]
impl UserStoreInterface for SeaOrmUserStore {
    async fn find_by_id(&self, id: i32) -> DirectoryResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        model.map(user_model_to_domain).transpose()
    }

    async fn find_by_username(&self, username: &str) -> DirectoryResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        model.map(user_model_to_domain).transpose()
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DirectoryResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let valid = verify_password(password, &model.password_hash).unwrap_or(false);
        if !valid {
            return Ok(None);
        }

        user_model_to_domain(model).map(Some)
    }

    async fn create(&self, user: User, password: &str) -> DirectoryResult<User> {
        let password_hash = hash_password(password)
            .map_err(|e| DirectoryError::Store(vec![format!("Failed to hash password: {e}")]))?;

        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(user.username),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            phone: Set(user.phone),
            role_id: Set(user.role_id),
            address_id: Set(user.address_id),
            agent_id: Set(user.agent_id),
            company_id: Set(user.company_id),
            agent_permission: Set(user.agent_permission),
            status: Set(user.status.as_i16()),
            password_hash: Set(password_hash),
        };

        let inserted = new_user.insert(&self.db).await.map_err(mutation_err)?;
        user_model_to_domain(inserted)
    }

    async fn update(&self, user: &User) -> DirectoryResult<User> {
        let existing = user::Entity::find_by_id(user.id)
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or(DirectoryError::NotFound {
                entity: "User",
                field: "id",
                value: user.id.to_string(),
            })?;

        let mut active: user::ActiveModel = existing.into();
        active.username = Set(user.username.clone());
        active.first_name = Set(user.first_name.clone());
        active.last_name = Set(user.last_name.clone());
        active.email = Set(user.email.clone());
        active.phone = Set(user.phone.clone());
        active.role_id = Set(user.role_id);
        active.address_id = Set(user.address_id);
        active.agent_id = Set(user.agent_id);
        active.company_id = Set(user.company_id.clone());
        active.agent_permission = Set(user.agent_permission);
        active.status = Set(user.status.as_i16());
        // password_hash deliberately untouched

        let updated = active.update(&self.db).await.map_err(mutation_err)?;
        user_model_to_domain(updated)
    }

    async fn delete(&self, user: &User) -> DirectoryResult<()> {
        let result = user::Entity::delete_by_id(user.id)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            return Err(DirectoryError::NotFound {
                entity: "User",
                field: "id",
                value: user.id.to_string(),
            });
        }

        Ok(())
    }

    async fn list(&self, query: &UserListQuery) -> DirectoryResult<(Vec<User>, u64)> {
        let mut q = user::Entity::find();

        if let Some(ref name) = query.name {
            let pattern = format!("%{}%", name.to_lowercase());
            q = q.filter(
                Expr::expr(Func::lower(Expr::col((
                    user::Entity,
                    user::Column::FirstName,
                ))))
                .like(pattern),
            );
        }

        if let Some(ref surname) = query.surname {
            let pattern = format!("%{}%", surname.to_lowercase());
            q = q.filter(
                Expr::expr(Func::lower(Expr::col((
                    user::Entity,
                    user::Column::LastName,
                ))))
                .like(pattern),
            );
        }

        if let Some(role_id) = query.role_id {
            q = q.filter(user::Column::RoleId.eq(role_id));
        }

        if let Some(status) = query.status {
            q = q.filter(user::Column::Status.eq(status));
        }

        // Total match count before paging.
        let total = q.clone().count(&self.db).await.map_err(store_err)?;

        let models = q
            .order_by_asc(user::Column::Id)
            .offset(query.offset)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        let users = models
            .into_iter()
            .map(user_model_to_domain)
            .collect::<DirectoryResult<Vec<_>>>()?;

        Ok((users, total))
    }
}
