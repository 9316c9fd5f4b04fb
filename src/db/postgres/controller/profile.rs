use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use crate::{db::postgres::PostgresDatabase, types::model::Profile};

pub struct ProfileController {
    pub db: Arc<PostgresDatabase>,
}

impl ProfileController {
    pub fn new(db: Arc<PostgresDatabase>) -> Self {
        ProfileController { db }
    }

    pub async fn create_profile(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (email, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(profile)
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_one(&self.db.pool)
            .await?;

        Ok(profile)
    }

    pub async fn get_profile_by_email(&self, email: &str) -> Result<Profile> {
        let profile =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE lower(email) = lower($1)")
                .bind(email)
                .fetch_one(&self.db.pool)
                .await?;

        Ok(profile)
    }
}
