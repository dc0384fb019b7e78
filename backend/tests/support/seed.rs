//! Reference data inserted straight into a test database.
//!
//! Users, tags and ingredients have no write port, so suites seed them with
//! plain SQL through the synchronous `postgres` client.

use larder::domain::{IngredientId, TagId, UserId};
use postgres::{Client, NoTls};

use super::format_postgres_error;

/// Connection used to seed one test database.
pub struct Seeder {
    client: Client,
}

impl Seeder {
    pub fn connect(url: &str) -> Result<Self, String> {
        let client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
        Ok(Self { client })
    }

    /// Insert a user whose email and names derive from `username`.
    pub fn user(&mut self, username: &str) -> UserId {
        let id = UserId::random();
        self.client
            .execute(
                "INSERT INTO users (id, email, username, first_name, last_name) \
                 VALUES ($1, $2, $3, $4, $5)",
                &[
                    id.as_uuid(),
                    &format!("{username}@larder.test"),
                    &username,
                    &username,
                    &"Tester",
                ],
            )
            .unwrap_or_else(|err| panic!("seed user {username}: {}", format_postgres_error(&err)));
        id
    }

    pub fn tag(&mut self, name: &str, color: &str, slug: &str) -> TagId {
        let row = self
            .client
            .query_one(
                "INSERT INTO tags (name, color, slug) VALUES ($1, $2, $3) RETURNING id",
                &[&name, &color, &slug],
            )
            .unwrap_or_else(|err| panic!("seed tag {slug}: {}", format_postgres_error(&err)));
        TagId::new(row.get(0))
    }

    pub fn ingredient(&mut self, name: &str, unit: &str) -> IngredientId {
        let row = self
            .client
            .query_one(
                "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
                &[&name, &unit],
            )
            .unwrap_or_else(|err| panic!("seed ingredient {name}: {}", format_postgres_error(&err)));
        IngredientId::new(row.get(0))
    }

    /// Run raw SQL, for tests that need to poke at the schema directly.
    pub fn execute(&mut self, sql: &str) -> Result<(), String> {
        self.client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }
}
