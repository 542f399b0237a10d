use super::*;
use spv_pg::*;
use tokio_postgres::Client;

#[async_trait::async_trait]
impl AuthRepository for Client {
    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<Credentials>> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, hashword, salt, created_at FROM ",
                USERS,
                " WHERE username = $1"
            ),
            &[&username],
        )
        .await
        .map(|opt| opt.as_ref().map(Credentials::from))
        .map_err(anyhow::Error::from)
    }

    async fn insert(
        &self,
        username: &str,
        hashword: &str,
        salt: &str,
    ) -> anyhow::Result<Credentials> {
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (username, hashword, salt) VALUES ($1, $2, $3)
                 RETURNING id, username, hashword, salt, created_at"
            ),
            &[&username, &hashword, &salt],
        )
        .await
        .map(|row| Credentials::from(&row))
        .map_err(anyhow::Error::from)
    }
}
