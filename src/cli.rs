use super::*;
use anyhow::bail;
use clap::Parser;
use clap::Subcommand;
use spv_core::*;

#[derive(Parser)]
#[command(name = "sparovec", about = "Personal finance tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Starts the server
    Serve,
    /// Creates a new user with given credentials
    CreateUser { username: String, password: String },
}

impl Cli {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Serve => server::run(config).await,
            Command::CreateUser { username, password } => {
                create_user(config, &username, &password).await
            }
        }
    }
}

fn validate(username: &str, password: &str) -> anyhow::Result<()> {
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&username.chars().count()) {
        bail!("username must be {}-{} characters", USERNAME_MIN, USERNAME_MAX);
    }
    if password.chars().count() < PASSWORD_MIN {
        bail!("password must be at least {} characters", PASSWORD_MIN);
    }
    Ok(())
}

async fn create_user(config: Config, username: &str, password: &str) -> anyhow::Result<()> {
    validate(username, password)?;
    let client = spv_pg::db(config.database_url()?).await?;
    spv_pg::migrate::<spv_auth::Credentials>(&client).await?;
    let hasher = spv_auth::Hasher::default();
    let identity = spv_auth::create_user(&*client, &hasher, username, password)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create user: {}", e))?;
    println!("User created: {}", identity.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["sparovec", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
        let cli = Cli::try_parse_from(["sparovec", "create-user", "alice", "correct-horse"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::CreateUser { ref username, ref password }
                if username == "alice" && password == "correct-horse"
        ));
        assert!(Cli::try_parse_from(["sparovec", "create-user", "alice"]).is_err());
        assert!(Cli::try_parse_from(["sparovec"]).is_err());
    }

    #[test]
    fn validates_new_accounts() {
        assert!(validate("alice", "correct-horse").is_ok());
        assert!(validate("al", "correct-horse").is_err());
        assert!(validate(&"a".repeat(USERNAME_MAX + 1), "correct-horse").is_err());
        assert!(validate("alice", "short").is_err());
    }
}
