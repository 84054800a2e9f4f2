use std::io::{self, Write};

use clap::Args;
use loomcart::{
    config::StorefrontConfig,
    session::{AccountType, Identity, LoginForm, ProfileUpdate, RegistrationForm},
};

use super::open_session;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "LOOMCART_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// First name
    #[arg(long)]
    first_name: String,

    /// Last name
    #[arg(long)]
    last_name: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// Phone number
    #[arg(long)]
    phone: String,

    /// Password
    #[arg(long, env = "LOOMCART_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password again
    #[arg(long)]
    confirm_password: String,

    /// Account type
    #[arg(long, value_enum, default_value_t = AccountType::Customer)]
    account_type: AccountType,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileArgs {
    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New email address
    #[arg(long)]
    email: Option<String>,

    /// New avatar image reference
    #[arg(long)]
    avatar: Option<String>,
}

pub(crate) async fn login(config: &StorefrontConfig, args: LoginArgs) -> Result<(), String> {
    let credentials = LoginForm {
        email: args.email,
        password: args.password,
    }
    .validate()
    .map_err(|error| error.to_string())?;

    let session = open_session(config)?;

    let identity = session
        .login(credentials)
        .await
        .map_err(|error| error.to_string())?;

    print_identity("signed in as", &identity)
}

pub(crate) async fn register(config: &StorefrontConfig, args: RegisterArgs) -> Result<(), String> {
    let registration = RegistrationForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        password: args.password,
        confirm_password: args.confirm_password,
        account_type: args.account_type,
    }
    .validate()
    .map_err(|error| error.to_string())?;

    let session = open_session(config)?;

    let identity = session
        .register(registration)
        .await
        .map_err(|error| error.to_string())?;

    print_identity("registered", &identity)
}

pub(crate) async fn profile(config: &StorefrontConfig, args: ProfileArgs) -> Result<(), String> {
    let update = ProfileUpdate {
        name: args.name,
        email: args.email,
        role: None,
        avatar: args.avatar,
    };

    if update.is_empty() {
        return Err("nothing to update; pass --name, --email or --avatar".to_string());
    }

    let session = open_session(config)?;

    let identity = session
        .update_profile(update)
        .await
        .map_err(|error| error.to_string())?;

    print_identity("updated", &identity)
}

pub(crate) fn logout(config: &StorefrontConfig) -> Result<(), String> {
    open_session(config)?
        .logout()
        .map_err(|error| format!("failed to sign out: {error}"))?;

    writeln!(io::stdout().lock(), "signed out").map_err(|error| error.to_string())
}

pub(crate) fn whoami(config: &StorefrontConfig) -> Result<(), String> {
    match open_session(config)?.identity() {
        Some(identity) => print_identity("signed in as", &identity),
        None => writeln!(io::stdout().lock(), "not signed in").map_err(|error| error.to_string()),
    }
}

fn print_identity(prefix: &str, identity: &Identity) -> Result<(), String> {
    writeln!(
        io::stdout().lock(),
        "{prefix} {} <{}> ({}, id {})",
        identity.name,
        identity.email,
        identity.role,
        identity.id
    )
    .map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use loomcart::config::{LogFormat, LoggingConfig};
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        register: RegisterArgs,
    }

    const REGISTRATION: [&str; 11] = [
        "register",
        "--first-name",
        "Bishnu",
        "--last-name",
        "Boro",
        "--email",
        "bishnu@example.com",
        "--phone",
        "9876543210",
        "--password",
        "bamboo",
    ];

    fn config(dir: &tempfile::TempDir) -> StorefrontConfig {
        StorefrontConfig {
            catalog: None,
            session_file: dir.path().join("session.json"),
            auth_latency_ms: 0,
            logging: LoggingConfig {
                log_level: "warn".to_string(),
                log_format: LogFormat::Compact,
            },
        }
    }

    #[test]
    fn register_requires_confirmation() {
        assert!(Harness::try_parse_from(REGISTRATION).is_err());
    }

    #[tokio::test]
    async fn register_rejects_mismatched_confirmation() -> TestResult {
        let dir = tempfile::tempdir()?;
        let harness = Harness::try_parse_from(
            REGISTRATION
                .into_iter()
                .chain(["--confirm-password", "bambo0"]),
        )?;

        let result = register(&config(&dir), harness.register).await;

        assert_eq!(result, Err("passwords do not match".to_string()));
        assert!(!dir.path().join("session.json").exists());

        Ok(())
    }

    #[tokio::test]
    async fn register_with_matching_confirmation_signs_in() -> TestResult {
        let dir = tempfile::tempdir()?;
        let harness = Harness::try_parse_from(
            REGISTRATION
                .into_iter()
                .chain(["--confirm-password", "bamboo"]),
        )?;

        register(&config(&dir), harness.register).await?;

        assert!(dir.path().join("session.json").exists());

        Ok(())
    }
}
