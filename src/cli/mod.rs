use clap::{Parser, Subcommand};
use loomcart::{
    config::{LoggingConfig, StorefrontConfig},
    session::{DemoAuthenticator, FileIdentitySlot, SessionStore},
};

mod checkout;
mod dashboard;
mod products;
mod session;

#[derive(Debug, Parser)]
#[command(name = "loomcart", about = "Handcrafted goods storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog
    Products(products::ProductsArgs),

    /// Sign in
    Login(session::LoginArgs),

    /// Create an account and sign in
    Register(session::RegisterArgs),

    /// Sign out
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Edit the signed-in identity
    Profile(session::ProfileArgs),

    /// Order products
    Checkout(checkout::CheckoutArgs),

    /// Show the artisan dashboard
    Dashboard,
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let config = self.config;

        match self.command {
            Commands::Products(args) => products::run(&config, args),
            Commands::Login(args) => session::login(&config, args).await,
            Commands::Register(args) => session::register(&config, args).await,
            Commands::Logout => session::logout(&config),
            Commands::Whoami => session::whoami(&config),
            Commands::Profile(args) => session::profile(&config, args).await,
            Commands::Checkout(args) => checkout::run(&config, args),
            Commands::Dashboard => dashboard::run(),
        }
    }
}

type Session = SessionStore<DemoAuthenticator, FileIdentitySlot>;

fn open_session(config: &StorefrontConfig) -> Result<Session, String> {
    SessionStore::restore(config.authenticator(), config.identity_slot())
        .map_err(|error| format!("failed to restore session: {error}"))
}
