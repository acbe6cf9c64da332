/**
 * Command line entry point: loads the configuration, builds the URL realm and
 * runs one authentication (and optionally one role check) through it.
 */
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use slog::{info, Logger};
use url_realm::config::Settings;
use url_realm::{logging, Credentials, DefaultHttpClientProvider, Realm, RealmError, UrlRealm};

#[derive(Debug, Parser)]
#[command(name = "url-realm", version, about = "Authenticate a user against the configured probe URL")]
struct Cli {
    /// Username to authenticate
    #[arg(short, long)]
    username: String,

    /// Password; read from URL_REALM_PASSWORD when not given
    #[arg(short, long, env = "URL_REALM_PASSWORD", hide_env_values = true)]
    password: String,

    /// Role to check after a successful authentication
    #[arg(short, long)]
    role: Option<String>,
}

/**
 * Represents the context for the tool.
 *
 * Fields:
 * - `config`: The loaded settings.
 * - `logger`: The root logger.
 */
struct Context {
    config: Settings,
    logger: Logger,
}

struct RealmCheck {
    context: Arc<Context>,
}

impl RealmCheck {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Settings::new()?;
        let logger = logging::init_logger(&config);
        Ok(Self {
            context: Arc::new(Context { config, logger }),
        })
    }

    /**
     * Authenticates the user and checks the role, if one was requested.
     *
     * @return `Ok(true)` when every requested step succeeded.
     */
    async fn run(&self, cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
        let context = &self.context;
        let realm = UrlRealm::from_settings(
            &context.logger,
            &context.config,
            Arc::new(DefaultHttpClientProvider),
        )?;
        info!(
            context.logger,
            "Realm {} probing {}",
            realm.name(),
            realm.probe_target().url()
        );

        let credentials = Credentials::new(cli.username.as_str(), cli.password.as_str());
        let info = match realm.authenticate(&credentials).await {
            Ok(info) => info,
            Err(e @ RealmError::UnknownAccount) => {
                println!("authentication failed: {e}");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };
        println!("authenticated: {}", info.principal());

        if let Some(role) = &cli.role {
            match realm.check_role(&info.principals(), role) {
                Ok(()) => println!("role granted: {role}"),
                Err(e) => {
                    println!("{e}");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match RealmCheck::new() {
        Ok(check) => check.run(&cli).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("url-realm: {e}");
            ExitCode::FAILURE
        }
    }
}
