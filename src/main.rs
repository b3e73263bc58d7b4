use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use futures::StreamExt;

use authflow::auth::{AuthProvider, InMemoryAuth};
use authflow::config::Config;
use authflow::flows::{ForgotPasswordFlow, LoginFlow, ResetPasswordFlow, SignUpFlow};
use authflow::logging::init_tracing;
use authflow::mvi::Observable;

/// Drive an authentication flow against the in-memory backend.
#[derive(Parser, Debug)]
#[command(name = "authflow", version, about)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Request a password reset link
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with a reset code
    ResetPassword {
        #[arg(long)]
        code: String,
        #[arg(long)]
        password: String,
        /// Confirmation; defaults to the password itself
        #[arg(long)]
        confirm: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    let provider: Arc<dyn AuthProvider> = Arc::new(InMemoryAuth::from_config(&config.auth));
    let limit = Duration::from_secs(10) + Duration::from_millis(config.auth.latency_ms);

    match cli.command {
        Command::Login { email, password } => {
            if !provider.is_valid_login(&email, &password) {
                bail!("email or password is not acceptable");
            }
            let flow = LoginFlow::new(Arc::clone(&provider), &config.flows);
            flow.email_input(email);
            flow.password_input(password);
            flow.submit();
            match outcome(flow.completed(), flow.error(), limit).await? {
                Ok(user) => println!("signed in as {}", user.uid),
                Err(code) => bail!("{}", code),
            }
        }
        Command::SignUp { email, password } => {
            if !provider.is_valid_login(&email, &password) {
                bail!("email or password is not acceptable");
            }
            let flow = SignUpFlow::new(Arc::clone(&provider), &config.flows);
            flow.email_input(email);
            flow.password_input(password);
            flow.submit();
            match outcome(flow.completed(), flow.error(), limit).await? {
                Ok(user) => println!("account created: {}", user.uid),
                Err(code) => bail!("{}", code),
            }
        }
        Command::ForgotPassword { email } => {
            if !provider.is_valid_email(&email) {
                bail!("email is not acceptable");
            }
            let flow = ForgotPasswordFlow::new(Arc::clone(&provider), &config.flows);
            flow.email_input(email);
            flow.send();
            let sent = async { flow.completed().await.then_some(()) };
            match outcome(sent, flow.error(), limit).await? {
                Ok(()) => println!("reset link sent"),
                Err(code) => bail!("{}", code),
            }
        }
        Command::ResetPassword {
            code,
            password,
            confirm,
        } => {
            let confirm = confirm.unwrap_or_else(|| password.clone());
            if confirm != password {
                bail!("passwords do not match");
            }
            let flow = ResetPasswordFlow::new(Arc::clone(&provider), &config.flows);
            flow.set_oob_code(code);
            flow.password_input(password);
            flow.confirm_password_input(confirm);
            flow.submit();
            let done = async { flow.completed().await.then_some(()) };
            match outcome(done, flow.error(), limit).await? {
                Ok(()) => println!("password changed"),
                Err(code) => bail!("{}", code),
            }
        }
    }

    Ok(())
}

/// Wait for whichever comes first: completion or a typed failure.
async fn outcome<T, E>(
    completed: impl Future<Output = Option<T>>,
    mut errors: Observable<Option<E>>,
    limit: Duration,
) -> anyhow::Result<Result<T, E>> {
    let first_error = async {
        while let Some(error) = errors.next().await {
            if let Some(error) = error {
                return Some(error);
            }
        }
        None
    };

    let settled = tokio::time::timeout(limit, async {
        tokio::select! {
            Some(user) = completed => Some(Ok(user)),
            Some(error) = first_error => Some(Err(error)),
            else => None,
        }
    })
    .await
    .context("flow did not finish in time")?;

    settled.context("flow stopped without an outcome")
}
