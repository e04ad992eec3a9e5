//! Account and session management.

use clap::Subcommand;

use ute_shop_client::Shop;
use ute_shop_client::session::AuthState;

use super::CommandResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account (then verify with `auth verify-otp`)
    Register {
        /// Account email
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
        /// Display name
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Log in with email and password
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Verify the one-time password sent by email
    VerifyOtp {
        /// Account email
        email: String,
        /// The one-time password
        otp: String,
    },
    /// Ask for a fresh one-time password
    ResendOtp {
        /// Account email
        email: String,
    },
    /// Log out (always succeeds locally)
    Logout,
    /// Fetch the current profile from the server
    Profile,
    /// Show the local session state
    Status,
}

pub async fn run(shop: &mut Shop, action: AuthAction) -> CommandResult {
    match action {
        AuthAction::Register {
            email,
            password,
            name,
        } => {
            let message = shop.session.register(&email, &password, &name).await?;
            println!(
                "{}",
                message.as_deref().unwrap_or("registered; check your email for the OTP")
            );
        }
        AuthAction::Login { email, password } => {
            let user = shop.session.login(&email, &password).await?;
            println!("logged in as {} ({})", user.name, user.email);
        }
        AuthAction::VerifyOtp { email, otp } => {
            let user = shop.session.verify_otp(&email, &otp).await?;
            println!("verified; logged in as {} ({})", user.name, user.email);
        }
        AuthAction::ResendOtp { email } => {
            let message = shop.session.resend_otp(&email).await?;
            println!("{}", message.as_deref().unwrap_or("OTP resent"));
        }
        AuthAction::Logout => {
            shop.session.logout().await;
            println!("logged out");
        }
        AuthAction::Profile => {
            let user = shop.session.profile().await?;
            println!("id:    {}", user.id);
            println!("email: {}", user.email);
            if !user.name.is_empty() {
                println!("name:  {}", user.name);
            }
        }
        AuthAction::Status => {
            let state = match shop.session.state() {
                AuthState::Anonymous => "anonymous",
                AuthState::Pending => "pending",
                AuthState::Authenticated => "authenticated",
            };
            println!("state: {state}");
            if let Some(user) = shop.session.user() {
                println!("user:  {} ({})", user.name, user.email);
            }
        }
    }
    Ok(())
}
