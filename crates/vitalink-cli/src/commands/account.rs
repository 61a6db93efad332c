use std::io::{self, Write};

use anyhow::{Context, Result};
use vitalink_core::models::RegisterRequest;

use crate::app::App;
use crate::output;

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_password(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", label)).context("Failed to read password")
}

pub async fn login(app: &App, email: Option<String>) -> Result<()> {
    let email = match email.or_else(|| app.config.last_email.clone()) {
        Some(email) => email,
        None => prompt("Email")?,
    };
    let password = prompt_password("Password")?;

    let user = app.client.login(&email, &password).await?;

    let mut config = app.config.clone();
    config.last_email = Some(email);
    config.save()?;

    output::success(&format!("Logged in as {}", user.display_name()));
    Ok(())
}

pub async fn register(app: &App, name: String, email: String) -> Result<()> {
    let password = prompt_password("Choose a password")?;
    let confirm = prompt_password("Confirm password")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    let request = RegisterRequest {
        name,
        email: email.clone(),
        password,
    };
    let user = app.client.register(&request).await?;

    let mut config = app.config.clone();
    config.last_email = Some(email);
    config.save()?;

    output::success(&format!("Account created for {}", user.display_name()));
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    if !app.client.is_authenticated() {
        output::success("Already logged out");
        return Ok(());
    }
    // A rejected token is expected here; no need to ask for a new login.
    app.suppress_login_redirect();
    if let Err(e) = app.client.logout().await {
        // The local token is gone either way.
        tracing::warn!(error = %e, "Server logout failed");
    }
    output::success("Logged out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    app.require_login()?;
    let user = app.client.current_user().await?;
    if app.json {
        return output::json_pretty(&user);
    }
    output::field("Name", user.display_name());
    output::field("Email", &user.email);
    output::field("ID", &user.id);
    Ok(())
}
