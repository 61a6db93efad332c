use anyhow::{Context, Result};
use tracing::warn;
use vitalink_core::models::{CreateShareLink, ShareAccess, SharedProfile};

use crate::app::App;
use crate::cli::ShareCommand;
use crate::format::format_date;
use crate::output;

pub async fn handle(app: &App, command: ShareCommand) -> Result<()> {
    match command {
        ShareCommand::Create {
            hours,
            password,
            otp,
            emergency_only,
        } => {
            app.require_login()?;
            let password = if password {
                Some(rpassword::prompt_password("Link password: ").context("Failed to read password")?)
            } else {
                None
            };
            let link = app
                .client
                .create_share_link(&CreateShareLink {
                    expires_in_hours: hours,
                    password,
                    require_otp: otp,
                    emergency_only,
                })
                .await?;
            if app.json {
                return output::json_pretty(&link);
            }
            output::success("Share link created");
            output::field("URL", &link.public_url(&app.client_config.frontend_url));
            output::field("Expires", &format_date(link.expires_at));
            Ok(())
        }
        ShareCommand::List { offline } => {
            let links = if offline {
                match app.cache.load_share_links()? {
                    Some(cached) => {
                        eprintln!("{}", output::cached_note(&cached));
                        cached.data
                    }
                    None => anyhow::bail!("No cached share links. Run without --offline first."),
                }
            } else {
                app.require_login()?;
                let links = app.client.list_share_links().await?;
                if let Err(e) = app.cache.save_share_links(&links) {
                    warn!(error = %e, "Failed to cache share links");
                }
                links
            };
            if app.json {
                return output::json_pretty(&links);
            }
            if links.is_empty() {
                println!("No share links");
            }
            for link in &links {
                let mut gates = Vec::new();
                if link.requires_password {
                    gates.push("password");
                }
                if link.requires_otp {
                    gates.push("otp");
                }
                println!(
                    "{:<12} {:<8} {:<14} {:>4} views  {}  {}",
                    link.id,
                    if link.is_expired() { "expired" } else { "active" },
                    format_date(link.expires_at),
                    link.views,
                    if gates.is_empty() { "open".to_string() } else { gates.join("+") },
                    link.public_url(&app.client_config.frontend_url)
                );
            }
            Ok(())
        }
        ShareCommand::Revoke { id } => {
            app.require_login()?;
            app.client.revoke_share_link(&id).await?;
            output::success(&format!("Revoked share link {}", id));
            Ok(())
        }
        ShareCommand::View {
            token,
            password,
            otp,
        } => {
            let shared = if password {
                let secret = rpassword::prompt_password("Link password: ")
                    .context("Failed to read password")?;
                unwrap_access(app.client.verify_share_password(&token, &secret).await?)?
            } else if otp {
                let sent = app.client.request_share_otp(&token).await?;
                eprintln!("{}", sent.message.as_deref().unwrap_or("Code sent"));
                let code = rpassword::prompt_password("One-time code: ")
                    .context("Failed to read code")?;
                unwrap_access(app.client.verify_share_otp(&token, code.trim()).await?)?
            } else {
                app.client.get_shared(&token).await?
            };

            if app.json {
                return output::json_pretty(&shared);
            }
            super::profile::print_profile(app, &shared.profile)?;
            if !shared.emergency_contacts.is_empty() {
                println!();
                super::emergency::print_contacts(app, &shared.emergency_contacts)?;
            }
            Ok(())
        }
    }
}

fn unwrap_access(access: ShareAccess) -> Result<SharedProfile> {
    if !access.verified {
        anyhow::bail!(
            "{}",
            access.message.as_deref().unwrap_or("Verification failed")
        );
    }
    access
        .data
        .ok_or_else(|| anyhow::anyhow!("Server returned no shared data"))
}
