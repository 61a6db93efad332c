use anyhow::Result;
use tracing::warn;
use vitalink_core::models::{Profile, ProfileUpdate};

use crate::app::App;
use crate::cli::{ProfileCommand, ProfileSetArgs};
use crate::format::{format_optional, format_phone};
use crate::output;

pub async fn handle(app: &App, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Show { offline } => show(app, offline).await,
        ProfileCommand::Set(args) => set(app, args).await,
    }
}

async fn show(app: &App, offline: bool) -> Result<()> {
    let profile = if offline {
        match app.cache.load_profile()? {
            Some(cached) => {
                eprintln!("{}", output::cached_note(&cached));
                cached.data
            }
            None => anyhow::bail!("No cached profile. Run without --offline first."),
        }
    } else {
        app.require_login()?;
        let profile = app.client.get_profile().await?;
        if let Err(e) = app.cache.save_profile(&profile) {
            warn!(error = %e, "Failed to cache profile");
        }
        profile
    };
    print_profile(app, &profile)
}

pub(crate) fn print_profile(app: &App, profile: &Profile) -> Result<()> {
    if app.json {
        return output::json_pretty(profile);
    }
    output::field("Name", &format_optional(&profile.name, "-"));
    output::field("Date of birth", &format_optional(&profile.date_of_birth, "-"));
    output::field("Blood type", &format_optional(&profile.blood_type, "-"));
    output::field("Allergies", &profile.allergies_display());
    output::field("Medications", &join_or_dash(&profile.medications));
    output::field("Conditions", &join_or_dash(&profile.conditions));
    output::field(
        "Phone",
        &profile.phone.as_deref().map(format_phone).unwrap_or_else(|| "-".to_string()),
    );
    output::field("Address", &format_optional(&profile.address, "-"));
    Ok(())
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn non_empty(list: Vec<String>) -> Option<Vec<String>> {
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

async fn set(app: &App, args: ProfileSetArgs) -> Result<()> {
    app.require_login()?;
    let update = ProfileUpdate {
        name: args.name,
        date_of_birth: args.date_of_birth,
        blood_type: args.blood_type,
        allergies: non_empty(args.allergies),
        medications: non_empty(args.medications),
        conditions: non_empty(args.conditions),
        phone: args.phone,
        address: args.address,
    };
    let profile = app.client.update_profile(&update).await?;
    if let Err(e) = app.cache.save_profile(&profile) {
        warn!(error = %e, "Failed to cache profile");
    }
    output::success("Profile updated");
    print_profile(app, &profile)
}
