use anyhow::Result;
use tracing::warn;
use vitalink_core::models::{EmergencyContact, GeoPoint, NewEmergencyContact, SosRequest};

use crate::app::App;
use crate::cli::{EmergencyCommand, SosArgs};
use crate::format::{format_date, format_optional, format_phone};
use crate::output;

pub async fn sos(app: &App, args: SosArgs) -> Result<()> {
    app.require_login()?;
    let location = match (args.lat, args.lon) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
        }),
        _ => None,
    };
    let event = app
        .client
        .trigger_sos(&SosRequest {
            location,
            message: args.message,
        })
        .await?;
    if app.json {
        return output::json_pretty(&event);
    }
    output::success(&format!("SOS sent (event {})", event.id));
    Ok(())
}

pub async fn handle(app: &App, command: EmergencyCommand) -> Result<()> {
    match command {
        EmergencyCommand::Events => {
            app.require_login()?;
            let events = app.client.list_emergency_events().await?;
            if app.json {
                return output::json_pretty(&events);
            }
            if events.is_empty() {
                println!("No emergency events");
            }
            for event in &events {
                println!(
                    "{:<12} {:<9} {:<14} {}",
                    event.id,
                    if event.is_active() { "ACTIVE" } else { "resolved" },
                    format_date(event.created_at),
                    format_optional(&event.message, "")
                );
            }
            Ok(())
        }
        EmergencyCommand::Resolve { id } => {
            app.require_login()?;
            let event = app.client.resolve_emergency_event(&id).await?;
            output::success(&format!("Event {} resolved", event.id));
            Ok(())
        }
        EmergencyCommand::Contacts { offline } => {
            let contacts = if offline {
                match app.cache.load_emergency_contacts()? {
                    Some(cached) => {
                        eprintln!("{}", output::cached_note(&cached));
                        cached.data
                    }
                    None => anyhow::bail!("No cached contacts. Run without --offline first."),
                }
            } else {
                app.require_login()?;
                let contacts = app.client.list_emergency_contacts().await?;
                if let Err(e) = app.cache.save_emergency_contacts(&contacts) {
                    warn!(error = %e, "Failed to cache emergency contacts");
                }
                contacts
            };
            print_contacts(app, &contacts)
        }
        EmergencyCommand::AddContact {
            name,
            phone,
            relationship,
        } => {
            app.require_login()?;
            let contact = app
                .client
                .add_emergency_contact(&NewEmergencyContact {
                    name,
                    phone,
                    relationship,
                })
                .await?;
            output::success(&format!("Added contact {} ({})", contact.name, contact.id));
            Ok(())
        }
        EmergencyCommand::RmContact { id } => {
            app.require_login()?;
            app.client.delete_emergency_contact(&id).await?;
            output::success(&format!("Removed contact {}", id));
            Ok(())
        }
        EmergencyCommand::Info { user_id } => {
            let info = app.client.emergency_info(&user_id).await?;
            if app.json {
                return output::json_pretty(&info);
            }
            super::profile::print_profile(app, &info.profile)?;
            println!();
            print_contacts(app, &info.contacts)
        }
    }
}

pub(crate) fn print_contacts(app: &App, contacts: &[EmergencyContact]) -> Result<()> {
    if app.json {
        return output::json_pretty(contacts);
    }
    if contacts.is_empty() {
        println!("No emergency contacts");
    }
    for contact in contacts {
        println!(
            "{:<12} {:<24} {:<16} {}",
            contact.id,
            contact.name,
            format_phone(&contact.phone),
            format_optional(&contact.relationship, "")
        );
    }
    Ok(())
}
