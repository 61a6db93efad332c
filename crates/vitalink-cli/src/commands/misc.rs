use anyhow::Result;
use serde_json::json;
use tracing::warn;
use vitalink_core::images::RemoteImagePolicy;
use vitalink_core::models::{Document, EmergencyContact, HealthRecord, Profile};
use vitalink_core::CacheManager;

use crate::app::App;
use crate::output;

/// Fetch the main views concurrently; the first failure aborts the rest.
pub async fn dashboard(app: &App) -> Result<()> {
    app.require_login()?;
    let client = &app.client;
    let (profile, documents, records, contacts) = futures::try_join!(
        client.get_profile(),
        client.list_documents(),
        client.list_health_records(),
        client.list_emergency_contacts(),
    )?;

    cache_dashboard(&app.cache, &profile, &documents, &records, &contacts);

    if app.json {
        return output::json_pretty(&json!({
            "profile": profile,
            "documents": documents,
            "healthRecords": records,
            "emergencyContacts": contacts,
        }));
    }
    super::profile::print_profile(app, &profile)?;
    println!("\nDocuments");
    super::records::print_documents(app, &documents)?;
    println!("\nHealth records");
    super::records::print_records(app, &records)?;
    println!("\nEmergency contacts");
    super::emergency::print_contacts(app, &contacts)
}

/// Refresh the offline copies. A failed write is logged and skipped;
/// returns how many writes failed.
fn cache_dashboard(
    cache: &CacheManager,
    profile: &Profile,
    documents: &[Document],
    records: &[HealthRecord],
    contacts: &[EmergencyContact],
) -> usize {
    let results = [
        ("profile", cache.save_profile(profile)),
        ("documents", cache.save_documents(documents)),
        ("health records", cache.save_health_records(records)),
        ("emergency contacts", cache.save_emergency_contacts(contacts)),
    ];
    let mut failed = 0;
    for (what, result) in results {
        if let Err(e) = result {
            warn!(error = %e, "Failed to cache {}", what);
            failed += 1;
        }
    }
    failed
}

pub fn show_config(app: &App) -> Result<()> {
    let config = &app.client_config;
    if app.json {
        return output::json_pretty(config);
    }
    output::field("API URL", &config.api_url);
    output::field("Frontend URL", &config.frontend_url);
    output::field("Timeout", &format!("{} ms", config.timeout_ms));
    output::field("Retry attempts", &format!("{} (not used)", config.retry_attempts));
    output::field("Analytics", &config.features.analytics.to_string());
    output::field("PWA", &config.features.pwa.to_string());
    output::field("Dark mode", &config.features.dark_mode.to_string());
    output::field(
        "Logged in",
        if app.client.is_authenticated() { "yes" } else { "no" },
    );
    Ok(())
}

pub fn image_check(app: &App, url: &str) -> Result<()> {
    let allowed = RemoteImagePolicy::default().is_allowed(url);
    if app.json {
        return output::json_pretty(&json!({ "url": url, "allowed": allowed }));
    }
    if allowed {
        output::success(&format!("{} may be displayed", url));
        Ok(())
    } else {
        anyhow::bail!("{} is not an allowed image source", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dashboard_writes_all_views() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(cache_dashboard(&cache, &Profile::default(), &[], &[], &[]), 0);
        assert!(cache.load_profile().unwrap().is_some());
        assert!(cache.load_emergency_contacts().unwrap().is_some());
    }

    #[test]
    fn test_cache_dashboard_tolerates_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("responses");
        let cache = CacheManager::new(cache_dir.clone()).unwrap();
        std::fs::remove_dir(&cache_dir).unwrap();

        assert_eq!(cache_dashboard(&cache, &Profile::default(), &[], &[], &[]), 4);
    }
}
