use anyhow::Result;
use tracing::warn;
use vitalink_core::models::{Document, HealthRecord, NewDocument, NewHealthRecord};

use crate::app::App;
use crate::cli::{DocumentsCommand, RecordsCommand};
use crate::format::{format_date, format_optional, truncate_string};
use crate::output;

/// Column width for titles and values in list output
const TITLE_WIDTH: usize = 40;

pub async fn handle_documents(app: &App, command: DocumentsCommand) -> Result<()> {
    match command {
        DocumentsCommand::List { offline } => {
            let documents = if offline {
                match app.cache.load_documents()? {
                    Some(cached) => {
                        eprintln!("{}", output::cached_note(&cached));
                        cached.data
                    }
                    None => anyhow::bail!("No cached documents. Run without --offline first."),
                }
            } else {
                app.require_login()?;
                let documents = app.client.list_documents().await?;
                if let Err(e) = app.cache.save_documents(&documents) {
                    warn!(error = %e, "Failed to cache documents");
                }
                documents
            };
            print_documents(app, &documents)
        }
        DocumentsCommand::Show { id } => {
            app.require_login()?;
            let document = app.client.get_document(&id).await?;
            if app.json {
                return output::json_pretty(&document);
            }
            output::field("Title", &document.title);
            output::field("Category", &format_optional(&document.category, "-"));
            output::field("Type", &format_optional(&document.mime_type, "-"));
            output::field("Uploaded", &format_date(document.uploaded_at));
            output::field("File", &format_optional(&document.file_url, "-"));
            Ok(())
        }
        DocumentsCommand::Add {
            title,
            category,
            url,
        } => {
            app.require_login()?;
            let document = app
                .client
                .create_document(&NewDocument {
                    title,
                    category,
                    file_url: url,
                })
                .await?;
            output::success(&format!("Added document {} ({})", document.title, document.id));
            Ok(())
        }
        DocumentsCommand::Rm { id } => {
            app.require_login()?;
            app.client.delete_document(&id).await?;
            output::success(&format!("Deleted document {}", id));
            Ok(())
        }
    }
}

pub(crate) fn print_documents(app: &App, documents: &[Document]) -> Result<()> {
    if app.json {
        return output::json_pretty(documents);
    }
    if documents.is_empty() {
        println!("No documents");
    }
    for doc in documents {
        println!(
            "{:<12} {:<width$} {:<14} {}",
            doc.id,
            truncate_string(&doc.title, TITLE_WIDTH),
            format_optional(&doc.category, "-"),
            format_date(doc.uploaded_at),
            width = TITLE_WIDTH
        );
    }
    Ok(())
}

pub async fn handle_records(app: &App, command: RecordsCommand) -> Result<()> {
    match command {
        RecordsCommand::List { offline } => {
            let records = if offline {
                match app.cache.load_health_records()? {
                    Some(cached) => {
                        eprintln!("{}", output::cached_note(&cached));
                        cached.data
                    }
                    None => anyhow::bail!("No cached records. Run without --offline first."),
                }
            } else {
                app.require_login()?;
                let records = app.client.list_health_records().await?;
                if let Err(e) = app.cache.save_health_records(&records) {
                    warn!(error = %e, "Failed to cache health records");
                }
                records
            };
            print_records(app, &records)
        }
        RecordsCommand::Add {
            record_type,
            value,
            notes,
        } => {
            app.require_login()?;
            let record = app
                .client
                .create_health_record(&NewHealthRecord {
                    record_type,
                    value,
                    notes,
                    recorded_at: Some(chrono::Utc::now()),
                })
                .await?;
            output::success(&format!("Added {} record ({})", record.record_type, record.id));
            Ok(())
        }
        RecordsCommand::Rm { id } => {
            app.require_login()?;
            app.client.delete_health_record(&id).await?;
            output::success(&format!("Deleted record {}", id));
            Ok(())
        }
    }
}

pub(crate) fn print_records(app: &App, records: &[HealthRecord]) -> Result<()> {
    if app.json {
        return output::json_pretty(records);
    }
    if records.is_empty() {
        println!("No health records");
    }
    for record in records {
        println!(
            "{:<12} {:<16} {:<width$} {}",
            record.id,
            record.record_type,
            truncate_string(&format_optional(&record.value, "-"), TITLE_WIDTH),
            format_date(record.recorded_at),
            width = TITLE_WIDTH
        );
    }
    Ok(())
}
