//! Output formatting helpers.

use anyhow::Result;
use serde::Serialize;
use vitalink_core::cache::CachedData;

/// Print a success message.
pub fn success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{:>14}: {}", label, value);
}

/// Describe where offline data came from, flagging stale copies.
pub fn cached_note<T>(cached: &CachedData<T>) -> String {
    if cached.is_stale() {
        format!("(cached {}, may be out of date)", cached.age_display())
    } else {
        format!("(cached {})", cached.age_display())
    }
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
