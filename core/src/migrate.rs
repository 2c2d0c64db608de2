//! Upgrade of older persisted record shapes to the current one.
//!
//! Early versions of the tracker stored `{errorCode, description, ...}`
//! without source provenance or browser fields. Rather than scattering
//! field-presence checks through the reader, the legacy-or-current shape is
//! declared once as [`StoredRecord`] and upgraded by a single total
//! function, run once per element at load.

use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

use crate::model::DEFAULT_BROWSER;
use crate::model::ErrorRecord;
use crate::model::Severity;
use crate::model::StatusDev;
use crate::model::apply_invariants;

/// Structural type covering every record shape ever written to the store.
///
/// Every field is optional or defaulted so that decoding a legacy element
/// never fails; [`upgrade`] resolves the fallbacks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Legacy name for `errorMessage`.
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    /// Legacy name for `context`.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default, deserialize_with = "integer_or_absent")]
    pub line: Option<i64>,
    #[serde(default, deserialize_with = "integer_or_absent")]
    pub column: Option<i64>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub status_dev: StatusDev,
    #[serde(default)]
    pub assigned_dev: String,
    #[serde(default)]
    pub fix_confirmed_support: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub notes_link: Option<String>,
}

/// Keep only values that are genuine integers; strings, floats, and null
/// all decode as absent rather than failing the whole element.
fn integer_or_absent<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        _ => None,
    })
}

/// Pure total upgrade from any stored shape to the current shape.
///
/// Idempotent: upgrading a record that is already current is the identity.
pub fn upgrade(stored: StoredRecord) -> ErrorRecord {
    apply_invariants(ErrorRecord {
        id: stored.id,
        error_message: stored
            .error_message
            .or(stored.error_code)
            .unwrap_or_default(),
        context: stored.context.or(stored.description).unwrap_or_default(),
        source_file: stored.source_file.unwrap_or_default(),
        line: stored.line,
        column: stored.column,
        browser: stored
            .browser
            .unwrap_or_else(|| DEFAULT_BROWSER.to_string()),
        severity: stored.severity,
        status_dev: stored.status_dev,
        assigned_dev: stored.assigned_dev,
        fix_confirmed_support: stored.fix_confirmed_support,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        notes_link: stored.notes_link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> StoredRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn legacy_shape_backfills_every_missing_field() {
        let upgraded = upgrade(parse(r#"{"errorCode":"E1","description":"d1"}"#));
        assert_eq!(upgraded.error_message, "E1");
        assert_eq!(upgraded.context, "d1");
        assert_eq!(upgraded.source_file, "");
        assert_eq!(upgraded.line, None);
        assert_eq!(upgraded.column, None);
        assert_eq!(upgraded.browser, "Chrome");
        assert_eq!(upgraded.severity, Severity::Medium);
        assert_eq!(upgraded.status_dev, StatusDev::Open);
    }

    #[test]
    fn current_field_wins_over_legacy_fallback() {
        let upgraded = upgrade(parse(
            r#"{"errorMessage":"new","errorCode":"old","context":"c","description":"d"}"#,
        ));
        assert_eq!(upgraded.error_message, "new");
        assert_eq!(upgraded.context, "c");
    }

    #[test]
    fn non_integer_provenance_is_dropped() {
        let upgraded = upgrade(parse(
            r#"{"errorCode":"E1","line":"12","column":7.5}"#,
        ));
        assert_eq!(upgraded.line, None);
        assert_eq!(upgraded.column, None);

        let kept = upgrade(parse(r#"{"errorCode":"E1","line":12,"column":3}"#));
        assert_eq!(kept.line, Some(12));
        assert_eq!(kept.column, Some(3));
    }

    #[test]
    fn upgrade_is_idempotent() {
        let once = upgrade(parse(
            r#"{"errorCode":"E1","description":"d1","line":12,"statusDev":"fixed","fixConfirmedSupport":true}"#,
        ));
        // Re-read the upgraded record through the stored shape and upgrade
        // again; nothing may change.
        let json = serde_json::to_string(&once).unwrap();
        let twice = upgrade(parse(&json));
        assert_eq!(once, twice);
    }

    #[test]
    fn stale_confirmation_is_normalized_at_load() {
        let upgraded = upgrade(parse(
            r#"{"errorMessage":"E1","statusDev":"open","fixConfirmedSupport":true}"#,
        ));
        assert!(!upgraded.fix_confirmed_support);
        assert_eq!(upgraded.status_dev, StatusDev::Open);
    }
}
