//! Webhook payload types sent by the content backend.
//!
//! Only the handful of fields needed to locate the changed page are modelled.
//! Every level is optional so partial envelopes still parse.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Entry change notification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sys: EntrySys,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: EntryFields,
}

/// System metadata of the changed entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntrySys {
    #[serde(default, rename = "contentType")]
    pub content_type: Option<ContentTypeLink>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Link object pointing at the entry's content type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentTypeLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sys: ContentTypeSys,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentTypeSys {
    #[serde(default)]
    pub id: Option<String>,
}

/// Localized entry fields. Only `slug` matters here.
///
/// Untranslated locales arrive as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFields {
    #[serde(default)]
    pub slug: Option<HashMap<String, Option<String>>>,
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl WebhookPayload {
    /// Parse the raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Content type identifier, e.g. `blogPost`.
    pub fn content_type_id(&self) -> Option<&str> {
        self.sys
            .content_type
            .as_ref()
            .and_then(|link| link.sys.id.as_deref())
    }

    /// Locale the event was emitted for, or the given default when absent or empty.
    pub fn locale_or<'a>(&'a self, default_locale: &'a str) -> &'a str {
        self.sys
            .locale
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(default_locale)
    }

    /// Slug for the event's locale. Empty slugs count as absent.
    pub fn slug(&self, default_locale: &str) -> Option<&str> {
        let locale = self.locale_or(default_locale);
        self.fields
            .slug
            .as_ref()
            .and_then(|slugs| slugs.get(locale))
            .and_then(|slug| slug.as_deref())
            .filter(|s| !s.is_empty())
    }
}
