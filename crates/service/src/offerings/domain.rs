use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read view of a service offering. Internal bookkeeping (version) is not
/// part of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub short_description: String,
    pub full_description: String,
    pub details: Vec<String>,
    pub icon_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Output of the `service` schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingInput {
    pub name: String,
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub short_description: String,
    pub full_description: String,
    pub details: Vec<String>,
    pub icon_url: String,
}

#[derive(Debug, Clone)]
pub struct NewOffering {
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub category: String,
    pub short_description: String,
    pub full_description: String,
    pub details: Vec<String>,
    pub icon_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub details: Option<Vec<String>>,
    pub icon_url: Option<String>,
}

impl OfferingPatch {
    pub(crate) fn apply(self, o: &mut Offering) {
        if let Some(v) = self.name { o.name = v; }
        if let Some(v) = self.slug { o.slug = v; }
        if let Some(v) = self.kind { o.kind = v; }
        if let Some(v) = self.category { o.category = v; }
        if let Some(v) = self.short_description { o.short_description = v; }
        if let Some(v) = self.full_description { o.full_description = v; }
        if let Some(v) = self.details { o.details = v; }
        if let Some(v) = self.icon_url { o.icon_url = v; }
    }
}
