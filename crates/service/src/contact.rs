//! Contact form intake. Messages are validated and logged; nothing is stored.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::validation::SchemaRegistry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub struct ContactService {
    schemas: Arc<SchemaRegistry>,
}

impl ContactService {
    pub fn new(schemas: Arc<SchemaRegistry>) -> Self {
        Self { schemas }
    }

    #[instrument(skip_all)]
    pub fn submit(&self, raw: &Value) -> Result<ContactMessage, AppError> {
        let msg: ContactMessage = self.schemas.contact_form().parse(raw)?;
        info!(email = %msg.email, subject = %msg.subject, chars = msg.message.chars().count(), "contact_received");
        Ok(msg)
    }
}
