//! Schemas for every resource, built once at startup and handed around in a
//! [`SchemaRegistry`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::schema::{Field, Schema};
use crate::errors::AppError;

pub const USER_REGISTER: &str = "user-register";
pub const USER_LOGIN: &str = "user-login";
pub const USER_UPDATE: &str = "user-update";
pub const ID: &str = "id";
pub const SERVICE: &str = "service";
pub const BLOG: &str = "blog";
pub const CONTACT_FORM: &str = "contact-form";

pub const SERVICE_TYPES: &[&str] = &["legal", "accounting"];

pub const SERVICE_CATEGORIES: &[&str] = &[
    "corporate",
    "litigation",
    "real-estate",
    "family",
    "immigration",
    "intellectual-property",
    "employment",
    "tax",
    "audit",
    "bookkeeping",
    "payroll",
    "advisory",
];

pub const SERVICE_ICONS: &[&str] = &[
    "General",
    "Scale",
    "Gavel",
    "Briefcase",
    "Building",
    "Calculator",
    "ChartBar",
    "FileText",
    "Shield",
    "Users",
    "Landmark",
    "Receipt",
];

pub const DEFAULT_ICON: &str = "General";

pub const BLOG_CATEGORIES: &[&str] = &["legal", "accounting", "tax", "business", "compliance", "news"];

/// Widths of the `slug` columns; derived and explicit slugs never exceed them.
pub const SERVICE_SLUG_MAX: usize = 120;
pub const BLOG_SLUG_MAX: usize = 220;

/// Byline used when a post is created without an author.
pub const DEFAULT_AUTHOR: &str = "Meridian Legal & Accounting";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_.\- ]+$").expect("name regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static OBJECT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("object id regex"));
static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex"));

const NAME_PATTERN_MSG: &str = "Name may only contain letters, numbers, spaces, dots, dashes and underscores";
const EMAIL_PATTERN_MSG: &str = "Invalid email address";
const ID_PATTERN_MSG: &str = "Invalid id format";
const SLUG_PATTERN_MSG: &str = "Slug may only contain lowercase letters, numbers and single hyphens";

fn email() -> Field {
    Field::string("email").trim().lowercase().min_len(5).max_len(100).pattern(&EMAIL_RE, EMAIL_PATTERN_MSG)
}

fn slug(max: usize) -> Field {
    Field::string("slug").optional().trim().max_len(max).pattern(&SLUG_RE, SLUG_PATTERN_MSG)
}

pub fn user_register() -> Schema {
    Schema::new(
        USER_REGISTER,
        vec![
            // lowercased so login by name is case-insensitive
            Field::string("name").trim().lowercase().min_len(3).max_len(50).pattern(&NAME_RE, NAME_PATTERN_MSG),
            email(),
            Field::string("password").min_len(8).max_len(128),
        ],
    )
}

pub fn user_login() -> Schema {
    Schema::new(
        USER_LOGIN,
        vec![
            Field::string("name").trim().lowercase().min_len(2).max_len(100),
            Field::string("password").min_len(1).max_len(128),
        ],
    )
}

pub fn id() -> Schema {
    Schema::new(ID, vec![Field::string("id").label("Id").pattern(&OBJECT_ID_RE, ID_PATTERN_MSG)])
}

pub fn service() -> Schema {
    Schema::new(
        SERVICE,
        vec![
            Field::string("name").trim().min_len(3).max_len(100),
            slug(SERVICE_SLUG_MAX),
            Field::string("type").trim().lowercase().one_of(SERVICE_TYPES),
            Field::string("category").trim().lowercase().one_of(SERVICE_CATEGORIES),
            Field::string("shortDescription").label("Short description").trim().min_len(1).max_len(300),
            Field::string("fullDescription").label("Full description").trim().min_len(1),
            Field::string_list("details").trim().non_empty_items(),
            Field::string("iconUrl").label("Icon").trim().one_of(SERVICE_ICONS).default_value(DEFAULT_ICON),
        ],
    )
}

pub fn blog() -> Schema {
    Schema::new(
        BLOG,
        vec![
            Field::string("title").trim().min_len(5).max_len(200),
            Field::string("category").trim().lowercase().one_of(BLOG_CATEGORIES),
            slug(BLOG_SLUG_MAX),
            Field::string("description").optional().trim().max_len(500),
            Field::string("content").trim().min_len(20),
            Field::string("author").trim().min_len(3).max_len(100).default_value(DEFAULT_AUTHOR),
            Field::date("publishedAt").label("Published at").default_now(),
            Field::boolean("isPublished").default_value(false),
            Field::integer("viewsCount").label("Views count").min(0).default_value(0),
        ],
    )
}

pub fn contact_form() -> Schema {
    Schema::new(
        CONTACT_FORM,
        vec![
            Field::string("name").trim().min_len(2).max_len(100),
            email(),
            Field::string("subject").trim().min_len(3).max_len(150),
            Field::string("message").trim().min_len(10).max_len(2000),
        ],
    )
}

/// Immutable set of schemas, constructed once and shared by reference.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    user_register: Schema,
    user_login: Schema,
    user_update: Schema,
    id: Schema,
    service: Schema,
    blog: Schema,
    contact_form: Schema,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let user_register = user_register();
        Self {
            user_update: user_register.partial(),
            user_register,
            user_login: user_login(),
            id: id(),
            service: service(),
            blog: blog(),
            contact_form: contact_form(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        match name {
            USER_REGISTER => Some(&self.user_register),
            USER_LOGIN => Some(&self.user_login),
            USER_UPDATE => Some(&self.user_update),
            ID => Some(&self.id),
            SERVICE => Some(&self.service),
            BLOG => Some(&self.blog),
            CONTACT_FORM => Some(&self.contact_form),
            _ => None,
        }
    }

    /// Validate `input` against the named schema.
    pub fn validate(&self, name: &str, input: &Value) -> Result<Map<String, Value>, AppError> {
        self.get(name)
            .ok_or_else(|| AppError::system(format!("unknown schema `{name}`")))?
            .validate(input)
    }

    /// Check an identifier's shape before it reaches persistence.
    pub fn validate_id(&self, id: &str) -> Result<(), AppError> {
        self.id.validate(&json!({ "id": id })).map(|_| ())
    }

    pub fn user_register(&self) -> &Schema { &self.user_register }
    pub fn user_login(&self) -> &Schema { &self.user_login }
    /// Partial of the registration schema.
    pub fn user_update(&self) -> &Schema { &self.user_update }
    pub fn service(&self) -> &Schema { &self.service }
    pub fn blog(&self) -> &Schema { &self.blog }
    pub fn contact_form(&self) -> &Schema { &self.contact_form }
}
