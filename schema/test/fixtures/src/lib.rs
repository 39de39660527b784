//! Shared entity fixtures for TypeQuery integration tests.
//!
//! `User` mirrors a typical generated entity: a closed field enum with
//! static descriptors, plus the value mapping the engine reads and writes
//! through. Every non-text slot is optional in storage so that projection
//! can clear it.

use serde::{Deserialize, Serialize};
use typequery::{
    core::error::InternalError,
    prelude::{EntityKind, FieldKind, FieldModel, FieldRef, Id, Timestamp, Value},
};

///
/// User
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct User {
    pub id: Id,
    pub handle: String,
    pub bio: Option<String>,
    pub num_posts: Option<i64>,
    pub created_at_millis: Option<i64>,
    pub some_decimal: Option<f64>,
    pub some_datetime: Option<Timestamp>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            handle: String::new(),
            bio: None,
            num_posts: Some(0),
            created_at_millis: None,
            some_decimal: None,
            some_datetime: None,
        }
    }
}

impl User {
    #[must_use]
    pub fn handle(mut self, handle: &str) -> Self {
        handle.clone_into(&mut self.handle);
        self
    }

    #[must_use]
    pub fn bio(mut self, bio: &str) -> Self {
        self.bio = Some(bio.to_string());
        self
    }

    #[must_use]
    pub const fn num_posts(mut self, num_posts: i64) -> Self {
        self.num_posts = Some(num_posts);
        self
    }

    #[must_use]
    pub const fn created_at_millis(mut self, millis: i64) -> Self {
        self.created_at_millis = Some(millis);
        self
    }

    #[must_use]
    pub const fn some_decimal(mut self, value: f64) -> Self {
        self.some_decimal = Some(value);
        self
    }

    #[must_use]
    pub const fn some_datetime(mut self, millis: i64) -> Self {
        self.some_datetime = Some(Timestamp::from_millis(millis));
        self
    }
}

///
/// UserField
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UserField {
    Handle,
    Bio,
    NumPosts,
    CreatedAtMillis,
    SomeDecimal,
    SomeDatetime,
}

const HANDLE: FieldModel = FieldModel::required("handle", FieldKind::Text);
const BIO: FieldModel = FieldModel::optional("bio", FieldKind::Text);
const NUM_POSTS: FieldModel = FieldModel::required("num_posts", FieldKind::Int);
const CREATED_AT_MILLIS: FieldModel = FieldModel::optional("created_at_millis", FieldKind::Int);
const SOME_DECIMAL: FieldModel = FieldModel::optional("some_decimal", FieldKind::Float);
const SOME_DATETIME: FieldModel = FieldModel::optional("some_datetime", FieldKind::Timestamp);

impl FieldRef for UserField {
    fn model(self) -> &'static FieldModel {
        match self {
            Self::Handle => &HANDLE,
            Self::Bio => &BIO,
            Self::NumPosts => &NUM_POSTS,
            Self::CreatedAtMillis => &CREATED_AT_MILLIS,
            Self::SomeDecimal => &SOME_DECIMAL,
            Self::SomeDatetime => &SOME_DATETIME,
        }
    }
}

impl EntityKind for User {
    type Field = UserField;

    const ENTITY_NAME: &'static str = "User";
    const FIELDS: &'static [UserField] = &[
        UserField::Handle,
        UserField::Bio,
        UserField::NumPosts,
        UserField::CreatedAtMillis,
        UserField::SomeDecimal,
        UserField::SomeDatetime,
    ];

    fn id(&self) -> Id {
        self.id
    }

    fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    fn get_value(&self, field: UserField) -> Value {
        match field {
            UserField::Handle => Value::from(&self.handle),
            UserField::Bio => Value::from(self.bio.clone()),
            UserField::NumPosts => Value::from(self.num_posts),
            UserField::CreatedAtMillis => Value::from(self.created_at_millis),
            UserField::SomeDecimal => Value::from(self.some_decimal),
            UserField::SomeDatetime => Value::from(self.some_datetime),
        }
    }

    fn set_value(&mut self, field: UserField, value: Value) -> Result<(), InternalError> {
        match (field, value) {
            (UserField::Handle, Value::Text(v)) => self.handle = v,
            (UserField::Bio, Value::Text(v)) => self.bio = Some(v),
            (UserField::Bio, Value::Null) => self.bio = None,
            (UserField::NumPosts, Value::Int(v)) => self.num_posts = Some(v),
            (UserField::NumPosts, Value::Null) => self.num_posts = None,
            (UserField::CreatedAtMillis, Value::Int(v)) => self.created_at_millis = Some(v),
            (UserField::CreatedAtMillis, Value::Null) => self.created_at_millis = None,
            (UserField::SomeDecimal, Value::Float(v)) => self.some_decimal = Some(v),
            (UserField::SomeDecimal, Value::Null) => self.some_decimal = None,
            (UserField::SomeDatetime, Value::Timestamp(v)) => self.some_datetime = Some(v),
            (UserField::SomeDatetime, Value::Null) => self.some_datetime = None,
            (field, value) => {
                return Err(InternalError::value_kind_mismatch(
                    Self::ENTITY_NAME,
                    field.name(),
                    value,
                ));
            }
        }

        Ok(())
    }
}
