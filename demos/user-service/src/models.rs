use mocksmith::redirect::{self, FieldCopy};
use mocksmith::{args, FromValue, MockResult, Record, Signature, TypeTag, Value};
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: Some(email.into()),
        }
    }

    /// Signature of the `(id, name, email)` constructor seam.
    pub fn signature() -> Signature {
        Signature::new([TypeTag::I64, TypeTag::Str, TypeTag::Str])
    }

    /// Construct through the constructor seam, so tests can substitute a
    /// pre-built user.
    pub fn create(id: i64, name: &str, email: &str) -> MockResult<Self> {
        redirect::construct(&Self::signature(), args![id, name, email], || {
            User::with_email(id, name, email)
        })
    }

    /// Like [`User::create`] but always runs the real constructor and then
    /// overlays the substitute's fields.
    pub fn create_in_place(id: i64, name: &str, email: &str) -> MockResult<Self> {
        redirect::construct_in_place(&Self::signature(), args![id, name, email], || {
            User::with_email(id, name, email)
        })
    }

    pub fn score(&self) -> MockResult<i32> {
        redirect::private_call(self, "calculate_score", args![], || self.calculate_score())
    }

    fn calculate_score(&self) -> i32 {
        (self.id * 10) as i32 + self.name.len() as i32
    }
}

impl From<&User> for Value {
    fn from(user: &User) -> Self {
        Value::Record(
            Record::new("User")
                .field("id", user.id)
                .field("name", &user.name)
                .field("email", user.email.clone()),
        )
    }
}

impl From<User> for Value {
    fn from(user: User) -> Self {
        Value::from(&user)
    }
}

impl FromValue for User {
    fn from_value(value: Value) -> MockResult<Self> {
        let mut record = Record::from_value(value)?;
        let email = if record.get("email").is_some() {
            record.take("email")?
        } else {
            None
        };
        Ok(User {
            id: record.take("id")?,
            name: record.take("name")?,
            email,
        })
    }
}

impl FieldCopy for User {
    fn copy_fields_from(&mut self, source: &Record) -> MockResult<()> {
        let mut source = source.clone();
        if source.get("id").is_some() {
            self.id = source.take("id")?;
        }
        if source.get("name").is_some() {
            self.name = source.take("name")?;
        }
        if source.get("email").is_some() {
            self.email = source.take("email")?;
        }
        Ok(())
    }
}

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

/// Process-wide id source with a static seam.
pub struct IdGenerator;

impl IdGenerator {
    pub fn next_id() -> MockResult<i64> {
        redirect::static_call::<IdGenerator, _, _>("next_id", args![], || {
            NEXT_ID.fetch_add(1, Ordering::Relaxed)
        })
    }
}
