use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::{Account, AccountError, NewAccount};

const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "address", "phone_number"];

/// Account representation as submitted by a client on create and update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct AccountPayload {
    /// Ignored on create, checked against the path on update
    pub id: Option<i32>,
    #[schema(example = "Joe")]
    pub name: String,
    #[schema(example = "joe@example.com")]
    pub email: String,
    pub address: String,
    pub phone_number: String,
    /// Defaults to the current date on create
    pub date_joined: Option<NaiveDate>,
}

impl AccountPayload {
    /// Validates a decoded JSON document and turns it into a payload
    pub fn from_value(value: Value) -> Result<Self, AccountError> {
        let object = value.as_object().ok_or(AccountError::NotAnObject)?;
        if let Some(field) = REQUIRED_FIELDS
            .into_iter()
            .find(|field| !object.contains_key(*field))
        {
            return Err(AccountError::MissingField(field));
        }

        let payload: AccountPayload = serde_json::from_value(value)
            .map_err(|e| AccountError::InvalidField(e.to_string()))?;
        payload.validate()?;
        Ok(payload)
    }

    fn validate(&self) -> Result<(), AccountError> {
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidField("name must not be empty".into()));
        }
        if !looks_like_email(&self.email) {
            return Err(AccountError::InvalidField(format!(
                "{:?} is not an email address",
                self.email
            )));
        }
        Ok(())
    }

    /// Builds the account to insert; `today` is used when no join date was given
    pub fn into_new_account(self, today: NaiveDate) -> NewAccount {
        NewAccount {
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
            date_joined: self.date_joined.unwrap_or(today),
        }
    }

    /// Overwrites every mutable field of `account`; the id is left untouched.
    /// An omitted `date_joined` keeps the stored join date rather than resetting it
    pub fn apply_to(self, account: &mut Account) {
        account.name = self.name;
        account.email = self.email;
        account.address = self.address;
        account.phone_number = self.phone_number;
        if let Some(date_joined) = self.date_joined {
            account.date_joined = date_joined;
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub date_joined: NaiveDate,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            address: account.address,
            phone_number: account.phone_number,
            date_joined: account.date_joined,
        }
    }
}
