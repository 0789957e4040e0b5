//! The profile record and its remote representation.
//!
//! A [`ProfileRecord`] is the single in-memory copy of the user's
//! membership application. It is a plain value object: field validation is
//! the completeness check's job, and marshalling to the remote store goes
//! through [`RemoteRecord`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{AssetRef, UserIdentifier};

/// The default birthday for a record that has never set one.
#[must_use]
pub fn default_birthday() -> NaiveDate {
    NaiveDate::from_ymd_opt(1980, 1, 1).unwrap_or_default()
}

/// A user's membership profile.
///
/// Created with default values at sign-in and overwritten field-by-field
/// from the remote record when one exists. The identifier is assigned once
/// and cannot be edited; every other field is freely mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Primary key for the remote record. Immutable once assigned.
    user_identifier: UserIdentifier,
    /// Given name. Required for a complete form.
    pub first_name: String,
    /// Family name. Required for a complete form.
    pub last_name: String,
    /// Email claim from the identity provider, if the user consented.
    pub email: Option<String>,
    /// Street address. Required for a complete form.
    pub street_address: String,
    /// City. Required for a complete form.
    pub city: String,
    /// State. Required for a complete form.
    pub state: String,
    /// Zip code. Required for a complete form.
    pub zip_code: String,
    /// Phone number. Required for a complete form.
    pub phone_number: String,
    /// Birthday. Not required; defaults to 1980-01-01.
    pub birthday: NaiveDate,
    /// Reference to the stored avatar asset, if one was uploaded.
    pub avatar: Option<AssetRef>,
}

impl ProfileRecord {
    /// Create an empty record for a freshly signed-in user.
    #[must_use]
    pub fn new(user_identifier: UserIdentifier) -> Self {
        Self {
            user_identifier,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            street_address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            phone_number: String::new(),
            birthday: default_birthday(),
            avatar: None,
        }
    }

    /// The identifier this record is keyed by.
    #[must_use]
    pub const fn user_identifier(&self) -> &UserIdentifier {
        &self.user_identifier
    }

    /// Whether every required form field is filled in.
    ///
    /// Birthday, email, and avatar are not required. This is recomputed on
    /// every call rather than cached, so it always reflects the current
    /// field values.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.street_address.is_empty()
            && !self.city.is_empty()
            && !self.state.is_empty()
            && !self.zip_code.is_empty()
            && !self.phone_number.is_empty()
    }

    /// Marshal this record into its remote key-value representation.
    ///
    /// The identifier itself is the record key, not a field.
    #[must_use]
    pub fn to_remote(&self) -> RemoteRecord {
        RemoteRecord {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            user_email: self.email.clone(),
            street_address: Some(self.street_address.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            zip_code: Some(self.zip_code.clone()),
            birthday: Some(self.birthday),
            phone_number: Some(self.phone_number.clone()),
            avatar: self.avatar.clone(),
        }
    }

    /// Build a record from its remote representation.
    ///
    /// Every absent field falls back to its default: empty string, epoch
    /// birthday, or absent email/avatar. No validation happens here.
    #[must_use]
    pub fn from_remote(user_identifier: UserIdentifier, remote: RemoteRecord) -> Self {
        Self {
            user_identifier,
            first_name: remote.first_name.unwrap_or_default(),
            last_name: remote.last_name.unwrap_or_default(),
            email: remote.user_email,
            street_address: remote.street_address.unwrap_or_default(),
            city: remote.city.unwrap_or_default(),
            state: remote.state.unwrap_or_default(),
            zip_code: remote.zip_code.unwrap_or_default(),
            phone_number: remote.phone_number.unwrap_or_default(),
            birthday: remote.birthday.unwrap_or_else(default_birthday),
            avatar: remote.avatar,
        }
    }
}

/// The flat key-value shape of a profile record in the remote store.
///
/// Field names match the stored record keys. Every field is optional on
/// the wire; a record written by an older client may be missing any of
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AssetRef>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identifier() -> UserIdentifier {
        UserIdentifier::parse("test-user").unwrap()
    }

    fn complete_record() -> ProfileRecord {
        let mut record = ProfileRecord::new(identifier());
        record.first_name = "Ada".to_owned();
        record.last_name = "Lovelace".to_owned();
        record.street_address = "12 Analytical Way".to_owned();
        record.city = "London".to_owned();
        record.state = "LN".to_owned();
        record.zip_code = "12345".to_owned();
        record.phone_number = "555-0100".to_owned();
        record
    }

    #[test]
    fn test_new_record_is_default() {
        let record = ProfileRecord::new(identifier());
        assert_eq!(record.first_name, "");
        assert_eq!(record.last_name, "");
        assert_eq!(record.email, None);
        assert_eq!(record.birthday, default_birthday());
        assert_eq!(record.avatar, None);
    }

    #[test]
    fn test_default_birthday() {
        assert_eq!(
            default_birthday(),
            NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_empty_record_incomplete() {
        assert!(!ProfileRecord::new(identifier()).is_complete());
    }

    #[test]
    fn test_all_required_fields_complete() {
        assert!(complete_record().is_complete());
    }

    #[test]
    fn test_each_required_field_gates_completeness() {
        let clear_one: [fn(&mut ProfileRecord); 7] = [
            |r| r.first_name.clear(),
            |r| r.last_name.clear(),
            |r| r.street_address.clear(),
            |r| r.city.clear(),
            |r| r.state.clear(),
            |r| r.zip_code.clear(),
            |r| r.phone_number.clear(),
        ];

        for clear in clear_one {
            let mut record = complete_record();
            clear(&mut record);
            assert!(!record.is_complete());
        }
    }

    #[test]
    fn test_optional_fields_do_not_gate_completeness() {
        let mut record = complete_record();
        record.email = None;
        record.avatar = None;
        record.birthday = default_birthday();
        assert!(record.is_complete());
    }

    #[test]
    fn test_remote_roundtrip_fully_populated() {
        let mut record = complete_record();
        record.email = Some("ada@example.com".to_owned());
        record.birthday = NaiveDate::from_ymd_opt(1985, 12, 10).unwrap();
        record.avatar = Some(AssetRef::new("asset-1"));

        let restored = ProfileRecord::from_remote(identifier(), record.to_remote());
        assert_eq!(restored, record);
    }

    #[test]
    fn test_from_remote_defaults_absent_fields() {
        let record = ProfileRecord::from_remote(identifier(), RemoteRecord::default());
        assert_eq!(record, ProfileRecord::new(identifier()));
    }

    #[test]
    fn test_from_remote_partial_record() {
        let remote = RemoteRecord {
            first_name: Some("Ada".to_owned()),
            ..RemoteRecord::default()
        };

        let record = ProfileRecord::from_remote(identifier(), remote);
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "");
        assert_eq!(record.birthday, default_birthday());
    }

    #[test]
    fn test_remote_key_names() {
        let mut record = complete_record();
        record.email = Some("ada@example.com".to_owned());

        let json = serde_json::to_value(record.to_remote()).unwrap();
        let keys = json.as_object().unwrap();
        assert!(keys.contains_key("firstName"));
        assert!(keys.contains_key("lastName"));
        assert!(keys.contains_key("userEmail"));
        assert!(keys.contains_key("streetAddress"));
        assert!(keys.contains_key("zipCode"));
        assert!(keys.contains_key("phoneNumber"));
        assert!(keys.contains_key("birthday"));
        // Absent optional fields are omitted, not null
        assert!(!keys.contains_key("avatar"));
    }

    #[test]
    fn test_birthday_serializes_as_date_string() {
        let remote = complete_record().to_remote();
        let json = serde_json::to_value(remote).unwrap();
        assert_eq!(json["birthday"], "1980-01-01");
    }

    #[test]
    fn test_identifier_survives_remote_overwrite() {
        let record = ProfileRecord::from_remote(identifier(), complete_record().to_remote());
        assert_eq!(record.user_identifier(), &identifier());
    }
}
