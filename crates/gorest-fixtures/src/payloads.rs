//! Randomized request bodies
//!
//! Every call draws from the thread-local RNG and a fresh UUID, so builders
//! hold no mutable state and can be shared freely.

use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

use crate::model::{Gender, NewUser, UserStatus, UserUpdate};

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Amara", "Bola", "Chen", "Daniela", "Emeka", "Farah", "Grace", "Hiro", "Ines",
    "Jane", "Kwame", "Lena", "Mateo", "Nia", "Omar", "Priya", "Quinn", "Ravi", "Sofia",
];

const LAST_NAMES: &[&str] = &[
    "Adeyemi", "Banerjee", "Costa", "Doe", "Eriksen", "Fischer", "Gupta", "Haddad", "Ivanova",
    "Johnson", "Kim", "Lopez", "Mensah", "Nakamura", "Okafor", "Patel", "Rossi", "Silva",
    "Tanaka", "Walker",
];

/// Builds create and update payloads for the user endpoints
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    email_domain: String,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new("example.com")
    }
}

impl PayloadBuilder {
    /// Create a builder generating addresses under `email_domain`
    pub fn new(email_domain: impl Into<String>) -> Self {
        Self {
            email_domain: email_domain.into(),
        }
    }

    /// Random name, gender, status and a unique email.
    pub fn new_user_payload(&self) -> NewUser {
        let mut rng = rand::thread_rng();
        let (first, last) = random_name(&mut rng);

        let gender = if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };
        let status = if rng.gen_bool(0.5) {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        };

        NewUser {
            name: format!("{first} {last}"),
            gender,
            email: self.email_for(first, last),
            status,
        }
    }

    /// Fresh name, the given email (not validated) and status `active`.
    pub fn update_payload(&self, new_email: impl Into<String>) -> UserUpdate {
        UserUpdate {
            name: format!("Updated Name {}", short_id()),
            email: new_email.into(),
            status: UserStatus::Active,
        }
    }

    /// A lowercase address that will not repeat within a run
    pub fn unique_email(&self) -> String {
        let (first, last) = random_name(&mut rand::thread_rng());
        self.email_for(first, last)
    }

    fn email_for(&self, first: &str, last: &str) -> String {
        format!("{first}.{last}.{}@{}", short_id(), self.email_domain).to_lowercase()
    }
}

fn random_name<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Jane");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    (first, last)
}

fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_new_user_payload_shape() {
        let payload = PayloadBuilder::default().new_user_payload();

        assert_eq!(payload.name.split(' ').count(), 2);
        assert!(payload.email.ends_with("@example.com"));
        assert_eq!(payload.email, payload.email.to_lowercase());
    }

    #[test]
    fn test_emails_do_not_repeat() {
        let builder = PayloadBuilder::default();
        let emails: HashSet<String> = (0..1000)
            .map(|_| builder.new_user_payload().email)
            .collect();
        assert_eq!(emails.len(), 1000);
    }

    #[test]
    fn test_update_payload() {
        let builder = PayloadBuilder::default();
        let first = builder.update_payload("new@example.com");
        let second = builder.update_payload("NOT AN EMAIL");

        assert_eq!(first.email, "new@example.com");
        assert_eq!(second.email, "NOT AN EMAIL");
        assert_eq!(first.status, UserStatus::Active);
        assert!(first.name.starts_with("Updated Name "));
        assert_ne!(first.name, second.name);
    }

    #[test]
    fn test_random_name_draws_from_pools() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let (first, last) = random_name(&mut rng);
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
        }
    }

    #[test]
    fn test_custom_domain() {
        let email = PayloadBuilder::new("QA.Example.org").unique_email();
        assert!(email.ends_with("@qa.example.org"));
    }

    #[test]
    fn test_both_genders_and_statuses_appear() {
        let builder = PayloadBuilder::default();
        let payloads: Vec<NewUser> = (0..200).map(|_| builder.new_user_payload()).collect();

        assert!(payloads.iter().any(|p| p.gender == Gender::Male));
        assert!(payloads.iter().any(|p| p.gender == Gender::Female));
        assert!(payloads.iter().any(|p| p.status == UserStatus::Active));
        assert!(payloads.iter().any(|p| p.status == UserStatus::Inactive));
    }
}
