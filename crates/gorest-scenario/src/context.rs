//! Scenario-local state

/// The user created by the current run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    pub id: u64,
    pub email: String,
}

/// State carried from one step to the next.
///
/// One context per run; steps that need the created user read it from here
/// instead of from shared globals.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    created: Option<CreatedUser>,
}

impl ScenarioContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// The created user, if the create step succeeded
    pub fn created_user(&self) -> Option<&CreatedUser> {
        self.created.as_ref()
    }

    /// Remember a freshly created user, replacing any previous one
    pub fn record_created(&mut self, id: u64, email: impl Into<String>) {
        self.created = Some(CreatedUser {
            id,
            email: email.into(),
        });
    }

    /// Track an email change of the created user
    pub fn record_email(&mut self, email: impl Into<String>) {
        if let Some(user) = self.created.as_mut() {
            user.email = email.into();
        }
    }
}
