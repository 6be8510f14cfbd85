//! The user lifecycle scenario

use std::sync::Arc;

use gorest_config::EnvConfig;
use gorest_fixtures::{HeaderProvider, NewUser, PayloadBuilder, User};
use gorest_http::{HttpClient, HttpClientTrait, HttpConfig, HttpError, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    assertions::{decode, expect_eq, expect_status},
    context::{CreatedUser, ScenarioContext},
    error::{Result, ScenarioError},
    report::{ScenarioReport, Step, StepOutcome},
};

/// Collection path of the user resource
pub const USERS_PATH: &str = "/users";

/// Message the API returns for an unknown user id
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";

/// What a step does when it needs a created user and there is none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreconditionPolicy {
    /// Report the step as skipped
    #[default]
    Skip,
    /// Report the step as failed with `UnmetPrecondition`
    Fail,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Create → list → update → get → delete → verify-deleted
pub struct UserLifecycle {
    client: Arc<dyn HttpClientTrait>,
    headers: HeaderProvider,
    payloads: PayloadBuilder,
    policy: PreconditionPolicy,
}

impl UserLifecycle {
    /// Scenario over an existing client
    pub fn new(
        client: Arc<dyn HttpClientTrait>,
        headers: HeaderProvider,
        payloads: PayloadBuilder,
    ) -> Self {
        Self {
            client,
            headers,
            payloads,
            policy: PreconditionPolicy::default(),
        }
    }

    /// Scenario against the configured environment with a logging client
    pub fn from_config(config: &EnvConfig) -> Result<Self> {
        let http_config = HttpConfig::json_api(&config.base_url).with_timeout(config.timeout());
        let client = HttpClient::new(http_config)
            .map_err(|e| ScenarioError::http("build HTTP client", e))?;

        Ok(Self::new(
            Arc::new(client),
            HeaderProvider::from_config(config),
            PayloadBuilder::default(),
        ))
    }

    /// Change how dependent steps react to a missing user
    pub fn with_policy(mut self, policy: PreconditionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run every step in order on a fresh context.
    ///
    /// A failing step does not stop the run; steps that depend on the
    /// created user follow the configured [`PreconditionPolicy`].
    pub async fn run(&self) -> ScenarioReport {
        let mut ctx = ScenarioContext::new();
        let mut report = ScenarioReport::new();

        report.record(Step::Create, self.create_user(&mut ctx).await);
        report.record(Step::List, self.list_users(&ctx).await);
        report.record(Step::Update, self.update_user(&mut ctx).await);
        report.record(Step::GetById, self.get_user(&ctx).await);
        report.record(Step::Delete, self.delete_user(&ctx).await);
        report.record(Step::VerifyDeleted, self.verify_deleted(&ctx).await);

        report.log_summary();
        report
    }

    /// Create a user from a generated payload.
    pub async fn create_user(&self, ctx: &mut ScenarioContext) -> Result<StepOutcome> {
        let payload = self.payloads.new_user_payload();
        self.create_user_with(ctx, &payload).await
    }

    /// Create a user from the given payload; requires 201 and an echo of
    /// every field, then stores the new id and email in `ctx`.
    pub async fn create_user_with(
        &self,
        ctx: &mut ScenarioContext,
        payload: &NewUser,
    ) -> Result<StepOutcome> {
        let step = Step::Create;
        let headers = self.headers.authenticated_headers()?;
        let body = serde_json::to_value(payload)?;

        let response = self
            .client
            .post(USERS_PATH, &body, &headers)
            .await
            .map_err(|e| ScenarioError::http("create user", e))?;

        expect_status(step, &response, StatusCode::CREATED)?;
        let user: User = decode(step, &response)?;
        expect_eq(step, "name", payload.name.as_str(), user.name.as_str())?;
        expect_eq(step, "email", payload.email.as_str(), user.email.as_str())?;
        expect_eq(step, "gender", &Some(payload.gender), &user.gender)?;
        expect_eq(step, "status", &payload.status, &user.status)?;

        ctx.record_created(user.id, user.email);
        info!(user_id = user.id, email = %payload.email, "Created user");
        Ok(StepOutcome::Passed)
    }

    /// List users; requires a non-empty array containing the created user.
    pub async fn list_users(&self, ctx: &ScenarioContext) -> Result<StepOutcome> {
        let step = Step::List;
        let headers = self.headers.authenticated_headers()?;

        let response = self
            .client
            .get(USERS_PATH, &headers, &[])
            .await
            .map_err(|e| ScenarioError::http("list users", e))?;

        expect_status(step, &response, StatusCode::OK)?;
        let users: Vec<Value> = decode(step, &response)?;
        if users.is_empty() {
            return Err(ScenarioError::assertion(step, "expected a non-empty user list"));
        }

        if let Some(created) = ctx.created_user() {
            let found = users
                .iter()
                .find(|user| user["id"].as_u64() == Some(created.id))
                .ok_or_else(|| {
                    ScenarioError::assertion(
                        step,
                        format!("created user {} is missing from the list", created.id),
                    )
                })?;
            expect_eq(
                step,
                "email",
                &Some(created.email.as_str()),
                &found["email"].as_str(),
            )?;
        }

        Ok(StepOutcome::Passed)
    }

    /// Replace the created user's name and email; requires 200 and an echo.
    pub async fn update_user(&self, ctx: &mut ScenarioContext) -> Result<StepOutcome> {
        let step = Step::Update;
        let Some(created) = self.require_user(ctx, step)? else {
            return Ok(skipped("no user ID found to update"));
        };

        let update = self.payloads.update_payload(self.payloads.unique_email());
        let headers = self.headers.authenticated_headers()?;
        let body = serde_json::to_value(&update)?;

        let response = self
            .client
            .put(&user_path(created.id), &body, &headers)
            .await
            .map_err(|e| ScenarioError::http(format!("update user {}", created.id), e))?;

        expect_status(step, &response, StatusCode::OK)?;
        let user: User = decode(step, &response)?;
        expect_eq(step, "id", &created.id, &user.id)?;
        expect_eq(step, "name", update.name.as_str(), user.name.as_str())?;
        expect_eq(step, "email", update.email.as_str(), user.email.as_str())?;
        expect_eq(step, "status", &update.status, &user.status)?;

        ctx.record_email(update.email.clone());
        info!(user_id = created.id, email = %update.email, "Updated user");
        Ok(StepOutcome::Passed)
    }

    /// Fetch the created user; requires 200, the same id and its email.
    pub async fn get_user(&self, ctx: &ScenarioContext) -> Result<StepOutcome> {
        let step = Step::GetById;
        let Some(created) = self.require_user(ctx, step)? else {
            return Ok(skipped("no user ID found to retrieve"));
        };

        let headers = self.headers.authenticated_headers()?;
        let response = self
            .client
            .get(&user_path(created.id), &headers, &[])
            .await
            .map_err(|e| ScenarioError::http(format!("get user by ID {}", created.id), e))?;

        expect_status(step, &response, StatusCode::OK)?;
        let user: User = decode(step, &response)?;
        expect_eq(step, "id", &created.id, &user.id)?;
        if user.email.is_empty() {
            return Err(ScenarioError::assertion(step, "expected an email"));
        }
        expect_eq(step, "email", created.email.as_str(), user.email.as_str())?;

        Ok(StepOutcome::Passed)
    }

    /// Delete the created user; requires 204 with an empty body.
    pub async fn delete_user(&self, ctx: &ScenarioContext) -> Result<StepOutcome> {
        let step = Step::Delete;
        let Some(created) = self.require_user(ctx, step)? else {
            return Ok(skipped("no user ID found to delete"));
        };

        let headers = self.headers.authenticated_headers()?;
        let response = self
            .client
            .delete(&user_path(created.id), &headers)
            .await
            .map_err(|e| ScenarioError::http(format!("delete user {}", created.id), e))?;

        expect_status(step, &response, StatusCode::NO_CONTENT)?;
        if !response.is_empty_body() {
            return Err(ScenarioError::assertion(
                step,
                format!("expected an empty body, got {}", response.text()),
            ));
        }

        info!(user_id = created.id, "Deleted user");
        Ok(StepOutcome::Passed)
    }

    /// Fetch the deleted user; requires a 404 with the not-found message.
    /// A successful response fails the step.
    pub async fn verify_deleted(&self, ctx: &ScenarioContext) -> Result<StepOutcome> {
        let step = Step::VerifyDeleted;
        let Some(created) = self.require_user(ctx, step)? else {
            return Ok(skipped("no user ID to verify deletion"));
        };

        let headers = self.headers.authenticated_headers()?;
        let response = match self
            .client
            .get(&user_path(created.id), &headers, &[])
            .await
        {
            Ok(response) => {
                return Err(ScenarioError::assertion(
                    step,
                    format!(
                        "expected the call to fail for deleted user {}, got {}",
                        created.id,
                        response.status()
                    ),
                ))
            }
            Err(HttpError::Response(response)) => response,
            Err(e) => {
                return Err(ScenarioError::http(
                    format!("verify deletion of user {}", created.id),
                    e,
                ))
            }
        };

        expect_status(step, &response, StatusCode::NOT_FOUND)?;
        let body: ErrorBody = decode(step, &response)?;
        expect_eq(step, "message", NOT_FOUND_MESSAGE, body.message.as_str())?;

        info!(user_id = created.id, "Verified user is no longer found");
        Ok(StepOutcome::Passed)
    }

    fn require_user(&self, ctx: &ScenarioContext, step: Step) -> Result<Option<CreatedUser>> {
        match (ctx.created_user(), self.policy) {
            (Some(user), _) => Ok(Some(user.clone())),
            (None, PreconditionPolicy::Skip) => {
                warn!(%step, "No created user in context, skipping");
                Ok(None)
            }
            (None, PreconditionPolicy::Fail) => Err(ScenarioError::UnmetPrecondition { step }),
        }
    }
}

fn user_path(id: u64) -> String {
    format!("{USERS_PATH}/{id}")
}

fn skipped(reason: &str) -> StepOutcome {
    StepOutcome::Skipped {
        reason: reason.to_string(),
    }
}
