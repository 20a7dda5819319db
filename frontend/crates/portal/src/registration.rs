//! Two-step registration: account details, then the emailed code.

use crate::types::{RegisterRequest, User};
use crate::users::UserApi;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationStep {
    Details,
    AwaitingOtp { token: String },
    Completed(User),
}

/// The details form, including the confirmation field the server never sees
#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub gstin: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug)]
pub struct RegistrationFlow {
    pub step: RegistrationStep,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self {
            step: RegistrationStep::Details,
            loading: false,
            error: None,
        }
    }

    /// Step one. Returns whether the flow moved on to the code step.
    pub async fn submit_details<A: UserApi>(&mut self, api: &A, form: &RegistrationForm) -> bool {
        if self.step != RegistrationStep::Details {
            return false;
        }
        self.error = None;

        if form.password != form.confirm_password {
            self.error = Some("Passwords do not match.".to_string());
            return false;
        }

        let request = RegisterRequest {
            name: form.name.clone(),
            email: form.email.clone(),
            gstin: form.gstin.clone(),
            password: form.password.clone(),
        };

        self.loading = true;
        let result = api.register(&request).await;
        self.loading = false;

        match result {
            Ok(response) => {
                self.step = RegistrationStep::AwaitingOtp {
                    token: response.token,
                };
                true
            }
            Err(err) => {
                self.error = Some(err.message_or("Registration failed. Try again."));
                false
            }
        }
    }

    /// Step two. Returns whether the account was created.
    pub async fn submit_otp<A: UserApi>(&mut self, api: &A, otp: &str) -> bool {
        let RegistrationStep::AwaitingOtp { token } = &self.step else {
            return false;
        };
        let token = token.clone();
        self.error = None;

        self.loading = true;
        let result = api.verify_otp(&token, otp.trim()).await;
        self.loading = false;

        match result {
            Ok(envelope) => {
                self.step = RegistrationStep::Completed(envelope.user);
                true
            }
            Err(err) => {
                self.error = Some(err.message_or("Invalid OTP. Try again."));
                false
            }
        }
    }

    /// Return to the details form, dropping the pending token
    pub fn back(&mut self) {
        if matches!(self.step, RegistrationStep::AwaitingOtp { .. }) {
            self.step = RegistrationStep::Details;
            self.error = None;
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.step, RegistrationStep::Completed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use crate::mock::MockApi;

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            gstin: "22AAAAA0000A1Z5".to_string(),
            password: "Tr1cky-Harbor".to_string(),
            confirm_password: "Tr1cky-Harbor".to_string(),
        }
    }

    #[tokio::test]
    async fn test_happy_path() {
        let api = MockApi::new();
        let mut flow = RegistrationFlow::new();

        assert!(flow.submit_details(&api, &form()).await);
        assert_eq!(
            flow.step,
            RegistrationStep::AwaitingOtp {
                token: "continuation-token".to_string()
            }
        );

        assert!(flow.submit_otp(&api, " 123456 ").await);
        assert!(flow.is_complete());
        assert!(!flow.loading);
        assert_eq!(
            api.calls(),
            vec!["register asha@example.com", "verify_otp continuation-token 123456"]
        );
    }

    #[tokio::test]
    async fn test_password_mismatch_stays_local() {
        let api = MockApi::new();
        let mut flow = RegistrationFlow::new();
        let mut form = form();
        form.confirm_password = "different".to_string();

        assert!(!flow.submit_details(&api, &form).await);
        assert_eq!(flow.error.as_deref(), Some("Passwords do not match."));
        assert_eq!(flow.step, RegistrationStep::Details);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_keeps_step() {
        let api = MockApi::new();
        let mut flow = RegistrationFlow::new();

        api.fail_next(ClientError::Http {
            status: 400,
            message: "Email already registered".to_string(),
        });
        assert!(!flow.submit_details(&api, &form()).await);
        assert_eq!(flow.step, RegistrationStep::Details);
        assert_eq!(flow.error.as_deref(), Some("Email already registered"));

        assert!(flow.submit_details(&api, &form()).await);
        api.fail_next(ClientError::Network("down".to_string()));
        assert!(!flow.submit_otp(&api, "123456").await);
        assert!(matches!(flow.step, RegistrationStep::AwaitingOtp { .. }));
        assert_eq!(flow.error.as_deref(), Some("Invalid OTP. Try again."));
    }

    #[tokio::test]
    async fn test_back_returns_to_details() {
        let api = MockApi::new();
        let mut flow = RegistrationFlow::new();

        assert!(!flow.submit_otp(&api, "123456").await);
        flow.submit_details(&api, &form()).await;
        flow.back();

        assert_eq!(flow.step, RegistrationStep::Details);
    }
}
