//! Password reset: request a code by email, then submit it with the new
//! password.

use crate::users::UserApi;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetStep {
    RequestEmail,
    AwaitingOtp { token: String },
    Done,
}

#[derive(Clone, Debug)]
pub struct PasswordResetFlow {
    pub step: ResetStep,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for PasswordResetFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordResetFlow {
    pub fn new() -> Self {
        Self {
            step: ResetStep::RequestEmail,
            loading: false,
            error: None,
        }
    }

    /// Resume at the code step with a token carried in a link
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            step: ResetStep::AwaitingOtp {
                token: token.into(),
            },
            ..Self::new()
        }
    }

    pub async fn request_code<A: UserApi>(&mut self, api: &A, email: &str) -> bool {
        if self.step != ResetStep::RequestEmail {
            return false;
        }
        self.error = None;

        self.loading = true;
        let result = api.forget_password(email.trim()).await;
        self.loading = false;

        match result {
            Ok(response) => {
                self.step = ResetStep::AwaitingOtp {
                    token: response.token,
                };
                true
            }
            Err(err) => {
                self.error = Some(err.message_or("Failed to send OTP. Try again."));
                false
            }
        }
    }

    pub async fn submit<A: UserApi>(
        &mut self,
        api: &A,
        otp: &str,
        password: &str,
        confirm_password: &str,
    ) -> bool {
        let ResetStep::AwaitingOtp { token } = &self.step else {
            return false;
        };
        let token = token.clone();
        self.error = None;

        if password != confirm_password {
            self.error = Some("Passwords do not match.".to_string());
            return false;
        }

        self.loading = true;
        let result = api.reset_password(&token, otp.trim(), password).await;
        self.loading = false;

        match result {
            Ok(_) => {
                self.step = ResetStep::Done;
                true
            }
            Err(err) => {
                self.error = Some(err.message_or("Reset failed. Try again."));
                false
            }
        }
    }
}
