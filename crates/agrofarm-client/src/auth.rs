//! Farmer account endpoints. A successful login leaves the session cookie in
//! the client's jar; every later request carries it.

use agrofarm_core::{Credentials, PasswordChange, PasswordReset, ProfileUpdate, SignupForm};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    EmailBody, FarmerAccount, ForgotPasswordBody, LoginResponse, MessageResponse, VerifyOtpBody,
};

impl ApiClient {
    /// # Errors
    ///
    /// - [`ApiError::Network`] on transport failure.
    /// - [`ApiError::Server`] when the server rejects the credentials.
    /// - [`ApiError::Deserialize`] on an unexpected body.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["farmers", "login"]);
        self.execute(self.http().post(url).json(credentials), "POST farmers/login")
            .await
    }

    /// Registers a farmer. The account must then be verified with the OTP
    /// the server emails out.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn signup(&self, form: &SignupForm) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "new"]);
        self.execute(self.http().post(url).json(form), "POST farmers/new")
            .await
    }

    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "verify"]);
        self.execute(
            self.http().post(url).json(&VerifyOtpBody { email, otp }),
            "POST farmers/verify",
        )
        .await
    }

    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn resend_otp(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "resendOTP"]);
        self.execute(
            self.http().post(url).json(&EmailBody { email }),
            "POST farmers/resendOTP",
        )
        .await
    }

    /// Ends the server-side session. The cookie jar is not cleared; drop the
    /// client for that.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "logout"]);
        self.execute(self.http().get(url), "GET farmers/logout")
            .await
    }

    /// The signed-in farmer's account.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] with status 401 when no session cookie is held;
    /// otherwise see [`ApiClient::login`].
    pub async fn fetch_profile(&self) -> Result<FarmerAccount, ApiError> {
        let url = self.endpoint(&["farmers", "me"]);
        self.execute(self.http().get(url), "GET farmers/me").await
    }

    /// Saves profile edits and returns the account as stored.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<FarmerAccount, ApiError> {
        let url = self.endpoint(&["farmers", "update"]);
        self.execute(self.http().put(url).json(update), "PUT farmers/update")
            .await
    }

    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn change_password(
        &self,
        change: &PasswordChange,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "changepassword"]);
        self.execute(
            self.http().put(url).json(change),
            "PUT farmers/changepassword",
        )
        .await
    }

    /// Starts a password reset; the server sends an OTP.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn forgot_password(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "forgot-password"]);
        self.execute(
            self.http().post(url).json(&ForgotPasswordBody { email, phone }),
            "POST farmers/forgot-password",
        )
        .await
    }

    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "reset-password"]);
        self.execute(
            self.http().post(url).json(reset),
            "POST farmers/reset-password",
        )
        .await
    }

    /// Permanently deletes the signed-in farmer's account.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::login`].
    pub async fn delete_account(&self) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["farmers", "delete"]);
        self.execute(self.http().delete(url), "DELETE farmers/delete")
            .await
    }
}
