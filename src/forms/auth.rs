//! Login and signup forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::{AdditionalSignupPayload, LoginCredentials, SignupPayload};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl TryFrom<LoginForm> for LoginCredentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: form.email.trim().to_lowercase(),
            password: form.password,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// First signup step: personal and company details.
pub struct SignupForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub company_size: String,
    #[validate(length(min = 1))]
    pub industry: String,
    #[serde(default)]
    #[validate(url)]
    pub website: Option<String>,
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            password: form.password,
            company_name: form.company_name.trim().to_string(),
            company_size: form.company_size.trim().to_string(),
            industry: form.industry.trim().to_string(),
            website: non_blank(form.website),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Onboarding questions asked after the account exists.
pub struct AdditionalSignupForm {
    #[validate(length(min = 1))]
    pub product_description: String,
    #[validate(length(min = 1))]
    pub target_market: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 1))]
    pub hear_about_us: String,
    #[validate(length(min = 1))]
    pub primary_goal: String,
}

impl TryFrom<AdditionalSignupForm> for AdditionalSignupPayload {
    type Error = FormError;

    fn try_from(form: AdditionalSignupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            product_description: form.product_description.trim().to_string(),
            target_market: form.target_market.trim().to_string(),
            role: form.role.trim().to_string(),
            hear_about_us: form.hear_about_us.trim().to_string(),
            primary_goal: form.primary_goal.trim().to_string(),
        })
    }
}
