use serde::Deserialize;
use validator::Validate;

use crate::domain::template::{NewEmailTemplate, TemplateVariable};
use crate::domain::types::{ContactEmail, TemplateBody, TemplateName, TemplateSubject, TenantId};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Form data for authoring an email template.
pub struct TemplateForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(email)]
    pub from: String,
    #[validate(length(min = 1))]
    pub to: String,
    /// One `key` or `key=default` pair per line.
    #[serde(default)]
    pub variables: String,
}

impl TemplateForm {
    pub fn into_new_template(self, tenant_id: TenantId) -> Result<NewEmailTemplate, FormError> {
        self.validate()?;

        let mut variables: Vec<TemplateVariable> = Vec::new();
        for line in self.variables.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (key, default_value) = match line.split_once('=') {
                Some((key, default)) => (key.trim(), non_blank(Some(default.to_string()))),
                None => (line, None),
            };
            if key.is_empty() {
                return Err(FormError::InvalidName);
            }
            if variables.iter().any(|v| v.key == key) {
                continue;
            }
            variables.push(TemplateVariable {
                key: key.to_string(),
                default_value,
            });
        }

        Ok(NewEmailTemplate {
            tenant_id,
            name: TemplateName::new(self.name).map_err(|_| FormError::InvalidName)?,
            subject: TemplateSubject::new(self.subject).map_err(|_| FormError::InvalidName)?,
            body: TemplateBody::new(self.body).map_err(|_| FormError::InvalidBody)?,
            from: ContactEmail::new(self.from).map_err(|_| FormError::InvalidEmail)?,
            to: self.to.trim().to_string(),
            variables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(body: &str, variables: &str) -> TemplateForm {
        TemplateForm {
            name: "Intro".to_string(),
            subject: "Hello {{firstName}}".to_string(),
            body: body.to_string(),
            from: "sales@acme.io".to_string(),
            to: "{{lead.email}}".to_string(),
            variables: variables.to_string(),
        }
    }

    #[test]
    fn variables_are_parsed_and_deduplicated() {
        let template = form("<p>Hi</p>", "firstName=there\n\ncompany\nfirstName=again")
            .into_new_template(TenantId::new("t").expect("valid"))
            .expect("valid form");

        assert_eq!(
            template.variables,
            vec![
                TemplateVariable {
                    key: "firstName".to_string(),
                    default_value: Some("there".to_string()),
                },
                TemplateVariable {
                    key: "company".to_string(),
                    default_value: None,
                },
            ]
        );
    }

    #[test]
    fn script_only_body_is_rejected() {
        let result = form("<script>alert(1)</script>", "")
            .into_new_template(TenantId::new("t").expect("valid"));
        assert!(matches!(result, Err(FormError::InvalidBody)));
    }
}
