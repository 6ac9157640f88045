//! Forms for creating, editing and importing leads.

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::lead::{LeadStatus, NewLead, UpdateLead};
use crate::domain::types::{
    CompanyName, ContactEmail, ContactName, LeadId, PhoneNumber, TenantId,
};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a single lead.
pub struct AddLeadForm {
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub contact_name: String,
    #[validate(email)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// Validated lead fields, not yet bound to a tenant.
#[derive(Debug)]
pub struct AddLeadPayload {
    pub company_name: CompanyName,
    pub contact_name: ContactName,
    pub contact_email: ContactEmail,
    pub contact_phone: Option<PhoneNumber>,
}

impl TryFrom<AddLeadForm> for AddLeadPayload {
    type Error = FormError;

    fn try_from(form: AddLeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let contact_phone = non_blank(form.contact_phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            company_name: CompanyName::new(form.company_name).map_err(|_| FormError::InvalidName)?,
            contact_name: ContactName::new(form.contact_name).map_err(|_| FormError::InvalidName)?,
            contact_email: ContactEmail::new(form.contact_email)
                .map_err(|_| FormError::InvalidEmail)?,
            contact_phone,
        })
    }
}

impl AddLeadPayload {
    pub fn into_domain(self, tenant_id: TenantId) -> NewLead {
        NewLead::new(
            tenant_id,
            self.company_name,
            self.contact_name,
            self.contact_email,
            self.contact_phone,
        )
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for editing an existing lead. Blank fields are left untouched.
pub struct UpdateLeadForm {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl TryFrom<UpdateLeadForm> for UpdateLead {
    type Error = FormError;

    fn try_from(form: UpdateLeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            company_name: non_blank(form.company_name)
                .map(CompanyName::new)
                .transpose()
                .map_err(|_| FormError::InvalidName)?,
            contact_name: non_blank(form.contact_name)
                .map(ContactName::new)
                .transpose()
                .map_err(|_| FormError::InvalidName)?,
            contact_email: non_blank(form.contact_email)
                .map(ContactEmail::new)
                .transpose()
                .map_err(|_| FormError::InvalidEmail)?,
            contact_phone: non_blank(form.contact_phone)
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|_| FormError::InvalidPhoneNumber)?,
            metadata: form.metadata,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Selection of leads targeted by a bulk action.
pub struct BulkSelectionForm {
    #[serde(default)]
    pub lead_ids: Vec<String>,
    /// Target status for bulk status updates, canonical or display form.
    #[serde(default)]
    pub status: Option<String>,
}

/// Parsed bulk selection with duplicate ids removed, order preserved.
#[derive(Debug)]
pub struct BulkSelectionPayload {
    pub lead_ids: Vec<LeadId>,
    pub status: Option<LeadStatus>,
}

impl TryFrom<BulkSelectionForm> for BulkSelectionPayload {
    type Error = FormError;

    fn try_from(form: BulkSelectionForm) -> Result<Self, Self::Error> {
        let mut lead_ids: Vec<LeadId> = Vec::with_capacity(form.lead_ids.len());
        for raw in form.lead_ids {
            let id = LeadId::new(raw).map_err(|_| FormError::InvalidLeadId)?;
            if !lead_ids.contains(&id) {
                lead_ids.push(id);
            }
        }

        let status = non_blank(form.status)
            .map(|s| s.parse::<LeadStatus>())
            .transpose()
            .map_err(|_| FormError::InvalidStatus)?;

        Ok(Self { lead_ids, status })
    }
}

const COLUMN_COMPANY: &str = "Company Name";
const COLUMN_EMAIL: &str = "Contact Email";
const COLUMN_CONTACT: &str = "Contact Name";
const COLUMN_PHONE: &str = "Phone Number";

/// CSV upload of leads.
///
/// `Company Name` and `Contact Email` columns are required; `Contact Name`
/// and `Phone Number` are optional and any other column is ignored. A row
/// without a contact name uses the contact email in its place.
pub struct UploadLeadsForm<R> {
    pub csv: R,
}

impl<R: Read> UploadLeadsForm<R> {
    pub fn new(csv: R) -> Self {
        Self { csv }
    }

    /// Parses every non-blank row into a [`NewLead`] for the given tenant.
    pub fn parse(self, tenant_id: &TenantId) -> Result<Vec<NewLead>, FormError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(self.csv);

        let headers = reader
            .headers()
            .map_err(|err| FormError::Csv(err.to_string()))?
            .clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        };

        let company_idx = position(COLUMN_COMPANY).ok_or(FormError::MissingColumn(COLUMN_COMPANY))?;
        let email_idx = position(COLUMN_EMAIL).ok_or(FormError::MissingColumn(COLUMN_EMAIL))?;
        let contact_idx = position(COLUMN_CONTACT);
        let phone_idx = position(COLUMN_PHONE);

        let mut leads = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| FormError::Csv(err.to_string()))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line = record.position().map_or(0, |p| p.line());
            let field = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            };
            let invalid = |reason: &str| FormError::InvalidRow {
                line,
                reason: reason.to_string(),
            };

            let company_name = CompanyName::new(field(Some(company_idx)).unwrap_or_default())
                .map_err(|_| invalid("missing company name"))?;
            let contact_email = ContactEmail::new(field(Some(email_idx)).unwrap_or_default())
                .map_err(|_| invalid("invalid contact email"))?;
            let contact_name = ContactName::new(
                field(contact_idx).unwrap_or_else(|| contact_email.as_str().to_string()),
            )
            .map_err(|_| invalid("invalid contact name"))?;
            let contact_phone = field(phone_idx)
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|_| invalid("invalid phone number"))?;

            leads.push(NewLead::new(
                tenant_id.clone(),
                company_name,
                contact_name,
                contact_email,
                contact_phone,
            ));
        }

        Ok(leads)
    }
}
