use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{
    CompanyName, ContactEmail, ContactName, LeadId, PhoneNumber, TenantId, TypeConstraintError,
};

/// Pipeline status of a lead.
///
/// The uppercase form (`FOLLOW_UP`) is the canonical wire representation. The
/// dashboard renders a hyphenated lower-case label (`follow-up`); the mapping
/// between the two is total in both directions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    NotInterested,
    FollowUp,
    Interested,
    ImmediateAction,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::NotInterested,
        LeadStatus::FollowUp,
        LeadStatus::Interested,
        LeadStatus::ImmediateAction,
    ];

    /// Canonical uppercase representation used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            LeadStatus::NotInterested => "NOT_INTERESTED",
            LeadStatus::FollowUp => "FOLLOW_UP",
            LeadStatus::Interested => "INTERESTED",
            LeadStatus::ImmediateAction => "IMMEDIATE_ACTION",
        }
    }

    /// Hyphenated lower-case label used by the dashboard.
    pub const fn display_label(self) -> &'static str {
        match self {
            LeadStatus::NotInterested => "not-interested",
            LeadStatus::FollowUp => "follow-up",
            LeadStatus::Interested => "interested",
            LeadStatus::ImmediateAction => "immediate-action",
        }
    }

    /// Inverse of [`LeadStatus::display_label`].
    pub fn from_display_label(label: &str) -> Result<Self, TypeConstraintError> {
        Self::ALL
            .into_iter()
            .find(|status| status.display_label() == label.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown status `{label}`")))
    }

    /// Every status may move to every other status. The pipeline is
    /// deliberately permissive; there is no transition table.
    pub const fn can_transition_to(self, _next: LeadStatus) -> bool {
        true
    }

    /// Whether the dashboard counts this status as high priority.
    pub const fn is_high_priority(self) -> bool {
        matches!(self, LeadStatus::ImmediateAction)
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = TypeConstraintError;

    /// Accepts the canonical form and, for user input, the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .map_or_else(|| Self::from_display_label(trimmed), Ok)
    }
}

/// A prospect record as returned by the backend.
///
/// Contact fields are kept as plain strings: the server is authoritative for
/// persisted data and the dashboard must be able to show whatever it holds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LeadId>,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub status: LeadStatus,
}

impl Lead {
    /// Returns `true` when the lead carries the given identifier.
    pub fn has_id(&self, id: &LeadId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

/// Validated payload for creating a lead within a tenant.
#[derive(Clone, Debug, PartialEq)]
pub struct NewLead {
    pub tenant_id: TenantId,
    pub company_name: CompanyName,
    pub contact_name: ContactName,
    pub contact_email: ContactEmail,
    pub contact_phone: Option<PhoneNumber>,
}

impl NewLead {
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        company_name: CompanyName,
        contact_name: ContactName,
        contact_email: ContactEmail,
        contact_phone: Option<PhoneNumber>,
    ) -> Self {
        Self {
            tenant_id,
            company_name,
            contact_name,
            contact_email,
            contact_phone,
        }
    }

    /// Re-targets the payload at another tenant.
    #[must_use]
    pub fn for_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }
}

/// Partial update of a lead. Absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateLead {
    pub company_name: Option<CompanyName>,
    pub contact_name: Option<ContactName>,
    pub contact_email: Option<ContactEmail>,
    pub contact_phone: Option<PhoneNumber>,
    /// Free-form attributes stored alongside the lead. `Some` replaces the
    /// stored map, so an empty map clears it.
    pub metadata: Option<Map<String, Value>>,
}

impl UpdateLead {
    /// True when no field would change. An empty `metadata` map is a change.
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.contact_name.is_none()
            && self.contact_email.is_none()
            && self.contact_phone.is_none()
            && self.metadata.is_none()
    }
}

/// Counts shown on the dashboard. They may reflect server-side totals beyond
/// the page of leads returned alongside them.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub interested: u64,
    #[serde(default)]
    pub follow_up: u64,
    #[serde(default)]
    pub high_priority: u64,
}

/// Aggregated dashboard view: raw records plus precomputed counts.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardLeads {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub stats: DashboardStats,
}

/// Counts computed locally from the cached leads.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    pub total: usize,
    pub interested: usize,
    pub follow_up: usize,
    pub high_priority: usize,
    pub not_interested: usize,
}

impl LeadStats {
    pub fn from_leads(leads: &[Lead]) -> Self {
        leads.iter().fold(Self::default(), |mut stats, lead| {
            stats.total += 1;
            match lead.status {
                LeadStatus::Interested => stats.interested += 1,
                LeadStatus::FollowUp => stats.follow_up += 1,
                LeadStatus::ImmediateAction => stats.high_priority += 1,
                LeadStatus::NotInterested => stats.not_interested += 1,
            }
            stats
        })
    }
}

/// Search/filter criteria applied to a list of leads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
}

impl LeadFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Case-insensitive match on company, contact name and email, combined
    /// with an exact status match when one is set.
    pub fn matches(&self, lead: &Lead) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|term| {
            lead.company_name.to_lowercase().contains(term)
                || lead.contact_name.to_lowercase().contains(term)
                || lead.contact_email.to_lowercase().contains(term)
        });
        let matches_status = self.status.is_none_or(|status| lead.status == status);
        matches_search && matches_status
    }
}

/// Result of a bulk mutation: the server's aggregate reply together with the
/// number of distinct ids that were requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkOutcome {
    pub message: String,
    pub requested: usize,
    pub affected: u64,
}

impl BulkOutcome {
    /// `true` when the server reports exactly as many affected leads as were
    /// requested.
    pub fn is_complete(&self) -> bool {
        u64::try_from(self.requested).is_ok_and(|requested| requested == self.affected)
    }
}
