//! CSV export of leads.

use std::io::Write;

use crate::domain::lead::Lead;

pub const EXPORT_HEADER: [&str; 5] = ["Company", "Contact", "Email", "Phone", "Status"];

/// Writes one row per lead after the header. The status is written in its
/// display form.
pub fn write_leads_csv<W: Write>(writer: W, leads: &[Lead]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(EXPORT_HEADER)?;
    for lead in leads {
        writer.write_record([
            lead.company_name.as_str(),
            lead.contact_name.as_str(),
            lead.contact_email.as_str(),
            lead.contact_phone.as_deref().unwrap_or_default(),
            lead.status.display_label(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
