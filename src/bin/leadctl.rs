//! Command-line dashboard for the lead-generation CRM API.

use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;

use leadgen_crm::connect;
use leadgen_crm::domain::auth::LoginCredentials;
use leadgen_crm::domain::lead::{Lead, LeadFilter, LeadStatus};
use leadgen_crm::domain::types::{LeadId, TenantId};
use leadgen_crm::forms::auth::LoginForm;
use leadgen_crm::forms::leads::{
    AddLeadForm, AddLeadPayload, BulkSelectionForm, BulkSelectionPayload, UploadLeadsForm,
};
use leadgen_crm::models::config::ClientConfig;
use leadgen_crm::repository::HttpRepository;
use leadgen_crm::services::ServiceError;
use leadgen_crm::viewmodel::auth::{AuthViewModel, Session};
use leadgen_crm::viewmodel::leads::LeadsViewModel;

#[derive(Debug, Parser)]
#[command(name = "leadctl", version, about = "Manage leads of a CRM tenant")]
struct Cli {
    /// Tenant to operate on; overrides `tenant_id` from the configuration.
    #[arg(long, global = true)]
    tenant: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and print the bearer token to put in `APP_TOKEN`.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List the tenant's leads.
    List {
        /// Case-insensitive match on company, contact and email.
        #[arg(long)]
        search: Option<String>,
        /// Only leads with this status (canonical or display form).
        #[arg(long)]
        status: Option<LeadStatus>,
    },
    /// Show the dashboard counters.
    Dashboard,
    /// Add a single lead.
    Create {
        #[arg(long)]
        company: String,
        #[arg(long)]
        contact: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change the status of one lead.
    Status { id: String, status: LeadStatus },
    /// Delete one lead.
    Delete { id: String },
    /// Delete several leads in one request.
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move several leads to a status in one request.
    BulkStatus {
        #[arg(long)]
        status: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Write the tenant's leads as CSV.
    Export {
        /// Destination file; standard output when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Create leads from a CSV file with `Company Name` and `Contact Email`
    /// columns.
    Import { file: PathBuf },
}

fn load_config() -> Result<ClientConfig, String> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .map_err(|err| format!("Error loading settings: {err}"))?;

    settings
        .try_deserialize::<ClientConfig>()
        .map_err(|err| format!("Error loading client config: {err}"))
}

fn print_leads(leads: &[Lead]) {
    for lead in leads {
        println!(
            "{:<12} {:<18} {:<28} {:<24} {}",
            lead.id.as_ref().map(LeadId::as_str).unwrap_or("-"),
            lead.status.display_label(),
            lead.company_name,
            lead.contact_name,
            lead.contact_email,
        );
    }
}

fn parse_id(raw: String) -> Result<LeadId, String> {
    LeadId::new(raw).map_err(|err| err.to_string())
}

async fn run_leads(
    command: Command,
    vm: LeadsViewModel<HttpRepository>,
) -> Result<(), String> {
    match command {
        Command::Login { .. } => return Err("login does not operate on a tenant".to_string()),
        Command::List { search, status } => {
            vm.fetch_leads().await.map_err(|err| err.to_string())?;
            let mut filter = LeadFilter::new();
            if let Some(search) = search {
                filter = filter.search(search);
            }
            if let Some(status) = status {
                filter = filter.status(status);
            }
            let leads = vm.filter(&filter);
            print_leads(&leads);
            println!("{} of {} leads", leads.len(), vm.stats().total);
        }
        Command::Dashboard => {
            let dashboard = vm
                .fetch_dashboard_leads()
                .await
                .map_err(|err| err.to_string())?;
            println!("Interested:    {}", dashboard.stats.interested);
            println!("Follow up:     {}", dashboard.stats.follow_up);
            println!("High priority: {}", dashboard.stats.high_priority);
            println!("Leads shown:   {}", dashboard.leads.len());
        }
        Command::Create {
            company,
            contact,
            email,
            phone,
        } => {
            let form = AddLeadForm {
                company_name: company,
                contact_name: contact,
                contact_email: email,
                contact_phone: phone,
            };
            let new_lead = AddLeadPayload::try_from(form)
                .map_err(|err| err.to_string())?
                .into_domain(vm.tenant_id());
            let lead = vm.create_lead(&new_lead).await.map_err(|err| err.to_string())?;
            print_leads(&[lead]);
        }
        Command::Status { id, status } => {
            let lead = vm
                .update_lead_status(&parse_id(id)?, status)
                .await
                .map_err(|err| err.to_string())?;
            print_leads(&[lead]);
        }
        Command::Delete { id } => {
            let id = parse_id(id)?;
            vm.delete_lead(&id).await.map_err(|err| err.to_string())?;
            println!("Deleted lead {id}");
        }
        Command::BulkDelete { ids } => {
            let selection = BulkSelectionPayload::try_from(BulkSelectionForm {
                lead_ids: ids,
                status: None,
            })
            .map_err(|err| err.to_string())?;
            let outcome = vm
                .bulk_delete(&selection.lead_ids)
                .await
                .map_err(|err| err.to_string())?;
            println!(
                "{} ({} of {} leads)",
                outcome.message, outcome.affected, outcome.requested
            );
        }
        Command::BulkStatus { status, ids } => {
            let selection = BulkSelectionPayload::try_from(BulkSelectionForm {
                lead_ids: ids,
                status: Some(status),
            })
            .map_err(|err| err.to_string())?;
            let status = selection
                .status
                .ok_or_else(|| "A status is required".to_string())?;
            let outcome = vm
                .bulk_update_status(&selection.lead_ids, status)
                .await
                .map_err(|err| err.to_string())?;
            println!(
                "{} ({} of {} leads)",
                outcome.message, outcome.affected, outcome.requested
            );
        }
        Command::Export { output } => {
            vm.fetch_leads().await.map_err(|err| err.to_string())?;
            let result = match output {
                Some(path) => {
                    let file = File::create(&path)
                        .map_err(|err| format!("Cannot create {}: {err}", path.display()))?;
                    vm.export_csv(file)
                }
                None => vm.export_csv(io::stdout().lock()),
            };
            result.map_err(|err| format!("Failed to write CSV: {err}"))?;
        }
        Command::Import { file } => {
            let reader = File::open(&file)
                .map_err(|err| format!("Cannot open {}: {err}", file.display()))?;
            let new_leads = UploadLeadsForm::new(reader)
                .parse(&vm.tenant_id())
                .map_err(|err| err.to_string())?;
            let report = vm
                .import_leads(&new_leads)
                .await
                .map_err(|err| err.to_string())?;
            println!("Imported {} leads", report.created.len());
            for (index, err) in &report.failed {
                println!("Row {}: {err}", index + 1);
            }
            if let Some(reason) = &report.aborted {
                return Err(format!("Import stopped: {reason}"));
            }
        }
    }
    Ok(())
}

async fn run(cli: Cli, client_config: ClientConfig) -> Result<(), String> {
    let session = Session::new();
    let repo = Arc::new(connect(&client_config, &session).map_err(|err| err.to_string())?);

    if let Command::Login { email, password } = cli.command {
        let credentials =
            LoginCredentials::try_from(LoginForm { email, password }).map_err(|err| err.to_string())?;
        let auth = AuthViewModel::new(repo, session);
        let signed_in = auth.login(&credentials).await.map_err(|err| err.to_string())?;
        println!("{}", signed_in.token);
        return Ok(());
    }

    let tenant = cli
        .tenant
        .or(client_config.tenant_id)
        .ok_or_else(|| "No tenant given: pass --tenant or set APP_TENANT_ID".to_string())?;
    let tenant_id = TenantId::new(tenant).map_err(|err| err.to_string())?;

    let vm = LeadsViewModel::new(repo, tenant_id);
    let cancel = vm.cancel_token();
    tokio::select! {
        result = run_leads(cli.command, vm) => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            Err(ServiceError::Cancelled.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let client_config = match load_config() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli, client_config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
