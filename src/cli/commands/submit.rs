//! `foiadesk submit` command - File a new request

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::entities::RequestIntake;

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Requester's full name
    #[arg(long)]
    pub name: Option<String>,

    /// Requester's email address
    #[arg(long)]
    pub email: Option<String>,

    /// Agency the request is directed to
    #[arg(long)]
    pub agency: Option<String>,

    /// Short subject line
    #[arg(long)]
    pub subject: Option<String>,

    /// Full description of the records sought
    #[arg(long)]
    pub description: Option<String>,

    /// Record the request with processing fees waived
    #[arg(long)]
    pub fee_waived: bool,

    /// Prompt for each missing field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: SubmitArgs, global: &GlobalOpts) -> Result<()> {
    let need_prompt = args.interactive
        || args.name.is_none()
        || args.email.is_none()
        || args.agency.is_none()
        || args.subject.is_none()
        || args.description.is_none();

    let intake = if need_prompt {
        prompt_intake(&args)?
    } else {
        RequestIntake {
            requester_name: args.name.clone().unwrap_or_default(),
            requester_email: args.email.clone().unwrap_or_default(),
            agency: args.agency.clone().unwrap_or_default(),
            subject: args.subject.clone().unwrap_or_default(),
            description: args.description.clone().unwrap_or_default(),
            fee_waived: args.fee_waived,
        }
    };

    let mut engine = super::utils::open_engine(global)?;
    let request = engine
        .submit(intake, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    if global.quiet {
        println!("{}", request.tracking_number);
    } else {
        println!(
            "{} Filed request {} with {}",
            style("✓").green(),
            style(&request.tracking_number).cyan(),
            style(&request.agency).yellow()
        );
        println!(
            "  Request ID : {}",
            style(request.request_id.to_string()).dim()
        );
        println!("  Due date   : {}", request.due_at.format("%Y-%m-%d"));
    }

    Ok(())
}

/// Prompt for any intake field not already supplied as a flag
fn prompt_intake(args: &SubmitArgs) -> Result<RequestIntake> {
    use dialoguer::{Confirm, Input};

    let requester_name = match &args.name {
        Some(v) => v.clone(),
        None => Input::new()
            .with_prompt("Requester name")
            .interact_text()
            .into_diagnostic()?,
    };

    let requester_email = match &args.email {
        Some(v) => v.clone(),
        None => Input::new()
            .with_prompt("Requester email")
            .interact_text()
            .into_diagnostic()?,
    };

    let agency = match &args.agency {
        Some(v) => v.clone(),
        None => Input::new()
            .with_prompt("Agency")
            .interact_text()
            .into_diagnostic()?,
    };

    let subject = match &args.subject {
        Some(v) => v.clone(),
        None => Input::new()
            .with_prompt("Subject")
            .interact_text()
            .into_diagnostic()?,
    };

    let description = match &args.description {
        Some(v) => v.clone(),
        None => Input::new()
            .with_prompt("Description of records sought")
            .interact_text()
            .into_diagnostic()?,
    };

    let fee_waived = if args.fee_waived {
        true
    } else {
        Confirm::new()
            .with_prompt("Waive processing fees?")
            .default(false)
            .interact()
            .into_diagnostic()?
    };

    Ok(RequestIntake {
        requester_name,
        requester_email,
        agency,
        subject,
        description,
        fee_waived,
    })
}
