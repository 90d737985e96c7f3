use std::sync::Arc;

use apptrack::error::AppError;
use apptrack::tracking::{
    AutomationRunner, Identity, InMemoryTrackingStore, TransitionAuthority, TransitionError,
};
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of automation passes to run (the fixed sequence needs four)
    #[arg(long, default_value_t = 5)]
    pub(crate) passes: usize,
}

/// Walk the full lifecycle against a fresh in-memory store: category setup,
/// applicant submissions, an admin move, the admin being refused on a
/// technical record, automation passes, and the resulting audit trail.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryTrackingStore::new());
    let authority = Arc::new(TransitionAuthority::new(store));
    let runner = AutomationRunner::new(Arc::clone(&authority));

    let admin = Identity::admin(1);
    let applicant = Identity::applicant(100);
    let bot = Identity::bot(0);

    let backend = authority.create_category(&admin, "Backend Engineer", true)?;
    let office = authority.create_category(&admin, "Office Coordinator", false)?;

    println!("Application tracking demo");
    let (technical_app, _) = authority.create(&applicant, backend.id)?;
    let (office_app, _) = authority.create(&applicant, office.id)?;
    println!("  created application {} for '{}'", technical_app.id, backend.name);
    println!("  created application {} for '{}'", office_app.id, office.name);

    let (updated, entry) = authority.admin_transition(&admin, office_app.id, "Shortlisted", None)?;
    println!(
        "  admin moved application {} {} -> {} ({})",
        updated.id, entry.old_status, entry.new_status, entry.comment
    );

    if let Err(err @ TransitionError::Forbidden(_)) =
        authority.admin_transition(&admin, technical_app.id, "Hired", None)
    {
        println!("  admin refused on application {}: {err}", technical_app.id);
    }

    for pass in 1..=args.passes {
        let summary = runner.run(&bot)?;
        let current = authority.application(&bot, technical_app.id)?;
        println!(
            "  pass {pass}: considered {}, advanced {}, application {} now '{}'",
            summary.considered, summary.advanced, current.id, current.status
        );
    }

    println!("  audit trail for application {}:", technical_app.id);
    for entry in authority.logs(&admin, technical_app.id)? {
        println!(
            "    [{}] {} -> {} by {} ({})",
            entry.timestamp, entry.old_status, entry.new_status, entry.updated_by, entry.comment
        );
    }

    Ok(())
}
