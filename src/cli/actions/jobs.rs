use crate::{
    cli::{actions::failed, globals::GlobalArgs},
    features::{
        confirm::Outcome,
        jobs::{
            catalog::{DELETE_FALLBACK, LOAD_FALLBACK, POST_FALLBACK, STALE_NOTICE},
            client, Job, JobCatalog, JobDraft, JobFilter,
        },
        scope::ViewScope,
    },
};
use anyhow::Result;
use chrono::Local;

#[derive(Debug)]
pub enum Args {
    List { filter: JobFilter },
    Show { id: u64 },
    Create { draft: JobDraft },
    Delete { id: u64 },
}

fn print_row(job: &Job) {
    println!(
        "{:>5}  {:<28} {:<11} {:<16} {}",
        job.id,
        job.title,
        job.job_type.as_str(),
        job.location,
        job.posted_date
    );
}

fn print_details(job: &Job) {
    println!("{} (#{})", job.title, job.id);
    println!("  type:     {}", job.job_type);
    println!("  location: {}", job.location);
    println!("  salary:   {}", job.salary);
    println!("  posted:   {}", job.posted_date);
    if !job.keywords.is_empty() {
        println!("  keywords: {}", job.keywords.join(", "));
    }
    if !job.description.is_empty() {
        println!();
        println!("{}", job.description);
    }
}

/// # Errors
/// Returns an error if the request fails or the session lacks permission.
pub async fn execute(args: Args, globals: &GlobalArgs) -> Result<()> {
    let api = globals.connect()?;

    match args {
        Args::List { filter } => {
            let catalog = JobCatalog::new(&api, ViewScope::new());
            catalog.refresh().await.map_err(failed(LOAD_FALLBACK))?;

            let jobs = catalog.jobs();
            let matching = filter.apply(&jobs);
            if matching.is_empty() {
                println!("No positions match your search.");
            }
            for job in matching {
                print_row(job);
            }
        }
        Args::Show { id } => {
            let job = client::get_job(&api, id)
                .await
                .map_err(failed("Job not found"))?;
            print_details(&job);
            if !api.session().is_authenticated() {
                println!();
                println!("Please log in or register to apply for this position.");
            }
        }
        Args::Create { draft } => {
            let catalog = JobCatalog::new(&api, ViewScope::new());
            let posted = catalog
                .create(draft, Local::now().date_naive())
                .await
                .map_err(failed(POST_FALLBACK))?;
            match posted.value.id {
                Some(id) => println!("Job posted successfully (#{id})."),
                None => println!("Job posted successfully."),
            }
            if posted.is_stale() {
                eprintln!("{STALE_NOTICE}");
            }
        }
        Args::Delete { id } => {
            let catalog = JobCatalog::new(&api, ViewScope::new());
            match catalog
                .delete(id, &globals.confirmer())
                .await
                .map_err(failed(DELETE_FALLBACK))?
            {
                Outcome::Applied(deleted) => {
                    println!("Deleted! Job has been deleted.");
                    if deleted.is_stale() {
                        eprintln!("{STALE_NOTICE}");
                    }
                }
                Outcome::Declined => println!("Cancelled."),
            }
        }
    }

    Ok(())
}
