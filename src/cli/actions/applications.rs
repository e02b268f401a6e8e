use crate::{
    cli::{actions::failed, globals::GlobalArgs},
    features::{
        applications::{
            self,
            board::{DELETE_FALLBACK, LOAD_FALLBACK, STATUS_FALLBACK},
            client,
            form::{SUBMIT_FALLBACK, SUBMIT_SUCCESS},
            Application, ApplicationBoard, ApplicationForm, ApplicationStatus, CvFile, Gender,
        },
        auth::require_session,
        confirm::Outcome,
        scope::ViewScope,
    },
    portal::{api::Ack, AppConfig},
};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Args {
    List,
    Mine,
    Submit {
        job_id: u64,
        full_name: Option<String>,
        email: Option<String>,
        phone: String,
        address: String,
        gender: Gender,
        age: String,
        cv: Option<PathBuf>,
    },
    Status {
        id: u64,
        status: ApplicationStatus,
    },
    Delete {
        id: u64,
    },
}

fn print_row(application: &Application, config: &AppConfig) {
    println!(
        "{:>5}  {:<24} {:<28} {:<20} {:<9} {}",
        application.id,
        application.full_name,
        application.email,
        application
            .job_title
            .clone()
            .unwrap_or_else(|| format!("job #{}", application.job_id)),
        application.status.as_str(),
        application.applied_at.format("%Y-%m-%d")
    );
    if let Some(url) = application.cv_url(config) {
        println!("       CV: {url}");
    }
}

fn print_list(applications: &[Application], config: &AppConfig) {
    if applications.is_empty() {
        println!("No applications yet.");
    }
    for application in applications {
        print_row(application, config);
    }
}

/// # Errors
/// Returns an error if validation fails, the session lacks permission, or
/// the backend rejects the request.
pub async fn execute(args: Args, globals: &GlobalArgs) -> Result<()> {
    let api = globals.connect()?;

    match args {
        Args::List => {
            let board = ApplicationBoard::new(&api, ViewScope::new());
            board.refresh().await.map_err(failed(LOAD_FALLBACK))?;
            print_list(&board.applications(), &globals.config);
        }
        Args::Mine => {
            require_session(api.session()).map_err(failed(LOAD_FALLBACK))?;
            let mine = client::list_my_applications(&api)
                .await
                .map_err(failed(LOAD_FALLBACK))?;
            print_list(&mine, &globals.config);
        }
        Args::Submit {
            job_id,
            full_name,
            email,
            phone,
            address,
            gender,
            age,
            cv,
        } => {
            let user = require_session(api.session()).map_err(failed(SUBMIT_FALLBACK))?;

            let mut form = ApplicationForm::for_user(job_id, &user);
            if let Some(full_name) = full_name {
                form.full_name = full_name;
            }
            if let Some(email) = email {
                form.email = email;
            }
            form.phone = phone;
            form.address = address;
            form.gender = gender;
            form.age = age;
            if let Some(path) = cv {
                form.cv = Some(CvFile::read(&path).await.map_err(failed(SUBMIT_FALLBACK))?);
            }

            applications::submit(
                &api,
                &form,
                Some(|ack: &Ack| match ack.id {
                    Some(id) => println!("{SUBMIT_SUCCESS} (#{id})"),
                    None => println!("{SUBMIT_SUCCESS}"),
                }),
            )
            .await
            .map_err(failed(SUBMIT_FALLBACK))?;
        }
        Args::Status { id, status } => {
            let board = ApplicationBoard::new(&api, ViewScope::new());
            board.refresh().await.map_err(failed(LOAD_FALLBACK))?;
            match board
                .set_status(id, status, &globals.confirmer())
                .await
                .map_err(failed(STATUS_FALLBACK))?
            {
                Outcome::Applied(application) => {
                    println!("Application {} is now {}.", application.id, application.status);
                    if application.status.notifies_applicant() {
                        println!("The applicant will be notified by email.");
                    }
                }
                Outcome::Declined => println!("Cancelled."),
            }
        }
        Args::Delete { id } => {
            let board = ApplicationBoard::new(&api, ViewScope::new());
            match board
                .delete(id, &globals.confirmer())
                .await
                .map_err(failed(DELETE_FALLBACK))?
            {
                Outcome::Applied(()) => println!("Deleted! Application has been deleted."),
                Outcome::Declined => println!("Cancelled."),
            }
        }
    }

    Ok(())
}
