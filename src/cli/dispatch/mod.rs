use crate::{
    cli::{
        actions::{applications, auth, contact, jobs, route, Action},
        globals::GlobalArgs,
    },
    features::{
        applications::{ApplicationStatus, Gender},
        contact::{ContactMessage, Subject},
        jobs::{JobDraft, JobFilter, JobType},
    },
    portal::{config::ConfigOverrides, AppConfig},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).with_context(|| format!("missing required argument: --{id}"))
}

fn secret(matches: &ArgMatches, id: &str) -> Option<SecretString> {
    string(matches, id).map(SecretString::from)
}

fn id(matches: &ArgMatches) -> Result<u64> {
    matches
        .get_one::<u64>("id")
        .copied()
        .context("missing required argument: id")
}

/// Builds the configuration shared by every command.
///
/// # Errors
/// Returns an error if the API URL or timeout is invalid.
pub fn global_args(matches: &ArgMatches) -> Result<GlobalArgs> {
    let config = AppConfig::load(ConfigOverrides {
        api_base_url: string(matches, "api-url"),
        session_path: string(matches, "session-file"),
        timeout_ms: matches.get_one::<u64>("timeout-ms").copied(),
    })?;

    Ok(GlobalArgs::new(config, matches.get_flag("yes")))
}

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("auth", sub_m)) => auth_action(sub_m).map(Action::Auth),
        Some(("jobs", sub_m)) => jobs_action(sub_m).map(Action::Jobs),
        Some(("applications", sub_m)) => applications_action(sub_m).map(Action::Applications),
        Some(("contact", sub_m)) => Ok(Action::Contact(contact::Args {
            message: ContactMessage {
                first_name: required(sub_m, "first-name")?,
                last_name: required(sub_m, "last-name")?,
                email: required(sub_m, "email")?,
                subject: sub_m
                    .get_one::<Subject>("subject")
                    .copied()
                    .unwrap_or_default(),
                message: required(sub_m, "message")?,
            },
        })),
        Some(("route", sub_m)) => Ok(Action::Route(route::Args {
            path: required(sub_m, "path")?,
        })),
        _ => Err(anyhow!("missing subcommand, see --help")),
    }
}

fn auth_action(matches: &ArgMatches) -> Result<auth::Args> {
    match matches.subcommand() {
        Some(("register", sub_m)) => Ok(auth::Args::Register {
            username: required(sub_m, "username")?,
            email: required(sub_m, "email")?,
            password: secret(sub_m, "password"),
        }),
        Some(("verify", sub_m)) => Ok(auth::Args::Verify {
            email: required(sub_m, "email")?,
            otp: secret(sub_m, "otp"),
        }),
        Some(("login", sub_m)) => Ok(auth::Args::Login {
            email: required(sub_m, "email")?,
            password: secret(sub_m, "password"),
        }),
        Some(("logout", _)) => Ok(auth::Args::Logout),
        Some(("whoami", _)) => Ok(auth::Args::Whoami),
        _ => Err(anyhow!("missing auth subcommand, see --help")),
    }
}

fn jobs_action(matches: &ArgMatches) -> Result<jobs::Args> {
    match matches.subcommand() {
        Some(("list", sub_m)) => Ok(jobs::Args::List {
            filter: JobFilter {
                search: string(sub_m, "search"),
                location: string(sub_m, "location"),
                job_type: sub_m.get_one::<JobType>("type").copied(),
            },
        }),
        Some(("show", sub_m)) => Ok(jobs::Args::Show { id: id(sub_m)? }),
        Some(("create", sub_m)) => Ok(jobs::Args::Create {
            draft: JobDraft {
                title: required(sub_m, "title")?,
                location: required(sub_m, "location")?,
                job_type: sub_m
                    .get_one::<JobType>("type")
                    .copied()
                    .unwrap_or(JobType::FullTime),
                salary: required(sub_m, "salary")?,
                description: required(sub_m, "description")?,
                keywords: string(sub_m, "keywords").unwrap_or_default(),
            },
        }),
        Some(("delete", sub_m)) => Ok(jobs::Args::Delete { id: id(sub_m)? }),
        _ => Err(anyhow!("missing jobs subcommand, see --help")),
    }
}

fn applications_action(matches: &ArgMatches) -> Result<applications::Args> {
    match matches.subcommand() {
        Some(("list", _)) => Ok(applications::Args::List),
        Some(("mine", _)) => Ok(applications::Args::Mine),
        Some(("submit", sub_m)) => Ok(applications::Args::Submit {
            job_id: id(sub_m)?,
            full_name: string(sub_m, "full-name"),
            email: string(sub_m, "email"),
            phone: required(sub_m, "phone")?,
            address: required(sub_m, "address")?,
            gender: sub_m
                .get_one::<Gender>("gender")
                .copied()
                .unwrap_or_default(),
            age: required(sub_m, "age")?,
            cv: sub_m.get_one::<PathBuf>("cv").cloned(),
        }),
        Some(("status", sub_m)) => Ok(applications::Args::Status {
            id: id(sub_m)?,
            status: sub_m
                .get_one::<ApplicationStatus>("status")
                .copied()
                .context("missing required argument: status")?,
        }),
        Some(("delete", sub_m)) => Ok(applications::Args::Delete { id: id(sub_m)? }),
        _ => Err(anyhow!("missing applications subcommand, see --help")),
    }
}
