use crate::{
    features::{
        applications::{ApplicationStatus, Gender},
        contact::Subject,
        jobs::JobType,
    },
    portal::config::DEFAULT_API_BASE_URL,
};
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(u64))
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .help("Account password, prompted for when omitted")
        .env("MANPOWER_PASSWORD")
        .hide_env_values(true)
}

fn auth() -> Command {
    Command::new("auth")
        .about("Register, verify and sign in")
        .subcommand_required(true)
        .subcommand(
            Command::new("register")
                .about("Create an account; a verification code is emailed")
                .arg(Arg::new("username").long("username").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("verify")
                .about("Confirm the emailed code and sign in")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("otp")
                        .long("otp")
                        .help("Verification code, prompted for when omitted")
                        .env("MANPOWER_OTP")
                        .hide_env_values(true),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with email and password")
                .arg(Arg::new("email").long("email").required(true))
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
}

fn jobs() -> Command {
    Command::new("jobs")
        .about("Browse and manage job postings")
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List open positions")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Match title or keywords"),
                )
                .arg(Arg::new("location").long("location"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(|value: &str| value.parse::<JobType>()),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show a single position")
                .arg(id_arg("Job id")),
        )
        .subcommand(
            Command::new("create")
                .about("Post a job (admin)")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("location").long("location").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("Full-time")
                        .value_parser(|value: &str| value.parse::<JobType>()),
                )
                .arg(Arg::new("salary").long("salary").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(
                    Arg::new("keywords")
                        .long("keywords")
                        .help("Comma separated, e.g. \"construction, site\"")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a job (admin)")
                .arg(id_arg("Job id")),
        )
}

fn applications() -> Command {
    Command::new("applications")
        .about("Apply for jobs and review applications")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("List all applications (admin)"))
        .subcommand(Command::new("mine").about("List your own applications"))
        .subcommand(
            Command::new("submit")
                .about("Apply for a job")
                .arg(id_arg("Job id"))
                .arg(
                    Arg::new("full-name")
                        .long("full-name")
                        .help("Defaults to the signed-in username"),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Defaults to the signed-in email"),
                )
                .arg(Arg::new("phone").long("phone").required(true))
                .arg(Arg::new("address").long("address").required(true))
                .arg(
                    Arg::new("gender")
                        .long("gender")
                        .default_value("Male")
                        .value_parser(|value: &str| value.parse::<Gender>()),
                )
                .arg(Arg::new("age").long("age").required(true))
                .arg(
                    Arg::new("cv")
                        .long("cv")
                        .help("PDF or Word document")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Move an application to a new status (admin)")
                .arg(id_arg("Application id"))
                .arg(
                    Arg::new("status")
                        .required(true)
                        .value_parser(|value: &str| value.parse::<ApplicationStatus>()),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete an application (admin)")
                .arg(id_arg("Application id")),
        )
}

fn contact() -> Command {
    Command::new("contact")
        .about("Send a message to the agency")
        .arg(Arg::new("first-name").long("first-name").required(true))
        .arg(Arg::new("last-name").long("last-name").required(true))
        .arg(Arg::new("email").long("email").required(true))
        .arg(
            Arg::new("subject")
                .long("subject")
                .default_value("Request Manpower")
                .value_parser(|value: &str| value.parse::<Subject>()),
        )
        .arg(Arg::new("message").long("message").required(true))
}

fn route() -> Command {
    Command::new("route")
        .about("Check whether the current session may open a page")
        .arg(Arg::new("path").required(true).help("e.g. /admin or /careers/4"))
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("manpower")
        .about("Manpower recruitment portal client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Backend base URL")
                .default_value(DEFAULT_API_BASE_URL)
                .env("MANPOWER_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .help("Where the session is stored (default: ~/.manpower/session.json)")
                .env("MANPOWER_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Request timeout in milliseconds")
                .default_value("10000")
                .env("MANPOWER_TIMEOUT_MS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Answer yes to confirmation prompts")
                .env("MANPOWER_ASSUME_YES")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .help("Emit logs as JSON")
                .env("MANPOWER_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("MANPOWER_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(auth())
        .subcommand(jobs())
        .subcommand(applications())
        .subcommand(contact())
        .subcommand(route())
}
