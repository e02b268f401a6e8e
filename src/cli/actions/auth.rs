use crate::{
    cli::{
        actions::failed,
        globals::{prompt_secret, GlobalArgs},
    },
    features::auth::{
        flow::{LOGIN_FALLBACK, REGISTER_FALLBACK, VERIFY_FALLBACK},
        AuthFlow, Registration, User,
    },
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub enum Args {
    Register {
        username: String,
        email: String,
        password: Option<SecretString>,
    },
    Verify {
        email: String,
        otp: Option<SecretString>,
    },
    Login {
        email: String,
        password: Option<SecretString>,
    },
    Logout,
    Whoami,
}

fn print_user(user: &User) {
    println!("{} <{}>", user.username, user.email);
    println!("  role:     {}", user.role.as_str());
    println!("  verified: {}", if user.verified { "yes" } else { "no" });
}

/// # Errors
/// Returns an error if validation fails or the backend rejects the request.
pub async fn execute(args: Args, globals: &GlobalArgs) -> Result<()> {
    let api = globals.connect()?;

    match args {
        Args::Register {
            username,
            email,
            password,
        } => {
            // A password passed on the command line is its own confirmation.
            let (password, confirm_password) = match password {
                Some(password) => {
                    let confirm = SecretString::from(password.expose_secret().to_string());
                    (password, confirm)
                }
                None => (prompt_secret("Password")?, prompt_secret("Confirm password")?),
            };

            let registration = Registration {
                username,
                email: email.trim().to_string(),
                password,
                confirm_password,
            };
            let mut flow = AuthFlow::new(&api);
            flow.register(&registration)
                .await
                .map_err(failed(REGISTER_FALLBACK))?;

            println!(
                "Registration successful. Enter the code sent to {0} with: manpower auth verify --email {0}",
                registration.email
            );
        }
        Args::Verify { email, otp } => {
            let otp = match otp {
                Some(otp) => otp,
                None => prompt_secret("Verification code")?,
            };
            let mut flow = AuthFlow::awaiting_verification(&api, email.trim());
            let user = flow.verify(&otp).await.map_err(failed(VERIFY_FALLBACK))?;
            println!("Email verified. Signed in as {}.", user.username);
        }
        Args::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_secret("Password")?,
            };
            let mut flow = AuthFlow::new(&api);
            let user = flow
                .login(email.trim(), &password)
                .await
                .map_err(failed(LOGIN_FALLBACK))?;
            println!("Signed in as {}.", user.username);
        }
        Args::Logout => {
            AuthFlow::new(&api).logout();
            println!("Signed out.");
        }
        Args::Whoami => match api.session().current_user() {
            Some(user) => print_user(&user),
            None => println!("Not signed in."),
        },
    }

    Ok(())
}
