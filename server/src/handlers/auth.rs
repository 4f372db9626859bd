use actix_web::{get, http::header, post, web, HttpResponse};
use serde::Deserialize;

use crate::{
    db::{DbGateway, UserConnection},
    error::Result,
    session::{Flash, FlashLevel, Session},
    views,
};

pub const MSG_FIELDS_REQUIRED: &str = "Username and password are required.";
pub const MSG_CONNECTION_FAILED: &str = "Database connection failed.";
pub const MSG_USERNAME_TAKEN: &str = "Username already exists.";
pub const MSG_REGISTERED: &str = "Registered successfully. Please login.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_LOGIN_REQUIRED: &str = "Please login first.";
pub const MSG_LOGGED_OUT: &str = "Logged out successfully.";

/// Submitted register/login form. A missing field deserializes as empty and
/// is rejected by the same check as an empty one.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Registration {
    Created,
    UsernameTaken,
}

#[derive(Debug, PartialEq, Eq)]
enum Authentication {
    Accepted { username: String },
    Rejected,
}

async fn register_user(
    conn: &mut dyn UserConnection,
    credentials: &Credentials,
) -> Result<Registration> {
    if conn
        .find_by_username(&credentials.username)
        .await?
        .is_some()
    {
        return Ok(Registration::UsernameTaken);
    }

    conn.insert_user(&credentials.username, &credentials.password)
        .await?;
    Ok(Registration::Created)
}

async fn authenticate(
    conn: &mut dyn UserConnection,
    credentials: &Credentials,
) -> Result<Authentication> {
    match conn.find_by_username(&credentials.username).await? {
        Some(user) if user.password_matches(&credentials.password) => {
            Ok(Authentication::Accepted {
                username: user.username,
            })
        }
        _ => Ok(Authentication::Rejected),
    }
}

fn render(mut session: Session, view: impl FnOnce(&[Flash]) -> String) -> HttpResponse {
    let flashes = session.take_flashes();
    let mut response = HttpResponse::Ok();
    response.content_type(header::ContentType::html());
    session.save(&mut response);
    response.body(view(&flashes))
}

fn redirect(session: Session, location: &str) -> HttpResponse {
    let mut response = HttpResponse::Found();
    response.insert_header((header::LOCATION, location));
    session.save(&mut response);
    response.finish()
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

#[get("/register")]
pub async fn register_form(session: Session) -> HttpResponse {
    render(session, views::register_page)
}

#[post("/register")]
pub async fn register(
    form: web::Form<Credentials>,
    db: web::Data<DbGateway>,
    mut session: Session,
) -> HttpResponse {
    let credentials = form.into_inner();

    if !credentials.is_complete() {
        session.flash(FlashLevel::Danger, MSG_FIELDS_REQUIRED);
        return render(session, views::register_page);
    }

    let username = credentials.username.clone();
    let outcome = db
        .with_connection(move |conn| {
            Box::pin(async move { register_user(conn, &credentials).await })
        })
        .await;

    match outcome {
        None => {
            session.flash(FlashLevel::Danger, MSG_CONNECTION_FAILED);
            render(session, views::register_page)
        }
        Some(Ok(Registration::Created)) => {
            log::info!("Registered new user: {}", username);
            session.flash(FlashLevel::Success, MSG_REGISTERED);
            redirect(session, "/login")
        }
        Some(Ok(Registration::UsernameTaken)) => {
            log::info!("Registration rejected, username taken: {}", username);
            session.flash(FlashLevel::Danger, MSG_USERNAME_TAKEN);
            render(session, views::register_page)
        }
        Some(Err(err)) => {
            log::error!("Registration failed for {}: {}", username, err);
            session.flash(FlashLevel::Danger, format!("Database error: {}", err));
            render(session, views::register_page)
        }
    }
}

#[get("/login")]
pub async fn login_form(session: Session) -> HttpResponse {
    render(session, views::login_page)
}

#[post("/login")]
pub async fn login(
    form: web::Form<Credentials>,
    db: web::Data<DbGateway>,
    mut session: Session,
) -> HttpResponse {
    let credentials = form.into_inner();

    if !credentials.is_complete() {
        session.flash(FlashLevel::Danger, MSG_FIELDS_REQUIRED);
        return render(session, views::login_page);
    }

    log::info!("Login attempt for user: {}", credentials.username);

    let username = credentials.username.clone();
    let outcome = db
        .with_connection(move |conn| {
            Box::pin(async move { authenticate(conn, &credentials).await })
        })
        .await;

    match outcome {
        None => {
            session.flash(FlashLevel::Danger, MSG_CONNECTION_FAILED);
            render(session, views::login_page)
        }
        Some(Ok(Authentication::Accepted { username })) => {
            log::info!("Successful login for user: {}", username);
            session.set_username(username);
            redirect(session, "/welcome")
        }
        Some(Ok(Authentication::Rejected)) => {
            log::warn!("Failed login attempt for user: {}", username);
            session.flash(FlashLevel::Danger, MSG_INVALID_CREDENTIALS);
            render(session, views::login_page)
        }
        Some(Err(err)) => {
            log::error!("Login failed for {}: {}", username, err);
            session.flash(FlashLevel::Danger, format!("Database error: {}", err));
            render(session, views::login_page)
        }
    }
}

#[get("/welcome")]
pub async fn welcome(mut session: Session) -> HttpResponse {
    let Some(username) = session.username().map(str::to_owned) else {
        session.flash(FlashLevel::Warning, MSG_LOGIN_REQUIRED);
        return redirect(session, "/login");
    };

    render(session, |flashes| views::welcome_page(&username, flashes))
}

#[get("/logout")]
pub async fn logout(mut session: Session) -> HttpResponse {
    if let Some(username) = session.username() {
        log::info!("User logged out: {}", username);
    }

    session.remove_username();
    session.flash(FlashLevel::Info, MSG_LOGGED_OUT);
    redirect(session, "/login")
}
