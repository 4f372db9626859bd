use actix_web::{
    cookie::{Cookie, SameSite},
    dev::Payload,
    web, FromRequest, HttpRequest, HttpResponseBuilder,
};
use futures_util::future::{ready, Ready};

use super::store::{new_token, Flash, FlashLevel, SessionAttrs, SessionStore};
use crate::error::LoginServerError;

pub const SESSION_COOKIE: &str = "session_id";

/// The current request's session, loaded from the injected [`SessionStore`].
///
/// Changes are kept locally until [`Session::save`] writes them back and, for
/// a brand-new session, attaches the cookie to the response.
pub struct Session {
    store: web::Data<dyn SessionStore>,
    // Only set when the cookie named a session the store still knows.
    token: Option<String>,
    attrs: SessionAttrs,
    changed: bool,
}

impl Session {
    pub fn load(req: &HttpRequest) -> Result<Self, LoginServerError> {
        let store = req
            .app_data::<web::Data<dyn SessionStore>>()
            .cloned()
            .ok_or(LoginServerError::SessionUnavailable)?;

        let existing = req.cookie(SESSION_COOKIE).and_then(|cookie| {
            let token = cookie.value().to_string();
            store.get(&token).map(|attrs| (token, attrs))
        });

        let (token, attrs) = match existing {
            Some((token, attrs)) => (Some(token), attrs),
            None => (None, SessionAttrs::default()),
        };

        Ok(Self {
            store,
            token,
            attrs,
            changed: false,
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.attrs.username.as_deref()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.attrs.username = Some(username.into());
        self.changed = true;
    }

    pub fn remove_username(&mut self) {
        if self.attrs.username.take().is_some() {
            self.changed = true;
        }
    }

    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.attrs.flashes.push(Flash::new(level, message));
        self.changed = true;
    }

    /// Removes and returns the pending flash notices.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if self.attrs.flashes.is_empty() {
            return Vec::new();
        }
        self.changed = true;
        std::mem::take(&mut self.attrs.flashes)
    }

    /// Writes pending changes to the store. A session created during this
    /// request gets its cookie attached to `response`.
    pub fn save(self, response: &mut HttpResponseBuilder) {
        if !self.changed {
            return;
        }

        match (self.token, self.attrs.is_empty()) {
            (Some(token), true) => self.store.clear(&token),
            (Some(token), false) => self.store.set(&token, self.attrs),
            (None, true) => {}
            (None, false) => {
                let token = new_token();
                self.store.set(&token, self.attrs);
                response.cookie(session_cookie(token));
            }
        }
    }
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Session::load(req).map_err(Into::into))
    }
}
