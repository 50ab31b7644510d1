use crate::access::{ADMIN_SECRET_ENV, AccessGuard, Session};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{ask_line, error, success, warning};

/// Password supplied non-interactively (scripts, CI).
pub const ADMIN_PASSWORD_ENV: &str = "TEAMLOG_ADMIN_PASSWORD";

pub struct AuthLogic;

impl AuthLogic {
    /// Build an admin session for one command.
    ///
    /// The candidate comes from `--password`, then `$TEAMLOG_ADMIN_PASSWORD`,
    /// then an interactive prompt that stops once the session is locked.
    pub fn admin_session(guard: &AccessGuard, password: Option<&str>) -> AppResult<Session> {
        if !guard.is_configured() {
            return Err(AppError::Unauthorized(format!(
                "no admin secret configured (set ${ADMIN_SECRET_ENV} or `admin_secret` in the config file)"
            )));
        }

        let mut session = Session::new();

        let supplied = password
            .map(str::to_string)
            .or_else(|| std::env::var(ADMIN_PASSWORD_ENV).ok());

        if let Some(candidate) = supplied {
            return if session.login(guard, &candidate) {
                Ok(session)
            } else {
                Err(AppError::Unauthorized("wrong password".into()))
            };
        }

        let attempts = guard.policy().max_attempts.max(1);
        for _ in 0..attempts {
            let Some(candidate) = ask_line("Admin password: ") else {
                break;
            };
            if session.login(guard, &candidate) {
                success("Admin mode active");
                return Ok(session);
            }
            error("Wrong password!");
            if session.is_locked() {
                warning(format!(
                    "Too many failed attempts, locked for {}s",
                    guard.policy().cooldown.as_secs()
                ));
                break;
            }
        }

        Err(AppError::Unauthorized("login failed".into()))
    }
}
