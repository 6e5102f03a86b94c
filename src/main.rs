use std::cell::Cell;
use std::rc::Rc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use projected::clamp::RangeClamp;
use projected::observe::Watchers;
use projected::persisted::PersistedDefault;
use projected::rule::ValidationRule;
use projected::settings::Settings;
use projected::store::Store;
use projected::validated::ValidationState;

// Preferences are built once here and handed out, nothing lives in a global.
struct Preferences<S: Store> {
    dark_mode: PersistedDefault<bool, S>,
    font_size: PersistedDefault<i64, S>,
}

fn main() {
    let settings = match Settings::load("projected") {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Falling back to default settings: {}", err);
            Settings::default()
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(store = ?settings.store, policy = ?settings.write_policy, "starting");

    let store = match settings.open_store() {
        Ok(store) => Rc::new(store),
        Err(err) => {
            error!(%err, "could not open the preference store");
            std::process::exit(1);
        }
    };
    let preferences = Preferences {
        dark_mode: PersistedDefault::new("app.darkMode", false, Rc::clone(&store))
            .with_policy(settings.write_policy),
        font_size: PersistedDefault::new("app.fontSize", 16, Rc::clone(&store))
            .with_policy(settings.write_policy),
    };

    let mut email =
        settings.validator_or("email", vec![ValidationRule::NotEmpty, ValidationRule::Email]);
    let mut password = settings.validator_or(
        "password",
        vec![ValidationRule::NotEmpty, ValidationRule::MinLength(8)],
    );
    let mut volume = match RangeClamp::new(50, 0, 100) {
        Ok(volume) => volume,
        Err(err) => {
            error!(%err, "volume range");
            std::process::exit(1);
        }
    };

    let submittable = Rc::new(Cell::new(false));
    let mut form_watchers: Watchers<(ValidationState, ValidationState)> = Watchers::new();
    let seen = Rc::clone(&submittable);
    form_watchers.subscribe(move |(email, password)| seen.set(email.is_valid && password.is_valid));

    email.set_value("someone@example");
    form_watchers.notify(&(email.projection(), password.projection()));
    password.set_value("hunter22");
    form_watchers.notify(&(email.projection(), password.projection()));
    info!(submittable = submittable.get(), first_error = ?email.projection().first_error(), "form");
    email.set_value("someone@example.com");
    form_watchers.notify(&(email.projection(), password.projection()));
    info!(submittable = submittable.get(), "form");

    volume.set_value(130);
    let state = volume.projection();
    info!(%state, percentage = state.percentage(), muted = state.is_at_min(), "volume");

    report(&preferences);
    if let Err(err) = preferences.dark_mode.set_value(!preferences.dark_mode.value()) {
        error!(%err, "dark mode");
    }
    if let Err(err) = preferences.font_size.set_value(preferences.font_size.value() + 1) {
        error!(%err, "font size");
    }
    report(&preferences);
}

fn report<S: Store>(preferences: &Preferences<S>) {
    let state = preferences.dark_mode.projection();
    info!(key = %state.key, current = state.current_value, modified = state.is_modified(), "preference");
    let state = preferences.font_size.projection();
    info!(key = %state.key, current = state.current_value, default = state.default_value, modified = state.is_modified(), "preference");
}
