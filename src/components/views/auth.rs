use crate::api::{ApiError, ApiResult, AuthSession};
use crate::components::{AppView, Icon, Navigation, Notices};
use crate::db::AppSettings;
use crate::library::Notice;
use dioxus::prelude::*;

/// Server details read better without the status prefix.
fn form_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { detail, .. } if !detail.trim().is_empty() => detail.clone(),
        other => other.to_string(),
    }
}

/// Shared tail of both forms: store the session and leave the form behind.
fn finish_sign_in(
    outcome: ApiResult<AuthSession>,
    mut app_settings: Signal<AppSettings>,
    navigation: Navigation,
    notices: Notices,
    mut error: Signal<Option<String>>,
    welcome: &str,
) {
    match outcome {
        Ok(session) => {
            app_settings.with_mut(|settings| settings.sign_in(session));
            notices.push(Notice::success(welcome));
            navigation.reset_to(AppView::Home);
        }
        Err(err) => {
            tracing::debug!(error = %err, "sign-in rejected");
            error.set(Some(form_message(&err)));
        }
    }
}

#[component]
pub fn LoginView() -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let navigation = use_context::<Navigation>();
    let notices = use_context::<Notices>();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        submitting.set(true);
        error.set(None);
        let client = app_settings().client();
        let (email, password) = (email(), password());
        spawn(async move {
            let outcome = client.login(&email, &password).await;
            submitting.set(false);
            finish_sign_in(outcome, app_settings, navigation, notices, error, "Signed in");
        });
    };

    rsx! {
        div { class: "auth-page",
            form { class: "auth-card", onsubmit: on_submit,
                h1 { class: "auth-title", "Sign in" }
                label { class: "field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    r#type: "submit",
                    class: "primary-button",
                    disabled: submitting(),
                    if submitting() {
                        Icon { name: "loader".to_string(), class: "icon".to_string() }
                    }
                    "Sign in"
                }
                p { class: "auth-switch",
                    "New here? "
                    button {
                        r#type: "button",
                        class: "link-button",
                        onclick: move |_| navigation.navigate_to(AppView::Register),
                        "Create an account"
                    }
                }
            }
        }
    }
}

#[component]
pub fn RegisterView() -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let navigation = use_context::<Navigation>();
    let notices = use_context::<Notices>();

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        submitting.set(true);
        error.set(None);
        let client = app_settings().client();
        let (username, email, password) = (username(), email(), password());
        spawn(async move {
            let outcome = client.register(&username, &email, &password).await;
            submitting.set(false);
            finish_sign_in(outcome, app_settings, navigation, notices, error, "Account created");
        });
    };

    rsx! {
        div { class: "auth-page",
            form { class: "auth-card", onsubmit: on_submit,
                h1 { class: "auth-title", "Create account" }
                label { class: "field",
                    span { "Username" }
                    input {
                        r#type: "text",
                        autocomplete: "username",
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    r#type: "submit",
                    class: "primary-button",
                    disabled: submitting(),
                    if submitting() {
                        Icon { name: "loader".to_string(), class: "icon".to_string() }
                    }
                    "Create account"
                }
                p { class: "auth-switch",
                    "Already have an account? "
                    button {
                        r#type: "button",
                        class: "link-button",
                        onclick: move |_| navigation.navigate_to(AppView::Login),
                        "Sign in"
                    }
                }
            }
        }
    }
}
