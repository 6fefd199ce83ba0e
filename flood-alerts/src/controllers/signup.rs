use axum::{extract::State, Form};

use crate::{
    loader::Initialization,
    model::{
        page::{msg, MessageKind, SignupPage, UiStatus},
        signup::SignupForm,
    },
    supabase::Inserter,
    view, AppError, AppStateRef,
};

pub async fn signup_page(State(state): State<AppStateRef>) -> maud::Markup {
    let initialization = state.ensure_initialized().await;
    view::signup::m(&SignupPage::for_initialization(Some(&initialization)))
}

pub async fn signup_form(
    State(state): State<AppStateRef>,
    Form(form): Form<SignupForm>,
) -> maud::Markup {
    let initialization = state.initialization().await;
    let mut page = SignupPage::for_initialization(initialization.as_ref());
    page.fields = form;

    submit(&mut page, initialization.as_ref().and_then(Initialization::inserter)).await;

    view::signup::section(&page)
}

/// Runs one submission against the page. At most one insert is issued, and
/// once it has been attempted the button always ends enabled.
pub async fn submit(page: &mut SignupPage, client: Option<&dyn Inserter>) {
    let Some(client) = client else {
        page.report(&AppError::UninitializedClient);
        return;
    };

    let signup = match page.fields.validate() {
        Ok(signup) => signup,
        Err(e) => {
            page.report(&e);
            return;
        }
    };

    page.begin_submit();

    match client.insert(&signup).await {
        Ok(()) => {
            tracing::info!(station = %signup.station, "New alert signup");
            page.show_message(msg::SIGNED_UP, MessageKind::Success);
            page.status = UiStatus::Success;
            page.fields.clear();
        }
        Err(e) => page.report(&AppError::from(e)),
    }

    page.finish_submit();
}
