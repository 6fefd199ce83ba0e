use crate::model::page::{msg, SignupPage, SUBMITTING_LABEL, SUBMIT_LABEL};

pub fn m(page: &SignupPage) -> maud::Markup {
    maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Flood Alerts" }
                script src="https://unpkg.com/htmx.org@2.0.4" {}
            }
            body {
                main {
                    h1 { "Flood Alerts" }
                    p { "Get an SMS when the river at your station runs high." }
                    (section(page))
                }
            }
        }
    }
}

/// The part htmx swaps after each submit.
pub fn section(page: &SignupPage) -> maud::Markup {
    maud::html! {
        section id="signup-section" {
            form
                id="signupForm"
                hx-post="/signup"
                hx-target="#signup-section"
                hx-swap="outerHTML"
                hx-disabled-elt="#submitBtn"
                hx-on--before-request={"document.getElementById('submitBtn').textContent = '" (SUBMITTING_LABEL) "';"}
                // No swap happens on a network error or a non-2xx answer.
                hx-on--after-request={
                    "if (!event.detail.successful) {"
                    "const btn = document.getElementById('submitBtn');"
                    "btn.disabled = false;"
                    "btn.textContent = '" (SUBMIT_LABEL) "';"
                    "const message = document.getElementById('message');"
                    "message.className = 'message error';"
                    "message.textContent = '" (msg::UNEXPECTED) "';"
                    "}"
                }
                {
                div {
                    label for="name" { "Name" }
                    input id="name" name="name" type="text" value=[page.fields.name.as_deref()];
                }
                div {
                    label for="phone" { "Phone Number" }
                    input id="phone" name="phone" type="tel" value=[page.fields.phone.as_deref()];
                }
                div {
                    label for="station" { "Station" }
                    input id="station" name="station" type="text" value=[page.fields.station.as_deref()];
                }
                button id="submitBtn" type="submit" disabled[!page.button.enabled] {
                    (page.button.label)
                }
            }
            div id="message" class=(page.message.class()) { (page.message.text) }
        }
    }
}
