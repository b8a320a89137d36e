use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardHeader, CardTitle};

const HIGHLIGHTS: &[(&str, &str)] = &[
    (
        "One picture of progress",
        "Therapists, caregivers and teachers see the same goals and scores.",
    ),
    (
        "Alerts that reach the right people",
        "Behavioral and sensory alerts are routed to each patient's care team.",
    ),
    (
        "Sessions from anywhere",
        "Run video sessions in the browser with live engagement cues.",
    ),
];

/// Public landing page.
#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let signed_in = auth.is_authenticated();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./landing.css") }

        div { class: "landing",
            header { class: "landing-hero",
                h1 { "AbleLyf" }
                p { class: "landing-tagline",
                    "Therapy coordination for children with special needs and the people who support them."
                }
                div { class: "landing-actions",
                    if signed_in {
                        Link { class: "button", to: Route::Dashboard {}, "Go to dashboard" }
                    } else {
                        Link { class: "button", to: Route::Login {}, "Sign in" }
                        Link { class: "button landing-secondary", to: Route::Register {}, "Create account" }
                    }
                }
            }

            section { class: "landing-highlights",
                for (title, body) in HIGHLIGHTS.iter().copied() {
                    Card { key: "{title}",
                        CardHeader { CardTitle { "{title}" } }
                        CardContent { p { "{body}" } }
                    }
                }
            }
        }
    }
}
