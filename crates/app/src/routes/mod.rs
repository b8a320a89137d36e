pub mod assessments;
pub mod calendar;
pub mod dashboard;
pub mod landing;
pub mod learning_modules;
pub mod login;
pub mod not_found;
pub mod patients;
pub mod register;
pub mod therapy_plans;
pub mod video_session;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdCalendar, LdClipboardList, LdLayoutDashboard, LdLogOut, LdTarget, LdUsers,
    LdVideo,
};
use dioxus_free_icons::Icon;
use shared_types::guard::{self, GuardOutcome};
use shared_ui::{Avatar, AvatarFallback, Badge, BadgeVariant, Button, ButtonVariant, SkeletonRows};

use assessments::Assessments;
use calendar::Calendar;
use dashboard::Dashboard;
use landing::Landing;
use learning_modules::LearningModules;
use login::Login;
use not_found::NotFound;
use patients::Patients;
use register::Register;
use therapy_plans::TherapyPlans;
use video_session::VideoSession;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Landing {},
    #[layout(GuestGuard)]
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[end_layout]
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/video-session")]
    VideoSession {},
    #[route("/patients")]
    Patients {},
    #[route("/therapy-plans")]
    TherapyPlans {},
    #[route("/assessments")]
    Assessments {},
    #[route("/learning-modules")]
    LearningModules {},
    #[route("/calendar")]
    Calendar {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Route for one of the guard redirect targets.
fn route_for(path: &str) -> Route {
    path.parse::<Route>().unwrap_or(Route::Landing {})
}

/// Follow a guard redirect once the session state asks for one.
///
/// Runs as an effect so the redirect re-fires whenever the auth signals
/// change, e.g. after a logout on a protected page.
fn use_guard_redirect(check: fn(&guard::SessionState) -> GuardOutcome) -> GuardOutcome {
    let auth = use_auth();

    use_effect(move || {
        if let GuardOutcome::Redirect(path) = check(&auth.session()) {
            navigator().replace(route_for(path));
        }
    });

    check(&auth.session())
}

/// Protected views. Shows a neutral placeholder while the session restore
/// is pending and never redirects before it finishes.
#[component]
fn AuthGuard() -> Element {
    match use_guard_redirect(guard::protected) {
        GuardOutcome::Render => rsx! { Outlet::<Route> {} },
        GuardOutcome::Loading => rsx! {
            div { class: "guard-loading", SkeletonRows { rows: 4 } }
        },
        GuardOutcome::Redirect(_) => rsx! {
            div { class: "guard-loading", p { "Redirecting to sign in..." } }
        },
    }
}

/// Login and register. Signed-in users are sent to the dashboard.
#[component]
fn GuestGuard() -> Element {
    match use_guard_redirect(guard::guest_only) {
        GuardOutcome::Render => rsx! { Outlet::<Route> {} },
        GuardOutcome::Loading | GuardOutcome::Redirect(_) => rsx! {
            div { class: "guard-loading", SkeletonRows { rows: 2 } }
        },
    }
}

/// Sidebar layout around every protected page.
#[component]
fn AppLayout() -> Element {
    let mut auth = use_auth();
    let mut signing_out = use_signal(|| false);

    let user = auth.current_user.read().clone();
    let (name, role_label, initials) = match &user {
        Some(u) => (
            u.name.clone(),
            u.role().map(|r| r.label()).unwrap_or("Unknown role").to_string(),
            shared_ui::initials(&u.name),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    let handle_sign_out = move |_| {
        signing_out.set(true);
        spawn(async move {
            if let Err(e) = server::api::logout().await {
                tracing::warn!(%e, "Logout request failed, clearing local session anyway");
            }
            auth.clear_auth();
            signing_out.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            aside { class: "app-sidebar",
                div { class: "app-brand",
                    span { class: "app-brand-mark", "A" }
                    span { class: "app-brand-name", "AbleLyf" }
                }

                nav { class: "app-nav",
                    NavItem { to: Route::Dashboard {},
                        Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 }
                        "Dashboard"
                    }
                    NavItem { to: Route::VideoSession {},
                        Icon::<LdVideo> { icon: LdVideo, width: 18, height: 18 }
                        "Video Session"
                    }
                    NavItem { to: Route::Patients {},
                        Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 }
                        "Patients"
                    }
                    NavItem { to: Route::TherapyPlans {},
                        Icon::<LdTarget> { icon: LdTarget, width: 18, height: 18 }
                        "Therapy Plans"
                    }
                    NavItem { to: Route::Assessments {},
                        Icon::<LdClipboardList> { icon: LdClipboardList, width: 18, height: 18 }
                        "Assessments"
                    }
                    NavItem { to: Route::LearningModules {},
                        Icon::<LdBookOpen> { icon: LdBookOpen, width: 18, height: 18 }
                        "Learning"
                    }
                    NavItem { to: Route::Calendar {},
                        Icon::<LdCalendar> { icon: LdCalendar, width: 18, height: 18 }
                        "Calendar"
                    }
                }

                div { class: "app-user",
                    Avatar { AvatarFallback { "{initials}" } }
                    div { class: "app-user-meta",
                        span { class: "app-user-name", "{name}" }
                        Badge { variant: BadgeVariant::Outline, "{role_label}" }
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    loading: signing_out(),
                    onclick: handle_sign_out,
                    Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                    "Sign out"
                }
            }

            main { class: "app-main", Outlet::<Route> {} }
        }
    }
}

#[component]
fn NavItem(to: Route, children: Element) -> Element {
    rsx! {
        Link { class: "app-nav-item", active_class: "active", to, {children} }
    }
}
