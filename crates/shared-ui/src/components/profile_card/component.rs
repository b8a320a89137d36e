use dioxus::prelude::*;

use crate::{initials, Avatar, AvatarFallback, AvatarImage, Badge, BadgeVariant};

/// Person summary: avatar, name, a subtitle line and tag badges.
///
/// Children render below the tags, for per-page details or actions.
#[component]
pub fn ProfileCard(
    name: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] avatar_url: Option<String>,
    #[props(default)] tags: Vec<String>,
    #[props(default)] children: Element,
) -> Element {
    let fallback = initials(&name);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        article { class: "profile-card",
            div { class: "profile-card-head",
                Avatar {
                    if let Some(url) = avatar_url {
                        AvatarImage { src: url }
                    }
                    AvatarFallback { "{fallback}" }
                }
                div { class: "profile-card-names",
                    h3 { class: "profile-card-name", "{name}" }
                    if let Some(subtitle) = subtitle {
                        p { class: "profile-card-subtitle", "{subtitle}" }
                    }
                }
            }
            if !tags.is_empty() {
                div { class: "profile-card-tags",
                    for tag in tags {
                        Badge { key: "{tag}", variant: BadgeVariant::Secondary, "{tag}" }
                    }
                }
            }
            {children}
        }
    }
}
