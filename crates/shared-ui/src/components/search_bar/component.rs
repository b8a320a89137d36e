use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSearch;
use dioxus_free_icons::Icon;

/// Search box plus a slot for filter controls, laid out in one row.
#[component]
pub fn SearchBar(
    value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar", role: "search",
            label { class: "search-field",
                Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                input {
                    class: "search-input",
                    r#type: "search",
                    value: value,
                    placeholder: placeholder,
                    oninput: move |evt: FormEvent| on_search.call(evt.value()),
                }
            }
            div { class: "search-filters", {children} }
        }
    }
}
