use crate::components::{Icon, Notices};
use crate::library::NoticeLevel;
use dioxus::prelude::*;

#[component]
pub fn ToastHost() -> Element {
    let notices = use_context::<Notices>();
    let items = notices.list();

    rsx! {
        div { class: "toast-host", role: "status", aria_live: "polite",
            for notice in items {
                div {
                    key: "{notice.id}",
                    class: match notice.level {
                        NoticeLevel::Success => "toast toast-success",
                        NoticeLevel::Error => "toast toast-error",
                    },
                    Icon {
                        name: match notice.level {
                            NoticeLevel::Success => "check".to_string(),
                            NoticeLevel::Error => "x".to_string(),
                        },
                        class: "icon".to_string(),
                    }
                    span { class: "toast-message", "{notice.message}" }
                    button {
                        class: "icon-button",
                        aria_label: "Dismiss",
                        onclick: move |_| notices.dismiss(notice.id),
                        Icon { name: "x".to_string(), class: "icon".to_string() }
                    }
                }
            }
        }
    }
}
