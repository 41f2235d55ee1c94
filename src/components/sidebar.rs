use crate::components::{AppView, Icon, LibraryHandle, Navigation, Notices};
use crate::db::AppSettings;
use crate::library::LibrarySnapshot;
use dioxus::prelude::*;

#[component]
pub fn Sidebar() -> Element {
    let navigation = use_context::<Navigation>();
    let mut app_settings = use_context::<Signal<AppSettings>>();
    let library_state = use_context::<Signal<LibrarySnapshot>>();
    let library = use_context::<LibraryHandle>();
    let notices = use_context::<Notices>();

    let mut search_query = use_signal(String::new);
    let mut new_playlist = use_signal(String::new);
    let mut creating = use_signal(|| false);

    let view = navigation.current();
    let settings = app_settings();
    let signed_in = settings.is_signed_in();
    let account_label = settings
        .email
        .clone()
        .filter(|email| !email.trim().is_empty())
        .unwrap_or_else(|| "Signed in".to_string());
    let playlists = library_state.read().playlists.clone();

    let submit_search = move || {
        let query = search_query().trim().to_string();
        if !query.is_empty() {
            navigation.navigate_to(AppView::Search(query));
        }
    };

    let mut create_playlist = move || {
        if creating() {
            return;
        }
        let name = new_playlist();
        let library = library.clone();
        creating.set(true);
        spawn(async move {
            let outcome = library.create_playlist(&name).await;
            if outcome.is_ok() {
                new_playlist.set(String::new());
            }
            notices.report(&outcome, "Playlist created");
            creating.set(false);
        });
    };

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-brand",
                div { class: "brand-mark", "R" }
                h1 { class: "brand-name", "riffstream" }
            }

            form {
                class: "sidebar-search",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_search();
                },
                Icon { name: "search".to_string(), class: "icon icon-muted".to_string() }
                input {
                    r#type: "search",
                    placeholder: "Songs, albums, artists",
                    value: "{search_query}",
                    oninput: move |evt| search_query.set(evt.value()),
                }
            }

            nav { class: "sidebar-nav",
                p { class: "sidebar-section", "Discover" }
                NavItem {
                    icon: "home",
                    label: "Home",
                    active: matches!(view, AppView::Home),
                    onclick: move |_| navigation.navigate_to(AppView::Home),
                }
                NavItem {
                    icon: "video",
                    label: "Videos",
                    active: matches!(view, AppView::Videos),
                    onclick: move |_| navigation.navigate_to(AppView::Videos),
                }

                if signed_in {
                    p { class: "sidebar-section", "Your library" }
                    NavItem {
                        icon: "heart",
                        label: "Favorites",
                        active: matches!(view, AppView::Favorites),
                        onclick: move |_| navigation.navigate_to(AppView::Favorites),
                    }
                    NavItem {
                        icon: "playlist",
                        label: "Playlists",
                        active: matches!(view, AppView::Playlists),
                        onclick: move |_| navigation.navigate_to(AppView::Playlists),
                    }
                    for playlist in playlists {
                        button {
                            key: "{playlist.id}",
                            class: if view == AppView::PlaylistDetail(playlist.id) { "sidebar-playlist active" } else { "sidebar-playlist" },
                            onclick: move |_| navigation.navigate_to(AppView::PlaylistDetail(playlist.id)),
                            "{playlist.name}"
                        }
                    }
                    form {
                        class: "sidebar-create",
                        onsubmit: move |evt: FormEvent| {
                            evt.prevent_default();
                            create_playlist();
                        },
                        input {
                            r#type: "text",
                            placeholder: "New playlist",
                            value: "{new_playlist}",
                            disabled: creating(),
                            oninput: move |evt| new_playlist.set(evt.value()),
                        }
                        button {
                            r#type: "submit",
                            class: "icon-button",
                            aria_label: "Create playlist",
                            disabled: creating(),
                            if creating() {
                                Icon { name: "loader".to_string(), class: "icon".to_string() }
                            } else {
                                Icon { name: "plus".to_string(), class: "icon".to_string() }
                            }
                        }
                    }
                }
            }

            div { class: "sidebar-account",
                if signed_in {
                    div { class: "account-row",
                        Icon { name: "user".to_string(), class: "icon icon-muted".to_string() }
                        span { class: "account-name", "{account_label}" }
                        button {
                            class: "icon-button",
                            aria_label: "Sign out",
                            onclick: move |_| {
                                app_settings.with_mut(|settings| settings.sign_out());
                                navigation.reset_to(AppView::Home);
                            },
                            Icon { name: "logout".to_string(), class: "icon".to_string() }
                        }
                    }
                } else {
                    NavItem {
                        icon: "user",
                        label: "Sign in",
                        active: matches!(view, AppView::Login),
                        onclick: move |_| navigation.navigate_to(AppView::Login),
                    }
                    NavItem {
                        icon: "plus",
                        label: "Create account",
                        active: matches!(view, AppView::Register),
                        onclick: move |_| navigation.navigate_to(AppView::Register),
                    }
                }
            }
        }
    }
}

#[component]
fn NavItem(icon: String, label: String, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let class = if active { "nav-item active" } else { "nav-item" };

    rsx! {
        button {
            class: "{class}",
            onclick: move |e| onclick.call(e),
            Icon { name: icon.clone(), class: "icon".to_string() }
            span { "{label}" }
        }
    }
}
