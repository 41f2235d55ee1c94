use dioxus::prelude::*;

/// Stroke paths for each icon on a 24x24 grid.
fn icon_paths(name: &str) -> &'static [&'static str] {
    match name {
        "home" => &["M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 22V12h6v10"],
        "search" => &["M19 11a8 8 0 1 1-16 0 8 8 0 0 1 16 0z", "M21 21l-4.35-4.35"],
        "album" => &[
            "M5 3h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2z",
            "M17 12a5 5 0 1 1-10 0 5 5 0 0 1 10 0z",
            "M12 12h.01",
        ],
        "playlist" => &[
            "M21 15V6",
            "M18.5 18a2.5 2.5 0 1 0 0-5 2.5 2.5 0 0 0 0 5Z",
            "M12 12H3",
            "M16 6H3",
            "M12 18H3",
        ],
        "video" => &[
            "M4 5h11a2 2 0 0 1 2 2v10a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V7a2 2 0 0 1 2-2z",
            "M17 10l5-3v10l-5-3",
        ],
        "heart" | "heart-filled" => &["M20.84 4.61a5.5 5.5 0 0 0-7.78 0L12 5.67l-1.06-1.06a5.5 5.5 0 0 0-7.78 7.78l1.06 1.06L12 21.23l7.78-7.78 1.06-1.06a5.5 5.5 0 0 0 0-7.78z"],
        "shuffle" => &["M16 3h5v5", "M4 20L21 3", "M21 16v5h-5", "M15 15l6 6", "M4 4l5 5"],
        "play" => &["M5 3l14 9-14 9V3z"],
        "pause" => &["M6 4h4v16H6z", "M14 4h4v16h-4z"],
        "prev" => &["M19 20L9 12l10-8v16z", "M5 19V5"],
        "next" => &["M5 4l10 8-10 8V4z", "M19 5v14"],
        "repeat" => &[
            "M17 1l4 4-4 4",
            "M3 11V9a4 4 0 0 1 4-4h14",
            "M7 23l-4-4 4-4",
            "M21 13v2a4 4 0 0 1-4 4H3",
        ],
        "music" => &[
            "M9 18V5l12-2v13",
            "M9 18a3 3 0 1 1-6 0 3 3 0 0 1 6 0z",
            "M21 16a3 3 0 1 1-6 0 3 3 0 0 1 6 0z",
        ],
        "plus" => &["M12 5v14", "M5 12h14"],
        "minus" => &["M5 12h14"],
        "check" => &["M20 6L9 17l-5-5"],
        "x" => &["M18 6L6 18", "M6 6l12 12"],
        "trash" => &[
            "M3 6h18",
            "M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2",
        ],
        "more" => &["M12 5h.01", "M12 12h.01", "M12 19h.01"],
        "user" => &[
            "M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2",
            "M16 7a4 4 0 1 1-8 0 4 4 0 0 1 8 0z",
        ],
        "logout" => &["M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9"],
        "arrow-left" => &["M19 12H5", "M12 19l-7-7 7-7"],
        "maximize" => &[
            "M8 3H5a2 2 0 0 0-2 2v3",
            "M21 8V5a2 2 0 0 0-2-2h-3",
            "M3 16v3a2 2 0 0 0 2 2h3",
            "M16 21h3a2 2 0 0 0 2-2v-3",
        ],
        _ => &["M22 12a10 10 0 1 1-20 0 10 10 0 0 1 20 0z"],
    }
}

fn is_filled(name: &str) -> bool {
    matches!(name, "heart-filled" | "play" | "pause" | "prev" | "next")
}

#[component]
pub fn Icon(name: String, class: String) -> Element {
    if name == "loader" {
        return rsx! {
            svg {
                class: "{class} animate-spin",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "12", r: "10", opacity: "0.25" }
                path { d: "M12 2a10 10 0 0 1 10 10", opacity: "0.75" }
            }
        };
    }

    let paths = icon_paths(&name);
    let fill = if is_filled(&name) { "currentColor" } else { "none" };
    rsx! {
        svg {
            class: "{class}",
            view_box: "0 0 24 24",
            fill: "{fill}",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            for d in paths.iter() {
                path { key: "{d}", d: "{d}" }
            }
        }
    }
}
