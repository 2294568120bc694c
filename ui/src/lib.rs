// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod components;
pub mod history;
pub mod scan;
mod screens;
pub mod storage;
pub mod workbench;

use components::pico::Container;
use history::HistoryStore;
use scan::ScanController;
use screens::generate::GenerateScreen;
use screens::history::HistoryScreen;
use screens::scan::ScanScreen;
use storage::open_storage;
use workbench::Workbench;

/// Enum to represent the different screens in our application.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum Screen {
    #[default]
    Generate,
    Scan,
    History,
}

impl Screen {
    /// Helper to get the display name for each screen.
    fn name(&self) -> &'static str {
        match self {
            Screen::Generate => "Generate",
            Screen::Scan => "Scan",
            Screen::History => "History",
        }
    }
}

/// A list of all available screens for easy iteration.
const ALL_SCREENS: [Screen; 3] = [Screen::Generate, Screen::Scan, Screen::History];

/// The navigation tabs component.
#[component]
fn Tabs(mut active_screen: Signal<Screen>) -> Element {
    rsx! {
        nav {
            class: "tab-menu",
            ul {
                for screen in ALL_SCREENS {
                    li {
                        a {
                            href: "#",
                            class: if active_screen() == screen { "active-tab" } else { "" },
                            "aria-current": if active_screen() == screen { "page" } else { "false" },
                            onclick: move |event| {
                                event.prevent_default();
                                active_screen.set(screen);
                            },
                            "{screen.name()}"
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let app_css = r#"
    .app-header {
        padding: 0 1rem;
        --pico-nav-element-spacing-vertical: 0.5rem;
    }

    .tab-menu a.active-tab {
        color: var(--pico-primary);
        font-weight: bold;
        text-decoration: none;
        border-bottom: 3px solid var(--pico-primary);
    }

    .tab-menu a:not(.active-tab) {
        color: var(--pico-muted-color);
        border-bottom: 3px solid transparent;
    }

    .content {
        padding: 0 1rem;
        max-width: 560px;
        margin: auto;
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Title { "QR Studio" }
        document::Link {
            rel: "stylesheet",
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css",
        }
        style { "{app_css}" }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // Session-scoped state. The history is hydrated from the durable store
    // exactly once, when this component first mounts.
    let workbench = use_signal(Workbench::new);
    let history = use_signal(|| HistoryStore::hydrate(open_storage()));
    let controller = use_signal(ScanController::new);
    let active_screen = use_signal(Screen::default);

    use_context_provider(|| workbench);
    use_context_provider(|| history);
    use_context_provider(|| controller);

    rsx! {
        Container {
            header {
                class: "app-header",
                nav {
                    ul {
                        li {
                            h1 {
                                style: "margin: 0; font-size: 1.5rem;",
                                "QR Studio"
                            }
                        }
                    }
                    ul {
                        li {
                            Tabs {
                                active_screen,
                            }
                        }
                    }
                }
            }
            div {
                class: "content",
                match active_screen() {
                    Screen::Generate => rsx! {
                        GenerateScreen {}
                    },
                    Screen::Scan => rsx! {
                        ScanScreen {}
                    },
                    Screen::History => rsx! {
                        HistoryScreen {}
                    },
                }
            }
        }
    }
}
