use dioxus::prelude::*;

use ui::Navbar;

use crate::Route;

#[component]
pub fn AdminLayout() -> Element {
    rsx! {
        Navbar {
            title: "Admin",
            Link { to: Route::Dashboard {}, active_class: "active", "Dashboard" }
            Link { to: Route::AdminSettings {}, active_class: "active", "Settings" }
            Link { to: Route::Home {}, "View site" }
        }
        main { class: "page admin",
            Outlet::<Route> {}
        }
    }
}
