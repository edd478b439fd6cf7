mod site_layout;
pub use site_layout::SiteLayout;

mod entry_card;
pub use entry_card::EntryCard;

mod home;
pub use home::Home;

mod entry_list;
pub use entry_list::{BlogList, WorksList};

mod entry_page;
pub use entry_page::{BlogPost, WorkDetail};

mod pages;
pub use pages::{Contact, Introduction, Resume};

mod admin_layout;
pub use admin_layout::AdminLayout;

mod dashboard;
pub use dashboard::Dashboard;

mod entry_edit;
pub use entry_edit::{EditEntry, NewEntry};

mod settings;
pub use settings::AdminSettings;

use content::{Entry, EntryKind};

use crate::Route;

/// Where the public site shows an entry.
pub(crate) fn public_route(entry: &Entry) -> Route {
    match entry.kind {
        EntryKind::Work => Route::WorkDetail { slug: entry.slug.clone() },
        EntryKind::Blog => Route::BlogPost { slug: entry.slug.clone() },
        EntryKind::Page => match entry.slug.as_str() {
            "resume" => Route::Resume {},
            "contact" => Route::Contact {},
            "introduction" => Route::Introduction {},
            _ => Route::Home {},
        },
    }
}

pub(crate) fn display_date(entry: &Entry) -> Option<String> {
    entry
        .published_at
        .or(entry.updated_at)
        .map(|at| at.format("%B %-d, %Y").to_string())
}
