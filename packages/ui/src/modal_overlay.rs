use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Yes/no confirmation in a [`ModalOverlay`].
#[component]
pub fn ConfirmDialog(
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay { on_close: move |_| on_cancel.call(()),
            p { class: "modal-message", "{message}" }
            div { class: "modal-actions",
                button { class: "button", onclick: move |_| on_cancel.call(()), "Cancel" }
                button { class: "button danger", onclick: move |_| on_confirm.call(()), "{confirm_label}" }
            }
        }
    }
}
