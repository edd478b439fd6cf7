//! Public rendering of rich (HTML) content.
//!
//! [`content::render::plan`] decides what the stored HTML becomes: plain
//! markup, a 3D scene, or the extracted HTML snippets. WebGL only starts in
//! the browser, after hydration, so the server and the client agree on the
//! initial markup.

use dioxus::prelude::*;

use content::render::{plan, RenderPlan};

pub const THREE_SCENE_JS: Asset = asset!("/assets/three-scene.js");

static SCENE_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

#[component]
pub fn InteractiveRenderer(html: String) -> Element {
    match plan(&html) {
        RenderPlan::Direct(markup) => rsx! {
            div { class: "rich-content", dangerous_inner_html: markup }
        },
        RenderPlan::Scene { height } => rsx! {
            div { class: "rich-content", ThreeJsScene { height } }
        },
        RenderPlan::Snippets(markup) => rsx! {
            div { class: "rich-content", HtmlSnippet { html: markup } }
        },
    }
}

/// Author-supplied HTML shown as is.
#[component]
pub fn HtmlSnippet(html: String) -> Element {
    rsx! {
        div { class: "html-snippet", dangerous_inner_html: html }
    }
}

/// Fixed-height box holding a rotating cube.
#[component]
pub fn ThreeJsScene(height: u32) -> Element {
    // Assigned on the client only; the server renders the empty box.
    let mut scene_id = use_signal(|| Option::<String>::None);

    use_effect(move || {
        if scene_id.peek().is_none() {
            let n = SCENE_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            scene_id.set(Some(format!("three-scene-{n}")));
        }
    });

    use_effect(move || {
        let Some(id) = scene_id() else {
            return;
        };
        let js = format!(
            r#"(function() {{
                function start() {{
                    window.PortfolioScene.mountById("{id}", {height});
                }}
                if (window.PortfolioScene) {{ start(); return; }}
                var script = document.getElementById('portfolio-scene-js');
                if (!script) {{
                    script = document.createElement('script');
                    script.id = 'portfolio-scene-js';
                    script.src = "{src}";
                    document.head.appendChild(script);
                }}
                script.addEventListener('load', start);
            }})();"#,
            src = THREE_SCENE_JS,
        );
        document::eval(&js);
    });

    use_drop(move || {
        if let Some(id) = scene_id.peek().clone() {
            document::eval(&format!(
                r#"if (window.PortfolioScene) {{ window.PortfolioScene.unmount("{id}"); }}"#
            ));
        }
    });

    rsx! {
        div {
            class: "three-scene",
            style: "height: {height}px;",
            div { class: "three-scene-canvas", id: scene_id() }
        }
    }
}
