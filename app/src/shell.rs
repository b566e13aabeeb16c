//! Root page frame: background, splash overlay, content area and footer.

use dioxus::prelude::*;

use crate::components::LoadingScreen;
use crate::site::site_config;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const FONT_AWESOME: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

#[component]
pub fn RootShell() -> Element {
    let site = use_hook(site_config);
    let footer_text = &site.footer;

    rsx! {
        document::Title { "{site.meta.title}" }
        document::Meta { name: "description", content: "{site.meta.description}" }
        if site.logo.preload {
            document::Link { rel: "preload", href: "{site.logo.src}", r#as: "image" }
        }
        document::Stylesheet { href: MAIN_CSS }
        if site.social.show_social_links {
            document::Stylesheet { href: "{FONT_AWESOME}" }
        }

        LoadingScreen {
            active: site.splash.active,
            duration_ms: site.splash.duration_ms,
            logo: site.logo.clone(),
            content: site.splash.clone(),
            social: site.social.clone(),
        }

        div { class: "shell", lang: "{site.meta.lang}",
            // Brand gradient backdrop
            div { class: "shell-backdrop",
                div { class: "shell-gradient" }
                div { class: "shell-glow shell-glow-a" }
                div { class: "shell-glow shell-glow-b" }
            }

            main { class: "shell-content" }
        }

        footer { class: "shell-footer",
            span { class: "footer-brand", "{footer_text.brand}" }
            span { class: "footer-region", "{footer_text.region}" }
            span { class: "footer-year", "© {footer_text.year}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay_count(dom: &VirtualDom) -> usize {
        dioxus_ssr::render(dom).matches("splash-overlay").count()
    }

    #[test]
    fn shell_mounts_exactly_one_overlay() {
        let mut dom = VirtualDom::new(RootShell);
        dom.rebuild_in_place();
        // Hidden until the mount effect has run
        assert_eq!(overlay_count(&dom), 0);

        dom.render_immediate_to_vec();
        assert_eq!(overlay_count(&dom), 1);

        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("shell-content"));
        assert!(html.contains("shell-footer"));
    }
}
