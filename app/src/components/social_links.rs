use dioxus::prelude::*;
use ideal_types::SocialLink;

/// Row of brand icons linking to the company's social profiles.
#[component]
pub fn SocialLinksRow(links: Vec<SocialLink>) -> Element {
    rsx! {
        nav { class: "splash-social", aria_label: "Social media",
            {links.iter().map(|link| {
                let label = link.platform.label();
                let icon = link.platform.icon_class();
                rsx! {
                    a {
                        key: "{label}",
                        class: "splash-social-link",
                        href: "{link.url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        title: "{label}",
                        aria_label: "{label}",
                        i { class: "{icon}" }
                    }
                }
            })}
        }
    }
}
