use dioxus::prelude::*;

use proposal_common::{Letterhead, ProposalContent};

use super::style::{PRINT_SCRIPT, STYLESHEET};

#[allow(non_snake_case)]
#[component]
pub(crate) fn ProposalSheet(
    content: ProposalContent,
    image_url: String,
    letterhead: Option<Letterhead>,
) -> Element {
    let page_title = format!("商品提案書 | {}", content.product_name);
    let capacity = content.capacity.clone().unwrap_or_default();
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{page_title}" }
            style { dangerous_inner_html: STYLESHEET }
        }
        body {
            div { class: "print-btn-container no-print",
                button { id: "print-btn", class: "print-btn", r#type: "button",
                    "🖨️ 印刷 / PDF保存"
                }
            }
            div { class: "container",
                if let Some(letter) = &letterhead {
                    div { class: "company-header",
                        div { class: "company-name", "{letter.name}" }
                        for line in letter.lines.iter() {
                            div { "{line}" }
                        }
                    }
                }
                h1 { "商品提案書" }
                div { class: "hero-section",
                    div { class: "product-image",
                        img { src: "{image_url}", alt: "{content.product_name}" }
                    }
                }
                div { class: "catch-copy", "{content.catch_copy}" }
                div { class: "info-grid",
                    div {
                        div { class: "section-title", "お客様への3つのベネフィット" }
                        for benefit in content.benefits.iter() {
                            div { class: "benefit-card",
                                div { class: "benefit-title", "{benefit.title}" }
                                div { class: "benefit-detail", "{benefit.detail}" }
                            }
                        }
                    }
                    div {
                        div { class: "section-title", "商品情報" }
                        div { class: "specs-box",
                            h3 { "{content.product_name}" }
                            ul { class: "specs-list",
                                for spec in content.product_specs.iter() {
                                    li { "{spec}" }
                                }
                            }
                            div { class: "price-target-box",
                                div {
                                    "{capacity}　"
                                    span { class: "price-group",
                                        span { class: "price-label", "納品価格" }
                                        " "
                                        span { class: "price-val", "{content.price}" }
                                        span { class: "tax-label", "(税別)" }
                                    }
                                }
                                div { class: "target-val", "ターゲット: {content.target}" }
                            }
                        }
                    }
                }
                div { class: "comment-section",
                    div { class: "comment-text", "\"{content.comment}\"" }
                }
            }
            script { dangerous_inner_html: PRINT_SCRIPT }
        }
    }
}
