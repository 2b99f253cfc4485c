use serde::Deserialize;
use yew::prelude::*;

use crate::components::info_card::InfoCard;
use crate::content::posts::sorted_posts;

/// Home page sections in page order.
pub const HOME_SECTIONS: [&str; 10] = [
    "features",
    "security",
    "pricing",
    "testimonials",
    "integrations",
    "stats",
    "blog-preview",
    "faq",
    "press",
    "cta",
];

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CardContent {
    #[serde(default)]
    pub icon: Option<String>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SectionContent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub lead: Option<String>,
    #[serde(default)]
    pub cards: Vec<CardContent>,
}

fn card(icon: &str, title: &str, body: &str) -> CardContent {
    CardContent {
        icon: Some(icon.to_string()),
        title: title.to_string(),
        body: body.to_string(),
        href: None,
    }
}

fn section(id: &str, title: &str, lead: &str, cards: Vec<CardContent>) -> SectionContent {
    SectionContent {
        id: id.to_string(),
        title: title.to_string(),
        lead: Some(lead.to_string()),
        cards,
    }
}

pub fn builtin(name: &str) -> Option<SectionContent> {
    let content = match name {
        "features" => section(
            "features",
            "Everything your money needs",
            "One account for getting paid, paying out and knowing where you stand.",
            vec![
                card("fa-bolt", "Instant payouts", "Card sales reach your account in minutes, not days."),
                card("fa-file-invoice", "Smart invoicing", "Send invoices that chase themselves and reconcile on payment."),
                card("fa-chart-line", "Live cash flow", "Runway, burn and receivables, refreshed every morning."),
            ],
        ),
        "security" => section(
            "security",
            "Bank-grade security",
            "Your funds are safeguarded and your data is encrypted end to end.",
            vec![
                card("fa-shield-halved", "Safeguarded funds", "Client money is held in segregated accounts at regulated banks."),
                card("fa-key", "Hardware-backed keys", "Sensitive data is encrypted with keys that never leave an HSM."),
                card("fa-user-lock", "Two-person access", "Production access needs a second approver and is always logged."),
            ],
        ),
        "pricing" => section(
            "pricing",
            "Simple pricing",
            "No setup fees. Cancel any time.",
            vec![
                card("fa-seedling", "Starter: free", "Up to 50 transactions a month and one user."),
                card("fa-rocket", "Growth: $29/mo", "Unlimited transactions, five users and instant payouts."),
                card("fa-building", "Scale: talk to us", "Custom limits, SSO and a dedicated account manager."),
            ],
        ),
        "testimonials" => section(
            "testimonials",
            "Loved by small teams",
            "Founders and finance leads on switching to Ledgerline.",
            vec![
                card("fa-quote-left", "Hana, bakery owner", "\"I stopped dreading month end. Everything is already matched.\""),
                card("fa-quote-left", "Tomás, agency founder", "\"Instant payouts changed how we handle freelancer invoices.\""),
                card("fa-quote-left", "Grace, finance lead", "\"The cash flow view is the first thing I open every day.\""),
            ],
        ),
        "integrations" => section(
            "integrations",
            "Works with your stack",
            "Connect the tools you already use in a couple of clicks.",
            vec![
                card("fa-cart-shopping", "Storefronts", "Sync orders and refunds from your online shop."),
                card("fa-calculator", "Accounting", "Push categorised transactions to your ledger nightly."),
                card("fa-building-columns", "Open banking", "Link external bank accounts without sharing passwords."),
            ],
        ),
        "stats" => section(
            "stats",
            "By the numbers",
            "Growing with our customers since 2021.",
            vec![
                card("fa-users", "40,000+", "businesses run their finances on Ledgerline."),
                card("fa-arrow-right-arrow-left", "$3.2B", "processed in the last twelve months."),
                card("fa-clock", "4 minutes", "median time from sale to payout."),
            ],
        ),
        "blog-preview" => SectionContent {
            id: "blog-preview".to_string(),
            title: "From the blog".to_string(),
            lead: Some("Guides and product notes from the team.".to_string()),
            cards: sorted_posts()
                .into_iter()
                .take(3)
                .map(|post| CardContent {
                    icon: Some("fa-newspaper".to_string()),
                    title: post.title.to_string(),
                    body: post.summary.to_string(),
                    href: Some(format!("/blog/{}", post.slug)),
                })
                .collect(),
        },
        "faq" => section(
            "faq",
            "Questions, answered",
            "Still curious? Our support team replies within a few hours.",
            vec![
                card("fa-circle-question", "Is my money protected?", "Yes. Funds are safeguarded in segregated accounts at regulated banks."),
                card("fa-circle-question", "How fast are payouts?", "Most payouts arrive within minutes, any day of the week."),
                card("fa-circle-question", "Can I switch plans?", "Upgrade or downgrade whenever you like, billed pro rata."),
            ],
        ),
        "press" => section(
            "press",
            "In the press",
            "What others are saying.",
            vec![
                card("fa-newspaper", "Fintech Weekly", "\"A refreshingly honest take on business banking.\""),
                card("fa-newspaper", "The Startup Ledger", "\"The payout speed is hard to beat.\""),
                card("fa-newspaper", "Small Biz Today", "\"Finally, finance software that explains itself.\""),
            ],
        ),
        "cta" => section(
            "cta",
            "Ready when you are",
            "Open an account in ten minutes. No paperwork, no branch visits.",
            Vec::new(),
        ),
        _ => return None,
    };
    Some(content)
}

pub fn render_section(content: &SectionContent) -> Html {
    html! {
        <section id={content.id.clone()} class={classes!("home-section", format!("section-{}", content.id))}>
            <h2>{&content.title}</h2>
            {
                if let Some(lead) = &content.lead {
                    html! { <p class="section-lead">{lead}</p> }
                } else {
                    html! {}
                }
            }
            {
                if content.cards.is_empty() {
                    html! {
                        <a href="/#top" class="cta-button">{"Get started"}</a>
                    }
                } else {
                    html! {
                        <div class="card-grid">
                            { for content.cards.iter().map(|card| html! {
                                <InfoCard
                                    icon={card.icon.clone()}
                                    title={card.title.clone()}
                                    href={card.href.clone()}
                                >
                                    {card.body.clone()}
                                </InfoCard>
                            }) }
                        </div>
                    }
                }
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_home_section_has_builtin_content() {
        for name in HOME_SECTIONS {
            let content = builtin(name).unwrap_or_else(|| panic!("missing {}", name));
            assert_eq!(content.id, name);
        }
        assert!(builtin("unknown").is_none());
    }

    #[test]
    fn blog_preview_links_to_latest_posts() {
        let preview = builtin("blog-preview").unwrap();
        assert_eq!(preview.cards.len(), 3);
        assert_eq!(
            preview.cards[0].href.as_deref(),
            Some("/blog/instant-payouts-explained")
        );
    }

    #[test]
    fn remote_content_decodes_with_optional_fields_missing() {
        let json = r#"{"id":"press","title":"In the press","cards":[{"title":"A","body":"B"}]}"#;
        let content: SectionContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.lead, None);
        assert_eq!(content.cards[0].icon, None);
    }
}
