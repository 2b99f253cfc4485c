use chrono::NaiveDate;

pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub author: &'static str,
    pub date: &'static str,
    pub read_minutes: u32,
    pub tags: &'static [&'static str],
    pub image: &'static str,
    pub body: &'static [&'static str],
}

impl BlogPost {
    pub fn published(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date, "%Y-%m-%d").ok()
    }

    pub fn display_date(&self) -> String {
        match self.published() {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => self.date.to_string(),
        }
    }
}

pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "instant-payouts-explained",
        title: "Instant Payouts, Explained",
        summary: "What actually happens between a customer tapping pay and the money landing in your account, and why it no longer takes three days.",
        author: "Maya Lindqvist",
        date: "2025-09-02",
        read_minutes: 6,
        tags: &["payments", "product"],
        image: "/assets/blog/instant-payouts.webp",
        body: &[
            "For most of the history of card payments, settlement has been a batch job. Transactions pile up during the day, networks exchange files overnight and the money moves a day or two later.",
            "Instant payouts flip that model. Instead of waiting for the batch, we pre-fund the payout from our own balance the moment a payment is authorised, then reconcile against the network settlement when it arrives.",
            "That means the risk moves to us, so every instant payout passes through the same checks as a manual transfer: velocity limits, account age and a fraud score computed from the payment itself.",
            "For merchants the result is simple. Sales made before lunch can pay for the afternoon's stock.",
        ],
    },
    BlogPost {
        slug: "reading-your-cash-flow",
        title: "Reading Your Cash Flow Like a CFO",
        summary: "Three numbers that tell you more about the health of a small business than the profit and loss statement ever will.",
        author: "Daniel Osei",
        date: "2025-07-18",
        read_minutes: 8,
        tags: &["guides", "finance"],
        image: "/assets/blog/cash-flow.webp",
        body: &[
            "Profit is an opinion, cash is a fact. The saying is old but it still catches founders out every quarter.",
            "Start with runway: cash on hand divided by average monthly net burn. Anything under six months deserves a plan, not a panic.",
            "Next, look at the cash conversion cycle. How many days pass between paying a supplier and being paid by a customer? Shortening it by a week can be worth more than a price rise.",
            "Finally, watch the ratio of recurring to one-off revenue. Recurring income smooths every other number on this list.",
            "The dashboard in your account surfaces all three, updated daily from your connected accounts.",
        ],
    },
    BlogPost {
        slug: "security-at-ledgerline",
        title: "How We Keep Your Money Safe",
        summary: "Encryption, segregated accounts and the boring operational habits that matter most.",
        author: "Priya Raman",
        date: "2025-05-27",
        read_minutes: 5,
        tags: &["security"],
        image: "/assets/blog/security.webp",
        body: &[
            "Customer funds never sit on our balance sheet. They are held in segregated safeguarding accounts at two regulated banks, so they are protected even if something happens to us.",
            "Every card number and bank detail is encrypted at rest with keys held in hardware security modules, and decrypted only inside the service that needs it.",
            "Engineers cannot read production data by default. Access is requested per incident, approved by a second person and logged.",
            "None of this is glamorous, and that is the point.",
        ],
    },
    BlogPost {
        slug: "open-banking-for-small-teams",
        title: "Open Banking for Small Teams",
        summary: "Connecting bank accounts without spreadsheets: what open banking gives you today and what is coming next.",
        author: "Maya Lindqvist",
        date: "2025-03-11",
        read_minutes: 7,
        tags: &["guides", "integrations"],
        image: "/assets/blog/open-banking.webp",
        body: &[
            "Open banking lets you grant read access to your bank account through your bank's own login screen. No shared passwords, no screen scraping.",
            "Once connected, transactions flow in automatically and are matched against invoices, so reconciliation becomes a review instead of a chore.",
            "Payment initiation is the next step: paying suppliers straight from your bank without card fees. We are rolling it out region by region this year.",
        ],
    },
];

/// Newest first.
pub fn sorted_posts() -> Vec<&'static BlogPost> {
    let mut posts: Vec<&'static BlogPost> = BLOG_POSTS.iter().collect();
    posts.sort_by(|a, b| b.published().cmp(&a.published()));
    posts
}

pub fn find_post(slug: &str) -> Option<&'static BlogPost> {
    BLOG_POSTS.iter().find(|post| post.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_post_has_a_valid_date_and_unique_slug() {
        for post in BLOG_POSTS {
            assert!(post.published().is_some(), "bad date on {}", post.slug);
            assert_eq!(
                BLOG_POSTS.iter().filter(|p| p.slug == post.slug).count(),
                1
            );
        }
    }

    #[test]
    fn posts_sort_newest_first() {
        let posts = sorted_posts();
        assert_eq!(posts[0].slug, "instant-payouts-explained");
        assert!(posts
            .windows(2)
            .all(|pair| pair[0].published() >= pair[1].published()));
    }

    #[test]
    fn dates_render_for_humans() {
        let post = find_post("security-at-ledgerline").unwrap();
        assert_eq!(post.display_date(), "May 27, 2025");
        assert!(find_post("missing").is_none());
    }
}
