//! Content Catalog
//!
//! Immutable marketing content (plans, portfolio, testimonials, FAQs) built
//! once at process start and injected into handlers. The tables are ordered
//! and read-only; there is no pagination, filtering or mutation.

use crate::model::{Faq, Plan, PortfolioItem, Testimonial};

/// The static content catalog
pub struct Catalog {
    plans: Vec<Plan>,
    portfolio: Vec<PortfolioItem>,
    testimonials: Vec<Testimonial>,
    faqs: Vec<Faq>,
}

impl Catalog {
    pub fn new(
        plans: Vec<Plan>,
        portfolio: Vec<PortfolioItem>,
        testimonials: Vec<Testimonial>,
        faqs: Vec<Faq>,
    ) -> Self {
        Self { plans, portfolio, testimonials, faqs }
    }

    /// All plans, in display order
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Portfolio showcase entries, in display order
    pub fn portfolio(&self) -> &[PortfolioItem] {
        &self.portfolio
    }

    /// Customer testimonials, in display order
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    /// Frequently asked questions, in display order
    pub fn faqs(&self) -> &[Faq] {
        &self.faqs
    }

    /// Resolve a plan by its slug
    pub fn find_plan(&self, slug: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.slug == slug)
    }

    /// The production content set for the Nigerian small-business offering
    pub fn nigeria_smb() -> Self {
        let plans = vec![
            Plan {
                name: "Basic".into(),
                slug: "basic".into(),
                price_ngn: 15000,
                description: "Great for simple one-page sites.".into(),
                features: vec![
                    "Custom 1-3 pages".into(),
                    "Free .com.ng domain".into(),
                    "Managed hosting".into(),
                    "Mobile friendly".into(),
                    "Monthly updates".into(),
                    "Email & WhatsApp support".into(),
                ],
                popular: false,
            },
            Plan {
                name: "Growth".into(),
                slug: "growth".into(),
                price_ngn: 35000,
                description: "For growing businesses that need more.".into(),
                features: vec![
                    "Up to 10 pages".into(),
                    "Blog or portfolio".into(),
                    "Basic SEO setup".into(),
                    "Analytics & tracking".into(),
                    "Priority support".into(),
                    "Speed optimization".into(),
                ],
                popular: true,
            },
            Plan {
                name: "Premium".into(),
                slug: "premium".into(),
                price_ngn: 65000,
                description: "Advanced features and e‑commerce.".into(),
                features: vec![
                    "Unlimited pages".into(),
                    "E‑commerce or bookings".into(),
                    "Advanced SEO".into(),
                    "Automations & integrations".into(),
                    "Dedicated success manager".into(),
                    "Uptime monitoring".into(),
                ],
                popular: false,
            },
        ];

        let portfolio = vec![
            PortfolioItem {
                title: "Lagos Fashion Hub".into(),
                category: "E‑commerce".into(),
                thumbnail_url: "https://images.unsplash.com/photo-1520975922215-230cd77abf53?q=80&w=1200&auto=format&fit=crop".into(),
                url: Some("#".into()),
            },
            PortfolioItem {
                title: "Abuja Fitness Studio".into(),
                category: "Services".into(),
                thumbnail_url: "https://images.unsplash.com/photo-1517836357463-d25dfeac3438?q=80&w=1200&auto=format&fit=crop".into(),
                url: Some("#".into()),
            },
            PortfolioItem {
                title: "Kano Fresh Foods".into(),
                category: "Retail".into(),
                thumbnail_url: "https://images.unsplash.com/photo-1511690078903-71dc5a49f5e3?q=80&w=1200&auto=format&fit=crop".into(),
                url: Some("#".into()),
            },
        ];

        let testimonials = vec![
            Testimonial {
                name: "Amaka I.".into(),
                role: "Founder".into(),
                company: "Glow Skincare".into(),
                quote: "We launched in a week and started getting WhatsApp orders immediately. The monthly plan made it a no‑brainer.".into(),
            },
            Testimonial {
                name: "Seyi O.".into(),
                role: "Director".into(),
                company: "Prime Logistics".into(),
                quote: "Professional, fast and supportive. They handle everything while we focus on the business.".into(),
            },
            Testimonial {
                name: "Hauwa B.".into(),
                role: "Owner".into(),
                company: "Taste of Arewa".into(),
                quote: "Affordable and reliable. Updating our menu is as simple as sending a message.".into(),
            },
        ];

        let faqs = vec![
            Faq {
                question: "How do payments work?".into(),
                answer: "You pay a monthly subscription via Paystack. Cancel anytime. No hidden fees.".into(),
            },
            Faq {
                question: "Can I upgrade plans?".into(),
                answer: "Yes. You can switch plans at any time. We’ll adjust your next billing cycle.".into(),
            },
            Faq {
                question: "Do I own my site?".into(),
                answer: "Yes. Your content, domain and branding are yours. We manage hosting, updates and support.".into(),
            },
            Faq {
                question: "How fast can you launch?".into(),
                answer: "Most sites go live in 7–14 days depending on content and features.".into(),
            },
        ];

        Self::new(plans, portfolio, testimonials, faqs)
    }
}
