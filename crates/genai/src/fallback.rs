//! Named fallback payloads, one per analysis mode.
//!
//! Served whenever generation or parsing fails, so the caller always
//! receives a well-formed payload. The content is fixed and unrelated to
//! the submitted idea; [`crate::service::Outcome::Fallback`] marks when
//! one of these was used.

use crate::types::{
    AnalysisData, BusinessInsights, BusinessModel, DebateMessage, DebateTranscript,
    EvolveResponse, GoToMarket, MarketDataPoint, Milestone, MixedIdea, Monetization, Pricing,
    RadarDataPoint, RevenueSlice, RoastReport, Scores, Variant,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Canned evolve result: three variants spanning the impact/cost/balance
/// spectrum.
pub fn evolve() -> EvolveResponse {
    EvolveResponse {
        variants: vec![
            Variant {
                title: "High-Impact Community Platform".into(),
                summary: "Viral growth through gamification and social sharing".into(),
                description: "Build a feature-rich platform with social networking capabilities, \
                              achievement systems, and viral sharing mechanisms to maximize user \
                              acquisition and engagement."
                    .into(),
                strengths: strings(&[
                    "Exponential user growth potential through network effects",
                    "High engagement rates with gamification elements",
                    "Strong brand visibility and market presence",
                    "Multiple monetization opportunities",
                ]),
                tradeoffs: strings(&[
                    "Higher initial development costs ($150K-200K)",
                    "Longer time to market (6-9 months)",
                    "Requires larger team and ongoing maintenance",
                ]),
                scores: Scores {
                    impact: 92,
                    cost: 45,
                    feasibility: 68,
                },
            },
            Variant {
                title: "Lean MVP Launch Strategy".into(),
                summary: "Minimal viable product with core features only".into(),
                description: "Start with essential functionality using no-code tools and existing \
                              platforms. Focus on validating the core value proposition with \
                              minimal investment."
                    .into(),
                strengths: strings(&[
                    "Launch in 4-6 weeks with $10K-20K budget",
                    "Quick market validation and user feedback",
                    "Low financial risk and easy pivoting",
                    "Can bootstrap or self-fund initially",
                ]),
                tradeoffs: strings(&[
                    "Limited feature set may reduce initial appeal",
                    "Scalability challenges as user base grows",
                    "May need to rebuild for long-term growth",
                ]),
                scores: Scores {
                    impact: 58,
                    cost: 88,
                    feasibility: 92,
                },
            },
            Variant {
                title: "Balanced Growth Platform".into(),
                summary: "Phased rollout balancing quality and efficiency".into(),
                description: "Develop core features with modern tech stack, launch regionally, \
                              then expand. Combines solid architecture with controlled costs \
                              through iterative releases."
                    .into(),
                strengths: strings(&[
                    "Sustainable development pace and budget",
                    "Quality codebase ready for scaling",
                    "Manageable team size (3-5 developers)",
                    "Good user experience without bloat",
                ]),
                tradeoffs: strings(&[
                    "Moderate time to market (3-4 months)",
                    "May miss some early adopter opportunities",
                    "Regional launch limits initial reach",
                ]),
                scores: Scores {
                    impact: 75,
                    cost: 72,
                    feasibility: 82,
                },
            },
        ],
    }
}

/// Canned analysis with mid-range scores and generic advice.
pub fn analyze() -> AnalysisData {
    AnalysisData {
        clarity: 72,
        market_fit: 68,
        competition: strings(&[
            "StudyBuddy - Existing study group matching platform",
            "Campus Connect - University social networking app",
            "GroupStudy - Online collaboration tool for students",
        ]),
        suggestions: strings(&[
            "Define your unique value proposition more clearly",
            "Research specific pain points of your target users",
            "Consider partnerships with universities for distribution",
            "Focus on one key feature that differentiates you from competitors",
        ]),
        market_data: vec![
            MarketDataPoint {
                category: "EdTech".into(),
                demand: 85,
                competition: 78,
            },
            MarketDataPoint {
                category: "Social Learning".into(),
                demand: 72,
                competition: 65,
            },
            MarketDataPoint {
                category: "Study Apps".into(),
                demand: 68,
                competition: 82,
            },
            MarketDataPoint {
                category: "Campus Tools".into(),
                demand: 58,
                competition: 45,
            },
        ],
        radar_data: vec![
            RadarDataPoint {
                subject: "Innovation".into(),
                score: 65,
            },
            RadarDataPoint {
                subject: "Scalability".into(),
                score: 78,
            },
            RadarDataPoint {
                subject: "Market Timing".into(),
                score: 82,
            },
            RadarDataPoint {
                subject: "Technical Feasibility".into(),
                score: 88,
            },
            RadarDataPoint {
                subject: "Business Model".into(),
                score: 58,
            },
        ],
    }
}

/// Canned business insights for a campus study-matching app.
pub fn business_insights() -> BusinessInsights {
    BusinessInsights {
        business_model: BusinessModel {
            primary_model: "B2C Mobile App".into(),
            target_market: "College students aged 18-24 seeking study partners and collaborative \
                            learning opportunities"
                .into(),
            revenue_streams: strings(&[
                "Freemium subscriptions",
                "Premium features (priority matching, analytics)",
                "University partnerships",
                "In-app study resources marketplace",
            ]),
            customer_segments: strings(&[
                "Undergraduate students in STEM fields",
                "Graduate students seeking research collaborators",
                "International students adapting to new education systems",
                "Remote learners needing virtual study groups",
            ]),
            competitive_advantage: "AI-powered matching algorithm that considers learning styles, \
                                    schedules, and academic performance to create optimal study \
                                    groups"
                .into(),
        },
        monetization: Monetization {
            pricing: Pricing {
                model: "Freemium with Subscription Tiers".into(),
                range: "Free, $4.99/mo (Pro), $9.99/mo (Premium)".into(),
            },
            ltv: "$120".into(),
            cac: "$8".into(),
            breakeven: "15-18 months".into(),
            revenue_breakdown: vec![
                RevenueSlice {
                    name: "Subscriptions".into(),
                    value: 55,
                    color: "#6366F1".into(),
                },
                RevenueSlice {
                    name: "University Licenses".into(),
                    value: 30,
                    color: "#8B5CF6".into(),
                },
                RevenueSlice {
                    name: "Marketplace Fees".into(),
                    value: 10,
                    color: "#06B6D4".into(),
                },
                RevenueSlice {
                    name: "Advertising".into(),
                    value: 5,
                    color: "#10B981".into(),
                },
            ],
        },
        go_to_market: GoToMarket {
            strategy: "Campus ambassador program combined with digital marketing. Start with 3-5 \
                       pilot universities, gather feedback, iterate, then scale to top 50 \
                       universities."
                .into(),
            timeline: "4-6 months to launch".into(),
            channels: strings(&[
                "Campus Ambassadors",
                "TikTok & Instagram",
                "University Partnership Programs",
                "Student Facebook Groups",
                "Reddit (r/college)",
            ]),
            milestones: vec![
                Milestone {
                    phase: "MVP Development".into(),
                    duration: "2 months".into(),
                    status: "active".into(),
                },
                Milestone {
                    phase: "Pilot Launch (3 Universities)".into(),
                    duration: "1 month".into(),
                    status: "pending".into(),
                },
                Milestone {
                    phase: "Iteration & Scaling".into(),
                    duration: "2 months".into(),
                    status: "pending".into(),
                },
                Milestone {
                    phase: "National Rollout".into(),
                    duration: "Ongoing".into(),
                    status: "pending".into(),
                },
            ],
            risks: strings(&[
                "Low initial user adoption without critical mass",
                "Competition from existing study platforms",
                "Privacy concerns with student data",
            ]),
        },
    }
}

/// Canned roast aimed at undifferentiated me-too ideas.
pub fn roast() -> RoastReport {
    RoastReport {
        overall_rating: 3,
        savage_roast: "This idea has been done before, and honestly, yours doesn't bring anything \
                       new to the table. It's like reinventing the wheel, but making it square."
            .into(),
        major_flaws: strings(&[
            "Lacks differentiation from existing solutions",
            "Unclear value proposition",
            "Market is already saturated",
            "Execution challenges not addressed",
        ]),
        market_reality: "The market is crowded and dominated by established players with deep \
                         pockets."
            .into(),
        who_will_actually_use: "Probably just your friends being polite, and they'll stop after a \
                                week."
            .into(),
        why_it_will_fail: "Competition is fierce, customer acquisition costs are high, and \
                           there's no compelling reason for users to switch."
            .into(),
        redeeming_qualities: strings(&["Shows initiative", "Identifies a problem"]),
        advice_if_you_insist: "Find a specific niche, talk to 100 potential customers, and prove \
                               there's actual demand before building anything."
            .into(),
        similar_failures: strings(&[
            "Countless startups in this space that burned through funding",
        ]),
        verdict: "Another 'me too' idea in an oversaturated market.".into(),
    }
}

/// Canned six-message debate transcript.
pub fn debate() -> DebateTranscript {
    let turns = [
        (
            "user",
            "This idea taps into a real pain point for students. The market is huge with \
             millions of college students globally struggling to find compatible study partners. \
             AI-powered matching could be a game-changer!",
        ),
        (
            "assistant",
            "But consider the chicken-and-egg problem: you need critical mass for effective \
             matching. Most campus-focused apps fail because they can't reach enough users \
             quickly. Without scale, the matching quality suffers, users churn, and you're left \
             with nothing.",
        ),
        (
            "user",
            "Fair point, but that's exactly why the AI matching is crucial. Even with smaller \
             groups, intelligent algorithms can create better matches than random connections. \
             Plus, partnering with universities for initial rollout solves the critical mass \
             problem faster than traditional consumer apps.",
        ),
        (
            "assistant",
            "University partnerships sound good in theory, but they're notoriously slow to \
             negotiate and implement. Educational institutions are risk-averse and have lengthy \
             approval processes. Meanwhile, you're burning cash on development with no revenue \
             stream. How do you sustain until you get traction?",
        ),
        (
            "user",
            "Start with a freemium model targeting individual students first while pursuing \
             partnerships in parallel. The product can generate revenue from premium features \
             immediately. Use early adopters as social proof when approaching universities. It's \
             a dual-track strategy that mitigates the timeline risk.",
        ),
        (
            "assistant",
            "The freemium model has low conversion rates in education - students are notoriously \
             price-sensitive. You'll spend heavily on user acquisition but convert maybe 2-5%. \
             With competition from free alternatives like Discord or WhatsApp groups, convincing \
             students to pay for yet another app is an uphill battle.",
        ),
    ];
    DebateTranscript {
        messages: turns
            .into_iter()
            .map(|(role, content)| DebateMessage {
                role: role.into(),
                content: content.into(),
            })
            .collect(),
    }
}

/// Canned hybrid idea for the mixer.
pub fn mix() -> MixedIdea {
    MixedIdea {
        mixed_idea: "A gamified study platform that combines AI-powered peer matching with \
                     Netflix-style content recommendations. Students get matched with compatible \
                     study partners based on learning styles, but also receive personalized study \
                     resource recommendations (videos, articles, practice problems) based on \
                     their progress and goals. The platform uses engagement metrics to \
                     continuously improve both matching and content algorithms, creating a \
                     comprehensive learning ecosystem."
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evolve_fallback_has_the_three_canonical_variants() {
        let payload = evolve();
        assert_eq!(payload.variants.len(), 3);
        let titles: Vec<&str> = payload.variants.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "High-Impact Community Platform",
                "Lean MVP Launch Strategy",
                "Balanced Growth Platform",
            ]
        );
    }

    #[test]
    fn analyze_fallback_scores_are_in_range() {
        let payload = analyze();
        assert!((0..=100).contains(&payload.clarity));
        assert!((0..=100).contains(&payload.market_fit));
        assert_eq!(payload.radar_data.len(), 5);
        assert!(!payload.competition.is_empty());
        assert!(!payload.suggestions.is_empty());
        assert!(!payload.market_data.is_empty());
    }

    #[test]
    fn business_fallback_revenue_breakdown_sums_to_100() {
        let payload = business_insights();
        let total: i32 = payload
            .monetization
            .revenue_breakdown
            .iter()
            .map(|slice| slice.value)
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn debate_fallback_alternates_six_messages() {
        let transcript = debate();
        assert_eq!(transcript.messages.len(), 6);
        for (i, message) in transcript.messages.iter().enumerate() {
            let expected = if i % 2 == 0 { "user" } else { "assistant" };
            assert_eq!(message.role, expected);
        }
    }

    #[test]
    fn fallbacks_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(analyze()).unwrap();
        assert!(json.get("marketFit").is_some());
        assert!(json.get("radarData").is_some());

        let json = serde_json::to_value(roast()).unwrap();
        assert!(json.get("overallRating").is_some());
        assert!(json.get("redeemingQualities").is_some());

        let json = serde_json::to_value(mix()).unwrap();
        assert!(json.get("mixedIdea").is_some());
    }
}
