use super::{CompetitorProfile, Persona, Problem, Severity, StatCard, SuccessStory};

pub static PERSONAS: &[Persona] = &[
    Persona {
        id: "cio",
        title: "CIO",
        department: "Executive",
        responsibilities: &["Strategic IT planning", "Budget management", "Board reporting"],
    },
    Persona {
        id: "it_director",
        title: "Director of IT",
        department: "Operations",
        responsibilities: &["Daily operations", "Cost control", "Service stability"],
    },
    Persona {
        id: "cloud_engineer",
        title: "Director of Cloud Engineering",
        department: "Technical",
        responsibilities: &["Auto-scaling", "Reserved instances", "Architecture"],
    },
    Persona {
        id: "vp_finance",
        title: "VP of Finance",
        department: "Finance",
        responsibilities: &["Forecasting", "Budget planning", "Cost analysis"],
    },
    Persona {
        id: "msp_ceo",
        title: "CEO/President (MSP)",
        department: "MSP Leadership",
        responsibilities: &["Profitability", "Client retention", "Service margins"],
    },
];

pub static PROBLEMS: &[Problem] = &[
    Problem {
        id: "azure_costs",
        title: "Uncontrolled Azure Compute and Storage Costs",
        severity: Severity::Critical,
        affected_personas: &["cio", "it_director", "vp_finance", "msp_ceo"],
        description: "Enterprises consuming more Azure resources than required, leading to unpredictable spikes and budget overruns",
        metrics: &["Monthly Azure spend per user", "Budget variance", "VM utilization rate"],
        solution: "Automated scaling, rightsizing recommendations, cost modeling, and real-time dashboards",
        impact: "40-75% reduction in Azure compute and storage costs",
    },
    Problem {
        id: "vm_performance",
        title: "Poor VM Performance & User Experience",
        severity: Severity::High,
        affected_personas: &["it_director", "cloud_engineer"],
        description: "Inadequate VM sizing and configuration leading to slow performance and user complaints",
        metrics: &["User satisfaction scores", "Ticket volume", "Session performance"],
        solution: "Dynamic performance optimization and automated resource allocation",
        impact: "60% reduction in performance-related tickets",
    },
    Problem {
        id: "security_compliance",
        title: "Security & Compliance Gaps",
        severity: Severity::Critical,
        affected_personas: &["cio", "it_director"],
        description: "Difficulty maintaining consistent security policies across Azure environments",
        metrics: &["Compliance audit scores", "Security incidents", "Policy violations"],
        solution: "Automated security policies and compliance monitoring",
        impact: "95% compliance achievement rate",
    },
];

pub static STORIES: &[SuccessStory] = &[
    SuccessStory {
        company: "Fortune 500 Financial Services",
        problem: "azure_costs",
        outcome: "Reduced Azure costs by 62% in 3 months",
        savings: "$2.4M annually",
        testimonial: "Nerdio transformed our Azure cost management completely",
    },
    SuccessStory {
        company: "Global Healthcare Provider",
        problem: "vm_performance",
        outcome: "Improved VDI performance by 3x",
        savings: "$800K in productivity gains",
        testimonial: "User satisfaction scores increased from 3.2 to 4.8",
    },
    SuccessStory {
        company: "Leading MSP",
        problem: "azure_costs",
        outcome: "Increased margins by 35%",
        savings: "$1.2M additional profit",
        testimonial: "We can now confidently quote Azure projects",
    },
];

pub static COMPETITORS: &[CompetitorProfile] = &[
    CompetitorProfile {
        name: "Competitor A",
        strengths: &["Market presence", "Brand recognition"],
        weaknesses: &["Limited automation", "Complex pricing", "Poor MSP support"],
        differentiators: &["Nerdio: 75% more cost savings", "Unified platform", "MSP-ready"],
    },
    CompetitorProfile {
        name: "Competitor B",
        strengths: &["Feature rich", "Enterprise focus"],
        weaknesses: &["Expensive", "Steep learning curve", "No auto-scaling"],
        differentiators: &["Nerdio: 50% faster deployment", "Intuitive UI", "Built-in optimization"],
    },
];

pub static STAT_CARDS: &[StatCard] = &[
    StatCard {
        value: "$2.4M",
        label: "Average Cost Savings",
        caption: "This Month",
        trend: "62% reduction",
    },
    StatCard {
        value: "847",
        label: "Enterprise Customers",
        caption: "Active",
        trend: "23% growth QoQ",
    },
    StatCard {
        value: "94%",
        label: "Win Rate vs Competition",
        caption: "Current",
        trend: "Industry leader",
    },
];

pub static QUICK_ACTIONS: &[&str] = &[
    "View Problem Matrix",
    "Access Sales Scripts",
    "Success Stories",
    "ROI Calculator",
];

pub static TARGET_INDUSTRIES: &[&str] = &[
    "Financial Services",
    "Healthcare",
    "Manufacturing",
    "Technology",
    "Retail",
    "Government",
    "Education",
    "MSPs",
];

pub static SEARCH_SUGGESTIONS: &[&str] = &[
    "Azure costs",
    "CIO persona",
    "Success stories",
    "Competition",
];
