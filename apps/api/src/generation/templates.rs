//! Fixed template material for the rule-based resume synthesizer.

use crate::models::job::Industry;

/// Which rung of the generated career ladder an experience entry sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleTier {
    Senior,
    Mid,
    Junior,
}

impl TitleTier {
    pub fn prefixes(&self) -> &'static [&'static str] {
        match self {
            TitleTier::Senior => &["Senior", "Lead", "Principal"],
            TitleTier::Mid => &["", "Mid-Level"],
            TitleTier::Junior => &["Junior", "Associate", ""],
        }
    }
}

pub fn companies_for(industry: Industry) -> &'static [&'static str] {
    match industry {
        Industry::Fintech => &[
            "FinanceFlow Inc",
            "PaymentPro Solutions",
            "TradeTech Systems",
            "InvestSmart Corp",
        ],
        Industry::Healthcare => &[
            "HealthTech Solutions",
            "MedData Systems",
            "CareConnect Inc",
            "HealthFlow Technologies",
        ],
        Industry::Ecommerce => &[
            "ShopSmart Technologies",
            "RetailFlow Inc",
            "CommerceHub Solutions",
            "MarketPlace Systems",
        ],
        Industry::Saas => &[
            "CloudTech Solutions",
            "SaaS Innovations Inc",
            "Enterprise Software Corp",
            "TechFlow Systems",
        ],
        Industry::Startup => &[
            "InnovateTech Startup",
            "NextGen Solutions",
            "DisruptTech Inc",
            "AgileFlow Technologies",
        ],
        Industry::Enterprise => &[
            "Global Tech Corporation",
            "Enterprise Solutions Inc",
            "TechCorp International",
            "SystemsFlow Enterprise",
        ],
        Industry::Technology => GENERIC_COMPANIES,
    }
}

pub const GENERIC_COMPANIES: &[&str] = &["TechFlow Solutions", "BrightPath Software", "Northwind Digital"];

/// An achievement sentence and the skills that unlock it (any one is enough).
pub struct GatedAchievement {
    pub any_of: &'static [&'static str],
    pub text: &'static str,
}

pub const STACK_ACHIEVEMENTS: &[GatedAchievement] = &[
    GatedAchievement {
        any_of: &["react", "javascript"],
        text: "Developed responsive web applications using React.js and modern JavaScript, improving user engagement by 40%",
    },
    GatedAchievement {
        any_of: &["node.js", "api"],
        text: "Built and maintained RESTful APIs using Node.js, handling 10,000+ daily requests with 99.9% uptime",
    },
    GatedAchievement {
        any_of: &["aws", "docker"],
        text: "Implemented cloud infrastructure on AWS with Docker containerization, reducing deployment time by 60%",
    },
    GatedAchievement {
        any_of: &["python"],
        text: "Automated data processing workflows using Python, reducing manual work by 75% and improving accuracy",
    },
];

pub const LEADERSHIP_ACHIEVEMENTS: &[&str] = &[
    "Led a team of 5 developers in delivering critical features ahead of schedule, resulting in 25% faster time-to-market",
    "Mentored junior developers and established coding standards, improving code quality and team productivity",
];

pub const COLLABORATION_ACHIEVEMENT: &str = "Collaborated with cross-functional teams including design, product, and QA to deliver high-quality software solutions";

pub const DATABASE_ACHIEVEMENT: GatedAchievement = GatedAchievement {
    any_of: &["database", "postgresql", "mongodb"],
    text: "Optimized database queries and implemented caching strategies, improving application performance by 50%",
};

pub const MAX_ACHIEVEMENTS_PER_ENTRY: usize = 4;

/// Skill groupings for the TECHNICAL SKILLS section, in display order.
pub const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Programming Languages",
        &["javascript", "python", "java", "typescript"],
    ),
    (
        "Frontend Technologies",
        &["react", "angular", "vue", "html", "css"],
    ),
    (
        "Backend Technologies",
        &["node.js", "express", "django", "flask"],
    ),
    ("Databases", &["mongodb", "postgresql", "mysql"]),
    ("Cloud & DevOps", &["aws", "docker", "kubernetes", "ci/cd"]),
];

pub const ADDITIONAL_SKILLS_LABEL: &str = "Additional Technologies";
pub const TOOLS_LINE: &str =
    "Tools & Methodologies: Git, Agile/Scrum, Test-Driven Development, Code Review";

pub const PLACEHOLDER_NAME: &str = "Alex Johnson";
pub const PLACEHOLDER_CONTACT: &[&str] = &[
    "alex.johnson@email.com",
    "(555) 123-4567",
    "linkedin.com/in/alexjohnson",
    "San Francisco, CA",
];

pub const PLACEHOLDER_EDUCATION: &str = "Bachelor of Science in Computer Science\n\
    University of Technology | 2018\n\
    Relevant Coursework: Data Structures, Algorithms, Software Engineering, Database Systems";

pub const PLACEHOLDER_CERTIFICATIONS: &[&str] = &[
    "AWS Certified Developer Associate",
    "Certified Scrum Master (CSM)",
    "Contributed to open-source projects with 500+ GitHub stars",
    "Speaker at local tech meetups on modern web development practices",
];

/// Canonical spelling for vocabulary skills when used in prose.
pub fn display_name(skill: &str) -> String {
    let name = match skill {
        "javascript" => "JavaScript",
        "python" => "Python",
        "java" => "Java",
        "react" => "React",
        "angular" => "Angular",
        "vue" => "Vue",
        "node.js" => "Node.js",
        "express" => "Express",
        "mongodb" => "MongoDB",
        "postgresql" => "PostgreSQL",
        "mysql" => "MySQL",
        "aws" => "AWS",
        "azure" => "Azure",
        "docker" => "Docker",
        "kubernetes" => "Kubernetes",
        "git" => "Git",
        "ci/cd" => "CI/CD",
        "jenkins" => "Jenkins",
        "terraform" => "Terraform",
        "microservices" => "microservices",
        "api" => "API",
        "rest" => "REST",
        "graphql" => "GraphQL",
        "typescript" => "TypeScript",
        "html" => "HTML",
        "css" => "CSS",
        "sass" => "Sass",
        "webpack" => "Webpack",
        "babel" => "Babel",
        "redux" => "Redux",
        "next.js" => "Next.js",
        "nuxt.js" => "Nuxt.js",
        "django" => "Django",
        "flask" => "Flask",
        "spring" => "Spring",
        "laravel" => "Laravel",
        other => return other.to_string(),
    };
    name.to_string()
}
