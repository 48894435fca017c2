//! Built-in professional vocabulary. Terms are stored lowercase; multi-word
//! terms are matched as phrases by the normalizer's phrase index.

use super::{Taxonomy, TechDomain};

const LANGUAGES: &[&str] = &[
    "python", "javascript", "java", "c++", "c#", "php", "ruby", "go", "rust", "swift", "kotlin",
    "scala", "typescript", "html", "css", "sql", "r", "matlab", "sas", "stata", "vba",
    "powershell", "bash",
];

const FRAMEWORKS: &[&str] = &[
    "react", "angular", "vue", "node.js", "express", "django", "flask", "spring", "laravel",
    "asp.net", "jquery", "bootstrap", "tailwind", "material-ui", "redux", "vuex", "next.js",
    "nuxt.js", "nestjs", "fastapi", "rails",
];

const WEB3: &[&str] = &[
    "web3", "blockchain", "ethereum", "bitcoin", "solidity", "smart contract", "defi", "nft",
    "metamask", "hardhat", "truffle", "ganache", "ipfs", "polygon", "binance smart chain",
    "layer 2", "rollup", "optimism", "arbitrum", "uniswap", "aave", "compound", "chainlink",
];

const DATABASES: &[&str] = &[
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "oracle", "sql server", "sqlite",
    "dynamodb", "firebase", "cassandra", "neo4j", "influxdb", "couchdb", "graphql", "nosql",
];

const CLOUD: &[&str] = &[
    "aws", "azure", "gcp", "heroku", "digitalocean", "linode", "cloudflare", "ec2", "s3",
    "lambda", "rds", "cloudfront", "route53",
];

const DEVOPS: &[&str] = &[
    "docker", "kubernetes", "jenkins", "gitlab ci", "github actions", "travis ci", "circleci",
    "terraform", "ansible", "chef", "puppet", "prometheus", "grafana", "elk stack", "ci/cd",
];

const DATA: &[&str] = &[
    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras", "spark", "hadoop",
    "kafka", "airflow", "dbt", "snowflake", "databricks", "tableau", "power bi", "looker",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "critical thinking",
    "creativity", "adaptability", "time management", "organization", "attention to detail",
    "analytical skills", "project management", "collaboration", "mentoring",
    "presentation skills", "negotiation", "customer service", "public speaking", "writing",
];

const INDUSTRIES: &[(&str, &[&str])] = &[
    (
        "software development",
        &[
            "agile", "scrum", "sdlc", "api", "microservices", "full stack", "frontend", "backend",
        ],
    ),
    (
        "data science",
        &[
            "machine learning", "artificial intelligence", "statistics", "data analysis",
            "predictive modeling", "nlp", "computer vision",
        ],
    ),
    (
        "finance",
        &[
            "financial modeling", "risk management", "portfolio management", "trading",
            "compliance", "audit",
        ],
    ),
    (
        "marketing",
        &[
            "digital marketing", "seo", "sem", "social media", "content marketing",
            "email marketing", "analytics",
        ],
    ),
    (
        "healthcare",
        &[
            "patient care", "clinical", "medical", "healthcare", "pharmaceutical", "fda", "hipaa",
        ],
    ),
    (
        "education",
        &[
            "curriculum", "teaching", "instructional design", "assessment", "academic",
        ],
    ),
];

const SYNONYMS: &[(&str, &str)] = &[
    ("golang", "go"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("vuejs", "vue"),
    ("vue.js", "vue"),
    ("angularjs", "angular"),
    ("nodejs", "node.js"),
    ("node", "node.js"),
    ("nextjs", "next.js"),
    ("k8s", "kubernetes"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("es", "elasticsearch"),
    ("tf", "terraform"),
    ("sklearn", "scikit-learn"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("amazon web services", "aws"),
    ("google cloud", "gcp"),
    ("bsc", "binance smart chain"),
];

pub(super) fn build() -> Taxonomy {
    let mut builder = Taxonomy::builder()
        .technical(TechDomain::Languages, LANGUAGES.iter().copied())
        .technical(TechDomain::Frameworks, FRAMEWORKS.iter().copied())
        .technical(TechDomain::Web3, WEB3.iter().copied())
        .technical(TechDomain::Databases, DATABASES.iter().copied())
        .technical(TechDomain::Cloud, CLOUD.iter().copied())
        .technical(TechDomain::DevOps, DEVOPS.iter().copied())
        .technical(TechDomain::Data, DATA.iter().copied())
        .soft(SOFT_SKILLS.iter().copied());
    for (industry, terms) in INDUSTRIES {
        builder = builder.industry(industry, terms.iter().copied());
    }
    for (alias, canonical) in SYNONYMS {
        builder = builder.synonym(alias, canonical);
    }
    builder.build()
}
