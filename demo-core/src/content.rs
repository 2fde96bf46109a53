//! Placeholder resume shown by the demo page.

pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub bio: &'static str,
    pub location: &'static str,
    pub email: &'static str,
    pub github: &'static str,
    pub linkedin: &'static str,
}

pub struct Job {
    pub title: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub highlights: &'static [&'static str],
}

pub struct Degree {
    pub title: &'static str,
    pub school: &'static str,
    pub period: &'static str,
}

pub struct SkillGroup {
    pub name: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug)]
pub struct Project {
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub const PROFILE: Profile = Profile {
    name: "Alex Example",
    role: "Software Engineer",
    bio: "Builds fast interfaces and the services behind them. Enjoys profiling, \
          type systems and small tools that remove busywork.",
    location: "Somewhere, Earth",
    email: "alex@example.com",
    github: "https://github.com/example",
    linkedin: "https://www.linkedin.com/in/example",
};

pub const JOBS: &[Job] = &[
    Job {
        title: "Senior Engineer",
        company: "Example Systems",
        period: "2022 - present",
        highlights: &[
            "Led the rewrite of the rendering pipeline",
            "Cut p99 latency of the public api in half",
        ],
    },
    Job {
        title: "Software Engineer",
        company: "Sample Labs",
        period: "2019 - 2022",
        highlights: &[
            "Shipped the offline mode of the mobile client",
            "Maintained the internal design system",
        ],
    },
    Job {
        title: "Intern",
        company: "Demo Corp",
        period: "2018",
        highlights: &["Wrote integration tests for the billing service"],
    },
];

pub const DEGREES: &[Degree] = &[Degree {
    title: "BSc Computer Science",
    school: "University of Examples",
    period: "2015 - 2019",
}];

pub const SKILLS: &[SkillGroup] = &[
    SkillGroup {
        name: "Languages",
        skills: &["Rust", "TypeScript", "Python", "SQL"],
    },
    SkillGroup {
        name: "Frontend",
        skills: &["egui", "React", "WebGL"],
    },
    SkillGroup {
        name: "Backend",
        skills: &["tokio", "PostgreSQL", "Redis", "gRPC"],
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Graph Explorer",
        category: "Web",
        description: "Interactive force-directed view of large dependency graphs.",
        tags: &["wasm", "egui"],
    },
    Project {
        title: "Tiny Cache",
        category: "Systems",
        description: "Embedded key-value cache with an LRU eviction policy.",
        tags: &["rust", "storage"],
    },
    Project {
        title: "Log Lens",
        category: "Tools",
        description: "Command line filter for structured logs.",
        tags: &["cli"],
    },
    Project {
        title: "Portfolio",
        category: "Web",
        description: "This page: a resume with pointer effects.",
        tags: &["egui", "design"],
    },
];
