//! Canned values offered next to the free-text fields of the form.

pub const ROLE_SUGGESTIONS: [&str; 8] = [
    "Expert Software Engineer",
    "Data Scientist",
    "Content Writer",
    "Marketing Specialist",
    "UX Designer",
    "Project Manager",
    "Technical Writer",
    "Business Analyst",
];

pub const CONSTRAINT_SUGGESTIONS: [&str; 7] = [
    "Use only plain English",
    "Assume reader is moderately literate",
    "Output in JSON format",
    "Keep response under 500 words",
    "Include code examples",
    "Use bullet points for clarity",
    "Provide step-by-step instructions",
];
