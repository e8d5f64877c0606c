//! Built-in sample postings served when the live source is unavailable

use crate::jobs::models::JobPosting;

struct SamplePosting {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    salary: &'static str,
    description: &'static str,
}

const SAMPLE_POSTINGS: [SamplePosting; 5] = [
    SamplePosting {
        id: "mock_001",
        title: "Senior Python Developer",
        company: "Tech Innovations Inc",
        location: "Bangalore, India",
        salary: "INR 1,200,000 - 1,600,000",
        description: "We are looking for a Senior Python Developer with 5+ years of experience. \
                      Required skills: Python, Django, REST APIs, PostgreSQL, Docker, AWS",
    },
    SamplePosting {
        id: "mock_002",
        title: "Full Stack JavaScript Developer",
        company: "Digital Solutions Ltd",
        location: "Mumbai, India",
        salary: "INR 900,000 - 1,300,000",
        description: "Looking for Full Stack JavaScript Developer. \
                      Skills: React, Node.js, MongoDB, Express, JavaScript",
    },
    SamplePosting {
        id: "mock_003",
        title: "Data Scientist",
        company: "Analytics Pro",
        location: "Hyderabad, India",
        salary: "INR 1,000,000 - 1,500,000",
        description: "Seeking Data Scientist with expertise in Machine Learning. \
                      Skills: Python, SQL, ML, TensorFlow, Data Analysis",
    },
    SamplePosting {
        id: "mock_004",
        title: "DevOps Engineer",
        company: "Cloud Systems",
        location: "Pune, India",
        salary: "INR 1,100,000 - 1,400,000",
        description: "DevOps Engineer needed for infrastructure management. \
                      Skills: Docker, Kubernetes, AWS, CI/CD, Linux",
    },
    SamplePosting {
        id: "mock_005",
        title: "Frontend React Developer",
        company: "Web Design Studios",
        location: "Delhi, India",
        salary: "INR 700,000 - 1,100,000",
        description: "Experienced React Developer wanted. \
                      Skills: React, JavaScript, CSS, HTML, Redux, Material-UI",
    },
];

/// The first `limit` sample postings, in fixed order
pub fn sample_jobs(limit: usize) -> Vec<JobPosting> {
    SAMPLE_POSTINGS
        .iter()
        .take(limit)
        .map(|sample| JobPosting {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            company: sample.company.to_string(),
            location: sample.location.to_string(),
            salary: sample.salary.to_string(),
            job_type: "FULLTIME".to_string(),
            description: sample.description.to_string(),
            apply_link: "#".to_string(),
            posted_date: "2025-12-01T00:00:00Z".to_string(),
        })
        .collect()
}
